//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - top-level arguments, including the global `--token`
//! - [`Command`] - the `list-channels`, `dump`, and `process` subcommands

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{API_BASE_ENV, Config, DEFAULT_API_BASE, TOKEN_ENV};
use crate::error::Result;

/// List Slack channels, dump a channel's history to CSV, and delete the
/// messages you mark in it.
#[derive(Parser, Debug, Clone)]
#[command(name = "slackpurge")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    slackpurge list-channels
    slackpurge dump '#general'
    slackpurge process '#general.csv'
    slackpurge process general.csv --dry-run --token xoxp-...")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Slack API token
    #[arg(long, global = true, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Slack Web API root
    #[arg(long, global = true, env = API_BASE_ENV, default_value = DEFAULT_API_BASE, hide = true)]
    pub api_base: String,
}

impl Args {
    /// Builds the runtime configuration from the parsed arguments.
    pub fn config(&self) -> Result<Config> {
        Ok(Config::from_token(self.token.clone())?.with_api_base(self.api_base.as_str()))
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all available channels.
    ListChannels,

    /// Dump messages from a channel to a CSV file.
    Dump {
        /// Channel name, with or without a leading '#'
        channel_name: String,

        /// Output file [default: <CHANNEL_NAME>.csv]
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Process a CSV file and delete messages marked with 'X'.
    Process {
        /// CSV file produced by `dump`
        csv_file: PathBuf,

        /// Show which messages would be deleted without deleting them
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_list_channels() {
        let args = parse(&["slackpurge", "list-channels", "--token", "xoxb-1"]);
        assert_eq!(args.command, Command::ListChannels);
        assert_eq!(args.token.as_deref(), Some("xoxb-1"));
    }

    #[test]
    fn test_dump() {
        let args = parse(&["slackpurge", "--token", "t", "dump", "#general"]);
        assert_eq!(
            args.command,
            Command::Dump {
                channel_name: "#general".to_string(),
                output: None,
            }
        );
    }

    #[test]
    fn test_process_dry_run() {
        let args = parse(&["slackpurge", "process", "general.csv", "--dry-run", "--token", "t"]);
        assert_eq!(
            args.command,
            Command::Process {
                csv_file: PathBuf::from("general.csv"),
                dry_run: true,
            }
        );
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(Args::try_parse_from(["slackpurge"]).is_err());
    }

    #[test]
    fn test_config_from_args() {
        let args = parse(&[
            "slackpurge",
            "list-channels",
            "--token",
            "xoxb-1",
            "--api-base",
            "http://localhost:9/api/",
        ]);
        let config = args.config().unwrap();
        assert_eq!(config.token(), "xoxb-1");
        assert_eq!(config.api_base(), "http://localhost:9/api");
    }
}
