//! # slackpurge CLI
//!
//! Command-line interface for the slackpurge library.

use std::io::{self, IsTerminal};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use slackpurge::Error;
use slackpurge::api::SlackClient;
use slackpurge::cli::{Args, Command};
use slackpurge::commands::{self, ProcessOptions};

fn main() {
    // Must run before argument parsing so `.env` can supply SLACK_API_TOKEN.
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .try_init()
        .ok();
}

fn run() -> Result<(), Error> {
    let args = Args::parse();
    let client = SlackClient::new(args.config()?)?;

    match args.command {
        Command::ListChannels => commands::list_channels(&client).log(),
        Command::Dump {
            channel_name,
            output,
        } => commands::dump(&client, &channel_name, output.as_deref())?.log(),
        Command::Process { csv_file, dry_run } => {
            let options = ProcessOptions::new().with_dry_run(dry_run);
            commands::process(&client, &csv_file, &options)?.log();
        }
    }

    Ok(())
}
