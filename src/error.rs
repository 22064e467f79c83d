//! Unified error types for slackpurge.
//!
//! Two layers of errors live here:
//!
//! - [`ApiError`] describes a single failed Slack Web API call. Commands catch
//!   these per item and turn them into log output; they never abort a run.
//! - [`Error`] covers everything else (files, CSV, configuration). These
//!   propagate to `main` and end the process with a non-zero exit code.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for slackpurge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Slack error code for calls made with a token lacking a required scope.
pub const MISSING_SCOPE: &str = "missing_scope";

/// The error type for file, configuration, and CSV failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The export file doesn't exist
    /// - Permission denied when creating the output file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Reading or writing the export CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row in the export file doesn't have the six expected fields.
    #[error("Malformed row at line {line} in {}: expected {expected} fields, found {found}", path.display())]
    MalformedRow {
        /// File being processed
        path: PathBuf,
        /// 1-based line number of the row
        line: u64,
        /// Number of columns the export format defines
        expected: usize,
        /// Number of columns actually present
        found: usize,
    },

    /// A message `ts` couldn't be interpreted as a Unix timestamp.
    #[error("Invalid message timestamp '{ts}'")]
    InvalidTimestamp {
        /// The raw `ts` value
        ts: String,
    },

    /// No API token was supplied via flag, environment, or `.env`.
    #[error("No Slack API token provided. Pass --token or set SLACK_API_TOKEN")]
    MissingToken,

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    /// Creates a malformed row error.
    pub fn malformed_row(path: impl Into<PathBuf>, line: u64, found: usize) -> Self {
        Error::MalformedRow {
            path: path.into(),
            line,
            expected: crate::export::COLUMN_COUNT,
            found,
        }
    }

    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(ts: impl Into<String>) -> Self {
        Error::InvalidTimestamp { ts: ts.into() }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Returns `true` if the export file contained a malformed row.
    pub fn is_malformed_row(&self) -> bool {
        matches!(self, Error::MalformedRow { .. })
    }
}

/// A failed Slack Web API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable HTTP response.
    #[error("request to {method} failed: {source}")]
    Transport {
        /// Web API method name, e.g. `conversations.list`
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Slack answered with `"ok": false`.
    ///
    /// `needed` and `provided` are only present for `missing_scope` errors
    /// and hold comma-separated scope names.
    #[error("{method} returned error: {code}")]
    Slack {
        /// Web API method name
        method: &'static str,
        /// Machine-readable error code, e.g. `channel_not_found`
        code: String,
        needed: Option<String>,
        provided: Option<String>,
    },

    /// The response body wasn't the JSON shape the method documents.
    #[error("unexpected response from {method} (HTTP {status}): {source}")]
    Decode {
        method: &'static str,
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Returns the Slack error code, if Slack produced one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Slack { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Returns `true` if this is a `missing_scope` error.
    pub fn is_missing_scope(&self) -> bool {
        self.code() == Some(MISSING_SCOPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slack_error(code: &str) -> ApiError {
        ApiError::Slack {
            method: "chat.delete",
            code: code.to_string(),
            needed: None,
            provided: None,
        }
    }

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = Error::from(io_err);
        assert!(err.is_io());
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_malformed_row_display() {
        let err = Error::malformed_row("general.csv", 3, 4);
        assert!(err.is_malformed_row());
        let display = err.to_string();
        assert!(display.contains("line 3"));
        assert!(display.contains("general.csv"));
        assert!(display.contains("expected 6 fields, found 4"));
    }

    #[test]
    fn test_invalid_timestamp_display() {
        let err = Error::invalid_timestamp("yesterday");
        assert_eq!(err.to_string(), "Invalid message timestamp 'yesterday'");
    }

    #[test]
    fn test_missing_token_mentions_env_var() {
        assert!(Error::MissingToken.to_string().contains("SLACK_API_TOKEN"));
    }

    #[test]
    fn test_api_error_code() {
        let err = slack_error("channel_not_found");
        assert_eq!(err.code(), Some("channel_not_found"));
        assert!(!err.is_missing_scope());
        assert_eq!(
            err.to_string(),
            "chat.delete returned error: channel_not_found"
        );
    }

    #[test]
    fn test_api_error_missing_scope() {
        assert!(slack_error(MISSING_SCOPE).is_missing_scope());
    }

    #[test]
    fn test_decode_error_has_no_code() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = ApiError::Decode {
            method: "conversations.list",
            status: 502,
            source,
        };
        assert_eq!(err.code(), None);
        assert!(err.to_string().contains("HTTP 502"));
    }
}
