//! Slack data types as returned by the Web API.
//!
//! Only the fields the export needs are deserialized; everything else in the
//! API payloads is ignored.
//!
//! # Examples
//!
//! ```
//! use slackpurge::message::{SlackMessage, format_ts};
//!
//! let msg = SlackMessage::new("1700000000.000100").with_user("U123").with_text("hello");
//! assert_eq!(msg.sender(), "U123");
//! assert_eq!(format_ts(&msg.ts)?, "2023-11-14 22:13:20");
//! # Ok::<(), slackpurge::Error>(())
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Display format for message timestamps in the export file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A conversation container in a Slack workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Opaque channel id, e.g. `C024BE91L`.
    pub id: String,

    /// Channel name without the leading `#`.
    ///
    /// Direct-message conversations have no name; they deserialize to an
    /// empty string and never match a lookup.
    #[serde(default)]
    pub name: String,
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Returns `true` if this channel is the one a user typed, with or
    /// without a single leading `#`.
    pub fn matches(&self, query: &str) -> bool {
        !self.name.is_empty() && self.name == lookup_name(query)
    }
}

/// Strips at most one leading `#` from a user-supplied channel name.
///
/// ```
/// use slackpurge::message::lookup_name;
///
/// assert_eq!(lookup_name("#general"), "general");
/// assert_eq!(lookup_name("general"), "general");
/// assert_eq!(lookup_name("##general"), "#general");
/// ```
pub fn lookup_name(query: &str) -> &str {
    query.strip_prefix('#').unwrap_or(query)
}

/// Finds the first channel matching a user-supplied name.
pub fn find_channel<'a>(channels: &'a [Channel], query: &str) -> Option<&'a Channel> {
    channels.iter().find(|channel| channel.matches(query))
}

/// A single message from `conversations.history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    /// Platform timestamp, e.g. `"1700000000.000100"`. Doubles as the
    /// message id within its channel.
    pub ts: String,

    /// Sender user id. Absent for some bot and system messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Message text. Absent for some attachment-only messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl SlackMessage {
    pub fn new(ts: impl Into<String>) -> Self {
        Self {
            ts: ts.into(),
            user: None,
            text: None,
        }
    }

    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sender id, or an empty string when absent.
    pub fn sender(&self) -> &str {
        self.user.as_deref().unwrap_or_default()
    }

    /// Message text, or an empty string when absent.
    pub fn content(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Parses `ts` into a UTC datetime.
    pub fn timestamp(&self) -> Result<DateTime<Utc>> {
        parse_ts(&self.ts)
    }
}

/// Parses a Slack `ts` (fractional seconds since the Unix epoch).
///
/// The value is rounded to microsecond precision.
pub fn parse_ts(ts: &str) -> Result<DateTime<Utc>> {
    let seconds: f64 = ts
        .trim()
        .parse()
        .map_err(|_| Error::invalid_timestamp(ts))?;
    if !seconds.is_finite() {
        return Err(Error::invalid_timestamp(ts));
    }

    #[allow(clippy::cast_possible_truncation)]
    let micros = (seconds * 1_000_000.0).round() as i64;
    DateTime::from_timestamp_micros(micros).ok_or_else(|| Error::invalid_timestamp(ts))
}

/// Formats a Slack `ts` as `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn format_ts(ts: &str) -> Result<String> {
    Ok(parse_ts(ts)?.format(TIMESTAMP_FORMAT).to_string())
}
