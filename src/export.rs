//! The export file: one CSV row per message.
//!
//! # Format
//! - Delimiter: `,`
//! - Line terminator: `\r\n`
//! - Columns: `delete_or_not`, `timestamp`, `sender username`, `content`,
//!   `ts`, `channel_id`
//! - Encoding: UTF-8
//!
//! `delete_or_not` is written empty. A user marks rows for deletion by
//! putting `X` (any case) in it; `ts` and `channel_id` must be left alone,
//! since together they identify the message to delete.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::message::{SlackMessage, format_ts};

/// Header row of every export file.
pub const HEADER: [&str; COLUMN_COUNT] = [
    "delete_or_not",
    "timestamp",
    "sender username",
    "content",
    "ts",
    "channel_id",
];

/// Number of columns in the export format.
pub const COLUMN_COUNT: usize = 6;

/// Marker value that flags a row for deletion (compared case-insensitively).
pub const DELETE_MARKER: &str = "X";

/// One line of the export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    /// The user-editable deletion marker.
    pub marker: String,
    /// `ts` rendered as `YYYY-MM-DD HH:MM:SS` UTC.
    pub timestamp: String,
    pub sender: String,
    pub content: String,
    /// Raw Slack `ts`, preserved byte for byte.
    pub ts: String,
    pub channel_id: String,
}

impl ExportRow {
    /// Builds an unmarked row for a message in `channel_id`.
    pub fn from_message(msg: &SlackMessage, channel_id: &str) -> Result<Self> {
        Ok(Self {
            marker: String::new(),
            timestamp: format_ts(&msg.ts)?,
            sender: msg.sender().to_string(),
            content: msg.content().to_string(),
            ts: msg.ts.clone(),
            channel_id: channel_id.to_string(),
        })
    }

    /// Returns `true` if the user marked this row for deletion.
    ///
    /// Only the exact value `X` or `x` counts; surrounding whitespace or any
    /// other text leaves the row alone.
    pub fn is_marked(&self) -> bool {
        is_delete_marker(&self.marker)
    }

    fn to_record(&self) -> [&str; COLUMN_COUNT] {
        [
            self.marker.as_str(),
            self.timestamp.as_str(),
            self.sender.as_str(),
            self.content.as_str(),
            self.ts.as_str(),
            self.channel_id.as_str(),
        ]
    }

    fn from_record(record: &csv::StringRecord) -> Option<Self> {
        if record.len() != COLUMN_COUNT {
            return None;
        }
        Some(Self {
            marker: record[0].to_string(),
            timestamp: record[1].to_string(),
            sender: record[2].to_string(),
            content: record[3].to_string(),
            ts: record[4].to_string(),
            channel_id: record[5].to_string(),
        })
    }
}

/// Returns `true` if `marker`, uppercased, is exactly [`DELETE_MARKER`].
pub fn is_delete_marker(marker: &str) -> bool {
    marker.to_uppercase() == DELETE_MARKER
}

/// Writes the header and `rows` to any writer.
pub fn write_rows<W: io::Write>(writer: W, rows: &[ExportRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record(row.to_record())?;
    }

    writer.flush()?;
    Ok(())
}

/// Creates (or truncates) the export file at `path` and writes `rows` to it.
pub fn write_export(path: impl AsRef<Path>, rows: &[ExportRow]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_rows(file, rows)
}

/// Renders rows as an export-format string.
pub fn to_csv(rows: &[ExportRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_rows(&mut buf, rows)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Streams the data rows of an export file, skipping the header.
///
/// Rows are parsed one at a time in file order; a malformed row surfaces as
/// an error when the iterator reaches it.
pub struct ExportReader {
    path: PathBuf,
    records: csv::StringRecordsIntoIter<File>,
}

impl ExportReader {
    /// Opens the export file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        Ok(Self {
            path,
            records: reader.into_records(),
        })
    }
}

impl Iterator for ExportReader {
    type Item = Result<ExportRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(err) => return Some(Err(err.into())),
        };

        Some(ExportRow::from_record(&record).ok_or_else(|| {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            Error::malformed_row(&self.path, line, record.len())
        }))
    }
}

/// Reads every data row of an export file, skipping the header.
///
/// Fails on the first malformed row.
pub fn read_export(path: impl AsRef<Path>) -> Result<Vec<ExportRow>> {
    ExportReader::open(path)?.collect()
}
