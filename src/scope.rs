//! Checklist rendering for `missing_scope` errors.
//!
//! When a token lacks a permission, Slack answers with the full list of
//! scopes the method needs and the scopes the token has. The checklist shows
//! every needed scope, ticked when the token already has it:
//!
//! ```text
//! Missing scopes to run this command:
//!   - [x] channels:read
//!   - [ ] chat:write
//! ```

use std::collections::BTreeSet;

use tracing::error;

use crate::error::ApiError;

/// Renders the checklist for a `missing_scope` error.
///
/// Returns `None` for any other error, or when Slack omitted either scope
/// list. Callers should log the raw error in that case.
pub fn format_scope_error(err: &ApiError) -> Option<String> {
    let ApiError::Slack {
        needed: Some(needed),
        provided: Some(provided),
        ..
    } = err
    else {
        return None;
    };
    if !err.is_missing_scope() {
        return None;
    }

    Some(render_checklist(needed, provided))
}

/// Like [`format_scope_error`], but also logs the checklist at error level.
pub fn report_scope_error(err: &ApiError) -> Option<String> {
    let msg = format_scope_error(err)?;
    error!("{msg}");
    Some(msg)
}

fn render_checklist(needed: &str, provided: &str) -> String {
    let needed: BTreeSet<&str> = needed.split(',').collect();
    let provided: BTreeSet<&str> = provided.split(',').collect();

    let items: Vec<String> = needed
        .iter()
        .map(|scope| {
            let mark = if provided.contains(scope) { "x" } else { " " };
            format!("[{mark}] {scope}")
        })
        .collect();

    format!("Missing scopes to run this command:\n  - {}", items.join("\n  - "))
}
