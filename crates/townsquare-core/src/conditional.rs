//! Conditional-request evaluation over entity tags and modification times.
//!
//! Header values are passed in verbatim; parsing happens here so that the
//! rules are the same for every resource, mutable or not.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// IMF-fixdate, the only date format emitted or accepted.
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Formats `time` as an HTTP date.
#[must_use]
pub fn format_http_date(time: DateTime<Utc>) -> String {
    time.format(HTTP_DATE_FORMAT).to_string()
}

/// Parses an HTTP date, returning `None` for anything that is not IMF-fixdate.
#[must_use]
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), HTTP_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Strips whitespace and the quotes around the opaque part of a tag, so that
/// `W/"5"` and `W/5` compare equal.
fn normalize_tag(tag: &str) -> (bool, &str) {
    let tag = tag.trim();
    let (weak, opaque) = match tag.strip_prefix("W/") {
        Some(rest) => (true, rest),
        None => (false, tag),
    };
    (weak, opaque.trim_matches('"'))
}

/// Whether a tag-list header (`*` or comma separated tags) names `current`.
fn tag_list_matches(header: &str, current: &str) -> bool {
    if header.trim() == "*" {
        return true;
    }
    let current = normalize_tag(current);
    header.split(',').any(|tag| normalize_tag(tag) == current)
}

/// Validators a reader presented on a GET.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadConditions {
    /// Raw `If-None-Match` header.
    pub if_none_match: Option<String>,
    /// Raw `If-Modified-Since` header.
    pub if_modified_since: Option<String>,
}

impl ReadConditions {
    /// Whether the reader's copy is current, so the body can be omitted.
    ///
    /// With no validators the answer is always `false`. Otherwise the body is
    /// due if the tag differs, or the date is unreadable, or the resource was
    /// modified after it.
    #[must_use]
    pub fn is_not_modified(&self, etag: &str, last_modified: DateTime<Utc>) -> bool {
        if self.if_none_match.is_none() && self.if_modified_since.is_none() {
            return false;
        }
        let tag_changed = self
            .if_none_match
            .as_deref()
            .is_some_and(|header| !tag_list_matches(header, etag));
        let time_changed = self.if_modified_since.as_deref().is_some_and(|header| {
            parse_http_date(header).is_none_or(|since| last_modified > since)
        });
        !(tag_changed || time_changed)
    }
}

/// Why a writer's precondition did not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionFailure {
    /// `If-Match` names a different version.
    #[error("If-Match does not match the current version tag")]
    TagMismatch,

    /// `If-Unmodified-Since` is unreadable or older than the last change.
    #[error("resource was modified after If-Unmodified-Since")]
    ModifiedSince,
}

/// Validators a writer presented on an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteConditions {
    /// Raw `If-Match` header.
    pub if_match: Option<String>,
    /// Raw `If-Unmodified-Since` header.
    pub if_unmodified_since: Option<String>,
}

impl WriteConditions {
    /// Checks the writer's validators against the current representation.
    ///
    /// # Errors
    ///
    /// Returns the first `PreconditionFailure` found.
    pub fn check(&self, etag: &str, last_modified: DateTime<Utc>) -> Result<(), PreconditionFailure> {
        if let Some(header) = self.if_match.as_deref() {
            if !tag_list_matches(header, etag) {
                return Err(PreconditionFailure::TagMismatch);
            }
        }
        if let Some(header) = self.if_unmodified_since.as_deref() {
            match parse_http_date(header) {
                Some(since) if last_modified <= since => {}
                _ => return Err(PreconditionFailure::ModifiedSince),
            }
        }
        Ok(())
    }
}
