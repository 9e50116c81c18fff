//! Conditional-request validators read from request headers.

use axum::http::HeaderMap;
use axum::http::header::{
    HeaderName, IF_MATCH, IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_UNMODIFIED_SINCE,
};
use townsquare_core::conditional::{ReadConditions, WriteConditions};

/// All values of a tag-list header, joined into one list.
fn tag_list(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    let values: Vec<String> = headers
        .get_all(name)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .collect();
    (!values.is_empty()).then(|| values.join(", "))
}

fn date(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}

/// `If-None-Match` and `If-Modified-Since`.
#[must_use]
pub fn read_conditions(headers: &HeaderMap) -> ReadConditions {
    ReadConditions {
        if_none_match: tag_list(headers, &IF_NONE_MATCH),
        if_modified_since: date(headers, &IF_MODIFIED_SINCE),
    }
}

/// `If-Match` and `If-Unmodified-Since`.
#[must_use]
pub fn write_conditions(headers: &HeaderMap) -> WriteConditions {
    WriteConditions {
        if_match: tag_list(headers, &IF_MATCH),
        if_unmodified_since: date(headers, &IF_UNMODIFIED_SINCE),
    }
}
