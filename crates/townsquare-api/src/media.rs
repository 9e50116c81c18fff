//! Media types and request body decoding.

use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use serde_json::Value;
use townsquare_core::error::DomainError;
use townsquare_grimoire::domain::actions::Action;

use crate::error::ApiError;

/// A full game document.
pub const GAME: &str = "application/prs.townsquare.game+json; charset=utf-8";
/// One action.
pub const ACTION: &str = "application/prs.townsquare.action+json; charset=utf-8";
/// A JSON array of actions.
pub const ACTIONS: &str = "application/prs.townsquare.actions+json; charset=utf-8";
/// A script file.
pub const SCRIPT_FILE: &str = "application/prs.townsquare.scriptfile+json; charset=utf-8";
/// A layout.
pub const LAYOUT: &str = "application/prs.townsquare.layout+json; charset=utf-8";

/// The part of a media type before any parameters, lowercased.
fn essence(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn content_type(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(essence)
        .ok_or_else(|| ApiError::UnsupportedMediaType("missing content type".to_owned()))
}

/// Checks that the request body is declared as `expected`.
///
/// # Errors
///
/// Returns `ApiError::UnsupportedMediaType` otherwise.
pub fn require(headers: &HeaderMap, expected: &str) -> Result<(), ApiError> {
    let actual = content_type(headers)?;
    if actual == essence(expected) {
        Ok(())
    } else {
        Err(ApiError::UnsupportedMediaType(actual))
    }
}

/// How a PATCH body carries its actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionBody {
    /// A single action object.
    Single,
    /// An array of action objects.
    List,
}

impl ActionBody {
    /// Picks the body shape from the request's content type.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::UnsupportedMediaType` for anything but the action
    /// and action-list media types.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, ApiError> {
        let actual = content_type(headers)?;
        if actual == essence(ACTION) {
            Ok(Self::Single)
        } else if actual == essence(ACTIONS) {
            Ok(Self::List)
        } else {
            Err(ApiError::UnsupportedMediaType(actual))
        }
    }

    /// Decodes `body` into the batch it describes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the body is not JSON of the
    /// expected shape or names an unknown action kind.
    pub fn decode(self, body: &[u8]) -> Result<Vec<Action>, ApiError> {
        let value: Value = serde_json::from_slice(body).map_err(invalid)?;
        let actions = match (self, value) {
            (Self::Single, value) => vec![Action::try_from(value).map_err(invalid)?],
            (Self::List, Value::Array(values)) => values
                .into_iter()
                .map(Action::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(invalid)?,
            (Self::List, _) => return Err(invalid("expected an array of actions")),
        };
        Ok(actions)
    }
}

fn invalid(err: impl ToString) -> ApiError {
    ApiError::Domain(DomainError::Validation(err.to_string()))
}
