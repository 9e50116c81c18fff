//! Shapes of the documents kept in the reference library.
//!
//! These types only gate what is accepted at load time. The bytes that were
//! read are what gets served, so field order and formatting survive.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A file holding one or more scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptFile {
    /// Who wrote the scripts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Where the scripts were published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The scripts themselves.
    pub scripts: Vec<Script>,
}

/// A named selection of characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Script {
    /// Identifier, unique across every loaded script file.
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<ScriptComplexity>,
    pub tagline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_characters: Vec<String>,
    /// Character ids on the script.
    pub characters: Vec<String>,
}

/// How hard a script is to run and to play.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptComplexity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storyteller: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<f64>,
}

/// A board layout. Any JSON object is accepted.
pub type Layout = Map<String, Value>;
