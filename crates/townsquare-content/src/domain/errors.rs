//! Errors raised while loading reference documents.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why the reference library could not be loaded.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The directory could not be listed.
    #[error("failed to read {} directory: {source}", dir.display())]
    ReadDirectory {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A document or its metadata could not be read.
    #[error("failed to read {} file: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A document is not valid JSON of the expected shape.
    #[error("failed to parse {} file: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two scripts share an id.
    #[error("duplicate script id {0:?}")]
    DuplicateScriptId(String),
}
