//! Loading and lookup of reference documents.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use chrono::{DateTime, SubsecRound, Utc};
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::documents::{Layout, ScriptFile};
use super::errors::ContentError;

/// A document as read from disk, with the validators it is served under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    /// File name without the `.json` extension.
    pub id: String,
    /// The file's bytes, unmodified.
    pub data: Vec<u8>,
    /// Lowercase hex SHA-256 of `data`.
    pub hash: String,
    /// File modification time, whole seconds.
    pub last_modified: DateTime<Utc>,
}

impl StoredDocument {
    fn new(id: String, data: Vec<u8>, last_modified: DateTime<Utc>) -> Self {
        let hash = hex::encode(Sha256::digest(&data));
        Self {
            id,
            data,
            hash,
            last_modified: last_modified.trunc_subsecs(0),
        }
    }
}

/// Every JSON document found in one directory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct DocumentCatalog {
    documents: HashMap<String, StoredDocument>,
}

impl DocumentCatalog {
    /// Reads every regular `*.json` file in `dir`, decoding each as `T`.
    ///
    /// Files are visited in name order. `on_loaded` sees each decoded
    /// document and can abort the load by returning an error.
    ///
    /// # Errors
    ///
    /// Returns a `ContentError` naming the directory or file that could not
    /// be read or parsed, or whatever `on_loaded` returned.
    pub fn load<T, F>(dir: &Path, mut on_loaded: F) -> Result<Self, ContentError>
    where
        T: DeserializeOwned,
        F: FnMut(&StoredDocument, T) -> Result<(), ContentError>,
    {
        let read_dir = |source| ContentError::ReadDirectory {
            dir: dir.to_path_buf(),
            source,
        };
        let mut entries = fs::read_dir(dir)
            .map_err(read_dir)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_dir)?;
        entries.sort_by_key(fs::DirEntry::file_name);

        let mut documents = HashMap::new();
        for entry in entries {
            let path = entry.path();
            if path.extension() != Some(OsStr::new("json")) {
                continue;
            }
            let read_file = |source| ContentError::ReadFile {
                path: path.clone(),
                source,
            };
            if !entry.file_type().map_err(read_file)?.is_file() {
                continue;
            }
            let Some(id) = path.file_stem().and_then(OsStr::to_str) else {
                warn!(path = %path.display(), "skipping document with non UTF-8 name");
                continue;
            };

            let modified = entry
                .metadata()
                .and_then(|metadata| metadata.modified())
                .map_err(read_file)?;
            let data = fs::read(&path).map_err(read_file)?;
            let decoded: T =
                serde_json::from_slice(&data).map_err(|source| ContentError::Parse {
                    path: path.clone(),
                    source,
                })?;

            let document = StoredDocument::new(id.to_owned(), data, modified.into());
            on_loaded(&document, decoded)?;
            debug!(id = %document.id, hash = %document.hash, "document loaded");
            documents.insert(document.id.clone(), document);
        }
        Ok(Self { documents })
    }

    /// Looks up a document by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&StoredDocument> {
        self.documents.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Script files, layouts, and the index from script id to script file id.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLibrary {
    scripts: DocumentCatalog,
    layouts: DocumentCatalog,
    script_index: HashMap<String, String>,
}

impl ReferenceLibrary {
    /// Loads script files from `scripts_dir` and layouts from `layouts_dir`.
    ///
    /// # Errors
    ///
    /// Returns a `ContentError` if either directory cannot be read, a
    /// document does not parse, or a script id appears twice.
    pub fn load(scripts_dir: &Path, layouts_dir: &Path) -> Result<Self, ContentError> {
        let mut script_index = HashMap::new();
        let scripts = DocumentCatalog::load(scripts_dir, |file, decoded: ScriptFile| {
            for script in decoded.scripts {
                if script_index.contains_key(&script.id) {
                    return Err(ContentError::DuplicateScriptId(script.id));
                }
                script_index.insert(script.id, file.id.clone());
            }
            Ok(())
        })?;
        let layouts = DocumentCatalog::load(layouts_dir, |_, _: Layout| Ok(()))?;
        Ok(Self {
            scripts,
            layouts,
            script_index,
        })
    }

    #[must_use]
    pub fn script_file(&self, id: &str) -> Option<&StoredDocument> {
        self.scripts.get(id)
    }

    #[must_use]
    pub fn layout(&self, id: &str) -> Option<&StoredDocument> {
        self.layouts.get(id)
    }

    /// Returns the id of the script file that contains `script_id`.
    #[must_use]
    pub fn find_script(&self, script_id: &str) -> Option<&str> {
        self.script_index.get(script_id).map(String::as_str)
    }

    #[must_use]
    pub fn scripts(&self) -> &DocumentCatalog {
        &self.scripts
    }

    #[must_use]
    pub fn layouts(&self) -> &DocumentCatalog {
        &self.layouts
    }
}
