//! Query handlers for reference documents.

use townsquare_core::error::DomainError;

use crate::domain::library::{ReferenceLibrary, StoredDocument};

/// Retrieves a script file by id.
///
/// # Errors
///
/// Returns `DomainError::DocumentNotFound` if no script file has that id.
pub fn get_script_file<'a>(
    library: &'a ReferenceLibrary,
    id: &str,
) -> Result<&'a StoredDocument, DomainError> {
    library
        .script_file(id)
        .ok_or_else(|| DomainError::DocumentNotFound(format!("script {id}")))
}

/// Retrieves a layout by id.
///
/// # Errors
///
/// Returns `DomainError::DocumentNotFound` if no layout has that id.
pub fn get_layout<'a>(
    library: &'a ReferenceLibrary,
    id: &str,
) -> Result<&'a StoredDocument, DomainError> {
    library
        .layout(id)
        .ok_or_else(|| DomainError::DocumentNotFound(format!("layout {id}")))
}

/// Names the script file holding `script_id`, if any.
#[must_use]
pub fn find_script(library: &ReferenceLibrary, script_id: &str) -> Option<String> {
    library.find_script(script_id).map(str::to_owned)
}
