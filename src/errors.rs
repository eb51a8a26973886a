//! Domain-level errors (no CLI concerns)

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while turning an outline document into sink entities.
///
/// All failures are fatal to the run; there is no retry layer and no
/// partial-success semantics.
#[derive(Error, Debug)]
pub enum VarmapError {
    /// Input resource missing or carrying the wrong extension.
    /// Raised before any parsing is attempted.
    #[error("invalid input: {path}: {reason}")]
    InvalidInput { path: PathBuf, reason: String },

    /// Expected element or field absent from the document, or the
    /// extracted record sequence is empty.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),
}

pub type VarmapResult<T> = Result<T, VarmapError>;
