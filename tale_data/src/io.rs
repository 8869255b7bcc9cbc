use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::docs::GameDocument;
use crate::save::SaveDocument;

/// Error reading, writing, or decoding one of the JSON documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("encoding save document: {0}")]
    Encode(#[source] serde_json::Error),
}

impl DocumentError {
    /// True when the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        match self {
            DocumentError::Read { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            },
            _ => false,
        }
    }
}

/// Read and decode a world-definition document.
pub fn load_game_document(path: &Path) -> Result<GameDocument, DocumentError> {
    let text = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and decode a save document.
pub fn load_save_document(path: &Path) -> Result<SaveDocument, DocumentError> {
    let text = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode and write a save document (pretty-printed, like the authored files).
pub fn write_save_document(path: &Path, save: &SaveDocument) -> Result<(), DocumentError> {
    let text = serde_json::to_string_pretty(save).map_err(DocumentError::Encode)?;
    fs::write(path, text).map_err(|source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    })
}
