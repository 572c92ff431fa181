//! Line-definition loading errors.

use std::path::PathBuf;

use crate::network::BuildError;

/// Errors that can occur while loading a network from a line-definition file.
///
/// All of these are fatal at startup: there is no network to fall back on.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON, or not an object of lines
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A line definition has the wrong shape
    #[error("malformed definition of the {line} line: {source}")]
    LineShape {
        line: String,
        #[source]
        source: serde_json::Error,
    },

    /// A position key in an indexed line is not an integer
    #[error("malformed input: position {key:?} on the {line} line is not an integer")]
    InvalidPosition { line: String, key: String },

    /// The records were well-formed JSON but describe an invalid network
    #[error(transparent)]
    Malformed(#[from] BuildError),
}
