//! Domain error types.
//!
//! These errors describe lookups and edits the network refuses. None of them
//! leave a line or network partially modified.

/// Errors from line and network operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// No line with this name exists
    #[error("Invalid line name: {0}")]
    UnknownLine(String),

    /// The line exists but has no station with this name
    #[error("No station {station} on the {line} line")]
    UnknownStation { line: String, station: String },

    /// Station names must be non-blank and must not shadow the depots
    #[error("Invalid station name: {0:?}")]
    InvalidStationName(String),

    /// Station names are unique within a line
    #[error("Station {station} already exists on the {line} line")]
    DuplicateStation { line: String, station: String },

    /// Transfers join stations on different lines
    #[error("Cannot connect {from} and {to}: both are on the {line} line")]
    SameLineTransfer {
        line: String,
        from: String,
        to: String,
    },
}
