//! Loading a network from a JSON line-definition file.
//!
//! The file is a single object from line name to line definition:
//!
//! ```json
//! {
//!   "Red": {"1": "A", "2": {"name": "B", "time": 3, "transfer": {"line": "Blue", "station": "B"}}},
//!   "Blue": [{"name": "B", "next": ["C"]}, {"name": "C", "prev": ["B"]}]
//! }
//! ```
//!
//! An empty file, or a file containing just `null`, loads as an empty network.

mod convert;
mod error;
mod types;

use std::path::Path;

use tracing::{debug, info};

pub use error::LoadError;
pub use types::{LineDto, LinkedStationDto, StationDto, StationEntryDto, TransferDto, TransferField};

use crate::network::{LineRecord, Network, NetworkBuilder};

/// Read and build a network from a line-definition file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Network, LoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = json.len(), "Read line definitions");
    load_str(&json)
}

/// Build a network from line-definition JSON.
pub fn load_str(json: &str) -> Result<Network, LoadError> {
    let records = parse_str(json)?;
    let network = NetworkBuilder::new().lines(records).build()?;
    info!(lines = network.line_count(), "Loaded network");
    Ok(network)
}

/// Parse line-definition JSON into builder records without building.
///
/// Lines come back in file order.
pub fn parse_str(json: &str) -> Result<Vec<LineRecord>, LoadError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    let lines: Option<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(json)?;
    let Some(lines) = lines else {
        return Ok(Vec::new());
    };

    lines
        .into_iter()
        .map(|(name, value)| convert::line_record(&name, value))
        .collect()
}
