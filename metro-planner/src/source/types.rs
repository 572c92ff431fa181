//! Line-definition file DTOs.
//!
//! These types map directly onto the JSON line files. A file is an object
//! from line name to line definition, and a line definition comes in one of
//! two shapes: an object keyed by station position, or an array of stations
//! that name their own neighbours.

use serde::Deserialize;

/// One line's definition, in either shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LineDto {
    /// `{"1": ..., "2": ...}`; keys are positions, parsed later.
    Indexed(serde_json::Map<String, serde_json::Value>),

    /// `[{"name": ..., "next": [...], "prev": [...]}, ...]`
    Linked(Vec<LinkedStationDto>),
}

/// A station entry in an indexed line.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StationEntryDto {
    /// Just the name: `"1": "Hammersmith"`
    Name(String),

    /// Full details
    Detailed(StationDto),
}

/// A station with optional travel time and transfers.
#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    pub name: String,

    /// Minutes to the next station. `null` and absent both mean 0.
    #[serde(default)]
    pub time: Option<u32>,

    /// Transfers from this station. May be `null`, one object, or a list.
    #[serde(default)]
    pub transfer: Option<TransferField>,
}

/// A station in a linked line.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkedStationDto {
    pub name: String,

    #[serde(default)]
    pub time: Option<u32>,

    #[serde(default)]
    pub transfer: Option<TransferField>,

    /// Names of the following stations on the same line.
    #[serde(default)]
    pub next: Vec<String>,

    /// Names of the preceding stations on the same line.
    #[serde(default)]
    pub prev: Vec<String>,
}

/// The `transfer` field accepts a single transfer or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TransferField {
    One(TransferDto),
    Many(Vec<TransferDto>),
}

impl TransferField {
    pub fn into_vec(self) -> Vec<TransferDto> {
        match self {
            TransferField::One(t) => vec![t],
            TransferField::Many(ts) => ts,
        }
    }
}

/// A transfer target.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferDto {
    pub line: String,
    pub station: String,
}
