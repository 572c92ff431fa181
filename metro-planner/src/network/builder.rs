//! Two-pass network construction.
//!
//! Pass one builds every line and collects the transfers each station
//! declares. Pass two resolves those transfers once every line exists, since
//! a transfer may name a line that comes later in the input. Any problem
//! aborts the whole build; a half-built network is never returned.

use tracing::{debug, info};

use crate::domain::{Line, NetworkError, StationId, StationRef};

use super::Network;
use super::records::{LineLayout, LineRecord, LinkedStationRecord, StationRecord, TransferRecord};

/// Malformed line-definition input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Two lines share a name
    #[error("malformed input: line {0} is defined more than once")]
    DuplicateLine(String),

    /// Two stations on one line share a name
    #[error("malformed input: station {station} appears more than once on the {line} line")]
    DuplicateStation { line: String, station: String },

    /// Two stations on one line share a position
    #[error("malformed input: position {position} is used more than once on the {line} line")]
    DuplicatePosition { line: String, position: i64 },

    /// A station name is blank or reserved
    #[error("malformed input: invalid station name {station:?} on the {line} line")]
    InvalidStation { line: String, station: String },

    /// A next/prev entry names a station that is not on the line
    #[error("malformed input: station {station} on the {line} line links to unknown station {link}")]
    UnknownLink {
        line: String,
        station: String,
        link: String,
    },

    /// A transfer names a line or station that does not exist
    #[error(
        "malformed input: station {station} on the {line} line transfers to unknown station {target_station} on the {target_line} line"
    )]
    UnresolvedTransfer {
        line: String,
        station: String,
        target_line: String,
        target_station: String,
    },

    /// A transfer names another station on the same line
    #[error("malformed input: station {station} on the {line} line transfers to {target_station} on its own line")]
    SameLineTransfer {
        line: String,
        station: String,
        target_station: String,
    },

    /// A next/prev entry names the station itself
    #[error("malformed input: station {station} on the {line} line links to itself")]
    SelfLink { line: String, station: String },
}

/// A transfer waiting for pass two.
struct PendingTransfer {
    from: StationRef,
    line: String,
    station: String,
    to: TransferRecord,
}

/// Builds a [`Network`] from parsed line records.
///
/// # Examples
///
/// ```
/// use metro_planner::network::{LineRecord, NetworkBuilder, StationRecord};
///
/// let network = NetworkBuilder::new()
///     .line(LineRecord::sequential(
///         "Red",
///         vec![
///             StationRecord::new("A").with_time(5),
///             StationRecord::new("B").with_transfer("Blue", "C"),
///         ],
///     ))
///     .line(LineRecord::sequential(
///         "Blue",
///         vec![StationRecord::new("C"), StationRecord::new("D")],
///     ))
///     .build()
///     .unwrap();
///
/// let b = network.resolve("Red", "B").unwrap();
/// let c = network.resolve("Blue", "C").unwrap();
/// assert!(network.neighbors(c).contains(&b));
/// ```
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    lines: Vec<LineRecord>,
}

impl NetworkBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line record.
    pub fn line(mut self, record: LineRecord) -> Self {
        self.lines.push(record);
        self
    }

    /// Add several line records, in order.
    pub fn lines(mut self, records: impl IntoIterator<Item = LineRecord>) -> Self {
        self.lines.extend(records);
        self
    }

    /// Build the network.
    pub fn build(self) -> Result<Network, BuildError> {
        let mut network = Network::new();
        let mut pending = Vec::new();

        for record in self.lines {
            if network.line_id(&record.name).is_some() {
                return Err(BuildError::DuplicateLine(record.name));
            }
            let id = network.add_line(&record.name);
            let Some(line) = network.line_by_id_mut(id) else {
                continue;
            };

            match record.layout {
                LineLayout::Indexed(stations) => build_indexed(line, stations, &mut pending)?,
                LineLayout::Linked(stations) => build_linked(line, stations, &mut pending)?,
            }
            debug!(line = %record.name, stations = line.len(), "built line");
        }

        let mut transfers = 0;
        for transfer in pending {
            let PendingTransfer {
                from,
                line,
                station,
                to: target,
            } = transfer;
            let Ok(to) = network.resolve(&target.line, &target.station) else {
                return Err(BuildError::UnresolvedTransfer {
                    line,
                    station,
                    target_line: target.line,
                    target_station: target.station,
                });
            };
            if to != from && to.line == from.line {
                return Err(BuildError::SameLineTransfer {
                    line,
                    station,
                    target_station: target.station,
                });
            }
            if network.connect_refs(from, to) {
                transfers += 1;
            }
        }

        info!(lines = network.line_count(), transfers, "network built");
        Ok(network)
    }
}

fn build_indexed(
    line: &mut Line,
    mut stations: Vec<(i64, StationRecord)>,
    pending: &mut Vec<PendingTransfer>,
) -> Result<(), BuildError> {
    stations.sort_by_key(|(position, _)| *position);
    for pair in stations.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(BuildError::DuplicatePosition {
                line: line.name().to_string(),
                position: pair[0].0,
            });
        }
    }

    for (_, record) in stations {
        let id = line
            .append(&record.name, record.time.unwrap_or(0))
            .map_err(|e| station_error(line, e))?;
        queue_transfers(line, id, record, pending);
    }
    Ok(())
}

fn build_linked(
    line: &mut Line,
    stations: Vec<LinkedStationRecord>,
    pending: &mut Vec<PendingTransfer>,
) -> Result<(), BuildError> {
    if stations.is_empty() {
        return Ok(());
    }

    let mut ids = Vec::with_capacity(stations.len());
    for record in &stations {
        let id = line
            .insert_detached(&record.station.name, record.station.time.unwrap_or(0))
            .map_err(|e| station_error(line, e))?;
        ids.push(id);
    }

    for (record, &id) in stations.iter().zip(&ids) {
        for name in &record.next {
            let next = find_link(line, &record.station.name, name)?;
            if next == id {
                return Err(self_link(line, &record.station.name));
            }
            line.link(id, next);
        }
        for name in &record.prev {
            let prev = find_link(line, &record.station.name, name)?;
            if prev == id {
                return Err(self_link(line, &record.station.name));
            }
            line.link(prev, id);
        }
    }

    line.unlink(StationId::HEAD_DEPOT, StationId::TAIL_DEPOT);

    let starts: Vec<StationId> = ids
        .iter()
        .copied()
        .filter(|id| line.get(*id).is_some_and(|s| s.prev().is_empty()))
        .collect();
    let ends: Vec<StationId> = ids
        .iter()
        .copied()
        .filter(|id| line.get(*id).is_some_and(|s| s.next().is_empty()))
        .collect();

    // A line where every station has a predecessor is a loop; enter it at
    // the first declared station and leave it at the last.
    let starts = if starts.is_empty() { vec![ids[0]] } else { starts };
    let ends = if ends.is_empty() {
        vec![ids[ids.len() - 1]]
    } else {
        ends
    };

    for id in starts {
        line.link(StationId::HEAD_DEPOT, id);
    }
    for id in ends {
        line.link(id, StationId::TAIL_DEPOT);
    }

    for (record, id) in stations.into_iter().zip(ids) {
        queue_transfers(line, id, record.station, pending);
    }
    Ok(())
}

fn find_link(line: &Line, station: &str, link: &str) -> Result<StationId, BuildError> {
    line.find(link).ok_or_else(|| BuildError::UnknownLink {
        line: line.name().to_string(),
        station: station.to_string(),
        link: link.to_string(),
    })
}

fn self_link(line: &Line, station: &str) -> BuildError {
    BuildError::SelfLink {
        line: line.name().to_string(),
        station: station.to_string(),
    }
}

fn queue_transfers(line: &Line, id: StationId, record: StationRecord, pending: &mut Vec<PendingTransfer>) {
    let from = line.station_ref(id);
    for to in record.transfers {
        pending.push(PendingTransfer {
            from,
            line: line.name().to_string(),
            station: record.name.clone(),
            to,
        });
    }
}

fn station_error(line: &Line, err: NetworkError) -> BuildError {
    match err {
        NetworkError::DuplicateStation { line, station } => {
            BuildError::DuplicateStation { line, station }
        }
        NetworkError::InvalidStationName(station) => BuildError::InvalidStation {
            line: line.name().to_string(),
            station,
        },
        other => BuildError::InvalidStation {
            line: line.name().to_string(),
            station: other.to_string(),
        },
    }
}
