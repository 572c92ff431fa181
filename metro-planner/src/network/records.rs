//! Intermediate records consumed by [`NetworkBuilder`](super::NetworkBuilder).
//!
//! Whatever the on-disk format looks like, it is turned into these records
//! first. The builder never sees the input format itself.

/// A transfer declared on a station: "you can change to `station` on `line`".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub line: String,
    pub station: String,
}

impl TransferRecord {
    pub fn new(line: impl Into<String>, station: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            station: station.into(),
        }
    }
}

/// A station as declared in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRecord {
    pub name: String,
    /// Travel time to the next station; absent means 0
    pub time: Option<u32>,
    pub transfers: Vec<TransferRecord>,
}

impl StationRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time: None,
            transfers: Vec::new(),
        }
    }

    pub fn with_time(mut self, time: u32) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_transfer(mut self, line: impl Into<String>, station: impl Into<String>) -> Self {
        self.transfers.push(TransferRecord::new(line, station));
        self
    }
}

/// A station with explicit same-line neighbours, for branching lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedStationRecord {
    pub station: StationRecord,
    pub next: Vec<String>,
    pub prev: Vec<String>,
}

impl LinkedStationRecord {
    pub fn new(station: StationRecord) -> Self {
        Self {
            station,
            next: Vec::new(),
            prev: Vec::new(),
        }
    }

    pub fn with_next(mut self, name: impl Into<String>) -> Self {
        self.next.push(name.into());
        self
    }

    pub fn with_prev(mut self, name: impl Into<String>) -> Self {
        self.prev.push(name.into());
        self
    }
}

/// How a line declares the order of its stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineLayout {
    /// Stations keyed by numeric position; sorted and chained in order.
    Indexed(Vec<(i64, StationRecord)>),
    /// Stations with explicit next/prev names.
    Linked(Vec<LinkedStationRecord>),
}

/// One line of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub name: String,
    pub layout: LineLayout,
}

impl LineRecord {
    /// A line whose stations are keyed by position.
    pub fn indexed(name: impl Into<String>, stations: Vec<(i64, StationRecord)>) -> Self {
        Self {
            name: name.into(),
            layout: LineLayout::Indexed(stations),
        }
    }

    /// A line whose stations are already in order.
    pub fn sequential(name: impl Into<String>, stations: Vec<StationRecord>) -> Self {
        let stations = stations
            .into_iter()
            .enumerate()
            .map(|(i, s)| (i as i64 + 1, s))
            .collect();
        Self::indexed(name, stations)
    }

    /// A line whose stations declare their own neighbours.
    pub fn linked(name: impl Into<String>, stations: Vec<LinkedStationRecord>) -> Self {
        Self {
            name: name.into(),
            layout: LineLayout::Linked(stations),
        }
    }
}
