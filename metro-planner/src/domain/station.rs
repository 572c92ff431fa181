//! Station handles and the station node itself.

use std::fmt;

/// Name shared by the sentinel stations at both ends of every line.
pub const DEPOT: &str = "depot";

/// Index of a line within a [`Network`](crate::network::Network).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub(crate) u32);

impl LineId {
    /// Returns the position of the line in its network.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a station within its line's arena.
///
/// Ids are stable for the lifetime of the line: a removed station leaves a
/// tombstone behind and its id is never handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub(crate) u32);

impl StationId {
    /// The depot before the first station of a line.
    pub const HEAD_DEPOT: StationId = StationId(0);

    /// The depot after the last station of a line.
    pub const TAIL_DEPOT: StationId = StationId(1);

    /// Returns the arena slot of this station.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true for either of the two depot sentinels.
    pub fn is_depot(self) -> bool {
        self == Self::HEAD_DEPOT || self == Self::TAIL_DEPOT
    }
}

/// Network-wide identity of a station: its line plus its slot on that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationRef {
    pub line: LineId,
    pub station: StationId,
}

impl StationRef {
    pub fn new(line: LineId, station: StationId) -> Self {
        Self { line, station }
    }
}

impl fmt::Display for StationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line.0, self.station.0)
    }
}

/// A stop on one line.
///
/// Same-line links are plain [`StationId`]s into the owning line's arena;
/// transfers are [`StationRef`]s because they cross lines. A station never
/// edits its own transfers symmetrically: that is the network's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    name: String,
    line: LineId,
    /// Travel time to the next station, in minutes.
    time: u32,
    pub(crate) prev: Vec<StationId>,
    pub(crate) next: Vec<StationId>,
    pub(crate) transfers: Vec<StationRef>,
}

impl Station {
    pub(crate) fn new(name: impl Into<String>, line: LineId, time: u32) -> Self {
        Self {
            name: name.into(),
            line,
            time,
            prev: Vec::new(),
            next: Vec::new(),
            transfers: Vec::new(),
        }
    }

    pub(crate) fn depot(line: LineId) -> Self {
        Self::new(DEPOT, line, 0)
    }

    /// Returns the station name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the line this station belongs to.
    pub fn line(&self) -> LineId {
        self.line
    }

    /// Returns the travel time to the next station, in minutes.
    pub fn time(&self) -> u32 {
        self.time
    }

    /// Predecessors on the same line, in insertion order.
    pub fn prev(&self) -> &[StationId] {
        &self.prev
    }

    /// Successors on the same line, in insertion order.
    pub fn next(&self) -> &[StationId] {
        &self.next
    }

    /// Transfer targets on other lines, in insertion order.
    pub fn transfers(&self) -> &[StationRef] {
        &self.transfers
    }

    pub fn has_transfers(&self) -> bool {
        !self.transfers.is_empty()
    }

    /// Adjacent stations used by route search.
    ///
    /// Order is fixed: transfers, then predecessors, then successors. Each
    /// station is yielded once, at its first position. Depot sentinels are
    /// boundaries, not stops, and are never yielded.
    pub fn neighbors(&self) -> impl Iterator<Item = StationRef> + '_ {
        let line = self.line;
        let same_line = self
            .prev
            .iter()
            .chain(&self.next)
            .copied()
            .filter(|id| !id.is_depot())
            .map(move |station| StationRef { line, station });

        let mut seen: Vec<StationRef> = Vec::new();
        self.transfers
            .iter()
            .copied()
            .chain(same_line)
            .filter(move |at| {
                if seen.contains(at) {
                    return false;
                }
                seen.push(*at);
                true
            })
    }

    /// Adds a transfer target. Returns false if it was already present.
    pub(crate) fn add_transfer(&mut self, to: StationRef) -> bool {
        if self.transfers.contains(&to) {
            return false;
        }
        self.transfers.push(to);
        true
    }

    pub(crate) fn remove_transfer(&mut self, to: StationRef) {
        self.transfers.retain(|t| *t != to);
    }
}

/// Replace `old` in `links` with `replacements`, in place.
///
/// Replacements already present are skipped so link sets stay duplicate-free.
pub(crate) fn splice_link(links: &mut Vec<StationId>, old: StationId, replacements: &[StationId]) {
    let Some(pos) = links.iter().position(|id| *id == old) else {
        return;
    };
    links.remove(pos);
    let mut at = pos;
    for &id in replacements {
        if !links.contains(&id) {
            links.insert(at, id);
            at += 1;
        }
    }
}
