//! The metro network: every line, plus the transfers between them.
//!
//! Lines are built once by [`NetworkBuilder`] and then edited station by
//! station. The network is the only place that touches more than one line
//! at a time, which is what keeps transfers symmetric and free of dangling
//! references.

mod builder;
mod records;

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Line, LineId, NetworkError, Station, StationRef};

pub use builder::{BuildError, NetworkBuilder};
pub use records::{LineLayout, LineRecord, LinkedStationRecord, StationRecord, TransferRecord};

/// A set of named lines connected by transfers.
#[derive(Debug, Clone, Default)]
pub struct Network {
    lines: Vec<Line>,
    by_name: HashMap<String, LineId>,
}

impl Network {
    /// Create a network with no lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty line. The caller guarantees the name is unused.
    pub(crate) fn add_line(&mut self, name: &str) -> LineId {
        let id = LineId(self.lines.len() as u32);
        self.lines.push(Line::new(id, name));
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// All lines, in the order they were built.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Look up a line id by name.
    pub fn line_id(&self, name: &str) -> Option<LineId> {
        self.by_name.get(name).copied()
    }

    /// Look up a line by name.
    pub fn line(&self, name: &str) -> Result<&Line, NetworkError> {
        self.line_id(name)
            .and_then(|id| self.line_by_id(id))
            .ok_or_else(|| NetworkError::UnknownLine(name.to_string()))
    }

    fn line_mut(&mut self, name: &str) -> Result<&mut Line, NetworkError> {
        let id = self
            .line_id(name)
            .ok_or_else(|| NetworkError::UnknownLine(name.to_string()))?;
        self.line_by_id_mut(id)
            .ok_or_else(|| NetworkError::UnknownLine(name.to_string()))
    }

    pub fn line_by_id(&self, id: LineId) -> Option<&Line> {
        self.lines.get(id.index())
    }

    pub(crate) fn line_by_id_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.lines.get_mut(id.index())
    }

    /// Resolve a (line, station) name pair to a handle.
    pub fn resolve(&self, line: &str, station: &str) -> Result<StationRef, NetworkError> {
        let line = self.line(line)?;
        let id = line.station_id(station)?;
        Ok(line.station_ref(id))
    }

    /// Get a live station by handle.
    pub fn station(&self, at: StationRef) -> Option<&Station> {
        self.line_by_id(at.line)?.get(at.station)
    }

    fn station_mut(&mut self, at: StationRef) -> Option<&mut Station> {
        self.line_by_id_mut(at.line)?.get_mut(at.station)
    }

    /// Returns true if the handle points at a live, non-depot station.
    pub fn contains(&self, at: StationRef) -> bool {
        !at.station.is_depot() && self.station(at).is_some()
    }

    /// Stations adjacent to `at`: transfers, then predecessors, then successors.
    ///
    /// Empty if `at` is not a live station.
    pub fn neighbors(&self, at: StationRef) -> Vec<StationRef> {
        self.station(at)
            .map(|station| station.neighbors().collect())
            .unwrap_or_default()
    }

    /// Append a station to the end of a line.
    pub fn append(&mut self, line: &str, station: &str, time: u32) -> Result<StationRef, NetworkError> {
        let line = self.line_mut(line)?;
        let id = line.append(station, time)?;
        Ok(line.station_ref(id))
    }

    /// Add a station at the start of a line.
    pub fn add_head(&mut self, line: &str, station: &str, time: u32) -> Result<StationRef, NetworkError> {
        let line = self.line_mut(line)?;
        let id = line.add_head(station, time)?;
        Ok(line.station_ref(id))
    }

    /// Remove a station from a line, along with every transfer to it.
    pub fn remove(&mut self, line: &str, station: &str) -> Result<(), NetworkError> {
        let at = self.resolve(line, station)?;
        let removed = self.line_mut(line)?.remove(station)?;

        for partner in removed.transfers() {
            if let Some(other) = self.station_mut(*partner) {
                other.remove_transfer(at);
            }
        }
        Ok(())
    }

    /// Connect two stations by a transfer, in both directions.
    ///
    /// Both names are resolved before anything changes, so an unknown line or
    /// station leaves the network untouched. Returns false if the stations
    /// were already connected, or are the same station. Two different
    /// stations on one line are `SameLineTransfer`.
    pub fn connect(
        &mut self,
        from_line: &str,
        from_station: &str,
        to_line: &str,
        to_station: &str,
    ) -> Result<bool, NetworkError> {
        let from = self.resolve(from_line, from_station)?;
        let to = self.resolve(to_line, to_station)?;
        if from != to && from.line == to.line {
            return Err(NetworkError::SameLineTransfer {
                line: from_line.to_string(),
                from: from_station.to_string(),
                to: to_station.to_string(),
            });
        }
        Ok(self.connect_refs(from, to))
    }

    /// Connect two resolved stations on different lines.
    ///
    /// Anything else (same station, same line, dead station) is a no-op.
    pub(crate) fn connect_refs(&mut self, a: StationRef, b: StationRef) -> bool {
        if a.line == b.line || !self.contains(a) || !self.contains(b) {
            return false;
        }

        let mut added = false;
        if let Some(station) = self.station_mut(a) {
            added |= station.add_transfer(b);
        }
        if let Some(station) = self.station_mut(b) {
            added |= station.add_transfer(a);
        }

        if added {
            debug!(from = %a, to = %b, "connected transfer");
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Red = A-B, Blue = C-D
    fn two_lines() -> Network {
        let mut network = Network::new();
        network.add_line("Red");
        network.add_line("Blue");
        network.append("Red", "A", 5).unwrap();
        network.append("Red", "B", 0).unwrap();
        network.append("Blue", "C", 3).unwrap();
        network.append("Blue", "D", 0).unwrap();
        network
    }

    #[test]
    fn lookup_by_name() {
        let network = two_lines();

        assert_eq!(network.line_count(), 2);
        assert_eq!(network.line("Red").unwrap().len(), 2);
        assert_eq!(
            network.line("Green").unwrap_err(),
            NetworkError::UnknownLine("Green".into())
        );
        assert!(network.resolve("Red", "A").is_ok());
        assert!(matches!(
            network.resolve("Red", "C"),
            Err(NetworkError::UnknownStation { .. })
        ));
    }

    #[test]
    fn connect_is_symmetric() {
        let mut network = two_lines();
        assert!(network.connect("Red", "B", "Blue", "C").unwrap());

        let b = network.resolve("Red", "B").unwrap();
        let c = network.resolve("Blue", "C").unwrap();
        assert!(network.neighbors(b).contains(&c));
        assert!(network.neighbors(c).contains(&b));
    }

    #[test]
    fn connect_twice_keeps_one_transfer() {
        let mut network = two_lines();
        assert!(network.connect("Red", "B", "Blue", "C").unwrap());
        assert!(!network.connect("Blue", "C", "Red", "B").unwrap());

        let b = network.resolve("Red", "B").unwrap();
        assert_eq!(network.station(b).unwrap().transfers().len(), 1);
    }

    #[test]
    fn connect_unknown_names_changes_nothing() {
        let mut network = two_lines();

        assert_eq!(
            network.connect("Red", "B", "Green", "C").unwrap_err(),
            NetworkError::UnknownLine("Green".into())
        );
        assert!(matches!(
            network.connect("Red", "B", "Blue", "Z").unwrap_err(),
            NetworkError::UnknownStation { .. }
        ));

        let b = network.resolve("Red", "B").unwrap();
        assert!(!network.station(b).unwrap().has_transfers());
    }

    #[test]
    fn connect_to_self_is_noop() {
        let mut network = two_lines();
        assert!(!network.connect("Red", "A", "Red", "A").unwrap());

        let a = network.resolve("Red", "A").unwrap();
        assert!(!network.station(a).unwrap().has_transfers());
    }

    #[test]
    fn connect_on_one_line_is_rejected() {
        let mut network = two_lines();

        assert_eq!(
            network.connect("Red", "A", "Red", "B").unwrap_err(),
            NetworkError::SameLineTransfer {
                line: "Red".into(),
                from: "A".into(),
                to: "B".into(),
            }
        );

        let a = network.resolve("Red", "A").unwrap();
        let b = network.resolve("Red", "B").unwrap();
        assert!(!network.station(a).unwrap().has_transfers());
        assert_eq!(network.neighbors(a), vec![b]);
    }

    #[test]
    fn neighbors_exclude_depots() {
        let network = two_lines();
        let a = network.resolve("Red", "A").unwrap();
        let b = network.resolve("Red", "B").unwrap();

        assert_eq!(network.neighbors(a), vec![b]);
        assert_eq!(network.neighbors(b), vec![a]);
    }

    #[test]
    fn remove_strips_transfers_on_partner() {
        let mut network = two_lines();
        network.connect("Red", "B", "Blue", "C").unwrap();
        let b = network.resolve("Red", "B").unwrap();
        let c = network.resolve("Blue", "C").unwrap();

        network.remove("Red", "B").unwrap();

        assert!(!network.contains(b));
        assert!(!network.station(c).unwrap().has_transfers());
        assert!(network.neighbors(b).is_empty());
    }

    #[test]
    fn mutations_report_unknown_line() {
        let mut network = two_lines();

        assert!(matches!(
            network.append("Green", "X", 0),
            Err(NetworkError::UnknownLine(_))
        ));
        assert!(matches!(
            network.add_head("Green", "X", 0),
            Err(NetworkError::UnknownLine(_))
        ));
        assert!(matches!(
            network.remove("Green", "X"),
            Err(NetworkError::UnknownLine(_))
        ));
    }

    #[test]
    fn remove_unknown_station_leaves_line_unchanged() {
        let mut network = two_lines();
        let before = network.line("Red").unwrap().stations();

        assert!(matches!(
            network.remove("Red", "Z"),
            Err(NetworkError::UnknownStation { .. })
        ));
        assert_eq!(network.line("Red").unwrap().stations(), before);
    }
}
