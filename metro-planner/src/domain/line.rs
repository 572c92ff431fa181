//! Metro lines.
//!
//! A [`Line`] owns its stations in an arena. Slots 0 and 1 are always the
//! head and tail depots; every real station sits somewhere on a path between
//! them. All links are arena ids, so nothing here owns anything else.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use super::error::NetworkError;
use super::station::{DEPOT, LineId, Station, StationId, StationRef, splice_link};

/// A named line of stations bounded by two depot sentinels.
///
/// # Invariants
///
/// - The depots occupy [`StationId::HEAD_DEPOT`] and [`StationId::TAIL_DEPOT`]
///   and are never removed or indexed by name.
/// - Every live non-depot station is in the name index, and vice versa.
/// - Links are symmetric: `b ∈ a.next` exactly when `a ∈ b.prev`.
#[derive(Debug, Clone)]
pub struct Line {
    id: LineId,
    name: String,
    slots: Vec<Option<Station>>,
    index: HashMap<String, StationId>,
}

impl Line {
    /// Create an empty line: head depot linked directly to tail depot.
    pub(crate) fn new(id: LineId, name: impl Into<String>) -> Self {
        let mut head = Station::depot(id);
        let mut tail = Station::depot(id);
        head.next.push(StationId::TAIL_DEPOT);
        tail.prev.push(StationId::HEAD_DEPOT);

        Self {
            id,
            name: name.into(),
            slots: vec![Some(head), Some(tail)],
            index: HashMap::new(),
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of live stations, depots excluded.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Look up a station id by name. Depots are never found.
    pub fn find(&self, name: &str) -> Option<StationId> {
        self.index.get(name).copied()
    }

    /// Look up a station id by name, reporting an unknown name as an error.
    pub fn station_id(&self, name: &str) -> Result<StationId, NetworkError> {
        self.find(name).ok_or_else(|| NetworkError::UnknownStation {
            line: self.name.clone(),
            station: name.to_string(),
        })
    }

    /// Look up a station by name.
    pub fn station(&self, name: &str) -> Result<&Station, NetworkError> {
        let id = self.station_id(name)?;
        self.get(id).ok_or_else(|| NetworkError::UnknownStation {
            line: self.name.clone(),
            station: name.to_string(),
        })
    }

    /// Get a live station (or depot) by id.
    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: StationId) -> Option<&mut Station> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Handle for a station on this line.
    pub fn station_ref(&self, id: StationId) -> StationRef {
        StationRef::new(self.id, id)
    }

    /// First real station after the head depot.
    pub fn head(&self) -> Option<StationId> {
        self.get(StationId::HEAD_DEPOT)?
            .next
            .iter()
            .copied()
            .find(|id| !id.is_depot())
    }

    /// Last real station before the tail depot.
    pub fn tail(&self) -> Option<StationId> {
        self.get(StationId::TAIL_DEPOT)?
            .prev
            .iter()
            .copied()
            .find(|id| !id.is_depot())
    }

    /// Live stations in line order.
    ///
    /// Walks breadth-first from the head depot along `next` links, so branches
    /// appear level by level and every station appears once. Stations cut off
    /// from the head depot (only possible with cyclic builder input) follow in
    /// arena order.
    pub fn stations(&self) -> Vec<StationId> {
        let mut order = Vec::with_capacity(self.len());
        let mut seen: HashSet<StationId> = HashSet::new();
        let mut queue: VecDeque<StationId> = VecDeque::from([StationId::HEAD_DEPOT]);

        while let Some(id) = queue.pop_front() {
            let Some(station) = self.get(id) else {
                continue;
            };
            for &next in &station.next {
                if !next.is_depot() && seen.insert(next) {
                    order.push(next);
                    queue.push_back(next);
                }
            }
        }

        if order.len() < self.len() {
            let mut rest: Vec<StationId> = self
                .index
                .values()
                .copied()
                .filter(|id| !seen.contains(id))
                .collect();
            rest.sort();
            order.extend(rest);
        }

        order
    }

    /// Insert a new station just before the tail depot.
    pub fn append(&mut self, name: &str, time: u32) -> Result<StationId, NetworkError> {
        let id = self.insert_detached(name, time)?;
        let before = self.take_links(StationId::TAIL_DEPOT, Side::Prev);

        for &p in &before {
            self.replace_link(p, Side::Next, StationId::TAIL_DEPOT, &[id]);
        }
        self.set_links(id, before, vec![StationId::TAIL_DEPOT]);
        self.set_side(StationId::TAIL_DEPOT, Side::Prev, vec![id]);

        debug!(line = %self.name, station = name, time, "appended station");
        Ok(id)
    }

    /// Insert a new station just after the head depot.
    pub fn add_head(&mut self, name: &str, time: u32) -> Result<StationId, NetworkError> {
        let id = self.insert_detached(name, time)?;
        let after = self.take_links(StationId::HEAD_DEPOT, Side::Next);

        for &s in &after {
            self.replace_link(s, Side::Prev, StationId::HEAD_DEPOT, &[id]);
        }
        self.set_links(id, vec![StationId::HEAD_DEPOT], after);
        self.set_side(StationId::HEAD_DEPOT, Side::Next, vec![id]);

        debug!(line = %self.name, station = name, time, "added head station");
        Ok(id)
    }

    /// Remove a station by name, linking every predecessor to every successor.
    ///
    /// Returns the removed station so the caller can clean up transfers that
    /// point at it from other lines.
    pub fn remove(&mut self, name: &str) -> Result<Station, NetworkError> {
        let id = self.station_id(name)?;
        let removed = self.slots[id.index()]
            .take()
            .ok_or_else(|| NetworkError::UnknownStation {
                line: self.name.clone(),
                station: name.to_string(),
            })?;
        self.index.remove(name);

        // A self-link is not a way around the removed station
        let prev: Vec<StationId> = removed.prev.iter().copied().filter(|p| *p != id).collect();
        let next: Vec<StationId> = removed.next.iter().copied().filter(|s| *s != id).collect();

        for &p in &prev {
            let successors: Vec<StationId> = next.iter().copied().filter(|s| *s != p).collect();
            self.replace_link(p, Side::Next, id, &successors);
        }
        for &s in &next {
            let predecessors: Vec<StationId> = prev.iter().copied().filter(|p| *p != s).collect();
            self.replace_link(s, Side::Prev, id, &predecessors);
        }

        debug!(line = %self.name, station = name, "removed station");
        Ok(removed)
    }

    /// Create an unlinked station and index it.
    pub(crate) fn insert_detached(&mut self, name: &str, time: u32) -> Result<StationId, NetworkError> {
        validate_name(name)?;
        if self.index.contains_key(name) {
            return Err(NetworkError::DuplicateStation {
                line: self.name.clone(),
                station: name.to_string(),
            });
        }

        let id = StationId(self.slots.len() as u32);
        self.slots.push(Some(Station::new(name, self.id, time)));
        self.index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Add a directed same-line link `from -> to`, keeping both sides in sync.
    pub(crate) fn link(&mut self, from: StationId, to: StationId) {
        if let Some(station) = self.get_mut(from) {
            if !station.next.contains(&to) {
                station.next.push(to);
            }
        }
        if let Some(station) = self.get_mut(to) {
            if !station.prev.contains(&from) {
                station.prev.push(from);
            }
        }
    }

    /// Drop the link `from -> to` on both sides.
    pub(crate) fn unlink(&mut self, from: StationId, to: StationId) {
        if let Some(station) = self.get_mut(from) {
            station.next.retain(|id| *id != to);
        }
        if let Some(station) = self.get_mut(to) {
            station.prev.retain(|id| *id != from);
        }
    }

    fn take_links(&mut self, id: StationId, side: Side) -> Vec<StationId> {
        self.get_mut(id)
            .map(|station| std::mem::take(side.of(station)))
            .unwrap_or_default()
    }

    fn set_side(&mut self, id: StationId, side: Side, links: Vec<StationId>) {
        if let Some(station) = self.get_mut(id) {
            *side.of(station) = links;
        }
    }

    fn set_links(&mut self, id: StationId, prev: Vec<StationId>, next: Vec<StationId>) {
        if let Some(station) = self.get_mut(id) {
            station.prev = prev;
            station.next = next;
        }
    }

    fn replace_link(&mut self, id: StationId, side: Side, old: StationId, with: &[StationId]) {
        if let Some(station) = self.get_mut(id) {
            splice_link(side.of(station), old, with);
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    Prev,
    Next,
}

impl Side {
    fn of(self, station: &mut Station) -> &mut Vec<StationId> {
        match self {
            Side::Prev => &mut station.prev,
            Side::Next => &mut station.next,
        }
    }
}

fn validate_name(name: &str) -> Result<(), NetworkError> {
    if name.trim().is_empty() || name == DEPOT {
        return Err(NetworkError::InvalidStationName(name.to_string()));
    }
    Ok(())
}
