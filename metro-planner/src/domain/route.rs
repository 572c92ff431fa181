//! Route types.
//!
//! A `Route` is what route search hands back: the ordered stops from start
//! to end, each carrying enough of its station to be costed and printed
//! without going back to the network.

use super::station::StationRef;

/// One stop on a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteStop {
    /// Handle of the station in the network the route was found in
    pub at: StationRef,
    /// Station name
    pub name: String,
    /// Name of the line the station belongs to
    pub line: String,
    /// Travel time from this station to the next one on its line
    pub time: u32,
}

impl RouteStop {
    pub fn new(at: StationRef, name: impl Into<String>, line: impl Into<String>, time: u32) -> Self {
        Self {
            at,
            name: name.into(),
            line: line.into(),
            time,
        }
    }

    /// Returns true if moving from `self` to `next` changes lines.
    pub fn is_transfer_to(&self, next: &RouteStop) -> bool {
        self.at.line != next.at.line
    }
}

/// A path through the network, start and end inclusive.
///
/// # Invariants
///
/// - At least one stop (a route from a station to itself has exactly one)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    stops: Vec<RouteStop>,
}

impl Route {
    /// Constructs a route, returning `None` for an empty stop list.
    pub fn new(stops: Vec<RouteStop>) -> Option<Self> {
        if stops.is_empty() {
            return None;
        }
        Some(Self { stops })
    }

    /// Returns all stops in order.
    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    /// Returns the number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false: routes have at least one stop.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Returns the number of moves between stops.
    pub fn hop_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    /// Returns the number of line changes.
    pub fn transfer_count(&self) -> usize {
        self.stops
            .windows(2)
            .filter(|pair| pair[0].is_transfer_to(&pair[1]))
            .count()
    }

    /// Returns the station names in order.
    pub fn names(&self) -> Vec<&str> {
        self.stops.iter().map(|s| s.name.as_str()).collect()
    }

    /// Returns the station handles in order.
    pub fn path(&self) -> Vec<StationRef> {
        self.stops.iter().map(|s| s.at).collect()
    }

    pub fn origin(&self) -> &RouteStop {
        &self.stops[0]
    }

    pub fn destination(&self) -> &RouteStop {
        &self.stops[self.stops.len() - 1]
    }

    /// Total travel time along the route.
    ///
    /// A same-line hop costs the travel time of the station it leaves; a
    /// transfer costs `transfer_time`.
    pub fn travel_time(&self, transfer_time: u32) -> u32 {
        self.stops
            .windows(2)
            .map(|pair| {
                if pair[0].is_transfer_to(&pair[1]) {
                    transfer_time
                } else {
                    pair[0].time
                }
            })
            .fold(0u32, u32::saturating_add)
    }
}
