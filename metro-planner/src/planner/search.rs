//! BFS route search.
//!
//! Finds routes between two stations over the station graph: same-line
//! neighbours plus transfers. The queue holds whole partial paths rather
//! than back-pointers so that every minimal route can be reported.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, trace, warn};

use crate::domain::{NetworkError, Route, RouteStop, StationRef};
use crate::network::Network;

use super::config::SearchConfig;
use super::rank::fastest_route;

/// Error from route search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// An endpoint does not name a line or station
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The endpoints are not connected
    #[error("No route found from {from} to {to}")]
    NoRouteFound { from: String, to: String },
}

/// Find routes from `start` to `end`, fewest hops first.
///
/// With `collect_all == false` this returns at most one route: the first
/// complete path dequeued, which BFS level order makes a shortest one. With
/// `collect_all == true` it returns every route of minimal hop count (up to
/// `config.max_routes`), in discovery order.
///
/// Returns an empty list if either endpoint is not a live station or the
/// two are not connected.
pub fn find_routes(
    network: &Network,
    start: StationRef,
    end: StationRef,
    collect_all: bool,
    config: &SearchConfig,
) -> Vec<Route> {
    if !network.contains(start) || !network.contains(end) {
        return Vec::new();
    }

    let mut queue: VecDeque<Vec<StationRef>> = VecDeque::from([vec![start]]);
    // Hop depth at which each station was first expanded. A station reached
    // again at that same depth is expanded again, so equally short paths
    // through it all survive; anything reaching it later is a detour.
    let mut expanded: HashMap<StationRef, usize> = HashMap::new();
    let mut found: Vec<Vec<StationRef>> = Vec::new();
    let mut shortest: Option<usize> = None;
    let mut explored = 0usize;

    while let Some(path) = queue.pop_front() {
        if shortest.is_some_and(|len| path.len() > len) {
            break;
        }
        explored += 1;

        let Some(&node) = path.last() else {
            continue;
        };
        let depth = path.len() - 1;

        if node == end {
            if !collect_all {
                debug!(explored, hops = depth, "route found");
                return to_route(network, &path).into_iter().collect();
            }
            shortest = Some(path.len());
            found.push(path);
            if found.len() >= config.max_routes {
                warn!(
                    limit = config.max_routes,
                    "route collection limit reached, ignoring further routes"
                );
                break;
            }
            continue;
        }

        match expanded.get(&node) {
            Some(&first) if first != depth => continue,
            _ => {
                expanded.insert(node, depth);
            }
        }

        for neighbor in network.neighbors(node) {
            if expanded.get(&neighbor).is_some_and(|&d| d <= depth) {
                continue;
            }
            let mut next = path.clone();
            next.push(neighbor);
            queue.push_back(next);
        }

        trace!(station = %node, depth, queued = queue.len(), "expanded station");
    }

    debug!(explored, routes = found.len(), "route search complete");

    found
        .iter()
        .filter_map(|path| to_route(network, path))
        .collect()
}

/// Snapshot a path of handles into a [`Route`].
fn to_route(network: &Network, path: &[StationRef]) -> Option<Route> {
    let stops = path
        .iter()
        .map(|&at| {
            let line = network.line_by_id(at.line)?;
            let station = line.get(at.station)?;
            Some(RouteStop::new(at, station.name(), line.name(), station.time()))
        })
        .collect::<Option<Vec<_>>>()?;
    Route::new(stops)
}

/// Route planner over a network.
pub struct Planner<'a> {
    network: &'a Network,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a Network, config: &'a SearchConfig) -> Self {
        Self { network, config }
    }

    /// Find routes between two resolved stations. See [`find_routes`].
    pub fn find_routes(&self, start: StationRef, end: StationRef, collect_all: bool) -> Vec<Route> {
        find_routes(self.network, start, end, collect_all, self.config)
    }

    /// Find a route with the fewest hops between two named stations.
    pub fn route(
        &self,
        from_line: &str,
        from_station: &str,
        to_line: &str,
        to_station: &str,
    ) -> Result<Route, SearchError> {
        let start = self.network.resolve(from_line, from_station)?;
        let end = self.network.resolve(to_line, to_station)?;

        self.find_routes(start, end, false)
            .into_iter()
            .next()
            .ok_or_else(|| no_route(from_line, from_station, to_line, to_station))
    }

    /// Find the fastest of the minimal-hop routes between two named stations.
    ///
    /// Returns the route with its travel time in minutes.
    pub fn fastest_route(
        &self,
        from_line: &str,
        from_station: &str,
        to_line: &str,
        to_station: &str,
    ) -> Result<(Route, u32), SearchError> {
        let start = self.network.resolve(from_line, from_station)?;
        let end = self.network.resolve(to_line, to_station)?;

        let candidates = self.find_routes(start, end, true);
        debug!(candidates = candidates.len(), "ranking routes");

        fastest_route(candidates, self.config.transfer_time)
            .ok_or_else(|| no_route(from_line, from_station, to_line, to_station))
    }
}

fn no_route(from_line: &str, from_station: &str, to_line: &str, to_station: &str) -> SearchError {
    SearchError::NoRouteFound {
        from: format!("{from_station} ({from_line})"),
        to: format!("{to_station} ({to_line})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{LineRecord, LinkedStationRecord, NetworkBuilder, StationRecord};

    /// Red = A-B, Blue = C-D, with B <-> C. A->B takes 5, C->D takes 3.
    fn red_blue() -> Network {
        NetworkBuilder::new()
            .line(LineRecord::sequential(
                "Red",
                vec![
                    StationRecord::new("A").with_time(5),
                    StationRecord::new("B").with_transfer("Blue", "C"),
                ],
            ))
            .line(LineRecord::sequential(
                "Blue",
                vec![StationRecord::new("C").with_time(3), StationRecord::new("D")],
            ))
            .build()
            .unwrap()
    }

    /// Two equally short ways from S to E on separate lines:
    /// Top = S-X-E (slow), Bottom = S'-Y-E' (fast), with S<->S' and E<->E'.
    fn diamond() -> Network {
        NetworkBuilder::new()
            .line(LineRecord::sequential(
                "Top",
                vec![
                    StationRecord::new("S").with_time(1),
                    StationRecord::new("X").with_time(9),
                    StationRecord::new("E"),
                ],
            ))
            .line(LineRecord::sequential(
                "Bottom",
                vec![
                    StationRecord::new("S2")
                        .with_time(1)
                        .with_transfer("Top", "S"),
                    StationRecord::new("Y").with_time(1),
                    StationRecord::new("E2").with_transfer("Top", "E"),
                ],
            ))
            .build()
            .unwrap()
    }

    fn at(network: &Network, line: &str, station: &str) -> StationRef {
        network.resolve(line, station).unwrap()
    }

    #[test]
    fn route_across_transfer() {
        let network = red_blue();
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);

        let route = planner.route("Red", "A", "Blue", "D").unwrap();
        assert_eq!(route.names(), vec!["A", "B", "C", "D"]);
        assert_eq!(route.transfer_count(), 1);
    }

    #[test]
    fn fastest_route_transfer_is_free() {
        let network = red_blue();
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);

        let (route, time) = planner.fastest_route("Red", "A", "Blue", "D").unwrap();
        assert_eq!(route.names(), vec!["A", "B", "C", "D"]);
        // 5 (A->B) + 0 (B->C transfer) + 3 (C->D)
        assert_eq!(time, 8);
    }

    #[test]
    fn route_in_reverse_direction() {
        let network = red_blue();
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);

        let route = planner.route("Blue", "D", "Red", "A").unwrap();
        assert_eq!(route.names(), vec!["D", "C", "B", "A"]);
    }

    #[test]
    fn route_to_self_is_single_stop() {
        let network = red_blue();
        let a = at(&network, "Red", "A");

        let routes = find_routes(&network, a, a, true, &SearchConfig::default());
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].names(), vec!["A"]);
    }

    #[test]
    fn disconnected_islands_have_no_route() {
        let network = NetworkBuilder::new()
            .line(LineRecord::sequential("Red", vec![StationRecord::new("A")]))
            .line(LineRecord::sequential("Blue", vec![StationRecord::new("C")]))
            .build()
            .unwrap();
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);

        let a = at(&network, "Red", "A");
        let c = at(&network, "Blue", "C");
        assert!(planner.find_routes(a, c, false).is_empty());
        assert!(planner.find_routes(a, c, true).is_empty());

        let err = planner.route("Red", "A", "Blue", "C").unwrap_err();
        assert_eq!(
            err,
            SearchError::NoRouteFound {
                from: "A (Red)".into(),
                to: "C (Blue)".into(),
            }
        );
        assert!(planner.fastest_route("Red", "A", "Blue", "C").is_err());
    }

    #[test]
    fn unknown_endpoints_are_network_errors() {
        let network = red_blue();
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);

        assert_eq!(
            planner.route("Green", "A", "Blue", "D").unwrap_err(),
            SearchError::Network(NetworkError::UnknownLine("Green".into()))
        );
        assert!(matches!(
            planner.fastest_route("Red", "A", "Blue", "Z").unwrap_err(),
            SearchError::Network(NetworkError::UnknownStation { .. })
        ));
    }

    #[test]
    fn removed_endpoint_yields_empty_result() {
        let mut network = red_blue();
        let a = at(&network, "Red", "A");
        let d = at(&network, "Blue", "D");
        network.remove("Blue", "D").unwrap();

        assert!(find_routes(&network, a, d, false, &SearchConfig::default()).is_empty());
    }

    #[test]
    fn collect_all_finds_every_minimal_route() {
        let network = diamond();
        let s = at(&network, "Top", "S");
        let e = at(&network, "Top", "E");
        let config = SearchConfig::default();

        let all = find_routes(&network, s, e, true, &config);
        let names: Vec<Vec<&str>> = all.iter().map(|r| r.names()).collect();

        // S-X-E is 2 hops; the bottom way is S-S2-Y-E2-E, 4 hops
        assert_eq!(names, vec![vec!["S", "X", "E"]]);
    }

    #[test]
    fn collect_all_keeps_paths_through_shared_station() {
        // Both lines meet at M; two minimal ways into M, one way out.
        let network = NetworkBuilder::new()
            .line(LineRecord::linked(
                "Fork",
                vec![
                    LinkedStationRecord::new(StationRecord::new("S").with_time(4))
                        .with_next("P")
                        .with_next("Q"),
                    LinkedStationRecord::new(StationRecord::new("P").with_time(4)).with_next("M"),
                    LinkedStationRecord::new(StationRecord::new("Q").with_time(1)).with_next("M"),
                    LinkedStationRecord::new(StationRecord::new("M").with_time(2)).with_next("E"),
                    LinkedStationRecord::new(StationRecord::new("E")),
                ],
            ))
            .build()
            .unwrap();
        let s = at(&network, "Fork", "S");
        let e = at(&network, "Fork", "E");
        let config = SearchConfig::default();

        let all = find_routes(&network, s, e, true, &config);
        let names: Vec<Vec<&str>> = all.iter().map(|r| r.names()).collect();
        assert_eq!(
            names,
            vec![vec!["S", "P", "M", "E"], vec!["S", "Q", "M", "E"]]
        );

        let planner = Planner::new(&network, &config);
        let (route, time) = planner.fastest_route("Fork", "S", "Fork", "E").unwrap();
        assert_eq!(route.names(), vec!["S", "Q", "M", "E"]);
        assert_eq!(time, 7);
    }

    #[test]
    fn first_route_is_as_short_as_any() {
        let network = diamond();
        let x = at(&network, "Top", "X");
        let y = at(&network, "Bottom", "Y");
        let config = SearchConfig::default();

        let first = find_routes(&network, x, y, false, &config);
        let all = find_routes(&network, x, y, true, &config);

        assert_eq!(first.len(), 1);
        assert!(!all.is_empty());
        assert!(all.iter().all(|r| r.hop_count() == first[0].hop_count()));
        assert_eq!(all[0], first[0]);
    }

    #[test]
    fn max_routes_caps_collection() {
        let network = NetworkBuilder::new()
            .line(LineRecord::linked(
                "Fork",
                vec![
                    LinkedStationRecord::new(StationRecord::new("S"))
                        .with_next("P")
                        .with_next("Q"),
                    LinkedStationRecord::new(StationRecord::new("P")).with_next("E"),
                    LinkedStationRecord::new(StationRecord::new("Q")).with_next("E"),
                    LinkedStationRecord::new(StationRecord::new("E")),
                ],
            ))
            .build()
            .unwrap();
        let s = at(&network, "Fork", "S");
        let e = at(&network, "Fork", "E");

        let all = find_routes(&network, s, e, true, &SearchConfig::default());
        assert_eq!(all.len(), 2);

        let capped = find_routes(&network, s, e, true, &SearchConfig::new(1, 0));
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0], all[0]);
    }

    #[test]
    fn two_cycle_yields_each_route_once() {
        // A and B list each other as next, so B is both prev and next of A
        let network = NetworkBuilder::new()
            .line(LineRecord::linked(
                "Shuttle",
                vec![
                    LinkedStationRecord::new(StationRecord::new("A").with_time(2)).with_next("B"),
                    LinkedStationRecord::new(StationRecord::new("B")).with_next("A"),
                ],
            ))
            .build()
            .unwrap();
        let a = at(&network, "Shuttle", "A");
        let b = at(&network, "Shuttle", "B");

        let all = find_routes(&network, a, b, true, &SearchConfig::default());
        let names: Vec<Vec<&str>> = all.iter().map(|r| r.names()).collect();
        assert_eq!(names, vec![vec!["A", "B"]]);
    }

    #[test]
    fn results_are_deterministic() {
        let network = diamond();
        let x = at(&network, "Top", "X");
        let y = at(&network, "Bottom", "Y");
        let config = SearchConfig::default();

        let first = find_routes(&network, x, y, true, &config);
        for _ in 0..5 {
            assert_eq!(find_routes(&network, x, y, true, &config), first);
        }
    }
}
