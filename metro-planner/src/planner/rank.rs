//! Fastest-route selection.

use crate::domain::Route;

/// Pick the route with the lowest travel time.
///
/// Each candidate is costed with [`Route::travel_time`]. Ties go to the
/// candidate that comes first. Returns the winner with its cost, or `None`
/// when there are no candidates.
pub fn fastest_route(candidates: Vec<Route>, transfer_time: u32) -> Option<(Route, u32)> {
    let mut best: Option<(Route, u32)> = None;

    for route in candidates {
        let cost = route.travel_time(transfer_time);
        match &best {
            Some((_, best_cost)) if *best_cost <= cost => {}
            _ => best = Some((route, cost)),
        }
    }

    best
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{LineId, RouteStop, StationId, StationRef};
    use proptest::prelude::*;

    fn route_with_times(times: Vec<u32>) -> Route {
        let stops = times
            .iter()
            .enumerate()
            .map(|(i, time)| {
                RouteStop::new(
                    StationRef::new(LineId(0), StationId(i as u32 + 2)),
                    format!("S{i}"),
                    "Line",
                    *time,
                )
            })
            .collect();
        Route::new(stops).unwrap()
    }

    proptest! {
        /// The winner costs no more than any candidate, and is the first such
        #[test]
        fn winner_is_first_minimum(
            all_times in prop::collection::vec(prop::collection::vec(0u32..20, 1..6), 1..8)
        ) {
            let candidates: Vec<Route> = all_times.into_iter().map(route_with_times).collect();
            let costs: Vec<u32> = candidates.iter().map(|r| r.travel_time(0)).collect();
            let min = *costs.iter().min().unwrap();
            let first_min = costs.iter().position(|c| *c == min).unwrap();

            let (route, cost) = fastest_route(candidates.clone(), 0).unwrap();
            prop_assert_eq!(cost, min);
            prop_assert_eq!(&route, &candidates[first_min]);
        }
    }
}
