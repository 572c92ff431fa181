//! Route planner using BFS search.
//!
//! This module answers two questions about a network:
//! "how do I get from here to there with the fewest stops?" and
//! "of those routes, which one takes the least time?"
//!
//! Search explores same-line neighbours and transfers breadth-first, so the
//! first route found is a shortest one by hop count. Collecting every such
//! route and costing them gives the fastest.

mod config;
mod rank;
mod search;

pub use config::SearchConfig;
pub use rank::fastest_route;
pub use search::{Planner, SearchError, find_routes};
