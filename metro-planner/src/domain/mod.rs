//! Domain types for the metro network.
//!
//! Stations live in per-line arenas and refer to each other through
//! `StationId` (same line) and `StationRef` (any line) handles, so the
//! mutually linked graph has a single owner for every node.

mod error;
mod line;
mod route;
mod station;

pub use error::NetworkError;
pub use line::Line;
pub use route::{Route, RouteStop};
pub use station::{DEPOT, LineId, Station, StationId, StationRef};
