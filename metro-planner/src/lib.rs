//! Metro network planner.
//!
//! Loads a metro network from a JSON line-definition file, lets the user edit
//! it line by line, and answers: "how do I get from this station to that one
//! with the fewest stops, and which of those routes is fastest?"

pub mod domain;
pub mod network;
pub mod planner;
pub mod shell;
pub mod source;
