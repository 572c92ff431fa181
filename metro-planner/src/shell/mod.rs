//! Interactive command shell.
//!
//! Reads one command per line, applies it to the network, and prints the
//! reply. Failed commands print their error and the session carries on.

mod command;
mod session;

pub use command::{Command, CommandError, Endpoint, tokenize};
pub use session::{Reply, Session, render_line, render_route};
