//! The command loop: runs parsed commands against a network and renders
//! their replies.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::domain::{DEPOT, Line, Route, RouteStop};
use crate::network::Network;
use crate::planner::{Planner, SearchConfig, SearchError};

use super::command::{Command, CommandError, Endpoint};

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Lines to print. Empty for silent edits.
    Lines(Vec<String>),
    /// End the session.
    Exit,
}

/// An interactive session over one network.
pub struct Session {
    network: Network,
    config: SearchConfig,
}

impl Session {
    pub fn new(network: Network, config: SearchConfig) -> Self {
        Self { network, config }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Run one command.
    ///
    /// A failed command leaves the network as it was.
    pub fn execute(&mut self, command: Command) -> Result<Reply, CommandError> {
        debug!(?command, "executing");

        match command {
            Command::Append { line, station, time } => {
                self.network.append(&line, &station, time)?;
                Ok(Reply::Lines(Vec::new()))
            }
            Command::AddHead { line, station, time } => {
                self.network.add_head(&line, &station, time)?;
                Ok(Reply::Lines(Vec::new()))
            }
            Command::Remove { line, station } => {
                self.network.remove(&line, &station)?;
                Ok(Reply::Lines(Vec::new()))
            }
            Command::Connect { from, to } => {
                self.network
                    .connect(&from.line, &from.station, &to.line, &to.station)?;
                Ok(Reply::Lines(Vec::new()))
            }
            Command::Output { line } => {
                let line = self.network.line(&line)?;
                Ok(Reply::Lines(render_line(&self.network, line)))
            }
            Command::Route { from, to } => {
                let planner = Planner::new(&self.network, &self.config);
                let found = planner.route(&from.line, &from.station, &to.line, &to.station);
                route_reply(found.map(|route| render_route(&route)))
            }
            Command::FastestRoute { from, to } => self.fastest_route(&from, &to),
            Command::Exit => Ok(Reply::Exit),
        }
    }

    fn fastest_route(&self, from: &Endpoint, to: &Endpoint) -> Result<Reply, CommandError> {
        let planner = Planner::new(&self.network, &self.config);
        let found = planner.fastest_route(&from.line, &from.station, &to.line, &to.station);

        route_reply(found.map(|(route, minutes)| {
            let mut lines = render_route(&route);
            lines.push(format!("Total: {minutes} minutes in the way"));
            lines
        }))
    }

    /// Read commands from `input` until `exit` or end of input, writing
    /// replies and error messages to `output`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            let reply = Command::parse_line(&line).and_then(|command| match command {
                Some(command) => self.execute(command),
                None => Ok(Reply::Lines(Vec::new())),
            });

            match reply {
                Ok(Reply::Exit) => {
                    info!("session ended by exit");
                    return output.flush();
                }
                Ok(Reply::Lines(lines)) => {
                    for l in lines {
                        writeln!(output, "{l}")?;
                    }
                }
                Err(err) => {
                    debug!(%err, "command failed");
                    writeln!(output, "{err}")?;
                }
            }
            output.flush()?;
        }

        info!("session ended at end of input");
        Ok(())
    }
}

/// An empty search prints `No route found` rather than an error.
fn route_reply(found: Result<Vec<String>, SearchError>) -> Result<Reply, CommandError> {
    match found {
        Ok(lines) => Ok(Reply::Lines(lines)),
        Err(SearchError::NoRouteFound { .. }) => Ok(Reply::Lines(vec!["No route found".to_string()])),
        Err(err) => Err(err.into()),
    }
}

/// `depot`, each station with its transfers, `depot`.
pub fn render_line(network: &Network, line: &Line) -> Vec<String> {
    let mut lines = vec![DEPOT.to_string()];

    for id in line.stations() {
        let Some(station) = line.get(id) else {
            continue;
        };

        let transfers: Vec<String> = station
            .transfers()
            .iter()
            .filter_map(|&at| {
                let other = network.station(at)?;
                let other_line = network.line_by_id(at.line)?;
                Some(format!("{} ({})", other.name(), other_line.name()))
            })
            .collect();

        if transfers.is_empty() {
            lines.push(station.name().to_string());
        } else {
            lines.push(format!("{} - {}", station.name(), transfers.join(", ")));
        }
    }

    lines.push(DEPOT.to_string());
    lines
}

/// Station names in order, announcing each change of line.
pub fn render_route(route: &Route) -> Vec<String> {
    let mut lines = Vec::with_capacity(route.len() + route.transfer_count());
    let mut previous = None;

    for stop in route.stops() {
        if previous.is_some_and(|prev: &RouteStop| prev.is_transfer_to(stop)) {
            lines.push(format!("Transition to line {}", stop.line));
        }
        lines.push(stop.name.clone());
        previous = Some(stop);
    }

    lines
}
