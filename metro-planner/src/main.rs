use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use metro_planner::planner::SearchConfig;
use metro_planner::shell::Session;
use metro_planner::source;

#[derive(Parser)]
#[command(name = "metro-planner")]
#[command(about = "Edit a metro network and plan routes through it", long_about = None)]
struct Cli {
    /// Path to the JSON line-definition file
    file: PathBuf,

    /// Most equally short routes to weigh when looking for the fastest
    #[arg(long, default_value_t = 1000)]
    max_routes: usize,

    /// Minutes charged for each change of line
    #[arg(long, default_value_t = 0)]
    transfer_time: u32,
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout is for command replies
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let network = match source::load_file(&cli.file) {
        Ok(network) => network,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = SearchConfig::new(cli.max_routes, cli.transfer_time);
    let mut session = Session::new(network, config);

    let stdin = io::stdin();
    if let Err(e) = session.run(stdin.lock(), io::stdout().lock()) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
