//! # snowy
//!
//! Command-line client for the ServiceNow Table API.
//!
//! ```bash
//! # List incidents
//! snowy incident
//!
//! # Fetch one record
//! snowy incident/af204b6f7560459c8849aa1045b39968
//!
//! # Create a record
//! snowy --data '{"short_description": "Hello"}' incident
//!
//! # Delete a record
//! snowy --delete incident/af204b6f7560459c8849aa1045b39968
//! ```
//!
//! Credentials come from `--instance`/`--user`, the `SNOWY_*` environment
//! variables, `--auth-file` or `~/.snowy`, in that order.

use clap::Parser;
use snowy::{commands, logging, Cli};

/// Parses the command line, runs the single request and maps every failure to
/// exit status 1.
#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    if let Err(err) = logging::init(cli.verbose) {
        eprintln!("warning: {err}");
    }

    if let Err(err) = commands::run(cli).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
