use crate::{credentials::TerminalPrompt, Cli};
use anyhow::Result;
use std::io;

pub mod completions;
pub mod table;

/// Dispatch a parsed command line: print completions, or perform the one
/// Table API call it describes.
pub async fn run(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        return completions::run(shell);
    }
    let opts = cli.into_options(io::stdin())?;
    table::run(&opts, &TerminalPrompt).await
}
