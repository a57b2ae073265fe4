use crate::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

pub fn run(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let mut out = io::stdout();
    generate(shell, &mut cmd, "snowy", &mut out);
    out.flush()?;
    Ok(())
}
