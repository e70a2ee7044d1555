//! `passvault completions`: print a completion script for bash, zsh,
//! fish, PowerShell or elvish.
//!
//!   passvault completions bash > ~/.local/share/bash-completion/completions/passvault

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
