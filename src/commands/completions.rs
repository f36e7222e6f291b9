use anyhow::{bail, Context, Result};
use clap::{ArgMatches, Command};
use clap_complete::{generate, Shell};
use std::io;

pub const SUPPORTED_SHELLS: &str = "bash, zsh, fish, powershell, elvish";

/// Print completions for the requested shell to stdout
pub fn execute(matches: &ArgMatches, cli: &mut Command) -> Result<()> {
    let shell_name = matches
        .get_one::<String>("shell")
        .context("Shell argument is required")?;
    let shell = parse_shell(shell_name)?;

    generate(shell, cli, "m3uc", &mut io::stdout());
    Ok(())
}

pub fn parse_shell(name: &str) -> Result<Shell> {
    Ok(match name.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" | "pwsh" => Shell::PowerShell,
        "elvish" => Shell::Elvish,
        _ => bail!("Unsupported shell: {} (supported: {})", name, SUPPORTED_SHELLS),
    })
}
