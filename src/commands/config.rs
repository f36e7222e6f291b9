use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::config::{Config, CONFIG_KEYS};

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => show(),
        Some(("set", sub_matches)) => set(sub_matches),
        Some(("reset", _)) => reset(),
        Some(("path", _)) => path(),
        _ => {
            println!("Use 'm3uc config --help' for more information.");
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let config = Config::load()?;
    let denylist = if config.denylist.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        config.denylist.join(", ")
    };

    println!("{}", "Current configuration:".white().bold());
    println!("{}", "─".repeat(60));
    println!("  {:<16} {}s", "timeout", config.timeout_secs.to_string().cyan());
    println!("  {:<16} {}", "workers", config.workers.to_string().cyan());
    println!("  {:<16} {}", "max-redirects", config.max_redirects.to_string().cyan());
    println!("  {:<16} {}", "user-agent", config.user_agent.cyan());
    println!("  {:<16} {}", "strict-schemes", config.strict_schemes.to_string().cyan());
    println!("  {:<16} {}", "denylist", denylist);
    Ok(())
}

fn set(matches: &clap::ArgMatches) -> Result<()> {
    let key = matches.get_one::<String>("key").context("Key argument is required")?;
    let value = matches
        .get_one::<String>("value")
        .context("Value argument is required")?;

    let mut config = Config::load()?;
    if let Err(e) = config.set_value(key, value) {
        println!("{}", format!("✗ {}", e).red());
        println!(
            "{}",
            format!("Valid keys: {}", CONFIG_KEYS.join(", ")).dimmed()
        );
        return Err(e.into());
    }
    config.save()?;

    println!("{} {} = {}", "✓ Set".green(), key, value.cyan());
    Ok(())
}

fn reset() -> Result<()> {
    Config::default().save()?;
    println!("{}", "✓ Configuration reset to defaults".green());
    Ok(())
}

fn path() -> Result<()> {
    println!("{}", Config::get_config_path()?.display());
    Ok(())
}
