use anyhow::{bail, Context, Result};
use chrono::Local;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::commands::check::{self, CheckRequest};
use crate::core::config::{CheckOptions, Config};
use crate::core::converter::{Category, Converter};
use crate::core::writer::write_atomic;
use crate::ui::print_section;

pub const DEFAULT_JSON_FOLDER: &str = "json";
pub const DEFAULT_OUTPUT: &str = "from_json.m3u";
pub const DEFAULT_TEST_TIMEOUT_SECS: u64 = 8;
pub const DEFAULT_TEST_WORKERS: usize = 15;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let folder = matches
        .get_one::<String>("json-folder")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_JSON_FOLDER));
    let output = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    convert(&folder, &output)?;

    if matches.get_flag("no-test") {
        println!("{}", "Skipping stream testing (--no-test).".dimmed());
        return Ok(());
    }

    let config = Config::load().context("Failed to load configuration")?;
    let timeout = matches
        .get_one::<u64>("timeout")
        .copied()
        .unwrap_or(DEFAULT_TEST_TIMEOUT_SECS);
    let workers = matches
        .get_one::<usize>("workers")
        .copied()
        .unwrap_or(DEFAULT_TEST_WORKERS);
    let options = CheckOptions::from_config(&config)
        .with_timeout_secs(Some(timeout))?
        .with_workers(Some(workers))?;

    print_section("Testing converted streams...");
    let mut request = CheckRequest::new(&output, options);
    request.update_original = true;
    check::run(&request)?;

    Ok(())
}

/// Convert every JSON dump in `folder` into one playlist at `output`
///
/// Nothing is written when no channel survives.
pub fn convert(folder: &Path, output: &Path) -> Result<Converter> {
    println!(
        "{} {}",
        "Reading JSON files from:".cyan().bold(),
        folder.display()
    );

    let mut converter = Converter::new();
    let found = converter
        .load_dir(folder)
        .with_context(|| format!("Failed to convert JSON folder: {}", folder.display()))?;

    if converter.channels().is_empty() {
        bail!("No channels to save! ({} has no records with a URL)", folder.display());
    }

    let playlist = converter.to_m3u(Local::now());
    write_atomic(output, &playlist)?;

    println!();
    println!("{}", "─".repeat(60));
    println!("{}", "CONVERSION SUMMARY".white().bold());
    println!("{}", "─".repeat(60));
    println!("JSON files:          {} ({} read)", found, converter.files_read());
    println!("Channels written:    {}", converter.channels().len());
    println!("Duplicates removed:  {}", converter.duplicates_removed());
    for category in Category::ALL {
        let count = converter.count_in(category);
        if count > 0 {
            println!("  {:<18} {}", format!("{}:", category.title()), count);
        }
    }
    println!(
        "{} {}",
        "✓ Playlist saved to:".green(),
        output.display()
    );

    Ok(converter)
}
