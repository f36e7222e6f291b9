use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use crate::core::checker::{check_text, CheckRun};
use crate::core::config::{CheckOptions, Config};
use crate::core::rewriter::{notworking_path, working_path, RewriteMode};
use crate::core::writer::{update_in_place, write_atomic};
use crate::ui::{print_section, print_summary, render_events, render_report_text};

/// Everything `m3uc check` needs to know
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub file: PathBuf,
    pub options: CheckOptions,
    pub report_file: Option<PathBuf>,
    pub quiet: bool,
    pub split: bool,
    pub update_original: bool,
    pub backup: bool,
    pub working_file: Option<PathBuf>,
    pub notworking_file: Option<PathBuf>,
}

impl CheckRequest {
    pub fn new<P: Into<PathBuf>>(file: P, options: CheckOptions) -> Self {
        Self {
            file: file.into(),
            options,
            report_file: None,
            quiet: false,
            split: false,
            update_original: false,
            backup: true,
            working_file: None,
            notworking_file: None,
        }
    }

    pub fn from_matches(matches: &clap::ArgMatches) -> Result<Self> {
        let file = matches
            .get_one::<String>("file")
            .context("Playlist file is required")?;

        let config = Config::load().context("Failed to load configuration")?;
        let options = CheckOptions::from_config(&config)
            .with_timeout_secs(matches.get_one::<u64>("timeout").copied())?
            .with_workers(matches.get_one::<usize>("workers").copied())?
            .with_strict_schemes(matches.get_flag("strict-schemes"));

        Ok(Self {
            file: PathBuf::from(file),
            options,
            report_file: matches.get_one::<String>("output").map(PathBuf::from),
            quiet: matches.get_flag("quiet"),
            split: matches.get_flag("split"),
            update_original: matches.get_flag("update-original"),
            backup: !matches.get_flag("no-backup"),
            working_file: matches.get_one::<String>("working-file").map(PathBuf::from),
            notworking_file: matches.get_one::<String>("notworking-file").map(PathBuf::from),
        })
    }
}

/// Files produced by a check run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckOutputs {
    pub report_file: Option<PathBuf>,
    pub working_file: Option<PathBuf>,
    pub notworking_file: Option<PathBuf>,
    pub backup_file: Option<PathBuf>,
    pub updated_original: bool,
}

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let request = CheckRequest::from_matches(matches)?;
    run(&request)?;
    Ok(())
}

/// Check a playlist file and write every requested output
pub fn run(request: &CheckRequest) -> Result<(CheckRun, CheckOutputs)> {
    let text = fs::read_to_string(&request.file)
        .with_context(|| format!("Failed to read playlist: {}", request.file.display()))?;

    println!(
        "{} {}",
        "Parsing M3U file:".cyan().bold(),
        request.file.display()
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("m3uc-probe")
        .build()
        .context("Failed to start async runtime")?;

    let source = request.file.display().to_string();
    let check = runtime.block_on(async {
        let (tx, rx) = mpsc::unbounded_channel();
        let printer = tokio::spawn(render_events(rx, request.quiet));

        if !request.quiet {
            println!(
                "{}",
                format!(
                    "Testing streams ({} workers, {}s timeout)...",
                    request.options.workers,
                    request.options.timeout.as_secs()
                )
                .dimmed()
            );
            println!();
        }

        let check = check_text(&text, &source, &request.options, Some(tx)).await?;
        printer.await.context("Progress renderer stopped unexpectedly")?;
        Ok::<_, anyhow::Error>(check)
    })?;

    print_summary(&check.report.summary());

    let outputs = write_outputs(request, &check)?;
    Ok((check, outputs))
}

/// Write report and rewritten playlists; only called once every probe resolved
pub fn write_outputs(request: &CheckRequest, check: &CheckRun) -> Result<CheckOutputs> {
    let mut outputs = CheckOutputs::default();

    if let Some(report_file) = &request.report_file {
        write_atomic(report_file, &render_report_text(&check.report, Local::now()))?;
        println!(
            "{} {}",
            "Detailed report saved to:".green(),
            report_file.display()
        );
        outputs.report_file = Some(report_file.clone());
    }

    if request.split {
        print_section("Splitting streams into separate files...");
        let rewritten = check.rewrite(RewriteMode::Split);

        let working = target_path(&request.working_file, &request.file, working_path);
        write_atomic(&working, &rewritten.kept_text)?;
        println!(
            "{} {} ({} streams)",
            "✓ Working streams saved to:".green(),
            working.display(),
            rewritten.kept
        );

        let notworking = target_path(&request.notworking_file, &request.file, notworking_path);
        write_atomic(&notworking, &rewritten.removed_text)?;
        println!(
            "{} {} ({} streams)",
            "✗ Not working streams saved to:".red(),
            notworking.display(),
            rewritten.removed
        );

        outputs.working_file = Some(working);
        outputs.notworking_file = Some(notworking);
    } else {
        let rewritten = check.rewrite(RewriteMode::Default);
        if rewritten.removed > 0 {
            print_section("Saving not working streams...");
            let notworking = target_path(&request.notworking_file, &request.file, notworking_path);
            write_atomic(&notworking, &rewritten.removed_text)?;
            println!(
                "{} {} ({} streams)",
                "✗ Not working streams saved to:".red(),
                notworking.display(),
                rewritten.removed
            );
            outputs.notworking_file = Some(notworking);
        }
    }

    if request.update_original {
        print_section("Updating original file...");
        let rewritten = check.rewrite(RewriteMode::UpdateOriginal);

        outputs.backup_file = update_in_place(&request.file, &rewritten.kept_text, request.backup)
            .with_context(|| format!("Original file left unchanged: {}", request.file.display()))?;
        outputs.updated_original = true;

        if let Some(backup) = &outputs.backup_file {
            println!("{} {}", "📋 Backup created:".cyan(), backup.display());
        }
        println!(
            "{} {} (removed {} not working streams)",
            "🔄 Original file updated:".green(),
            request.file.display(),
            rewritten.removed
        );
    }

    println!();
    Ok(outputs)
}

fn target_path(custom: &Option<PathBuf>, original: &Path, default: fn(&Path) -> PathBuf) -> PathBuf {
    custom.clone().unwrap_or_else(|| default(original))
}
