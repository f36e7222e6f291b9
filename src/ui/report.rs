// Summary and plain-text report rendering

use chrono::{DateTime, Local};
use colored::Colorize;

use crate::core::outcome::Classification;
use crate::core::report::{Report, Summary};
use crate::ui::formatters::{format_duration, format_percent};

/// Print the summary block to the terminal
pub fn print_summary(summary: &Summary) {
    println!();
    println!("{}", "═".repeat(80).cyan());
    println!("{}", "SUMMARY".white().bold());
    println!("{}", "═".repeat(80).cyan());
    println!("{} {}", "Total Streams:  ".white(), summary.total.to_string().bold());
    println!(
        "{} {} ({})",
        "✓ Working:      ".green().bold(),
        summary.working,
        format_percent(summary.working_pct)
    );
    println!(
        "{} {} ({})",
        "✗ Failed:       ".red().bold(),
        summary.failed,
        format_percent(summary.failed_pct)
    );
    println!(
        "{} {} ({})",
        "⚠ Invalid URLs: ".yellow().bold(),
        summary.invalid,
        format_percent(summary.invalid_pct)
    );
    println!("{}", "═".repeat(80).cyan());
    println!();
}

/// Print a boxed section heading
pub fn print_section(title: &str) {
    println!();
    println!("{}", "─".repeat(80));
    println!("{}", title.white().bold());
    println!("{}", "─".repeat(80));
}

/// Full report file contents, entries listed in playlist order
pub fn render_report_text(report: &Report, generated_at: DateTime<Local>) -> String {
    let summary = report.summary();
    let mut out = String::new();

    out.push_str("M3U Stream Test Report\n");
    out.push_str(&format!(
        "Generated: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!("{}\n\n", "=".repeat(100)));

    out.push_str(&format!("Total Streams:  {}\n", summary.total));
    out.push_str(&format!(
        "Working:        {} ({})\n",
        summary.working,
        format_percent(summary.working_pct)
    ));
    out.push_str(&format!(
        "Failed:         {} ({})\n",
        summary.failed,
        format_percent(summary.failed_pct)
    ));
    out.push_str(&format!(
        "Invalid URLs:   {} ({})\n\n",
        summary.invalid,
        format_percent(summary.invalid_pct)
    ));

    for (classification, heading, icon) in [
        (Classification::Working, "WORKING STREAMS", "✓"),
        (Classification::Failed, "FAILED STREAMS", "✗"),
        (Classification::Invalid, "INVALID URLs", "⚠"),
    ] {
        let bucket = report.bucket(classification);
        out.push_str(&format!("{} ({})\n", heading, bucket.len()));
        out.push_str(&format!("{}\n", "-".repeat(100)));

        for (entry, outcome) in bucket {
            out.push_str(&format!("{} {}\n", icon, entry.display_name));
            out.push_str(&format!(
                "  Group: {}\n",
                entry.group.as_deref().unwrap_or("Unknown")
            ));
            out.push_str(&format!("  Line: {}\n", entry.line_number));

            match classification {
                Classification::Working => {
                    let status = outcome
                        .http_status
                        .map(|code| code.to_string())
                        .unwrap_or_else(|| outcome.error_detail.clone());
                    out.push_str(&format!("  Status: {}\n", status));
                }
                _ => out.push_str(&format!("  Error: {}\n", outcome.error_detail)),
            }

            if classification != Classification::Invalid {
                out.push_str(&format!("  Time: {}\n", format_duration(outcome.elapsed)));
            }
            out.push_str(&format!("  URL: {}\n\n", entry.url));
        }
        out.push('\n');
    }

    out
}
