//! Playlist rewriting
//!
//! Rebuilds playlist text from the original source, keeping or removing each
//! entry's block depending on its classification. A block runs from the
//! entry's `#EXTINF` line through its URL line, so option lines such as
//! `#EXTVLCOPT` stay attached to their entry.
//!
//! Lines outside every block (blank lines, free comments) are kept verbatim
//! in their original position. Orphan `#EXTINF` lines are the one exception:
//! they are dropped, since keeping one would pair it with whatever kept URL
//! came next.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::dispatcher::Outcomes;
use crate::core::outcome::{Classification, ValidationOutcome};
use crate::core::playlist::{is_header, Entry, EXTINF_DIRECTIVE, HEADER_DIRECTIVE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewriteMode {
    /// Keep working and invalid entries, remove failed ones
    #[default]
    Default,
    /// Keep only working entries
    Split,
    /// Kept text replaces the original file; only working entries survive
    UpdateOriginal,
}

impl RewriteMode {
    pub fn keeps(&self, classification: Classification) -> bool {
        match self {
            RewriteMode::Default => classification != Classification::Failed,
            RewriteMode::Split | RewriteMode::UpdateOriginal => {
                classification == Classification::Working
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RewriteOutput {
    pub kept_text: String,
    pub removed_text: String,
    pub kept: usize,
    pub removed: usize,
}

/// Split `original_text` into kept and removed playlists
pub fn rewrite(
    original_text: &str,
    entries: &[Entry],
    outcomes: &Outcomes,
    mode: RewriteMode,
) -> RewriteOutput {
    let lines: Vec<&str> = original_text.split_inclusive('\n').collect();

    // Map each block's first line to its entry
    let block_starts: HashMap<usize, &Entry> = entries
        .iter()
        .map(|entry| (entry.first_line(), entry))
        .collect();

    let mut output = RewriteOutput::default();
    let mut removed_blocks = String::new();
    let mut failed = 0;
    let mut invalid = 0;

    let header_line = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .filter(|&pos| is_header(lines[pos]));

    if let Some(pos) = header_line {
        push_line(&mut output.kept_text, lines[pos].trim_start_matches('\u{feff}'));
    }

    let mut line_number = 1;
    while line_number <= lines.len() {
        let line = lines[line_number - 1];

        if let Some(entry) = block_starts.get(&line_number) {
            let block_end = entry.line_number.min(lines.len());
            let block = &lines[line_number - 1..block_end];

            match outcomes.get(&entry.index) {
                Some(outcome) if !mode.keeps(outcome.classification) => {
                    match outcome.classification {
                        Classification::Invalid => invalid += 1,
                        _ => failed += 1,
                    }
                    output.removed += 1;
                    write_removed_block(&mut removed_blocks, entry, outcome, block);
                }
                // Entries without an outcome are never dropped
                _ => {
                    output.kept += 1;
                    block.iter().for_each(|l| push_line(&mut output.kept_text, l));
                }
            }

            line_number = block_end + 1;
            continue;
        }

        let is_source_header = header_line == Some(line_number - 1);
        let is_orphan_metadata = line.trim().starts_with(EXTINF_DIRECTIVE);
        if !is_source_header && !is_orphan_metadata {
            push_line(&mut output.kept_text, line);
        }

        line_number += 1;
    }

    output.removed_text = format!(
        "{}\n# Not working: {} (failed: {} | invalid: {})\n\n{}",
        HEADER_DIRECTIVE, output.removed, failed, invalid, removed_blocks
    );

    output
}

fn write_removed_block(out: &mut String, entry: &Entry, outcome: &ValidationOutcome, block: &[&str]) {
    let detail = if outcome.error_detail.is_empty() {
        outcome.classification.label()
    } else {
        outcome.error_detail.as_str()
    };

    out.push_str(&format!(
        "# ERROR: {} | Original Line: {}\n",
        detail, entry.line_number
    ));
    block.iter().for_each(|line| push_line(out, line));
    out.push('\n');
}

/// Append a source line, terminating it if it was the unterminated last line
fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    if !line.ends_with('\n') {
        out.push('\n');
    }
}

/// `<dir>/<stem><suffix>.m3u` next to the source playlist
pub fn sibling_path(original: &Path, suffix: &str) -> PathBuf {
    let stem = original
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "playlist".to_string());

    original.with_file_name(format!("{}{}.m3u", stem, suffix))
}

pub fn working_path(original: &Path) -> PathBuf {
    sibling_path(original, "_working")
}

pub fn notworking_path(original: &Path) -> PathBuf {
    sibling_path(original, "_notworking")
}
