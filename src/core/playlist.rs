//! M3U playlist parsing
//!
//! Turns raw playlist text into an ordered list of [`Entry`] values. Parsing is
//! best-effort: anything that follows an `#EXTINF` line becomes that entry's URL
//! and is left for the validator to judge. The only hard failure is a playlist
//! that yields no entries at all.
//!
//! # Examples
//!
//! ```
//! use m3uc::core::playlist::parse;
//!
//! let text = "#EXTM3U\n#EXTINF:-1 group-title=\"News\",Channel One\nhttp://example.com/one.m3u8\n";
//! let entries = parse(text, "demo.m3u")?;
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].display_name, "Channel One");
//! assert_eq!(entries[0].line_number, 3);
//! # Ok::<(), m3uc::M3ucError>(())
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{M3ucError, Result};

pub const HEADER_DIRECTIVE: &str = "#EXTM3U";
pub const EXTINF_DIRECTIVE: &str = "#EXTINF:";

static ATTRIBUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([A-Za-z0-9_-]+)="([^"]*)""#).expect("valid attribute regex"));

/// One playlist item, immutable after parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// 1-based position among parsed entries
    pub index: usize,
    /// 1-based line of the URL in the source text
    pub line_number: usize,
    /// 1-based line of the `#EXTINF` metadata, if the entry had one
    pub extinf_line_number: Option<usize>,
    pub display_name: String,
    pub url: String,
    pub extinf_line: Option<String>,
    pub group: Option<String>,
    pub tvg_name: Option<String>,
}

impl Entry {
    /// First source line belonging to this entry's block
    pub fn first_line(&self) -> usize {
        self.extinf_line_number.unwrap_or(self.line_number)
    }

    /// Scheme token of the URL, lower-cased, if a `://` separator is present
    pub fn scheme(&self) -> Option<String> {
        self.url
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
    }
}

struct PendingMetadata {
    line_number: usize,
    text: String,
}

/// Parse playlist text into entries
///
/// `source` only names the playlist in the error returned when nothing could be
/// extracted.
pub fn parse(text: &str, source: &str) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    let mut pending: Option<PendingMetadata> = None;

    for (offset, raw) in text.lines().enumerate() {
        let line_number = offset + 1;
        let line = raw.trim_start_matches('\u{feff}').trim();

        if line.is_empty() || is_header(line) {
            continue;
        }

        if line.starts_with(EXTINF_DIRECTIVE) {
            // A newer #EXTINF supersedes an unpaired one
            pending = Some(PendingMetadata {
                line_number,
                text: line.to_string(),
            });
            continue;
        }

        if line.starts_with('#') {
            continue;
        }

        match pending.take() {
            Some(meta) => {
                let index = entries.len() + 1;
                entries.push(build_entry(index, line_number, line, Some(meta)));
            }
            None if line.contains("://") => {
                let index = entries.len() + 1;
                entries.push(build_entry(index, line_number, line, None));
            }
            None => {
                log::debug!("Skipping stray line {}: {}", line_number, line);
            }
        }
    }

    if entries.is_empty() {
        return Err(M3ucError::no_entries(source));
    }

    Ok(entries)
}

pub fn is_header(line: &str) -> bool {
    let line = line.trim_start_matches('\u{feff}').trim();
    line == HEADER_DIRECTIVE || line.starts_with("#EXTM3U ")
}

fn build_entry(
    index: usize,
    line_number: usize,
    url: &str,
    meta: Option<PendingMetadata>,
) -> Entry {
    let (extinf_line_number, extinf_line, title, group, tvg_name) = match meta {
        Some(meta) => {
            let title = extinf_title(&meta.text);
            let group = extinf_attribute(&meta.text, "group-title");
            let tvg_name = extinf_attribute(&meta.text, "tvg-name");
            (Some(meta.line_number), Some(meta.text), title, group, tvg_name)
        }
        None => (None, None, None, None, None),
    };

    let display_name = title
        .or_else(|| tvg_name.clone())
        .unwrap_or_else(|| format!("Unnamed (line {})", line_number));

    Entry {
        index,
        line_number,
        extinf_line_number,
        display_name,
        url: url.to_string(),
        extinf_line,
        group,
        tvg_name,
    }
}

/// Title text after the comma that closes the attribute list
///
/// Commas inside quoted attribute values do not count as the separator.
pub fn extinf_title(line: &str) -> Option<String> {
    let body = line.strip_prefix(EXTINF_DIRECTIVE).unwrap_or(line);
    let mut in_quotes = false;

    for (pos, ch) in body.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                let title = body[pos + 1..].trim();
                return (!title.is_empty()).then(|| title.to_string());
            }
            _ => {}
        }
    }

    None
}

/// Value of a `key="value"` attribute on an `#EXTINF` line
pub fn extinf_attribute(line: &str, key: &str) -> Option<String> {
    ATTRIBUTE_RE
        .captures_iter(line)
        .find(|caps| caps[1].eq_ignore_ascii_case(key))
        .map(|caps| caps[2].trim().to_string())
        .filter(|value| !value.is_empty())
}
