//! JSON channel dumps to M3U
//!
//! Reads every `*.json` file of a folder. Each file holds a `result` array of
//! channel records; records are de-duplicated (by URL, and by name when the
//! same name points somewhere else), sorted into coarse categories and written
//! out as a grouped playlist.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Deserialize;

use crate::error::{M3ucError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Sports,
    Entertainment,
    News,
    General,
}

impl Category {
    /// Output order of the groups
    pub const ALL: [Category; 4] = [
        Category::Sports,
        Category::Entertainment,
        Category::News,
        Category::General,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Category::Sports => "Sports",
            Category::Entertainment => "Entertainment",
            Category::News => "News",
            Category::General => "General",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Sports => &["sport", "bein", "ssc", "kass", "رياضية", "الرياضية"],
            Category::Entertainment => &["mbc", "osn", "movie", "film", "أكشن", "دراما"],
            Category::News => &["news", "الشرقية", "العراقية", "السومرية", "اخبار", "نيوز"],
            Category::General => &[],
        }
    }

    /// First category whose keywords appear in the lower-cased name
    pub fn from_name(name: &str) -> Self {
        let lowered = name.to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.keywords().iter().any(|kw| lowered.contains(kw)))
            .unwrap_or(Category::General)
    }
}

#[derive(Debug, Deserialize)]
struct ChannelDump {
    #[serde(default)]
    result: Option<Vec<ChannelRecord>>,
}

/// One channel as found in the JSON dumps
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelRecord {
    pub name: Option<String>,
    pub title: Option<String>,
    pub href: Option<String>,
    pub pict: Option<String>,
    pub epg_id: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
    pub title: String,
    pub url: String,
    pub logo: Option<String>,
    pub epg_id: Option<String>,
    pub category: Category,
}

impl Channel {
    pub fn extinf_line(&self) -> String {
        let mut line = String::from("#EXTINF:-1");
        if let Some(id) = &self.epg_id {
            line.push_str(&format!(" tvg-id=\"{}\"", id));
        }
        line.push_str(&format!(" tvg-name=\"{}\"", self.name));
        if let Some(logo) = &self.logo {
            line.push_str(&format!(" tvg-logo=\"{}\"", logo));
        }
        line.push_str(&format!(" group-title=\"{}\",{}", self.category.title(), self.title));
        line
    }
}

/// Accumulates channels across JSON files, dropping duplicates
#[derive(Debug, Default)]
pub struct Converter {
    channels: Vec<Channel>,
    seen_urls: HashSet<String>,
    seen_names: HashMap<String, String>,
    duplicates_removed: usize,
    files_read: usize,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` file in `folder`, in file-name order
    ///
    /// Unreadable files and files without a `result` array are skipped with a
    /// warning. Fails only when the folder holds no JSON file at all.
    pub fn load_dir(&mut self, folder: &Path) -> Result<usize> {
        let mut files: Vec<PathBuf> = fs::read_dir(folder)
            .map_err(|e| M3ucError::other(format!("Cannot read {}: {}", folder.display(), e)))?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            })
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(M3ucError::other(format!(
                "No JSON files found in '{}'",
                folder.display()
            )));
        }

        for file in &files {
            match fs::read_to_string(file)
                .map_err(M3ucError::from)
                .and_then(|text| self.add_json(&text))
            {
                Ok(added) => {
                    self.files_read += 1;
                    log::info!("{}: {} channels added", file.display(), added);
                }
                Err(e) => log::warn!("Skipping {}: {}", file.display(), e),
            }
        }

        Ok(files.len())
    }

    /// Add the channels of one JSON document, returns how many were new
    pub fn add_json(&mut self, text: &str) -> Result<usize> {
        let dump: ChannelDump = serde_json::from_str(text)?;
        let records = dump
            .result
            .ok_or_else(|| M3ucError::other("no 'result' array found"))?;

        Ok(records
            .into_iter()
            .filter(|record| self.add_record(record))
            .count())
    }

    /// Returns false when the record was skipped (no URL or duplicate)
    pub fn add_record(&mut self, record: &ChannelRecord) -> bool {
        let Some(url) = record.href.as_deref().map(str::trim).filter(|u| !u.is_empty()) else {
            return false;
        };
        let name = record
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown")
            .to_string();

        if self.seen_urls.contains(url) {
            log::debug!("Duplicate URL skipped: {} ({})", name, url);
            self.duplicates_removed += 1;
            return false;
        }

        // Same name with a different URL: keep the first one
        if let Some(previous) = self.seen_names.get(&name) {
            if previous != url {
                log::debug!("Same name, different URL: {} ({} vs {})", name, previous, url);
                self.duplicates_removed += 1;
                return false;
            }
        }

        self.seen_urls.insert(url.to_string());
        self.seen_names.insert(name.clone(), url.to_string());

        let title = record
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| name.clone());

        self.channels.push(Channel {
            category: Category::from_name(&name),
            name,
            title,
            url: url.to_string(),
            logo: record.pict.clone().filter(|p| !p.trim().is_empty()),
            epg_id: record.epg_id.as_ref().and_then(epg_id_string),
        });
        true
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn duplicates_removed(&self) -> usize {
        self.duplicates_removed
    }

    pub fn files_read(&self) -> usize {
        self.files_read
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.channels.iter().filter(|c| c.category == category).count()
    }

    /// Render the grouped playlist
    pub fn to_m3u(&self, generated_at: DateTime<Local>) -> String {
        let mut out = String::from("#EXTM3U\n");
        out.push_str(&format!(
            "# Generated from JSON files - {}\n",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!("# Total Channels: {}\n", self.channels.len()));
        out.push_str(&format!("# Duplicates Removed: {}\n\n", self.duplicates_removed));

        for category in Category::ALL {
            let group: Vec<&Channel> = self
                .channels
                .iter()
                .filter(|c| c.category == category)
                .collect();
            if group.is_empty() {
                continue;
            }

            out.push_str(&format!("# ========== {} Channels ==========\n\n", category.title()));
            for channel in group {
                out.push_str(&channel.extinf_line());
                out.push('\n');
                out.push_str(&channel.url);
                out.push('\n');
            }
        }

        out
    }
}

/// `0`, empty strings and null mean "no EPG id"
fn epg_id_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Number(n) if n.as_i64() == Some(0) => None,
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) if !s.trim().is_empty() && s.trim() != "0" => {
            Some(s.trim().to_string())
        }
        _ => None,
    }
}
