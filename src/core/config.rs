use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::blacklist::Blacklist;
use crate::core::dispatcher::DEFAULT_WORKERS;
use crate::core::probe::{NonHttpPolicy, ProbeOptions, DEFAULT_USER_AGENT};
use crate::core::validation::UrlValidator;
use crate::core::writer::write_atomic;
use crate::error::{M3ucError, Result};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Keys accepted by `m3uc config set`
pub const CONFIG_KEYS: &[&str] = &[
    "timeout",
    "workers",
    "max-redirects",
    "user-agent",
    "strict-schemes",
    "denylist",
];

/// Persistent defaults for checks, stored as JSON in the user config dir
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub timeout_secs: u64,
    pub workers: usize,
    pub max_redirects: usize,
    pub user_agent: String,
    /// Fail non-HTTP schemes instead of trusting them
    pub strict_schemes: bool,
    /// Extra hosts that are never stream origins
    pub denylist: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            workers: DEFAULT_WORKERS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            strict_schemes: false,
            denylist: Vec::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(config_path)?;

        // If the file is empty or corrupted, return default config
        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = match serde_json::from_str(&data) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable config {}: {}",
                    config_path.display(),
                    e
                );
                return Ok(Config::default());
            }
        };

        // Hand-edited files get the same range checks as `save_to`
        if let Err(e) = config.validate() {
            log::warn!("Ignoring invalid config {}: {}", config_path.display(), e);
            return Ok(Config::default());
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| M3ucError::write(parent, e))?;
        }

        let data = serde_json::to_string_pretty(self)?;
        write_atomic(config_path, &data)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| M3ucError::config("Could not determine config directory"))?;

        Ok(config_dir.join("m3uc").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(M3ucError::config("timeout must be at least 1 second"));
        }
        if self.workers == 0 {
            return Err(M3ucError::config("workers must be at least 1"));
        }
        Ok(())
    }

    /// Set a value by its `config set` key
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "timeout" => self.timeout_secs = parse_number(key, value)?,
            "workers" => self.workers = parse_number(key, value)?,
            "max-redirects" => self.max_redirects = parse_number(key, value)?,
            "user-agent" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(M3ucError::config("user-agent cannot be empty"));
                }
                self.user_agent = value.to_string();
            }
            "strict-schemes" => {
                self.strict_schemes = match value.trim().to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => {
                        return Err(M3ucError::config(format!(
                            "strict-schemes expects true/false, got '{}'",
                            other
                        )))
                    }
                }
            }
            "denylist" => {
                self.denylist = value
                    .split(',')
                    .map(|host| host.trim().to_lowercase())
                    .filter(|host| !host.is_empty())
                    .collect();
            }
            _ => {
                return Err(M3ucError::config(format!(
                    "Unknown key '{}' (expected one of: {})",
                    key,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }

        self.validate()
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| M3ucError::config(format!("{} expects a number, got '{}'", key, value)))
}

/// Effective settings for one check run: config values with CLI overrides applied
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub timeout: Duration,
    pub workers: usize,
    pub max_redirects: usize,
    pub user_agent: String,
    pub non_http: NonHttpPolicy,
    pub denylist: Vec<String>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl CheckOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            workers: config.workers,
            max_redirects: config.max_redirects,
            user_agent: config.user_agent.clone(),
            non_http: if config.strict_schemes {
                NonHttpPolicy::Strict
            } else {
                NonHttpPolicy::Optimistic
            },
            denylist: config.denylist.clone(),
        }
    }

    pub fn with_timeout_secs(mut self, secs: Option<u64>) -> Result<Self> {
        if let Some(secs) = secs {
            if secs == 0 {
                return Err(M3ucError::config("timeout must be at least 1 second"));
            }
            self.timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }

    pub fn with_workers(mut self, workers: Option<usize>) -> Result<Self> {
        if let Some(workers) = workers {
            if workers == 0 {
                return Err(M3ucError::config("workers must be at least 1"));
            }
            self.workers = workers;
        }
        Ok(self)
    }

    pub fn with_strict_schemes(mut self, strict: bool) -> Self {
        if strict {
            self.non_http = NonHttpPolicy::Strict;
        }
        self
    }

    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            timeout: self.timeout,
            max_redirects: self.max_redirects,
            user_agent: self.user_agent.clone(),
            non_http: self.non_http,
        }
    }

    pub fn validator(&self) -> UrlValidator {
        UrlValidator::new(Blacklist::with_extra(&self.denylist))
    }
}
