use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Hosts that serve web pages, never stream payloads
pub const DEFAULT_NON_STREAM_HOSTS: &[&str] = &[
    "google.com",
    "bing.com",
    "duckduckgo.com",
    "search.yahoo.com",
    "yandex.com",
    "yandex.ru",
    "baidu.com",
    "ask.com",
    "ecosia.org",
];

/// google.co.uk, google.de, google.com.br, ...
static GOOGLE_COUNTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|\.)google\.(com?\.)?[a-z]{2,3}$").expect("valid google host regex")
});

/// Denylist of hosts known not to be stream origins
#[derive(Debug, Clone)]
pub struct Blacklist {
    domains: HashSet<String>,
}

impl Default for Blacklist {
    fn default() -> Self {
        Self::with_extra(std::iter::empty::<&str>())
    }
}

impl Blacklist {
    /// Create an empty blacklist (no built-in hosts)
    pub fn empty() -> Self {
        Self {
            domains: HashSet::new(),
        }
    }

    /// Built-in hosts plus user supplied ones
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut blacklist = Self::empty();
        for host in DEFAULT_NON_STREAM_HOSTS {
            blacklist.insert(host);
        }
        for host in extra {
            blacklist.insert(host.as_ref());
        }
        blacklist
    }

    /// Add a host; leading dots and a `www.` prefix are ignored
    pub fn insert(&mut self, host: &str) {
        let host = host.trim().trim_start_matches('.').to_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(&host).to_string();

        // Skip localhost entries
        if host.is_empty() || host == "localhost" {
            return;
        }

        self.domains.insert(host);
    }

    /// Check if a host (or any parent domain of it) is denylisted
    pub fn is_blocked_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_lowercase();

        if GOOGLE_COUNTRY_RE.is_match(&host) {
            return true;
        }

        // "google.com" also blocks "www.google.com" but not "googlevideo.com"
        let labels: Vec<&str> = host.split('.').collect();
        (0..labels.len()).any(|i| self.domains.contains(&labels[i..].join(".")))
    }

    /// Get the number of domains in the blacklist
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Check if the blacklist is empty
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
