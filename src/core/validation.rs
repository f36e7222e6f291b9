// Static URL checks for playlist entries
// Everything here is pure string inspection: no I/O and no network access.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::core::blacklist::Blacklist;
use crate::core::outcome::ValidationOutcome;

/// Schemes a playlist entry may legitimately use
pub const ACCEPTED_SCHEMES: &[&str] = &[
    "http", "https", "rtmp", "rtmps", "rtmpe", "rtsp", "mms", "udp", "rtp", "srt",
];

/// Schemes the probe executor can check with plain HTTP requests
pub const HTTP_SCHEMES: &[&str] = &["http", "https"];

/// A scheme token (optionally with a stray quote) directly followed by `://`,
/// used to spot a second protocol right after the first one
///
/// `host:/path` (empty port) must not match.
static LEADING_SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*'?://").expect("valid scheme regex"));

/// Structural URL validator
#[derive(Debug, Clone, Default)]
pub struct UrlValidator {
    blacklist: Blacklist,
}

impl UrlValidator {
    pub fn new(blacklist: Blacklist) -> Self {
        Self { blacklist }
    }

    /// Returns an `Invalid` outcome when the URL fails a static check,
    /// `None` when it should go on to the network probe
    pub fn validate(&self, url: &str) -> Option<ValidationOutcome> {
        self.check(url).err().map(ValidationOutcome::invalid)
    }

    fn check(&self, raw: &str) -> Result<(), String> {
        let url = raw.trim();

        if url.is_empty() {
            return Err("Empty URL".to_string());
        }

        if url.chars().any(char::is_whitespace) {
            return Err("URL contains whitespace".to_string());
        }

        let (scheme_token, rest) = url
            .split_once("://")
            .ok_or_else(|| "Missing scheme separator".to_string())?;

        if LEADING_SCHEME_RE.is_match(rest) {
            return Err("Duplicate protocol".to_string());
        }

        let scheme = scheme_token.to_ascii_lowercase();
        if !ACCEPTED_SCHEMES.contains(&scheme.as_str()) {
            let looks_like_typo = ACCEPTED_SCHEMES
                .iter()
                .any(|accepted| scheme.starts_with(accepted));

            return Err(if looks_like_typo {
                format!("Malformed scheme '{}'", scheme_token)
            } else {
                format!("Unsupported scheme '{}'", scheme_token)
            });
        }

        let parsed = Url::parse(url).map_err(|e| format!("Invalid URL format: {}", e))?;

        let host = parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| "Missing host".to_string())?;

        if self.blacklist.is_blocked_host(host) {
            return Err(format!("Not a stream URL ({})", host));
        }

        Ok(())
    }
}

/// Validate with the built-in denylist
pub fn validate(url: &str) -> Option<ValidationOutcome> {
    UrlValidator::default().validate(url)
}

pub fn is_http_scheme(scheme: &str) -> bool {
    HTTP_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str())
}
