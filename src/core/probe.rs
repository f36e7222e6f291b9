//! Network probe for a single playlist entry
//!
//! [`HttpProber`] issues one timeout-bounded check per entry: a `HEAD` request,
//! falling back to a `GET` (body never read) when the server rejects `HEAD`.
//! Every failure is turned into a `Failed` outcome here; nothing propagates.

use std::error::Error as _;
use std::future::Future;
use std::io;
use std::time::{Duration, Instant};

use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::core::outcome::ValidationOutcome;
use crate::core::playlist::Entry;
use crate::core::validation::is_http_scheme;
use crate::error::Result;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) m3uc";

const MAX_DETAIL_LENGTH: usize = 100;

/// What to do with schemes that plain HTTP requests cannot check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonHttpPolicy {
    /// Mark them `Working` without probing
    #[default]
    Optimistic,
    /// Mark them `Failed` as unsupported
    Strict,
}

#[derive(Debug, Clone)]
pub struct ProbeOptions {
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
    pub non_http: NonHttpPolicy,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_redirects: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            non_http: NonHttpPolicy::default(),
        }
    }
}

/// Why a probe failed; rendered verbatim as the outcome detail
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Timeout")]
    Timeout,

    #[error("Connection refused")]
    ConnectionRefused,

    #[error("DNS failure")]
    Dns,

    #[error("Too many redirects")]
    TooManyRedirects,

    #[error("Connection error")]
    Connection,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Unsupported scheme for probing")]
    UnsupportedScheme,

    #[error("{0}")]
    Other(String),
}

impl ProbeError {
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ProbeError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ProbeError::Timeout;
        }
        if err.is_redirect() {
            return ProbeError::TooManyRedirects;
        }
        if err.is_connect() {
            return classify_connect_error(&err);
        }
        if let Some(status) = err.status() {
            return ProbeError::Status(status.as_u16());
        }
        ProbeError::Other(truncate_detail(&err.to_string()))
    }
}

fn classify_connect_error(err: &reqwest::Error) -> ProbeError {
    let mut source = err.source();

    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            match io_err.kind() {
                io::ErrorKind::ConnectionRefused => return ProbeError::ConnectionRefused,
                io::ErrorKind::TimedOut => return ProbeError::Timeout,
                _ => {}
            }
        }

        let text = cause.to_string().to_lowercase();
        if text.contains("connection refused") {
            return ProbeError::ConnectionRefused;
        }
        if text.contains("dns error") || text.contains("failed to lookup address") {
            return ProbeError::Dns;
        }

        source = cause.source();
    }

    ProbeError::Connection
}

fn truncate_detail(text: &str) -> String {
    text.chars().take(MAX_DETAIL_LENGTH).collect()
}

/// 200-399 counts as reachable
pub fn is_reachable_status(status: StatusCode) -> bool {
    status.is_success() || status.is_redirection()
}

/// Seam between the dispatcher and the network
pub trait Prober: Sync {
    fn probe(&self, entry: &Entry) -> impl Future<Output = ValidationOutcome> + Send;
}

/// Probe executor backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
    timeout: Duration,
    non_http: NonHttpPolicy,
}

impl HttpProber {
    pub fn new(options: &ProbeOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(options.timeout)
            .connect_timeout(options.timeout)
            .redirect(Policy::limited(options.max_redirects))
            .user_agent(options.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            timeout: options.timeout,
            non_http: options.non_http,
        })
    }

    async fn request(&self, url: &str) -> std::result::Result<u16, ProbeError> {
        match self.client.head(url).send().await {
            Ok(response) if is_reachable_status(response.status()) => {
                return Ok(response.status().as_u16());
            }
            Ok(response) => {
                log::debug!("HEAD {} returned {}, retrying with GET", url, response.status());
            }
            // A GET would hit the same wall
            Err(err) if err.is_timeout() || err.is_connect() => return Err(err.into()),
            Err(err) => {
                log::debug!("HEAD {} failed ({}), retrying with GET", url, err);
            }
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if is_reachable_status(status) {
            Ok(status.as_u16())
        } else {
            Err(ProbeError::Status(status.as_u16()))
        }
    }
}

impl Prober for HttpProber {
    async fn probe(&self, entry: &Entry) -> ValidationOutcome {
        let started = Instant::now();
        let scheme = entry.scheme().unwrap_or_default();

        if !is_http_scheme(&scheme) {
            return match self.non_http {
                NonHttpPolicy::Optimistic => ValidationOutcome::working(None, started.elapsed())
                    .with_detail(format!("Not probed ({})", scheme)),
                NonHttpPolicy::Strict => ValidationOutcome::failed(
                    ProbeError::UnsupportedScheme.to_string(),
                    None,
                    started.elapsed(),
                ),
            };
        }

        let result = match tokio::time::timeout(self.timeout, self.request(&entry.url)).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout),
        };
        let elapsed = started.elapsed();

        match result {
            Ok(status) => {
                log::debug!("#{} {} -> {} in {:?}", entry.index, entry.url, status, elapsed);
                ValidationOutcome::working(Some(status), elapsed)
            }
            Err(err) => {
                log::debug!("#{} {} -> {} in {:?}", entry.index, entry.url, err, elapsed);
                ValidationOutcome::failed(err.to_string(), err.http_status(), elapsed)
            }
        }
    }
}
