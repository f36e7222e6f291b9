// Per-entry classification results and progress events

use std::fmt;
use std::time::Duration;

/// Three-way classification of a playlist entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Classification {
    Working,
    Failed,
    Invalid,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Working => "working",
            Classification::Failed => "failed",
            Classification::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of validating (and possibly probing) one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub classification: Classification,
    pub http_status: Option<u16>,
    pub error_detail: String,
    pub elapsed: Duration,
}

impl ValidationOutcome {
    pub fn working(http_status: Option<u16>, elapsed: Duration) -> Self {
        Self {
            classification: Classification::Working,
            http_status,
            error_detail: String::new(),
            elapsed,
        }
    }

    pub fn failed<S: Into<String>>(detail: S, http_status: Option<u16>, elapsed: Duration) -> Self {
        Self {
            classification: Classification::Failed,
            http_status,
            error_detail: detail.into(),
            elapsed,
        }
    }

    /// Static-check failure; never reached the network
    pub fn invalid<S: Into<String>>(detail: S) -> Self {
        Self {
            classification: Classification::Invalid,
            http_status: None,
            error_detail: detail.into(),
            elapsed: Duration::ZERO,
        }
    }

    /// Attach a note to a successful outcome
    pub fn with_detail<S: Into<String>>(mut self, detail: S) -> Self {
        self.error_detail = detail.into();
        self
    }

    pub fn is_working(&self) -> bool {
        self.classification == Classification::Working
    }
}

/// Emitted once per entry as soon as its outcome is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub index: usize,
    /// Number of entries resolved so far, including this one
    pub completed: usize,
    pub total: usize,
    pub classification: Classification,
    pub display_name: String,
    pub line_number: usize,
    pub detail: String,
    pub http_status: Option<u16>,
}
