// Core engine: parsing, validation, probing, aggregation, rewriting

pub mod blacklist;
pub mod checker;
pub mod config;
pub mod converter;
pub mod dispatcher;
pub mod outcome;
pub mod playlist;
pub mod probe;
pub mod report;
pub mod rewriter;
pub mod validation;
pub mod writer;

// Re-export commonly used items
pub use checker::{check_text, check_text_with, CheckRun};
pub use config::{CheckOptions, Config};
pub use dispatcher::{Dispatcher, Outcomes};
pub use outcome::{Classification, ProgressEvent, ValidationOutcome};
pub use playlist::Entry;
pub use probe::{HttpProber, NonHttpPolicy, ProbeError, Prober};
pub use report::{Report, Summary};
pub use rewriter::{RewriteMode, RewriteOutput};
pub use validation::UrlValidator;
