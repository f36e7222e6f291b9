//! End-to-end check of one playlist: parse, dispatch, aggregate

use tokio::sync::mpsc::UnboundedSender;

use crate::core::config::CheckOptions;
use crate::core::dispatcher::{Dispatcher, Outcomes};
use crate::core::outcome::ProgressEvent;
use crate::core::playlist::{self, Entry};
use crate::core::probe::{HttpProber, Prober};
use crate::core::report::Report;
use crate::core::rewriter::{self, RewriteMode, RewriteOutput};
use crate::core::validation::UrlValidator;
use crate::error::Result;

/// Everything learned about a playlist in one run
#[derive(Debug, Clone)]
pub struct CheckRun {
    pub source_text: String,
    pub entries: Vec<Entry>,
    pub outcomes: Outcomes,
    pub report: Report,
}

impl CheckRun {
    pub fn rewrite(&self, mode: RewriteMode) -> RewriteOutput {
        rewriter::rewrite(&self.source_text, &self.entries, &self.outcomes, mode)
    }
}

/// Check playlist text with the real HTTP prober
pub async fn check_text(
    text: &str,
    source: &str,
    options: &CheckOptions,
    sink: Option<UnboundedSender<ProgressEvent>>,
) -> Result<CheckRun> {
    let prober = HttpProber::new(&options.probe_options())?;
    check_text_with(text, source, options.validator(), prober, options.workers, sink).await
}

/// Check playlist text with any prober
pub async fn check_text_with<P: Prober>(
    text: &str,
    source: &str,
    validator: UrlValidator,
    prober: P,
    workers: usize,
    sink: Option<UnboundedSender<ProgressEvent>>,
) -> Result<CheckRun> {
    let entries = playlist::parse(text, source)?;
    let dispatcher = Dispatcher::new(validator, prober, workers);
    let outcomes = dispatcher.run(&entries, sink).await;
    let report = Report::build(&entries, &outcomes)?;

    Ok(CheckRun {
        source_text: text.to_string(),
        entries,
        outcomes,
        report,
    })
}
