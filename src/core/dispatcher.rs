//! Bounded-concurrency validation of a whole playlist
//!
//! Each entry goes through two stages: the static [`UrlValidator`], which may
//! settle it as `Invalid` on the spot, and then the [`Prober`]. At most
//! `workers` probes are in flight at any time. Outcomes are keyed by entry
//! index, so completion order never matters to callers.

use std::collections::BTreeMap;

use futures_util::stream::{self, StreamExt};
use tokio::sync::mpsc::UnboundedSender;

use crate::core::outcome::{ProgressEvent, ValidationOutcome};
use crate::core::playlist::Entry;
use crate::core::probe::Prober;
use crate::core::validation::UrlValidator;

pub const DEFAULT_WORKERS: usize = 10;

/// Outcomes keyed by `Entry::index`
pub type Outcomes = BTreeMap<usize, ValidationOutcome>;

pub struct Dispatcher<P: Prober> {
    validator: UrlValidator,
    prober: P,
    workers: usize,
}

impl<P: Prober> Dispatcher<P> {
    pub fn new(validator: UrlValidator, prober: P, workers: usize) -> Self {
        Self {
            validator,
            prober,
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Validate and probe every entry
    ///
    /// When a `sink` is given, one [`ProgressEvent`] is sent per entry as soon
    /// as it resolves. Sending never blocks and a closed sink is ignored.
    pub async fn run(&self, entries: &[Entry], sink: Option<UnboundedSender<ProgressEvent>>) -> Outcomes {
        let total = entries.len();
        let mut outcomes = Outcomes::new();
        let mut to_probe = Vec::with_capacity(total);

        for entry in entries {
            match self.validator.validate(&entry.url) {
                Some(invalid) => {
                    log::debug!("#{} invalid: {}", entry.index, invalid.error_detail);
                    emit(&sink, entry, &invalid, outcomes.len() + 1, total);
                    outcomes.insert(entry.index, invalid);
                }
                None => to_probe.push(entry),
            }
        }

        log::info!(
            "Probing {} of {} entries with {} workers ({} invalid)",
            to_probe.len(),
            total,
            self.workers,
            outcomes.len()
        );

        let mut in_flight = stream::iter(to_probe)
            .map(|entry| async move { (entry, self.prober.probe(entry).await) })
            .buffer_unordered(self.workers);

        while let Some((entry, outcome)) = in_flight.next().await {
            emit(&sink, entry, &outcome, outcomes.len() + 1, total);
            outcomes.insert(entry.index, outcome);
        }

        log::info!("Resolved {} entries", outcomes.len());
        outcomes
    }
}

fn emit(
    sink: &Option<UnboundedSender<ProgressEvent>>,
    entry: &Entry,
    outcome: &ValidationOutcome,
    completed: usize,
    total: usize,
) {
    let Some(sink) = sink else {
        return;
    };

    let event = ProgressEvent {
        index: entry.index,
        completed,
        total,
        classification: outcome.classification,
        display_name: entry.display_name.clone(),
        line_number: entry.line_number,
        detail: outcome.error_detail.clone(),
        http_status: outcome.http_status,
    };

    // Receiver gone means nobody is watching; the run continues regardless
    let _ = sink.send(event);
}
