// Result aggregation: buckets outcomes by classification in entry order

use crate::core::dispatcher::Outcomes;
use crate::core::outcome::{Classification, ValidationOutcome};
use crate::core::playlist::Entry;
use crate::error::{M3ucError, Result};

pub type ResolvedEntry = (Entry, ValidationOutcome);

/// Counts and one-decimal percentages for each bucket
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub total: usize,
    pub working: usize,
    pub failed: usize,
    pub invalid: usize,
    pub working_pct: f64,
    pub failed_pct: f64,
    pub invalid_pct: f64,
}

impl Summary {
    pub fn not_working(&self) -> usize {
        self.failed + self.invalid
    }
}

/// Aggregate of all entry outcomes, built once after every entry resolved
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub total: usize,
    pub working: Vec<ResolvedEntry>,
    pub failed: Vec<ResolvedEntry>,
    pub invalid: Vec<ResolvedEntry>,
}

impl Report {
    /// Bucket outcomes by classification, preserving entry order
    ///
    /// Fails if any entry has no outcome.
    pub fn build(entries: &[Entry], outcomes: &Outcomes) -> Result<Self> {
        let mut ordered: Vec<&Entry> = entries.iter().collect();
        ordered.sort_by_key(|entry| entry.index);

        let mut report = Report {
            total: entries.len(),
            ..Default::default()
        };

        for entry in ordered {
            let outcome = outcomes
                .get(&entry.index)
                .ok_or(M3ucError::MissingOutcome { index: entry.index })?;

            let bucket = match outcome.classification {
                Classification::Working => &mut report.working,
                Classification::Failed => &mut report.failed,
                Classification::Invalid => &mut report.invalid,
            };
            bucket.push((entry.clone(), outcome.clone()));
        }

        debug_assert_eq!(
            report.working.len() + report.failed.len() + report.invalid.len(),
            report.total
        );

        Ok(report)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total: self.total,
            working: self.working.len(),
            failed: self.failed.len(),
            invalid: self.invalid.len(),
            working_pct: percentage(self.working.len(), self.total),
            failed_pct: percentage(self.failed.len(), self.total),
            invalid_pct: percentage(self.invalid.len(), self.total),
        }
    }

    /// Entries of one classification, in entry order
    pub fn bucket(&self, classification: Classification) -> &[ResolvedEntry] {
        match classification {
            Classification::Working => &self.working,
            Classification::Failed => &self.failed,
            Classification::Invalid => &self.invalid,
        }
    }

    pub fn classification_of(&self, index: usize) -> Option<Classification> {
        [&self.working, &self.failed, &self.invalid]
            .into_iter()
            .flatten()
            .find(|(entry, _)| entry.index == index)
            .map(|(_, outcome)| outcome.classification)
    }
}

/// Share of `count` in `total`, rounded to one decimal
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}
