//! Run summary and reporting
//!
//! Tracks the per-kind outcomes of one export run for logging and for the
//! CLI's exit-code decision.

use crate::domain::EntityCollection;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one entity kind's export cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindOutcome {
    /// File written
    Exported {
        /// Data rows written (excluding the header)
        rows: usize,
        /// Rows dropped during extraction for arity mismatches
        dropped_rows: usize,
        /// Path of the written file
        path: PathBuf,
    },

    /// Collection had no entities; no file produced
    Empty,

    /// Pipeline failed for this kind; no file produced, run continued
    Failed {
        /// Failure description, already logged when recorded
        message: String,
    },
}

/// One entity kind's report
#[derive(Debug, Clone)]
pub struct KindReport {
    /// Which kind
    pub collection: EntityCollection,

    /// What happened
    pub outcome: KindOutcome,
}

/// Summary of one export run
///
/// Only produced when both fatal gates (connection, model load) passed;
/// gate failures surface as errors instead.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Total run duration
    pub duration: Duration,

    /// Per-kind reports, in export order
    pub kinds: Vec<KindReport>,
}

impl RunSummary {
    /// Create a new empty run summary
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            duration: Duration::from_secs(0),
            kinds: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record one kind's outcome
    pub fn record(&mut self, collection: EntityCollection, outcome: KindOutcome) {
        self.kinds.push(KindReport {
            collection,
            outcome,
        });
    }

    /// Number of kinds that produced a file
    pub fn exported_count(&self) -> usize {
        self.kinds
            .iter()
            .filter(|k| matches!(k.outcome, KindOutcome::Exported { .. }))
            .count()
    }

    /// Number of kinds whose pipeline failed
    pub fn failed_count(&self) -> usize {
        self.kinds
            .iter()
            .filter(|k| matches!(k.outcome, KindOutcome::Failed { .. }))
            .count()
    }

    /// Total data rows written across all files
    pub fn total_rows(&self) -> usize {
        self.kinds
            .iter()
            .map(|k| match &k.outcome {
                KindOutcome::Exported { rows, .. } => *rows,
                _ => 0,
            })
            .sum()
    }

    /// Total rows dropped for arity mismatches
    pub fn total_dropped_rows(&self) -> usize {
        self.kinds
            .iter()
            .map(|k| match &k.outcome {
                KindOutcome::Exported { dropped_rows, .. } => *dropped_rows,
                _ => 0,
            })
            .sum()
    }

    /// True when no kind failed
    pub fn is_complete_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// Paths of all written files
    pub fn files(&self) -> Vec<&PathBuf> {
        self.kinds
            .iter()
            .filter_map(|k| match &k.outcome {
                KindOutcome::Exported { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            kinds_attempted = self.kinds.len(),
            files_written = self.exported_count(),
            kinds_failed = self.failed_count(),
            total_rows = self.total_rows(),
            dropped_rows = self.total_dropped_rows(),
            duration_secs = format!("{:.2}", self.duration.as_secs_f64()),
            "Export run completed"
        );

        for kind in &self.kinds {
            match &kind.outcome {
                KindOutcome::Exported {
                    rows,
                    dropped_rows,
                    path,
                } => {
                    tracing::info!(
                        collection = %kind.collection,
                        rows = rows,
                        dropped_rows = dropped_rows,
                        path = %path.display(),
                        "Exported"
                    );
                }
                KindOutcome::Empty => {
                    tracing::warn!(collection = %kind.collection, "Nothing to export");
                }
                KindOutcome::Failed { message } => {
                    tracing::warn!(collection = %kind.collection, message = %message, "Export failed");
                }
            }
        }
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}
