//! Export orchestrator
//!
//! Runs the whole pipeline: connection and model load are fatal gates, then
//! each entity kind gets its own extract/transform/write cycle. A failure
//! in one kind's cycle is caught, logged with the kind, and the run moves
//! on to the next kind. A fixed delay follows each successful export so the
//! Visum instance is not hammered with back-to-back queries.
//!
//! Execution is strictly sequential: one session, one model load, four
//! cycles one after another. The session is never shared.

use crate::adapters::visum::{VisumClient, VisumProvider};
use crate::config::TransectConfig;
use crate::core::export::profiles::{profile_for, ExportProfile};
use crate::core::export::summary::{KindOutcome, RunSummary};
use crate::core::extract::extract;
use crate::core::transform::transform_row;
use crate::core::write::write_csv;
use crate::domain::{EntityCollection, ExportRow, Result, TransectError};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Runtime options for one export run
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory receiving the CSV files
    pub output_dir: PathBuf,

    /// Delay inserted after each successful kind export
    pub inter_export_delay: Duration,

    /// Kinds to export, in order
    pub collections: Vec<EntityCollection>,
}

impl ExportOptions {
    /// Build options from the `[export]` config section
    ///
    /// An empty collection list in the config selects all four kinds.
    pub fn from_config(config: &crate::config::ExportConfig) -> Result<Self> {
        let collections = if config.collections.is_empty() {
            EntityCollection::ALL.to_vec()
        } else {
            config
                .collections
                .iter()
                .map(|s| EntityCollection::from_str(s).map_err(TransectError::Configuration))
                .collect::<Result<Vec<_>>>()?
        };

        Ok(Self {
            output_dir: PathBuf::from(&config.output_dir),
            inter_export_delay: Duration::from_secs(config.inter_export_delay_secs),
            collections,
        })
    }
}

/// Export orchestrator
pub struct ExportOrchestrator {
    provider: Arc<dyn VisumProvider>,
    model_path: String,
    options: ExportOptions,
}

impl ExportOrchestrator {
    /// Connect to the configured bridge and build an orchestrator
    ///
    /// This is the first fatal gate: if the connection manager exhausts its
    /// retry, the error is returned and nothing else runs.
    pub async fn connect(config: &TransectConfig) -> Result<Self> {
        let client = VisumClient::connect(&config.visum).await?;
        Ok(Self::with_provider(
            client.provider(),
            config.visum.model_path.clone(),
            ExportOptions::from_config(&config.export)?,
        ))
    }

    /// Build an orchestrator around an already-connected provider
    ///
    /// Used by tests to run the pipeline against a fake Visum instance.
    pub fn with_provider(
        provider: Arc<dyn VisumProvider>,
        model_path: String,
        options: ExportOptions,
    ) -> Self {
        Self {
            provider,
            model_path,
            options,
        }
    }

    /// Execute the export run
    ///
    /// Loads the model version (second fatal gate), then attempts every
    /// configured kind. Per-kind failures are recorded in the summary, not
    /// returned as errors.
    ///
    /// # Errors
    ///
    /// Returns an error only for the fatal gates: model load failure or an
    /// unusable output directory. No files are produced in that case.
    pub async fn execute(&self) -> Result<RunSummary> {
        let start = Instant::now();
        let mut summary = RunSummary::new();

        tracing::info!(model_path = %self.model_path, "Starting export run");

        let load_start = Instant::now();
        self.provider.load_version(&self.model_path).await?;
        tracing::info!(
            model_path = %self.model_path,
            elapsed_secs = format!("{:.2}", load_start.elapsed().as_secs_f64()),
            "Model version loaded"
        );

        std::fs::create_dir_all(&self.options.output_dir).map_err(|e| {
            TransectError::Io(format!(
                "Failed to create output directory {}: {e}",
                self.options.output_dir.display()
            ))
        })?;

        for &collection in &self.options.collections {
            let profile = profile_for(collection);

            match self.export_kind(profile).await {
                Ok(outcome) => {
                    let delay_after = matches!(outcome, KindOutcome::Exported { .. });
                    summary.record(collection, outcome);

                    if delay_after && !self.options.inter_export_delay.is_zero() {
                        tracing::info!(
                            collection = %collection,
                            delay_secs = self.options.inter_export_delay.as_secs(),
                            "Export done, pausing before next kind"
                        );
                        tokio::time::sleep(self.options.inter_export_delay).await;
                    }
                }
                Err(e) => {
                    tracing::error!(
                        collection = %collection,
                        error = %e,
                        "Export failed for this kind, continuing with remaining kinds"
                    );
                    summary.record(
                        collection,
                        KindOutcome::Failed {
                            message: e.to_string(),
                        },
                    );
                }
            }
        }

        let summary = summary.with_duration(start.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Run one kind's extract/transform/write cycle
    async fn export_kind(&self, profile: &ExportProfile) -> Result<KindOutcome> {
        tracing::info!(collection = %profile.collection, "Exporting");

        let extraction = extract(
            self.provider.as_ref(),
            profile.collection,
            profile.attributes,
        )
        .await?;

        if extraction.is_empty() {
            return Ok(KindOutcome::Empty);
        }

        let dropped_rows = extraction.dropped;
        let rows: Vec<ExportRow> = extraction
            .rows
            .into_iter()
            .map(|row| transform_row(row, profile.rules))
            .collect();

        let path = self.options.output_dir.join(profile.filename);
        let written = write_csv(&rows, profile.headers, &path)?;

        Ok(KindOutcome::Exported {
            rows: rows.len(),
            dropped_rows,
            path: written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AttrValue, RawRow, VisumError};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// Fake Visum instance with canned per-collection rows
    struct StubProvider {
        fail_load: bool,
        data: HashMap<EntityCollection, Vec<RawRow>>,
    }

    #[async_trait]
    impl VisumProvider for StubProvider {
        async fn load_version(&self, path: &str) -> Result<()> {
            if self.fail_load {
                return Err(TransectError::Visum(VisumError::LoadFailed(format!(
                    "cannot read {path}"
                ))));
            }
            Ok(())
        }

        async fn get_multiple_attributes(
            &self,
            collection: EntityCollection,
            _attributes: &[&str],
        ) -> Result<Vec<RawRow>> {
            Ok(self.data.get(&collection).cloned().unwrap_or_default())
        }
    }

    fn options(dir: &TempDir) -> ExportOptions {
        ExportOptions {
            output_dir: dir.path().to_path_buf(),
            inter_export_delay: Duration::ZERO,
            collections: EntityCollection::ALL.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_load_failure_halts_run_with_no_files() {
        let temp = TempDir::new().unwrap();
        let provider = Arc::new(StubProvider {
            fail_load: true,
            data: HashMap::new(),
        });

        let orchestrator = ExportOrchestrator::with_provider(
            provider,
            "/models/missing.ver".to_string(),
            options(&temp),
        );

        let err = orchestrator.execute().await.unwrap_err();
        assert!(matches!(err, TransectError::Visum(VisumError::LoadFailed(_))));
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_empty_collections_produce_no_files() {
        let temp = TempDir::new().unwrap();
        let provider = Arc::new(StubProvider {
            fail_load: false,
            data: HashMap::new(),
        });

        let orchestrator = ExportOrchestrator::with_provider(
            provider,
            "/models/empty.ver".to_string(),
            options(&temp),
        );

        let summary = orchestrator.execute().await.unwrap();
        assert_eq!(summary.kinds.len(), 4);
        assert_eq!(summary.exported_count(), 0);
        assert!(summary.is_complete_success());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_collection_subset_only_exports_selected_kinds() {
        let temp = TempDir::new().unwrap();
        let mut data = HashMap::new();
        data.insert(
            EntityCollection::Zones,
            vec![vec![
                AttrValue::Number(1.0),
                AttrValue::Number(10.0),
                AttrValue::Number(20.0),
            ]],
        );
        let provider = Arc::new(StubProvider {
            fail_load: false,
            data,
        });

        let mut opts = options(&temp);
        opts.collections = vec![EntityCollection::Zones];
        let orchestrator =
            ExportOrchestrator::with_provider(provider, "/models/z.ver".to_string(), opts);

        let summary = orchestrator.execute().await.unwrap();
        assert_eq!(summary.kinds.len(), 1);
        assert!(temp.path().join("Zones.csv").exists());
        assert!(!temp.path().join("Nodes.csv").exists());
    }

    #[test]
    fn test_options_from_config_defaults_to_all_collections() {
        let config = crate::config::ExportConfig::default();
        let opts = ExportOptions::from_config(&config).unwrap();
        assert_eq!(opts.collections, EntityCollection::ALL.to_vec());
        assert_eq!(opts.inter_export_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_options_from_config_rejects_unknown_collection() {
        let config = crate::config::ExportConfig {
            collections: vec!["junctions".to_string()],
            ..Default::default()
        };
        assert!(ExportOptions::from_config(&config).is_err());
    }
}
