use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::PipelineConfig;
use crate::domain::Dataset;
use crate::pipeline::header::resolve_headers;
use crate::pipeline::normalize::normalize_row;
use crate::pipeline::validate::{validate_row, RowRejection};

/// Hard, fail-fast reasons a run terminates without a dataset.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum PipelineFailure {
    #[error("CSV file is empty or unreadable.")]
    EmptyInput,

    #[error("Invalid CSV format: required headers are missing ({})", missing.join(", "))]
    MissingHeaders { missing: Vec<String> },

    #[error("CSV has headers but no data rows.")]
    NoDataRows,

    #[error(transparent)]
    Row(#[from] RowRejection),

    #[error("Upload cancelled before completion.")]
    Cancelled,
}

/// Terminal result of one pipeline run. Every invocation starts fresh and
/// produces exactly one of these; no partial dataset survives a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PipelineOutcome {
    /// Every data row validated; the normalized dataset is ready for display
    Succeeded(Dataset),
    /// Not invalid, just larger than the configured soft limit
    RowLimitExceeded { row_count: usize },
    /// First violation, with its file coordinates
    Failed(PipelineFailure),
}

/// Drives a raw table through header resolution, per-row validation, and
/// normalization in fixed order, assembling the grouped dataset on success.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Runs the whole table to its terminal outcome.
    pub fn run(&self, table: &[Vec<String>]) -> PipelineOutcome {
        self.run_with_cancellation(table, &AtomicBool::new(false))
    }

    /// Same as [`Pipeline::run`], checking `cancel` between rows. A
    /// cancelled run terminates like any other failure: nothing partial is
    /// retained or exposed.
    #[instrument(skip_all, fields(rows = table.len()))]
    pub fn run_with_cancellation(
        &self,
        table: &[Vec<String>],
        cancel: &AtomicBool,
    ) -> PipelineOutcome {
        let (header_row, data_rows) = match table.split_first() {
            Some(split) => split,
            None => {
                warn!("Upload rejected: empty input");
                return PipelineOutcome::Failed(PipelineFailure::EmptyInput);
            }
        };

        let resolution = match resolve_headers(header_row) {
            Ok(resolution) => resolution,
            Err(missing) => {
                warn!("Upload rejected: missing headers ({})", missing.join(", "));
                return PipelineOutcome::Failed(PipelineFailure::MissingHeaders { missing });
            }
        };

        if data_rows.is_empty() {
            warn!("Upload rejected: no data rows");
            return PipelineOutcome::Failed(PipelineFailure::NoDataRows);
        }

        if data_rows.len() > self.config.row_limit {
            info!(
                "Row limit exceeded: {} rows against a limit of {}",
                data_rows.len(),
                self.config.row_limit
            );
            return PipelineOutcome::RowLimitExceeded {
                row_count: data_rows.len(),
            };
        }

        let mut records = Vec::with_capacity(data_rows.len());
        for (index, row) in data_rows.iter().enumerate() {
            if cancel.load(Ordering::Relaxed) {
                warn!("Upload cancelled after {} rows", records.len());
                return PipelineOutcome::Failed(PipelineFailure::Cancelled);
            }

            // Blank rows are skipped without validating; the index still
            // advances so later rejections keep their file coordinates
            if row.iter().all(|c| c.trim().is_empty()) {
                debug!("Skipping blank row at index {}", index);
                continue;
            }

            if let Err(rejection) = validate_row(row, &resolution, index) {
                warn!("Upload rejected: {}", rejection);
                return PipelineOutcome::Failed(PipelineFailure::Row(rejection));
            }

            records.push(normalize_row(row, &resolution));
        }

        let dataset = Dataset::from_records(records);
        info!(
            "Upload accepted: {} records across {} people",
            dataset.records.len(),
            dataset.grouped_by_person.len()
        );
        PipelineOutcome::Succeeded(dataset)
    }
}
