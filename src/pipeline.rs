//! Runs Loader → Cleaner → Aggregator → Presenter once over a single input file.

use crate::config::PipelineConfig;
use crate::data::{
    AggregateRow, Aggregator, CleanReport, DataCleaner, DataLoader, LoaderError, ProcessorError,
};
use crate::presenter::{Artifacts, Presenter, PresenterError};
use thiserror::Error;
use tracing::{info, info_span};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Loading failed: {0}")]
    Load(#[from] LoaderError),
    #[error("Processing failed: {0}")]
    Process(#[from] ProcessorError),
    #[error("Presenting failed: {0}")]
    Present(#[from] PresenterError),
}

/// Outcome of one run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub clean: CleanReport,
    pub aggregate: Vec<AggregateRow>,
    pub artifacts: Artifacts,
}

/// Execute the whole pipeline; any stage failure aborts the run.
pub fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let _span = info_span!("pipeline", input = %config.input.display()).entered();

    let mut loader = DataLoader::new();
    loader.load_csv(&config.input)?;
    let loaded_rows = loader.get_row_count();
    let raw = loader.take_dataframe().unwrap_or_default();

    let cleaned = DataCleaner::clean(&raw)?;
    let aggregate = Aggregator::count_by_company_year(&cleaned.df)?;
    info!(
        loaded_rows,
        duplicates = cleaned.report.duplicates_removed,
        non_numeric_years = cleaned.report.non_numeric_dropped,
        clean_rows = cleaned.report.output_rows,
        groups = aggregate.len(),
        acquisitions = Aggregator::total_count(&aggregate),
        "aggregated acquisitions"
    );

    let artifacts = Presenter::present(&aggregate, &config.output)?;

    Ok(RunSummary {
        clean: cleaned.report,
        aggregate,
        artifacts,
    })
}
