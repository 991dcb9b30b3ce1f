//! Data Cleaner Module
//! Removes duplicate rows and rows whose acquisition year is not a plain integer.

use crate::data::loader::{ACQUISITION_YEAR_COL, PARENT_COMPANY_COL};
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

/// Years are ASCII digits only; signs, blanks, decimals and other scripts are dropped.
const NUMERIC_YEAR_PATTERN: &str = "^[0-9]+$";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Required column missing: {0}")]
    MissingColumn(String),
}

/// What the cleaner did to a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub input_rows: usize,
    pub duplicates_removed: usize,
    pub non_numeric_dropped: usize,
    pub output_rows: usize,
}

/// Cleaned table plus the counts behind it.
#[derive(Debug, Clone)]
pub struct CleanedData {
    pub df: DataFrame,
    pub report: CleanReport,
}

/// Handles deduplication and year coercion.
pub struct DataCleaner;

impl DataCleaner {
    /// Clean the raw acquisitions table.
    ///
    /// Exact-duplicate rows keep only their first occurrence, then rows with a
    /// non-numeric `Acquisition Year` are dropped. Surviving years become an
    /// `Int32` column; all other columns pass through unchanged and in order.
    pub fn clean(df: &DataFrame) -> Result<CleanedData, ProcessorError> {
        for name in [PARENT_COMPANY_COL, ACQUISITION_YEAR_COL] {
            if df.column(name).is_err() {
                return Err(ProcessorError::MissingColumn(name.to_string()));
            }
        }

        let deduped = df.unique_stable(None, UniqueKeepStrategy::First, None)?;

        // Values that match but overflow i32 become null in the cast and are dropped too.
        let cleaned = deduped
            .clone()
            .lazy()
            .filter(Self::year_text().str().contains(lit(NUMERIC_YEAR_PATTERN), true))
            .with_column(Self::year_text().cast(DataType::Int32))
            .filter(col(ACQUISITION_YEAR_COL).is_not_null())
            .collect()?;

        let report = CleanReport {
            input_rows: df.height(),
            duplicates_removed: df.height() - deduped.height(),
            non_numeric_dropped: deduped.height() - cleaned.height(),
            output_rows: cleaned.height(),
        };

        if report.duplicates_removed > 0 {
            info!(duplicates_removed = report.duplicates_removed, "removed duplicate rows");
        }
        debug!(
            non_numeric_dropped = report.non_numeric_dropped,
            "dropped rows with non-numeric year"
        );

        Ok(CleanedData {
            df: cleaned,
            report,
        })
    }

    /// Year column as text, whatever type it currently has.
    fn year_text() -> Expr {
        col(ACQUISITION_YEAR_COL).cast(DataType::String)
    }
}
