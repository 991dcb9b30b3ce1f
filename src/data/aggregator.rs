//! Aggregator Module
//! Counts acquisitions per (Parent Company, Acquisition Year).

use crate::data::cleaner::ProcessorError;
use crate::data::loader::{ACQUISITION_YEAR_COL, PARENT_COMPANY_COL};
use polars::prelude::*;
use serde::Serialize;

/// Header of the count column in the aggregate table.
pub const ACQUISITIONS_COUNT_COL: &str = "Acquisitions Count";

/// Number of acquisitions a company made in one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    pub company: Option<String>,
    pub year: i32,
    pub count: u32,
}

impl AggregateRow {
    pub fn new(company: Option<&str>, year: i32, count: u32) -> Self {
        Self {
            company: company.map(str::to_string),
            year,
            count,
        }
    }
}

/// Groups cleaned acquisitions into per-company, per-year counts.
pub struct Aggregator;

impl Aggregator {
    /// Count rows per (company, year).
    ///
    /// Output is sorted by company then year; a missing company sorts first and
    /// keeps its own group so the counts always add up to `df.height()`.
    pub fn count_by_company_year(df: &DataFrame) -> Result<Vec<AggregateRow>, ProcessorError> {
        let grouped = Self::group_counts(df)?;

        let companies = grouped.column(PARENT_COMPANY_COL)?.str()?;
        let years = grouped.column(ACQUISITION_YEAR_COL)?.i32()?;
        let counts = grouped.column(ACQUISITIONS_COUNT_COL)?.u32()?;

        Ok(companies
            .into_iter()
            .zip(years)
            .zip(counts)
            .filter_map(|((company, year), count)| {
                Some(AggregateRow::new(company, year?, count?))
            })
            .collect())
    }

    /// Group and count with polars.
    ///
    /// Output columns: ["Parent Company", "Acquisition Year", "Acquisitions Count"]
    pub fn group_counts(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        for name in [PARENT_COMPANY_COL, ACQUISITION_YEAR_COL] {
            if df.column(name).is_err() {
                return Err(ProcessorError::MissingColumn(name.to_string()));
            }
        }

        let grouped = df
            .clone()
            .lazy()
            .select([
                col(PARENT_COMPANY_COL).cast(DataType::String),
                col(ACQUISITION_YEAR_COL).cast(DataType::Int32),
            ])
            .group_by([col(PARENT_COMPANY_COL), col(ACQUISITION_YEAR_COL)])
            .agg([len().cast(DataType::UInt32).alias(ACQUISITIONS_COUNT_COL)])
            .sort_by_exprs(
                [col(PARENT_COMPANY_COL), col(ACQUISITION_YEAR_COL)],
                SortMultipleOptions::default().with_nulls_last(false),
            )
            .collect()?;

        Ok(grouped)
    }

    /// Build the aggregate table written to CSV.
    ///
    /// Output columns: ["Parent Company", "Acquisition Year", "Acquisitions Count"]
    pub fn to_dataframe(rows: &[AggregateRow]) -> Result<DataFrame, ProcessorError> {
        let companies: Vec<Option<&str>> = rows.iter().map(|r| r.company.as_deref()).collect();
        let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
        let counts: Vec<u32> = rows.iter().map(|r| r.count).collect();

        let df = DataFrame::new(vec![
            Column::new(PARENT_COMPANY_COL.into(), companies),
            Column::new(ACQUISITION_YEAR_COL.into(), years),
            Column::new(ACQUISITIONS_COUNT_COL.into(), counts),
        ])?;

        Ok(df)
    }

    /// Total acquisitions across all rows.
    pub fn total_count(rows: &[AggregateRow]) -> u64 {
        rows.iter().map(|r| u64::from(r.count)).sum()
    }
}
