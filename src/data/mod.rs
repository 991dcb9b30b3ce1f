//! Data module - CSV loading, cleaning and aggregation

mod aggregator;
mod cleaner;
mod loader;

pub use aggregator::{AggregateRow, Aggregator, ACQUISITIONS_COUNT_COL};
pub use cleaner::{CleanReport, CleanedData, DataCleaner, ProcessorError};
pub use loader::{DataLoader, LoaderError, ACQUISITION_YEAR_COL, PARENT_COMPANY_COL};
