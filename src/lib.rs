//! Acquisitions Timeline - CSV cleaning, aggregation & interactive chart
//!
//! Loads an acquisitions CSV, drops duplicate rows and rows without a numeric
//! year, counts acquisitions per parent company per year and charts the result.

pub mod charts;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod presenter;
