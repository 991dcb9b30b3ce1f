//! Charts module - Chart rendering

mod plotter;
mod renderer;

use thiserror::Error;

pub use plotter::{
    ChartData, ChartKind, ChartPlotter, CompanySeries, CHART_TITLE, PALETTE, UNKNOWN_COMPANY,
    X_AXIS_LABEL, Y_AXIS_LABEL,
};
pub use renderer::StaticChartRenderer;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to serialize chart: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to draw chart: {0}")]
    Render(String),
}
