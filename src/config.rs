//! Command line configuration.
//!
//! Running with no arguments reproduces the fixed file names: read
//! `acquisitions_update_2021.csv`, write `m&a.html` and `processed_acquisitions.csv`.

use crate::charts::{ChartKind, CHART_TITLE};
use crate::presenter::OutputOptions;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "acquisitions_update_2021.csv";
pub const DEFAULT_HTML_OUTPUT: &str = "m&a.html";
pub const DEFAULT_CSV_OUTPUT: &str = "processed_acquisitions.csv";

const DEFAULT_SVG_WIDTH: u32 = 1200;
const DEFAULT_SVG_HEIGHT: u32 = 700;

#[derive(Parser, Debug, Clone)]
#[command(name = "acquisitions_timeline")]
#[command(about = "Clean an acquisitions CSV and chart acquisitions per company per year", long_about = None)]
pub struct Cli {
    /// Acquisitions CSV with `Parent Company` and `Acquisition Year` columns
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Interactive chart document to write
    #[arg(long, default_value = DEFAULT_HTML_OUTPUT)]
    pub html: PathBuf,

    /// Aggregate CSV to write
    #[arg(long, default_value = DEFAULT_CSV_OUTPUT)]
    pub csv: PathBuf,

    /// Skip writing the aggregate CSV
    #[arg(long, default_value_t = false)]
    pub no_csv: bool,

    /// Also render a static SVG chart to this path
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Trace style for each company
    #[arg(long, value_enum, default_value_t = ChartKind::Line)]
    pub chart: ChartKind,

    /// Open the chart in the default viewer when done
    #[arg(long, default_value_t = false)]
    pub open: bool,
}

/// Settings for a single pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: OutputOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: OutputOptions {
                title: CHART_TITLE.to_string(),
                html_path: PathBuf::from(DEFAULT_HTML_OUTPUT),
                csv_path: Some(PathBuf::from(DEFAULT_CSV_OUTPUT)),
                svg_path: None,
                svg_size: (DEFAULT_SVG_WIDTH, DEFAULT_SVG_HEIGHT),
                chart_kind: ChartKind::Line,
                open_in_viewer: false,
            },
        }
    }
}

impl From<Cli> for PipelineConfig {
    fn from(cli: Cli) -> Self {
        let defaults = Self::default();
        Self {
            input: cli.input,
            output: OutputOptions {
                html_path: cli.html,
                csv_path: (!cli.no_csv).then_some(cli.csv),
                svg_path: cli.svg,
                chart_kind: cli.chart,
                open_in_viewer: cli.open,
                ..defaults.output
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_match_defaults() {
        let cli = Cli::try_parse_from(["acquisitions_timeline"]).unwrap();
        let config = PipelineConfig::from(cli);
        let defaults = PipelineConfig::default();

        assert_eq!(config.input, defaults.input);
        assert_eq!(config.output.html_path, PathBuf::from("m&a.html"));
        assert_eq!(
            config.output.csv_path,
            Some(PathBuf::from("processed_acquisitions.csv"))
        );
        assert_eq!(config.output.svg_path, None);
        assert_eq!(config.output.chart_kind, ChartKind::Line);
        assert!(!config.output.open_in_viewer);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "acquisitions_timeline",
            "data/deals.csv",
            "--html",
            "out/deals.html",
            "--no-csv",
            "--svg",
            "out/deals.svg",
            "--chart",
            "bar",
            "--open",
        ])
        .unwrap();
        let config = PipelineConfig::from(cli);

        assert_eq!(config.input, PathBuf::from("data/deals.csv"));
        assert_eq!(config.output.html_path, PathBuf::from("out/deals.html"));
        assert_eq!(config.output.csv_path, None);
        assert_eq!(config.output.svg_path, Some(PathBuf::from("out/deals.svg")));
        assert_eq!(config.output.chart_kind, ChartKind::Bar);
        assert!(config.output.open_in_viewer);
    }
}
