//! Presenter Module
//! Writes the chart documents and the aggregate CSV for one run.

use crate::charts::{ChartData, ChartError, ChartKind, ChartPlotter, StaticChartRenderer};
use crate::data::{AggregateRow, Aggregator, ProcessorError};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum PresenterError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to build chart: {0}")]
    Chart(#[from] ChartError),
    #[error("Failed to build aggregate table: {0}")]
    Table(#[from] ProcessorError),
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Where and how the results of a run are written.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub title: String,
    pub html_path: PathBuf,
    pub csv_path: Option<PathBuf>,
    pub svg_path: Option<PathBuf>,
    pub svg_size: (u32, u32),
    pub chart_kind: ChartKind,
    pub open_in_viewer: bool,
}

/// Files produced by [`Presenter::present`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
    pub html: PathBuf,
    pub csv: Option<PathBuf>,
    pub svg: Option<PathBuf>,
}

/// Hands aggregate rows to the chart builders and persists the results.
pub struct Presenter;

impl Presenter {
    /// Render every requested document, then write them.
    ///
    /// Nothing touches the disk until all documents are rendered and all
    /// output directories exist.
    pub fn present(
        rows: &[AggregateRow],
        options: &OutputOptions,
    ) -> Result<Artifacts, PresenterError> {
        let data = ChartData::from_rows(&options.title, rows);
        debug!(series = data.series.len(), "chart series built");

        let html = ChartPlotter::render_html(&data, options.chart_kind)?;
        let mut documents: Vec<(&Path, Vec<u8>)> =
            vec![(options.html_path.as_path(), html.into_bytes())];
        if let Some(csv_path) = &options.csv_path {
            documents.push((csv_path.as_path(), Self::render_aggregate_csv(rows)?));
        }
        if let Some(svg_path) = &options.svg_path {
            let svg = StaticChartRenderer::render_svg(&data, options.chart_kind, options.svg_size)?;
            documents.push((svg_path.as_path(), svg.into_bytes()));
        }

        for (path, _) in &documents {
            Self::ensure_parent(path)?;
        }
        for (path, contents) in &documents {
            Self::write_file(path, contents)?;
            info!(path = %path.display(), bytes = contents.len(), "wrote output");
        }

        if options.open_in_viewer {
            Self::open_in_viewer(&options.html_path);
        }

        Ok(Artifacts {
            html: options.html_path.clone(),
            csv: options.csv_path.clone(),
            svg: options.svg_path.clone(),
        })
    }

    /// Aggregate table as CSV bytes with its three-column header.
    pub fn render_aggregate_csv(rows: &[AggregateRow]) -> Result<Vec<u8>, PresenterError> {
        let mut df = Aggregator::to_dataframe(rows)?;
        let mut buf = Vec::new();
        CsvWriter::new(&mut buf)
            .include_header(true)
            .finish(&mut df)?;
        Ok(buf)
    }

    /// Viewer failures are logged, not returned.
    fn open_in_viewer(path: &Path) {
        match open::that(path) {
            Ok(()) => debug!(path = %path.display(), "opened chart"),
            Err(err) => warn!(path = %path.display(), error = %err, "could not open chart"),
        }
    }

    fn write_file(path: &Path, contents: &[u8]) -> Result<(), PresenterError> {
        fs::write(path, contents).map_err(|source| Self::io_error(path, source))
    }

    fn ensure_parent(path: &Path) -> Result<(), PresenterError> {
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|source| Self::io_error(dir, source))
            }
            _ => Ok(()),
        }
    }

    fn io_error(path: &Path, source: std::io::Error) -> PresenterError {
        PresenterError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::CHART_TITLE;
    use tempfile::tempdir;

    fn options(dir: &Path) -> OutputOptions {
        OutputOptions {
            title: CHART_TITLE.to_string(),
            html_path: dir.join("m&a.html"),
            csv_path: Some(dir.join("out").join("processed_acquisitions.csv")),
            svg_path: None,
            svg_size: (800, 500),
            chart_kind: ChartKind::Line,
            open_in_viewer: false,
        }
    }

    fn rows() -> Vec<AggregateRow> {
        vec![
            AggregateRow::new(None, 2001, 1),
            AggregateRow::new(Some("Apple"), 2010, 2),
            AggregateRow::new(Some("Microsoft"), 2010, 3),
        ]
    }

    #[test]
    fn test_present_writes_html_and_csv() {
        let dir = tempdir().unwrap();
        let opts = options(dir.path());
        let artifacts = Presenter::present(&rows(), &opts).unwrap();

        assert_eq!(artifacts.html, opts.html_path);
        assert_eq!(artifacts.csv, opts.csv_path);
        assert!(artifacts.svg.is_none());

        let html = fs::read_to_string(&opts.html_path).unwrap();
        assert!(html.contains("Microsoft"));

        let csv = fs::read_to_string(opts.csv_path.as_ref().unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Parent Company,Acquisition Year,Acquisitions Count");
        assert_eq!(lines[1], ",2001,1");
        assert_eq!(lines[2], "Apple,2010,2");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_present_without_csv_and_with_svg() {
        let dir = tempdir().unwrap();
        let mut opts = options(dir.path());
        opts.csv_path = None;
        opts.svg_path = Some(dir.path().join("timeline.svg"));
        opts.chart_kind = ChartKind::Bar;

        let artifacts = Presenter::present(&rows(), &opts).unwrap();

        assert!(artifacts.csv.is_none());
        assert!(!dir.path().join("out").exists());
        let svg = fs::read_to_string(artifacts.svg.unwrap()).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_empty_rows_still_write_documents() {
        let dir = tempdir().unwrap();
        let opts = options(dir.path());
        Presenter::present(&[], &opts).unwrap();

        let csv = fs::read_to_string(opts.csv_path.as_ref().unwrap()).unwrap();
        assert_eq!(csv.trim_end(), "Parent Company,Acquisition Year,Acquisitions Count");
        assert!(opts.html_path.exists());
    }

    #[test]
    fn test_failed_output_directory_writes_nothing() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("out");
        fs::write(&blocker, "not a directory").unwrap();
        let opts = options(dir.path());

        let result = Presenter::present(&rows(), &opts);

        assert!(matches!(result, Err(PresenterError::Io { .. })));
        assert!(!opts.html_path.exists());
    }

    #[test]
    fn test_render_aggregate_csv_bytes() {
        let csv = Presenter::render_aggregate_csv(&rows()).unwrap();
        let text = String::from_utf8(csv).unwrap();
        assert!(text.ends_with("Microsoft,2010,3\n"));
    }
}
