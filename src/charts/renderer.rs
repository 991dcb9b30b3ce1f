//! Static Chart Renderer
//! Draws the same timeline as the interactive document into an SVG with plotters.
//!
//! Layout:
//! 1. Caption: chart title centered
//! 2. Plot area: one line (or bar group) per company, years on X, counts on Y
//! 3. Legend: company names, upper right

use crate::charts::{ChartData, ChartError, ChartKind, ChartPlotter, X_AXIS_LABEL, Y_AXIS_LABEL};
use plotters::prelude::*;

/// Share of one year slot taken by a bar group.
const BAR_GROUP_WIDTH: f64 = 0.8;
const MAX_X_LABELS: usize = 20;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart as an SVG document string.
    pub fn render_svg(
        data: &ChartData,
        kind: ChartKind,
        size: (u32, u32),
    ) -> Result<String, ChartError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            root.fill(&WHITE).map_err(Self::render_error)?;

            let (x_min, x_max) = Self::get_x_range(data);
            let y_max = f64::from(data.max_count().max(1)) * 1.15;

            let mut chart = ChartBuilder::on(&root)
                .caption(&data.title, ("sans-serif", 22))
                .margin(15)
                .x_label_area_size(45)
                .y_label_area_size(55)
                .build_cartesian_2d(x_min..x_max, 0f64..y_max)
                .map_err(Self::render_error)?;

            let year_span = (x_max - x_min).round() as usize;
            chart
                .configure_mesh()
                .x_desc(X_AXIS_LABEL)
                .y_desc(Y_AXIS_LABEL)
                .x_labels(year_span.clamp(2, MAX_X_LABELS))
                .x_label_formatter(&|v| format!("{:.0}", v))
                .y_label_formatter(&|v| format!("{:.0}", v))
                .draw()
                .map_err(Self::render_error)?;

            let n_series = data.series.len().max(1);
            for (idx, series) in data.series.iter().enumerate() {
                let color = ChartPlotter::get_series_color(idx);
                match kind {
                    ChartKind::Line => {
                        let points: Vec<(f64, f64)> = series
                            .points()
                            .map(|(year, count)| (f64::from(year), f64::from(count)))
                            .collect();

                        chart
                            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
                            .map_err(Self::render_error)?
                            .label(series.company.as_str())
                            .legend(move |(x, y)| {
                                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                            });

                        chart
                            .draw_series(
                                points
                                    .iter()
                                    .map(|&point| Circle::new(point, 3, color.filled())),
                            )
                            .map_err(Self::render_error)?;
                    }
                    ChartKind::Bar => {
                        let (left, right) = Self::bar_offsets(idx, n_series);
                        chart
                            .draw_series(series.points().map(|(year, count)| {
                                let x = f64::from(year);
                                Rectangle::new(
                                    [(x + left, 0.0), (x + right, f64::from(count))],
                                    color.filled(),
                                )
                            }))
                            .map_err(Self::render_error)?
                            .label(series.company.as_str())
                            .legend(move |(x, y)| {
                                Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
                            });
                    }
                }
            }

            if !data.is_empty() {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .background_style(WHITE.mix(0.85))
                    .border_style(BLACK)
                    .draw()
                    .map_err(Self::render_error)?;
            }

            root.present().map_err(Self::render_error)?;
        }

        Ok(svg)
    }

    /// Years padded by one on each side so end points are not on the border.
    fn get_x_range(data: &ChartData) -> (f64, f64) {
        match data.year_range() {
            Some((lo, hi)) => (f64::from(lo) - 1.0, f64::from(hi) + 1.0),
            None => (0.0, 1.0),
        }
    }

    /// Horizontal extent of one company's bar relative to its year.
    fn bar_offsets(idx: usize, n_series: usize) -> (f64, f64) {
        let width = BAR_GROUP_WIDTH / n_series as f64;
        let left = -BAR_GROUP_WIDTH / 2.0 + idx as f64 * width;
        (left, left + width)
    }

    fn render_error(err: impl std::fmt::Display) -> ChartError {
        ChartError::Render(err.to_string())
    }
}
