//! Chart Plotter Module
//! Builds the interactive timeline as a standalone HTML document driven by plotly.js.

use crate::charts::ChartError;
use crate::data::AggregateRow;
use plotters::style::RGBColor;
use serde::Serialize;
use serde_json::json;

/// Default chart title.
pub const CHART_TITLE: &str = "Timeline of Acquisitions by Parent Companies";
/// Label used for rows without a parent company.
pub const UNKNOWN_COMPANY: &str = "(unknown)";

pub const X_AXIS_LABEL: &str = "Year";
pub const Y_AXIS_LABEL: &str = "Number of Acquisitions";

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const PLOT_DIV_ID: &str = "acquisitions-timeline";

/// Color palette for companies
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(52, 152, 219),  // Blue
    RGBColor(231, 76, 60),   // Red
    RGBColor(46, 204, 113),  // Green
    RGBColor(155, 89, 182),  // Purple
    RGBColor(243, 156, 18),  // Orange
    RGBColor(26, 188, 156),  // Teal
    RGBColor(233, 30, 99),   // Pink
    RGBColor(0, 188, 212),   // Cyan
    RGBColor(121, 85, 72),   // Brown
    RGBColor(96, 125, 139),  // Blue Grey
];

/// How each company's series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ChartKind {
    /// Line with a marker on every year
    #[default]
    Line,
    /// Grouped bars per year
    Bar,
}

/// One company's acquisitions over time, sorted by year.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanySeries {
    pub company: String,
    pub years: Vec<i32>,
    pub counts: Vec<u32>,
}

impl CompanySeries {
    pub fn points(&self) -> impl Iterator<Item = (i32, u32)> + '_ {
        self.years.iter().copied().zip(self.counts.iter().copied())
    }
}

/// Everything a chart needs: title plus one series per company.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub title: String,
    pub series: Vec<CompanySeries>,
}

impl ChartData {
    /// Split aggregate rows into per-company series.
    ///
    /// Rows arrive sorted by company then year, so each company is one run.
    pub fn from_rows(title: &str, rows: &[AggregateRow]) -> Self {
        let mut series: Vec<CompanySeries> = Vec::new();
        let mut current: Option<&Option<String>> = None;

        for row in rows {
            if current != Some(&row.company) {
                current = Some(&row.company);
                series.push(CompanySeries {
                    company: row
                        .company
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
                    years: Vec::new(),
                    counts: Vec::new(),
                });
            }
            if let Some(last) = series.last_mut() {
                last.years.push(row.year);
                last.counts.push(row.count);
            }
        }

        Self {
            title: title.to_string(),
            series,
        }
    }

    /// Earliest and latest year across all series.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let mut years = self.series.iter().flat_map(|s| s.years.iter().copied());
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    /// Largest single-year count.
    pub fn max_count(&self) -> u32 {
        self.series
            .iter()
            .flat_map(|s| s.counts.iter().copied())
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[derive(Serialize)]
struct PlotlyMarker {
    color: String,
    size: u32,
}

#[derive(Serialize)]
struct PlotlyTrace<'a> {
    #[serde(rename = "type")]
    trace_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<&'static str>,
    name: &'a str,
    x: &'a [i32],
    y: &'a [u32],
    marker: PlotlyMarker,
    hovertemplate: String,
}

/// Creates the interactive HTML chart document.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for a company by its position in the legend.
    pub fn get_series_color(index: usize) -> RGBColor {
        PALETTE[index % PALETTE.len()]
    }

    /// CSS hex form of a palette color.
    pub fn to_hex(color: RGBColor) -> String {
        format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
    }

    /// Serialize the plotly trace array, one trace per company.
    pub fn traces_json(data: &ChartData, kind: ChartKind) -> Result<String, ChartError> {
        let traces: Vec<PlotlyTrace> = data
            .series
            .iter()
            .enumerate()
            .map(|(idx, series)| PlotlyTrace {
                trace_type: match kind {
                    ChartKind::Line => "scatter",
                    ChartKind::Bar => "bar",
                },
                mode: match kind {
                    ChartKind::Line => Some("lines+markers"),
                    ChartKind::Bar => None,
                },
                name: &series.company,
                x: &series.years,
                y: &series.counts,
                marker: PlotlyMarker {
                    color: Self::to_hex(Self::get_series_color(idx)),
                    size: 7,
                },
                hovertemplate: format!(
                    "{}<br>{}: %{{x}}<br>{}: %{{y}}<extra></extra>",
                    series.company, X_AXIS_LABEL, Y_AXIS_LABEL
                ),
            })
            .collect();

        Ok(serde_json::to_string(&traces)?)
    }

    /// Serialize the plotly layout object.
    pub fn layout_json(data: &ChartData, kind: ChartKind) -> Result<String, ChartError> {
        let mut layout = json!({
            "title": { "text": data.title },
            "xaxis": { "title": { "text": X_AXIS_LABEL }, "tickformat": "d" },
            "yaxis": { "title": { "text": Y_AXIS_LABEL }, "rangemode": "tozero" },
            "legend": { "title": { "text": "Parent Company" } },
            "hovermode": "closest"
        });
        if kind == ChartKind::Bar {
            layout["barmode"] = json!("group");
        }
        Ok(serde_json::to_string(&layout)?)
    }

    /// Render the complete HTML document.
    pub fn render_html(data: &ChartData, kind: ChartKind) -> Result<String, ChartError> {
        let traces = Self::script_safe(&Self::traces_json(data, kind)?);
        let layout = Self::script_safe(&Self::layout_json(data, kind)?);
        let title = Self::escape_html(&data.title);

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>{title}</title>
<script src="{cdn}" charset="utf-8"></script>
</head>
<body>
<div id="{div}" style="width:100%;height:95vh;"></div>
<script>
Plotly.newPlot("{div}", {traces}, {layout}, {{"responsive": true}});
</script>
</body>
</html>
"#,
            title = title,
            cdn = PLOTLY_CDN,
            div = PLOT_DIV_ID,
            traces = traces,
            layout = layout,
        ))
    }

    /// JSON inside a <script> block must not close the tag early.
    fn script_safe(json: &str) -> String {
        json.replace("</", "<\\/")
    }

    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
    }
}
