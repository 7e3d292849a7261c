//! CSV output format for chart data
//!
//! Spreadsheet-friendly flat rows: one line per series point, with chart
//! and series columns so multi-panel output stays a single stream.

use crate::chart::Chart;

/// CSV record for a single series point
#[derive(Debug, Clone)]
pub struct CsvPoint {
    /// Zero-based chart index within the run.
    pub chart: usize,
    /// Series label, empty for unlabeled series.
    pub series: String,
    pub x: f64,
    pub y: f64,
}

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput {
    points: Vec<CsvPoint>,
}

impl CsvOutput {
    /// Create an empty CSV output formatter
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Flatten charts into CSV records in drawing order
    pub fn from_charts(charts: &[Chart]) -> Self {
        let mut output = Self::new();
        for (chart_index, chart) in charts.iter().enumerate() {
            for series in &chart.series {
                let label = series.label.clone().unwrap_or_default();
                for &(x, y) in &series.points {
                    output.add_point(CsvPoint {
                        chart: chart_index,
                        series: label.clone(),
                        x,
                        y,
                    });
                }
            }
        }
        output
    }

    /// Add a single record to the output
    pub fn add_point(&mut self, point: CsvPoint) {
        self.points.push(point);
    }

    fn header() -> &'static str {
        "chart,series,x,y"
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_point(point: &CsvPoint) -> String {
        format!(
            "{},{},{},{}",
            point.chart,
            Self::escape_field(&point.series),
            point.x,
            point.y
        )
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(Self::header());
        output.push('\n');
        for point in &self.points {
            output.push_str(&Self::format_point(point));
            output.push('\n');
        }
        output
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new()
    }
}
