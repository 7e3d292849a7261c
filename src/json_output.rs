//! JSON output format for analysis reports
//!
//! Mirror structs for everything the analyses produce, so downstream
//! tooling gets a stable schema independent of the internal types.

use serde::{Deserialize, Serialize};

use crate::chart::{Chart, SeriesStyle};
use crate::distribution::ProbabilityDistribution;
use crate::histogram::ErrorHistogram;

/// A single `(x, y)` point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPoint {
    pub x: f64,
    pub y: f64,
}

/// A single chart series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSeries {
    /// Legend label, omitted for unlabeled series
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Drawing style: "bars" or "line"
    pub style: String,
    /// Bar width in x units (bars only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_width: Option<f64>,
    pub points: Vec<JsonPoint>,
}

/// A chart with axis labels, bounds and series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonChart {
    pub x_label: String,
    pub y_label: String,
    pub x_min: f64,
    pub x_max: f64,
    /// Omitted when the sink fits the data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_max: Option<f64>,
    pub series: Vec<JsonSeries>,
}

/// One histogram bin with its normalized share
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonBin {
    /// Lower bin edge in nanoseconds
    pub edge_ns: f64,
    pub count: u64,
    pub percent: f64,
}

/// Timing-error histogram detail (precision analysis only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonHistogram {
    /// Bin width in nanoseconds
    pub tick_ns: f64,
    pub total_samples: u64,
    pub bins: Vec<JsonBin>,
}

/// Complete output document for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Which analysis produced this document
    pub analysis: String,
    pub charts: Vec<JsonChart>,
    /// Per-bin counts and percentages, precision analysis only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<JsonHistogram>,
}

impl JsonOutput {
    /// Create an output document from chart data
    pub fn new(analysis: &str, charts: &[Chart]) -> Self {
        Self {
            analysis: analysis.to_string(),
            charts: charts.iter().map(JsonChart::from_chart).collect(),
            histogram: None,
        }
    }

    /// Attach the precision histogram detail
    pub fn set_histogram(
        &mut self,
        histogram: &ErrorHistogram,
        distribution: &ProbabilityDistribution,
    ) {
        let bins = histogram
            .bins()
            .iter()
            .zip(distribution.points().iter())
            .map(|(bin, point)| JsonBin {
                edge_ns: bin.edge_ns,
                count: bin.count,
                percent: point.percent,
            })
            .collect();
        self.histogram = Some(JsonHistogram {
            tick_ns: histogram.tick_ns(),
            total_samples: histogram.total(),
            bins,
        });
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl JsonChart {
    fn from_chart(chart: &Chart) -> Self {
        Self {
            x_label: chart.x_label.clone(),
            y_label: chart.y_label.clone(),
            x_min: chart.x_bounds.0,
            x_max: chart.x_bounds.1,
            y_min: chart.y_bounds.map(|(min, _)| min),
            y_max: chart.y_bounds.map(|(_, max)| max),
            series: chart.series.iter().map(JsonSeries::from_series).collect(),
        }
    }
}

impl JsonSeries {
    fn from_series(series: &crate::chart::Series) -> Self {
        let (style, bar_width) = match series.style {
            SeriesStyle::Bars { width, .. } => ("bars".to_string(), Some(width)),
            SeriesStyle::Line => ("line".to_string(), None),
        };
        Self {
            label: series.label.clone(),
            style,
            bar_width,
            points: series
                .points
                .iter()
                .map(|&(x, y)| JsonPoint { x, y })
                .collect(),
        }
    }
}
