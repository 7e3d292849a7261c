//! Latency-accuracy analysis over pre-binned capture histograms
//!
//! The latency benchmark replays traffic at several mean data rates and
//! writes one `histogram_<rate>.dat` per rate, already binned to the
//! 6.4 ns latency clock. This module normalizes each histogram to
//! percentages and stacks the charts over a shared latency axis so the
//! rates can be compared visually.

use std::path::Path;
use tracing::debug;

use super::{AnalysisError, Result};
use crate::chart::{BarAlign, Chart, Series, SeriesStyle};
use crate::dataset::{self, LatencyFile};
use crate::distribution::ProbabilityDistribution;
use crate::quantize::T_CLK_LATENCY_NS;
use crate::samples;

/// Upper probability bound shown on each panel, in percent.
const Y_MAX_PERCENT: f64 = 110.0;

/// Margin added on both sides of the shared latency axis, in nanoseconds.
const X_MARGIN_NS: f64 = 1.0;

/// Bars are drawn slightly narrower than the latency clock so adjacent
/// panels stay readable.
const BAR_WIDTH_NS: f64 = T_CLK_LATENCY_NS / 1.5;

/// One capture's normalized distribution.
#[derive(Debug, Clone)]
pub struct RatePanel {
    /// Mean data rate of the capture in bit/s.
    pub rate_bps: f64,
    pub distribution: ProbabilityDistribution,
}

/// Result of the latency analysis: one chart per mean data rate, ascending,
/// all sharing the same latency axis.
#[derive(Debug, Clone)]
pub struct LatencyReport {
    pub panels: Vec<RatePanel>,
    pub charts: Vec<Chart>,
}

/// Run the latency analysis over a dataset directory.
pub fn run(data_dir: &Path) -> Result<LatencyReport> {
    let files = dataset::discover_latency_files(data_dir)?;
    if files.is_empty() {
        // No captures at all is the same recoverable condition as a
        // missing file: the benchmark has not run yet.
        return Err(AnalysisError::Samples(samples::SampleError::NotFound {
            path: data_dir.join("histogram_*.dat"),
        }));
    }

    let mut panels = Vec::with_capacity(files.len());
    let mut min_latency = f64::INFINITY;
    let mut max_latency = f64::NEG_INFINITY;

    for LatencyFile { rate_bps, path } in &files {
        let bins = samples::load_latency_bins(path)?;
        if bins.is_empty() {
            return Err(AnalysisError::EmptyCapture { path: path.clone() });
        }
        for bin in &bins {
            min_latency = min_latency.min(bin.latency_ns);
            max_latency = max_latency.max(bin.latency_ns);
        }
        let pairs: Vec<(f64, u64)> = bins
            .iter()
            .map(|bin| (bin.latency_ns, bin.occurrences))
            .collect();
        let distribution = ProbabilityDistribution::from_counts(&pairs)?;
        panels.push(RatePanel {
            rate_bps: *rate_bps,
            distribution,
        });
    }

    debug!(
        panels = panels.len(),
        min_latency, max_latency, "normalized latency captures"
    );

    let x_bounds = (min_latency - X_MARGIN_NS, max_latency + X_MARGIN_NS);
    let charts = panels.iter().map(|panel| build_chart(panel, x_bounds)).collect();

    Ok(LatencyReport { panels, charts })
}

fn build_chart(panel: &RatePanel, x_bounds: (f64, f64)) -> Chart {
    let points: Vec<(f64, f64)> = panel
        .distribution
        .points()
        .iter()
        .map(|p| (p.edge_ns, p.percent))
        .collect();

    Chart {
        x_label: "Measured Latency [ns]".to_string(),
        y_label: "Probability [%]".to_string(),
        x_bounds,
        y_bounds: Some((0.0, Y_MAX_PERCENT)),
        x_tick_step: Some(T_CLK_LATENCY_NS),
        series: vec![Series {
            label: Some(format!(
                "Mean datarate: {:.2} Gbps",
                panel.rate_bps / 1e9
            )),
            style: SeriesStyle::Bars {
                width: BAR_WIDTH_NS,
                align: BarAlign::Center,
            },
            points,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_panels_are_ordered_by_rate() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("histogram_9800000000.dat"), "652.8 5\n").unwrap();
        fs::write(tmp.path().join("histogram_420000000.dat"), "646.4 2\n659.2 2\n").unwrap();
        let report = run(tmp.path()).unwrap();
        assert_eq!(report.panels.len(), 2);
        assert_eq!(report.panels[0].rate_bps, 420_000_000.0);
        assert_eq!(report.panels[1].rate_bps, 9_800_000_000.0);
    }

    #[test]
    fn test_occurrences_normalize_to_percent() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("histogram_1000000000.dat"), "646.4 1\n659.2 3\n").unwrap();
        let report = run(tmp.path()).unwrap();
        let points = report.panels[0].distribution.points();
        assert_eq!(points[0].percent, 25.0);
        assert_eq!(points[1].percent, 75.0);
    }

    #[test]
    fn test_charts_share_the_latency_axis() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("histogram_420000000.dat"), "646.4 1\n").unwrap();
        fs::write(tmp.path().join("histogram_9800000000.dat"), "672.0 1\n").unwrap();
        let report = run(tmp.path()).unwrap();
        for chart in &report.charts {
            assert_eq!(chart.x_bounds, (646.4 - 1.0, 672.0 + 1.0));
            assert_eq!(chart.y_bounds, Some((0.0, 110.0)));
        }
    }

    #[test]
    fn test_rate_label_is_in_gbps() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("histogram_4200000000.dat"), "646.4 1\n").unwrap();
        let report = run(tmp.path()).unwrap();
        let label = report.charts[0].series[0].label.clone().unwrap();
        assert_eq!(label, "Mean datarate: 4.20 Gbps");
    }

    #[test]
    fn test_no_captures_is_missing_data() {
        let tmp = TempDir::new().unwrap();
        let err = run(tmp.path()).unwrap_err();
        assert!(err.is_missing_data());
    }

    #[test]
    fn test_empty_capture_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("histogram_1000000000.dat"), "").unwrap();
        let err = run(tmp.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyCapture { .. }));
        assert!(!err.is_missing_data());
    }
}
