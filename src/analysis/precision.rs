//! Inter-packet timing precision analysis
//!
//! Evaluates how precisely the tester reproduces and timestamps
//! inter-packet times: the expected times written by the trace generator
//! are paired with the times measured by the NIC timestamping logic, the
//! measured side is quantized to the 3.2 ns timestamp clock, and the
//! signed errors are binned into a clock-aligned probability distribution.

use std::path::Path;
use tracing::debug;

use super::Result;
use crate::chart::{BarAlign, Chart, Series, SeriesStyle};
use crate::dataset::{EXPECTED_TIMES_FILE, MEASURED_TIMES_FILE};
use crate::distribution::ProbabilityDistribution;
use crate::histogram::ErrorHistogram;
use crate::quantize::{self, T_CLK_NIC_NS};
use crate::samples;

/// Upper probability bound shown on the precision chart, in percent.
const Y_MAX_PERCENT: f64 = 30.0;

/// Result of the precision analysis: the raw histogram, its normalized
/// distribution and the chart built from it.
#[derive(Debug, Clone)]
pub struct PrecisionReport {
    pub histogram: ErrorHistogram,
    pub distribution: ProbabilityDistribution,
    pub chart: Chart,
}

/// Run the precision pipeline over a dataset directory.
pub fn run(data_dir: &Path) -> Result<PrecisionReport> {
    let expected = samples::load_expected_ns(&data_dir.join(EXPECTED_TIMES_FILE))?;
    let measured_raw = samples::load_measured_ns(&data_dir.join(MEASURED_TIMES_FILE))?;

    // Only the measured side is quantized. The expected times are the
    // generator's ideal values; the timestamp clock's granularity is the
    // quantity under study.
    let measured = quantize::quantize_series(&measured_raw, T_CLK_NIC_NS);
    debug!(
        samples = measured.len(),
        tick_ns = T_CLK_NIC_NS,
        "quantized measured inter-packet times"
    );

    let histogram = ErrorHistogram::from_pairs(&expected, &measured, T_CLK_NIC_NS)?;
    let distribution = ProbabilityDistribution::from_histogram(&histogram);
    let chart = build_chart(&distribution);

    Ok(PrecisionReport {
        histogram,
        distribution,
        chart,
    })
}

fn build_chart(distribution: &ProbabilityDistribution) -> Chart {
    let points: Vec<(f64, f64)> = distribution
        .points()
        .iter()
        .map(|p| (p.edge_ns, p.percent))
        .collect();

    // Construction rejects empty input, so first/last always exist.
    let min_edge = points.first().map_or(0.0, |&(x, _)| x);
    let max_edge = points.last().map_or(0.0, |&(x, _)| x);

    Chart {
        x_label: "Absolute Measured Inter-Packet Time Error [ns]".to_string(),
        y_label: "Probability [%]".to_string(),
        x_bounds: (min_edge, max_edge + T_CLK_NIC_NS),
        y_bounds: Some((0.0, Y_MAX_PERCENT)),
        x_tick_step: Some(T_CLK_NIC_NS),
        series: vec![Series {
            label: None,
            style: SeriesStyle::Bars {
                width: T_CLK_NIC_NS,
                align: BarAlign::Edge,
            },
            points,
        }],
    }
}
