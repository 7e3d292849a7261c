//! Required-memory-bandwidth analysis
//!
//! The capture records, per packet size, the memory bandwidth the tester
//! needs to sustain full 10G line rate in both directions. Small packets
//! dominate: every packet costs descriptor traffic regardless of payload.

use std::path::Path;

use super::{AnalysisError, Result};
use crate::chart::{Chart, Series, SeriesStyle};
use crate::dataset::BANDWIDTH_FILE;
use crate::samples;

const BPS_PER_GBPS: f64 = 1e9;

/// Result of the memory-bandwidth analysis.
#[derive(Debug, Clone)]
pub struct BandwidthReport {
    pub chart: Chart,
}

/// Run the memory-bandwidth analysis over a dataset directory.
pub fn run(data_dir: &Path) -> Result<BandwidthReport> {
    let path = data_dir.join(BANDWIDTH_FILE);
    let mut records = samples::load_bandwidth_records(&path)?;
    if records.is_empty() {
        return Err(AnalysisError::EmptyCapture { path });
    }

    records.sort_unstable_by_key(|record| record.packet_len);

    let points: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (f64::from(r.packet_len), r.memory_bps / BPS_PER_GBPS))
        .collect();

    let min_len = f64::from(records[0].packet_len);
    let max_len = f64::from(records[records.len() - 1].packet_len);
    let min_bw = points
        .iter()
        .map(|&(_, y)| y)
        .fold(f64::INFINITY, f64::min);
    let max_bw = points
        .iter()
        .map(|&(_, y)| y)
        .fold(f64::NEG_INFINITY, f64::max);

    let chart = Chart {
        x_label: "Packet Size [byte]".to_string(),
        y_label: "Required Memory Bandwidth [Gbps]".to_string(),
        x_bounds: (min_len, max_len),
        y_bounds: Some((min_bw, max_bw)),
        x_tick_step: None,
        series: vec![Series {
            label: None,
            style: SeriesStyle::Line,
            points,
        }],
    };

    Ok(BandwidthReport { chart })
}
