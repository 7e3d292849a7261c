//! Maximum-throughput analysis
//!
//! The throughput benchmark sweeps packet sizes and records, for each
//! size, the highest duplex rate the tester sustains and the memory
//! bandwidth consumed while doing so. This module turns that capture into
//! two charts over packet size: achieved network throughput and aggregate
//! memory bandwidth.

use std::path::Path;

use super::{AnalysisError, Result};
use crate::chart::{Chart, Series, SeriesStyle};
use crate::dataset::THROUGHPUT_FILE;
use crate::samples;

/// Bits per gigabit, for scaling the y axes.
const BPS_PER_GBPS: f64 = 1e9;

/// Result of the throughput analysis: one chart per recorded quantity.
#[derive(Debug, Clone)]
pub struct ThroughputReport {
    pub network: Chart,
    pub memory: Chart,
}

impl ThroughputReport {
    /// Charts in display order.
    pub fn charts(&self) -> Vec<Chart> {
        vec![self.network.clone(), self.memory.clone()]
    }
}

/// Run the throughput analysis over a dataset directory.
pub fn run(data_dir: &Path) -> Result<ThroughputReport> {
    let path = data_dir.join(THROUGHPUT_FILE);
    let mut records = samples::load_throughput_records(&path)?;
    if records.is_empty() {
        return Err(AnalysisError::EmptyCapture { path });
    }

    // The benchmark may visit packet sizes in any order; charts read left
    // to right over ascending size.
    records.sort_unstable_by_key(|record| record.packet_len);

    let min_len = f64::from(records[0].packet_len);
    let max_len = f64::from(records[records.len() - 1].packet_len);

    let network_points: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (f64::from(r.packet_len), r.network_bps / BPS_PER_GBPS))
        .collect();
    let memory_points: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (f64::from(r.packet_len), r.memory_bps / BPS_PER_GBPS))
        .collect();

    let network = Chart {
        x_label: "Packet Size [byte]".to_string(),
        y_label: "Network Throughput (duplex) [Gbps]".to_string(),
        x_bounds: (min_len, max_len),
        y_bounds: None,
        x_tick_step: None,
        series: vec![Series {
            label: None,
            style: SeriesStyle::Line,
            points: network_points,
        }],
    };
    let memory = Chart {
        x_label: "Packet Size [byte]".to_string(),
        y_label: "Aggregate Memory Bandwidth [Gbps]".to_string(),
        x_bounds: (min_len, max_len),
        y_bounds: None,
        x_tick_step: None,
        series: vec![Series {
            label: None,
            style: SeriesStyle::Line,
            points: memory_points,
        }],
    };

    Ok(ThroughputReport { network, memory })
}
