//! Measurement analyses producing chart-ready data
//!
//! One module per capture the tester's measurement tools produce: timing
//! precision, maximum throughput, required memory bandwidth and latency
//! accuracy. Each analysis loads its capture files, computes derived
//! series and hands back [`crate::chart::Chart`] data for the sinks.

pub mod latency;
pub mod membw;
pub mod precision;
pub mod throughput;

pub use latency::LatencyReport;
pub use membw::BandwidthReport;
pub use precision::PrecisionReport;
pub use throughput::ThroughputReport;

use std::path::PathBuf;
use thiserror::Error;

use crate::histogram::HistogramError;
use crate::samples::SampleError;

/// Errors for the analysis pipelines
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Samples(#[from] SampleError),

    #[error(transparent)]
    Histogram(#[from] HistogramError),

    /// A capture file exists but holds no records, so derived ranges are
    /// undefined.
    #[error("{path}: capture contains no records")]
    EmptyCapture { path: PathBuf },
}

impl AnalysisError {
    /// True for the one recoverable condition: the capture files are simply
    /// not there. The CLI boundary turns this into a diagnostic pointing at
    /// the measurement tools and exits cleanly.
    pub fn is_missing_data(&self) -> bool {
        matches!(self, AnalysisError::Samples(SampleError::NotFound { .. }))
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
