//! Dataset directory resolution and capture file discovery
//!
//! The measurement tools write their captures into `output/`. The
//! experiment also ships reference captures in `output_ref/` so the
//! analyses can be reproduced without the tester hardware attached.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

use crate::samples::{Result, SampleError};

/// Directory the measurement tools write their captures to.
pub const USER_DATA_DIR: &str = "output";
/// Directory holding the reference captures bundled with the experiment.
pub const REFERENCE_DATA_DIR: &str = "output_ref";

/// Expected inter-packet times written by the trace generator, in seconds.
pub const EXPECTED_TIMES_FILE: &str = "timestamp_diffs_expected.dat";
/// Measured inter-packet times written by the capture tool, in nanoseconds.
pub const MEASURED_TIMES_FILE: &str = "timestamp_diffs_measured.dat";
/// Throughput and memory bandwidth per packet size.
pub const THROUGHPUT_FILE: &str = "max_throughput.dat";
/// Required memory bandwidth per packet size.
pub const BANDWIDTH_FILE: &str = "required_membandwidth.dat";

/// Resolve the dataset directory from the CLI selection. An explicit
/// directory wins over the reference switch.
pub fn resolve_data_dir(data_dir: Option<&Path>, use_reference: bool) -> PathBuf {
    match data_dir {
        Some(dir) => dir.to_path_buf(),
        None if use_reference => PathBuf::from(REFERENCE_DATA_DIR),
        None => PathBuf::from(USER_DATA_DIR),
    }
}

/// A latency capture histogram together with its mean data rate.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyFile {
    /// Mean data rate of the capture in bit/s, parsed from the file name.
    pub rate_bps: f64,
    pub path: PathBuf,
}

/// Find `histogram_<rate>.dat` captures in `dir`, ascending by mean rate.
///
/// File names that do not follow the naming convention are skipped,
/// including names whose `<rate>` part is not a number. A missing directory
/// reports the same not-found condition as a missing capture file.
pub fn discover_latency_files(dir: &Path) -> Result<Vec<LatencyFile>> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r"^histogram_(.+)\.dat$").expect("constant pattern"));

    if !dir.is_dir() {
        return Err(SampleError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| SampleError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SampleError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(captures) = pattern.captures(name) else {
            continue;
        };
        match captures[1].parse::<f64>() {
            Ok(rate_bps) if rate_bps.is_finite() => files.push(LatencyFile {
                rate_bps,
                path: entry.path(),
            }),
            _ => {
                debug!(name, "skipping latency capture with non-numeric rate");
            }
        }
    }

    // Rates are finite, so total ordering holds.
    files.sort_by(|a, b| a.rate_bps.total_cmp(&b.rate_bps));
    debug!(count = files.len(), dir = %dir.display(), "discovered latency captures");
    Ok(files)
}
