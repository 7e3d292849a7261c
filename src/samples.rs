//! Line-oriented loaders for measurement capture files
//!
//! The measurement tools write plain text files, one record per line, with
//! fields separated by ASCII whitespace. Every loader materializes the whole
//! file into a `Vec` before returning: the analyses scan their inputs more
//! than once (min/max, binning, normalization), so nothing here hands out a
//! lazily evaluated sequence.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Nanoseconds per second, for converting the expected-times file.
const NS_PER_SEC: f64 = 1e9;

/// Errors for capture file loading
#[derive(Error, Debug)]
pub enum SampleError {
    /// Capture file absent. The only recoverable condition in the whole
    /// pipeline; the CLI boundary turns it into a "no measurement data"
    /// diagnostic and a clean exit.
    #[error("measurement data not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line failed numeric parsing. Fatal for the run: a value that does
    /// not parse means the capture is corrupt, not that one sample can be
    /// skipped.
    #[error("{path}:{line}: malformed value '{value}'")]
    Malformed {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("{path}:{line}: expected {expected} fields, found {found}")]
    FieldCount {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, SampleError>;

/// One record of the maximum-throughput capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThroughputRecord {
    /// Packet size in bytes.
    pub packet_len: u32,
    /// Achieved duplex network throughput in bit/s.
    pub network_bps: f64,
    /// Aggregate memory bandwidth consumed at that rate, in bit/s.
    pub memory_bps: f64,
}

/// One record of the required-memory-bandwidth capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandwidthRecord {
    /// Packet size in bytes.
    pub packet_len: u32,
    /// Memory bandwidth required for full line rate, in bit/s.
    pub memory_bps: f64,
}

/// One pre-binned line of a latency capture histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyBin {
    /// Measured latency in nanoseconds.
    pub latency_ns: f64,
    /// How many packets saw this latency.
    pub occurrences: u64,
}

fn read_to_string(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(SampleError::NotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|source| SampleError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_field<T: FromStr>(raw: &str, path: &Path, line: usize) -> Result<T> {
    raw.parse().map_err(|_| SampleError::Malformed {
        path: path.to_path_buf(),
        line,
        value: raw.to_string(),
    })
}

/// Parse a float field, rejecting the "nan"/"inf" spellings `f64::from_str`
/// accepts. A non-finite value in a capture is corruption.
fn parse_finite(raw: &str, path: &Path, line: usize) -> Result<f64> {
    let value: f64 = parse_field(raw, path, line)?;
    if !value.is_finite() {
        return Err(SampleError::Malformed {
            path: path.to_path_buf(),
            line,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

fn split_fields<'a>(
    text: &'a str,
    path: &Path,
    expected: usize,
) -> impl Iterator<Item = Result<(usize, Vec<&'a str>)>> + 'a {
    let path = path.to_path_buf();
    text.lines().enumerate().map(move |(idx, line)| {
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split_ascii_whitespace().collect();
        if fields.len() != expected {
            return Err(SampleError::FieldCount {
                path: path.clone(),
                line: line_no,
                expected,
                found: fields.len(),
            });
        }
        Ok((line_no, fields))
    })
}

/// Load expected inter-packet times: one decimal number per line, seconds on
/// disk, nanoseconds out.
pub fn load_expected_ns(path: &Path) -> Result<Vec<f64>> {
    let text = read_to_string(path)?;
    let mut values = Vec::new();
    for record in split_fields(&text, path, 1) {
        let (line_no, fields) = record?;
        let seconds = parse_finite(fields[0], path, line_no)?;
        values.push(seconds * NS_PER_SEC);
    }
    debug!(
        count = values.len(),
        path = %path.display(),
        "loaded expected inter-packet times"
    );
    Ok(values)
}

/// Load measured inter-packet times: one integer nanosecond count per line.
///
/// The capture tool writes whole nanoseconds; a fractional value here is
/// corruption and rejected as malformed.
pub fn load_measured_ns(path: &Path) -> Result<Vec<f64>> {
    let text = read_to_string(path)?;
    let mut values = Vec::new();
    for record in split_fields(&text, path, 1) {
        let (line_no, fields) = record?;
        let nanos: i64 = parse_field(fields[0], path, line_no)?;
        values.push(nanos as f64);
    }
    debug!(
        count = values.len(),
        path = %path.display(),
        "loaded measured inter-packet times"
    );
    Ok(values)
}

/// Load the maximum-throughput capture: `<packet_len> <net_bps> <mem_bps>`.
pub fn load_throughput_records(path: &Path) -> Result<Vec<ThroughputRecord>> {
    let text = read_to_string(path)?;
    let mut records = Vec::new();
    for record in split_fields(&text, path, 3) {
        let (line_no, fields) = record?;
        records.push(ThroughputRecord {
            packet_len: parse_field(fields[0], path, line_no)?,
            network_bps: parse_finite(fields[1], path, line_no)?,
            memory_bps: parse_finite(fields[2], path, line_no)?,
        });
    }
    debug!(
        count = records.len(),
        path = %path.display(),
        "loaded throughput records"
    );
    Ok(records)
}

/// Load the required-memory-bandwidth capture: `<packet_len> <mem_bps>`.
pub fn load_bandwidth_records(path: &Path) -> Result<Vec<BandwidthRecord>> {
    let text = read_to_string(path)?;
    let mut records = Vec::new();
    for record in split_fields(&text, path, 2) {
        let (line_no, fields) = record?;
        records.push(BandwidthRecord {
            packet_len: parse_field(fields[0], path, line_no)?,
            memory_bps: parse_finite(fields[1], path, line_no)?,
        });
    }
    debug!(
        count = records.len(),
        path = %path.display(),
        "loaded bandwidth records"
    );
    Ok(records)
}

/// Load a pre-binned latency histogram: `<latency_ns> <occurrences>`.
pub fn load_latency_bins(path: &Path) -> Result<Vec<LatencyBin>> {
    let text = read_to_string(path)?;
    let mut bins = Vec::new();
    for record in split_fields(&text, path, 2) {
        let (line_no, fields) = record?;
        bins.push(LatencyBin {
            latency_ns: parse_finite(fields[0], path, line_no)?,
            occurrences: parse_field(fields[1], path, line_no)?,
        });
    }
    debug!(
        count = bins.len(),
        path = %path.display(),
        "loaded latency histogram"
    );
    Ok(bins)
}
