//! Clock-aligned timing-error histogram construction
//!
//! Bins the signed differences between measured and expected inter-packet
//! times into fixed-width intervals of one clock period. Bin edges are
//! anchored at absolute multiples of the period, so every edge corresponds
//! to a whole number of hardware clock ticks regardless of where the data
//! happens to fall.
//!
//! Binning works in the integer tick domain: each error maps to the tick
//! index `floor(error / tick)`, with a small relative tolerance that snaps
//! ratios sitting a few ulps away from a whole tick back onto it. This
//! keeps the covered range stable when an extreme error lands exactly on a
//! boundary that binary floating point represents as `k ± ulp`.

use thiserror::Error;
use tracing::debug;

use crate::quantize::snap_tenth_ns;

/// Relative tolerance for deciding that an error/tick ratio sits exactly on
/// a whole tick.
const TICK_RATIO_EPS: f64 = 1e-9;

/// Errors for histogram construction
#[derive(Error, Debug)]
pub enum HistogramError {
    /// Expected and measured sequences differ in length. Checked before any
    /// differences are taken; pairing the series element-wise is only
    /// meaningful when they describe the same packets.
    #[error("sequence length mismatch: {expected} expected values, {measured} measured values")]
    LengthMismatch { expected: usize, measured: usize },

    /// The post-binning count total disagrees with the sample count. This
    /// means a value fell outside every bin, which is a boundary-assignment
    /// bug and never tolerated.
    #[error("binned {binned} of {total} samples; a value fell outside every bin")]
    CountMismatch { binned: u64, total: u64 },

    /// No samples to bin. The covered range is undefined without at least
    /// one value.
    #[error("no samples to bin")]
    Empty,

    /// An error value is NaN or infinite. Such a value has no tick index;
    /// letting it through would silently land it in an arbitrary bin.
    #[error("non-finite error value {value} cannot be binned")]
    NonFinite { value: f64 },
}

pub type Result<T> = std::result::Result<T, HistogramError>;

/// One `[edge, edge + tick)` bin and its occurrence count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinCount {
    /// Lower edge in nanoseconds, always a whole multiple of the tick.
    pub edge_ns: f64,
    /// Samples whose error fell within `[edge, edge + tick)`.
    pub count: u64,
}

/// Timing-error histogram with bin edges on absolute clock-tick multiples.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorHistogram {
    tick_ns: f64,
    first_tick: i64,
    counts: Vec<u64>,
}

impl ErrorHistogram {
    /// Bin the element-wise errors of a measured series against its
    /// expected series.
    pub fn from_pairs(expected_ns: &[f64], measured_ns: &[f64], tick_ns: f64) -> Result<Self> {
        let errors = signed_errors(expected_ns, measured_ns)?;
        Self::from_errors(&errors, tick_ns)
    }

    /// Bin a series of signed timing errors into tick-wide intervals.
    ///
    /// The covered range runs from the tick containing the minimum error to
    /// the tick containing the maximum, inclusive, so a maximum that lands
    /// exactly on a bin edge still starts a bin of its own. Interior bins
    /// with no samples are kept at count zero.
    pub fn from_errors(errors: &[f64], tick_ns: f64) -> Result<Self> {
        if errors.is_empty() {
            return Err(HistogramError::Empty);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &error in errors {
            if !error.is_finite() {
                return Err(HistogramError::NonFinite { value: error });
            }
            min = min.min(error);
            max = max.max(error);
        }

        let first_tick = tick_index(min, tick_ns);
        let last_tick = tick_index(max, tick_ns);
        let mut counts = vec![0_u64; (last_tick - first_tick + 1) as usize];

        for &error in errors {
            let offset = tick_index(error, tick_ns) - first_tick;
            // An index outside the range would mean min/max tracking and
            // tick_index disagree; leave the count alone and let the total
            // check below report it.
            if let Some(slot) = counts.get_mut(offset as usize) {
                *slot += 1;
            }
        }

        let total = errors.len() as u64;
        let binned: u64 = counts.iter().sum();
        if binned != total {
            return Err(HistogramError::CountMismatch { binned, total });
        }

        debug!(
            bins = counts.len(),
            first_tick,
            total,
            "binned timing errors"
        );
        Ok(ErrorHistogram {
            tick_ns,
            first_tick,
            counts,
        })
    }

    /// Bin width in nanoseconds.
    pub fn tick_ns(&self) -> f64 {
        self.tick_ns
    }

    /// Total number of binned samples.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of bins, zero-count interior bins included.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// A histogram is never empty; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Bins in ascending edge order.
    pub fn bins(&self) -> Vec<BinCount> {
        self.counts
            .iter()
            .enumerate()
            .map(|(idx, &count)| BinCount {
                edge_ns: snap_tenth_ns(self.tick_ns * (self.first_tick + idx as i64) as f64),
                count,
            })
            .collect()
    }
}

/// Element-wise `measured - expected` differences.
///
/// Rejects length mismatches before any difference is taken.
pub fn signed_errors(expected_ns: &[f64], measured_ns: &[f64]) -> Result<Vec<f64>> {
    if expected_ns.len() != measured_ns.len() {
        return Err(HistogramError::LengthMismatch {
            expected: expected_ns.len(),
            measured: measured_ns.len(),
        });
    }
    Ok(measured_ns
        .iter()
        .zip(expected_ns.iter())
        .map(|(&measured, &expected)| measured - expected)
        .collect())
}

/// Tick index of the bin containing `value`: `floor(value / tick)`, with
/// ratios within [`TICK_RATIO_EPS`] of a whole tick snapped onto it first.
fn tick_index(value_ns: f64, tick_ns: f64) -> i64 {
    let ratio = value_ns / tick_ns;
    let nearest = ratio.round();
    if (ratio - nearest).abs() < TICK_RATIO_EPS {
        nearest as i64
    } else {
        ratio.floor() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::T_CLK_NIC_NS;

    fn edges(hist: &ErrorHistogram) -> Vec<f64> {
        hist.bins().iter().map(|b| b.edge_ns).collect()
    }

    fn counts(hist: &ErrorHistogram) -> Vec<u64> {
        hist.bins().iter().map(|b| b.count).collect()
    }

    #[test]
    fn test_bins_cover_quantized_errors() {
        // Quantized measured values 3.2, 3.2, 9.6 against expected zeros.
        let hist =
            ErrorHistogram::from_pairs(&[0.0, 0.0, 0.0], &[3.2, 3.2, 9.6], T_CLK_NIC_NS).unwrap();
        assert_eq!(edges(&hist), vec![3.2, 6.4, 9.6]);
        assert_eq!(counts(&hist), vec![2, 0, 1]);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_length_mismatch_is_rejected_before_binning() {
        let err = ErrorHistogram::from_pairs(&[0.0, 0.0], &[3.2], T_CLK_NIC_NS).unwrap_err();
        match err {
            HistogramError::LengthMismatch { expected, measured } => {
                assert_eq!(expected, 2);
                assert_eq!(measured, 1);
            }
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = ErrorHistogram::from_errors(&[], T_CLK_NIC_NS).unwrap_err();
        assert!(matches!(err, HistogramError::Empty));
    }

    #[test]
    fn test_identical_errors_collapse_to_one_bin() {
        let hist = ErrorHistogram::from_errors(&[6.4, 6.4, 6.4, 6.4], T_CLK_NIC_NS).unwrap();
        assert_eq!(edges(&hist), vec![6.4]);
        assert_eq!(counts(&hist), vec![4]);
    }

    #[test]
    fn test_all_zero_errors_yield_single_zero_bin() {
        let hist = ErrorHistogram::from_errors(&[0.0, 0.0, 0.0], T_CLK_NIC_NS).unwrap();
        assert_eq!(edges(&hist), vec![0.0]);
        assert_eq!(counts(&hist), vec![3]);
    }

    #[test]
    fn test_negative_errors_bin_below_zero() {
        // -0.1 lies in [-3.2, 0), 0.1 in [0, 3.2).
        let hist = ErrorHistogram::from_errors(&[-0.1, 0.1], T_CLK_NIC_NS).unwrap();
        assert_eq!(edges(&hist), vec![-3.2, 0.0]);
        assert_eq!(counts(&hist), vec![1, 1]);
    }

    #[test]
    fn test_maximum_on_exact_tick_multiple_keeps_its_own_bin() {
        // 9.6 is exactly three ticks; it must open the [9.6, 12.8) bin
        // rather than vanish past the last edge.
        let hist = ErrorHistogram::from_errors(&[0.5, 9.6], T_CLK_NIC_NS).unwrap();
        assert_eq!(edges(&hist), vec![0.0, 3.2, 6.4, 9.6]);
        assert_eq!(counts(&hist), vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_interior_gap_bins_are_kept_at_zero() {
        let hist = ErrorHistogram::from_errors(&[0.1, 16.1], T_CLK_NIC_NS).unwrap();
        assert_eq!(hist.len(), 6);
        assert_eq!(counts(&hist), vec![1, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_edges_are_tick_multiples() {
        let hist = ErrorHistogram::from_errors(&[-7.0, -1.0, 2.0, 11.0], T_CLK_NIC_NS).unwrap();
        for bin in hist.bins() {
            let ratio = bin.edge_ns / T_CLK_NIC_NS;
            assert!(
                (ratio - ratio.round()).abs() < 1e-9,
                "edge {} is not a tick multiple",
                bin.edge_ns
            );
        }
    }

    #[test]
    fn test_count_total_matches_sample_count() {
        let errors: Vec<f64> = (0..1000).map(|i| (i as f64) * 0.37 - 50.0).collect();
        let hist = ErrorHistogram::from_errors(&errors, T_CLK_NIC_NS).unwrap();
        assert_eq!(hist.total(), 1000);
    }

    #[test]
    fn test_signed_errors_are_measured_minus_expected() {
        let errors = signed_errors(&[100.0, 200.0], &[97.0, 203.0]).unwrap();
        assert_eq!(errors, vec![-3.0, 3.0]);
    }

    #[test]
    fn test_non_finite_errors_are_rejected() {
        let err = ErrorHistogram::from_errors(&[0.0, f64::NAN], T_CLK_NIC_NS).unwrap_err();
        assert!(matches!(err, HistogramError::NonFinite { .. }));

        let err = ErrorHistogram::from_errors(&[f64::INFINITY], T_CLK_NIC_NS).unwrap_err();
        assert!(matches!(err, HistogramError::NonFinite { .. }));
    }

    #[test]
    fn test_boundary_value_with_float_residue_snaps_to_its_tick() {
        // 3 * 3.2 carries binary residue; the ratio snap must still place
        // it in the bin whose edge is 9.6.
        let value = 3.0_f64 * 3.2_f64;
        let hist = ErrorHistogram::from_errors(&[0.0, value], T_CLK_NIC_NS).unwrap();
        assert_eq!(edges(&hist), vec![0.0, 3.2, 6.4, 9.6]);
        assert_eq!(counts(&hist), vec![1, 0, 0, 1]);
    }
}
