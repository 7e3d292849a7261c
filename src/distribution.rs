//! Count-to-percentage normalization of histograms

use crate::histogram::{ErrorHistogram, HistogramError};

/// One `(edge, probability)` point of a normalized distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityPoint {
    /// Bin position in nanoseconds.
    pub edge_ns: f64,
    /// Share of all samples in this bin, in percent.
    pub percent: f64,
}

/// Histogram counts expressed as percentages of the total sample count.
///
/// Ordering and bin positions are taken verbatim from the source histogram;
/// only the counts change representation. Percentages of exact count data
/// sum to 100 up to floating-point rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityDistribution {
    points: Vec<ProbabilityPoint>,
}

impl ProbabilityDistribution {
    /// Normalize a timing-error histogram.
    ///
    /// Histograms always hold at least one sample, so the total is never
    /// zero here.
    pub fn from_histogram(histogram: &ErrorHistogram) -> Self {
        let total = histogram.total() as f64;
        let points = histogram
            .bins()
            .iter()
            .map(|bin| ProbabilityPoint {
                edge_ns: bin.edge_ns,
                percent: 100.0 * bin.count as f64 / total,
            })
            .collect();
        ProbabilityDistribution { points }
    }

    /// Normalize externally pre-binned `(position, occurrences)` pairs, such
    /// as the latency histograms written by the capture tool.
    ///
    /// A zero occurrence total leaves every percentage undefined and is
    /// rejected.
    pub fn from_counts(pairs: &[(f64, u64)]) -> Result<Self, HistogramError> {
        let total: u64 = pairs.iter().map(|&(_, count)| count).sum();
        if total == 0 {
            return Err(HistogramError::Empty);
        }
        let total = total as f64;
        let points = pairs
            .iter()
            .map(|&(edge_ns, count)| ProbabilityPoint {
                edge_ns,
                percent: 100.0 * count as f64 / total,
            })
            .collect();
        Ok(ProbabilityDistribution { points })
    }

    /// Points in the source histogram's order.
    pub fn points(&self) -> &[ProbabilityPoint] {
        &self.points
    }

    /// Sum of all percentages; 100 up to floating-point rounding.
    pub fn total_percent(&self) -> f64 {
        self.points.iter().map(|p| p.percent).sum()
    }
}
