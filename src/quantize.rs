//! Clock-tick quantization of raw timestamp values
//!
//! The FPGA timestamping logic samples a free-running counter, so every
//! time it reports is a whole number of clock periods. Quantizing the raw
//! nanosecond values to the nearest tick models that hardware resolution
//! before the error distribution is computed.

/// Clock period of the NIC timestamping logic in nanoseconds (312.5 MHz).
pub const T_CLK_NIC_NS: f64 = 3.2;

/// Clock period of the latency measurement logic in nanoseconds (156.25 MHz).
pub const T_CLK_LATENCY_NS: f64 = 6.4;

/// Round a value to one decimal place (0.1 ns grid).
///
/// Every multiple of the 3.2 ns and 6.4 ns clock periods is exact on a
/// 0.1 ns grid, so snapping keeps tick multiples free of binary
/// floating-point residue (3 * 3.2 becomes 9.6, not 9.600000000000001).
pub fn snap_tenth_ns(value_ns: f64) -> f64 {
    (value_ns * 10.0).round() / 10.0
}

/// Quantize a raw time to the nearest whole multiple of the clock period.
///
/// Rounds half away from zero (`f64::round` semantics). Each value is
/// quantized independently from its own raw input; quantized results never
/// feed back into later quantizations, so no drift accumulates over a
/// series.
pub fn quantize_to_tick(raw_ns: f64, tick_ns: f64) -> f64 {
    snap_tenth_ns((raw_ns / tick_ns).round() * tick_ns)
}

/// Quantize a measured series, preserving order.
pub fn quantize_series(raw_ns: &[f64], tick_ns: f64) -> Vec<f64> {
    raw_ns
        .iter()
        .map(|&value| quantize_to_tick(value, tick_ns))
        .collect()
}
