#![no_main]

use libfuzzer_sys::fuzz_target;
use trazar::histogram::ErrorHistogram;
use trazar::quantize::{quantize_to_tick, T_CLK_NIC_NS};

fuzz_target!(|data: &[u8]| {
    // Interpret the input as a series of f64 timing errors. Values are
    // quantized first, as in the real pipeline, and capped so a pathological
    // input cannot request an absurdly wide bin range.
    let errors: Vec<f64> = data
        .chunks_exact(8)
        .map(|chunk| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            f64::from_le_bytes(bytes)
        })
        .filter(|v| v.is_finite() && v.abs() < 1e6)
        .map(|v| quantize_to_tick(v, T_CLK_NIC_NS))
        .collect();

    // Binning must never panic, and when it succeeds every sample must land
    // in a bin.
    if let Ok(hist) = ErrorHistogram::from_errors(&errors, T_CLK_NIC_NS) {
        assert_eq!(hist.total(), errors.len() as u64);
    }
});
