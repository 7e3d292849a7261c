//! Trazar - measurement analysis and chart generation for a 10G network tester
//!
//! This library turns the text-file captures written by the tester's
//! measurement tools into chart-ready data: a clock-quantized timing-error
//! probability distribution, throughput and memory-bandwidth curves over
//! packet size, and latency-accuracy histograms per data rate. Rendering
//! is a sink concern; every output format consumes the same chart data.

pub mod analysis;
pub mod chart;
pub mod cli;
pub mod csv_output;
pub mod dataset;
pub mod distribution;
pub mod histogram;
pub mod json_output;
pub mod plot_output;
pub mod quantize;
pub mod samples;
pub mod text_output;
