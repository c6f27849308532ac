//! In-process metrics.
//!
//! Counters, gauges and histograms are atomics keyed by label sets and rendered
//! by the `/metrics` handler in Prometheus text format. Process metrics are
//! sampled at scrape time.

pub mod metrics;
pub mod process;

pub use metrics::{CounterVec, GaugeVec, HistogramVec, ServerMetrics};
