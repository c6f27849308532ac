//! Shared application state for the metrics server.
//!
//! Metrics are created here, once, from config; handlers and middleware only
//! record into them.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::obs::process::ProcessSampler;
use crate::obs::ServerMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    metrics: ServerMetrics,
    sampler: ProcessSampler,
    export_process: bool,
}

impl AppState {
    pub fn new(cfg: AppConfig) -> Self {
        let metrics = ServerMetrics::new(&cfg.metrics.duration_buckets);
        Self {
            inner: Arc::new(AppStateInner {
                metrics,
                sampler: ProcessSampler::new(),
                export_process: cfg.metrics.process,
            }),
        }
    }

    pub fn metrics(&self) -> &ServerMetrics {
        &self.inner.metrics
    }

    /// Sample the process, refresh the memory gauge, and return the process
    /// lines to append to the exposition (empty when `metrics.process` is off).
    ///
    /// The memory gauge is refreshed either way.
    pub fn collect_process(&self) -> Result<String, std::fmt::Error> {
        let snap = self.inner.sampler.sample();
        if let Some(rss) = snap.resident_bytes {
            self.inner.metrics.memory_usage.set(&[], i64::try_from(rss).unwrap_or(i64::MAX));
        }
        let mut out = String::new();
        if self.inner.export_process {
            snap.render(&mut out)?;
        }
        Ok(out)
    }
}
