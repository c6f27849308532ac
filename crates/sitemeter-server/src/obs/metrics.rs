//! Metrics registry for the server.
//!
//! Labels are flattened into sorted key vectors to keep deterministic series
//! identity. Every metric is created once, when `ServerMetrics` is built at
//! startup; request handlers only record into existing series.

use dashmap::DashMap;
use std::fmt::{self, Write};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

type LabelKey = Vec<(String, String)>;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>().join(",")
}

/// `name` or `name{labels}`.
fn series(name: &str, key: &LabelKey) -> String {
    if key.is_empty() {
        name.to_string()
    } else {
        format!("{}{{{}}}", name, label_str(key))
    }
}

fn header(out: &mut String, name: &str, help: &str, kind: &str) -> fmt::Result {
    writeln!(out, "# HELP {} {}", name, help)?;
    writeln!(out, "# TYPE {} {}", name, kind)
}

pub struct CounterVec {
    name: &'static str,
    help: &'static str,
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn new(name: &'static str, help: &'static str) -> Self {
        Self { name, help, map: DashMap::new() }
    }

    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self.map.entry(label_key(labels)).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value of one series (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map.get(&label_key(labels)).map(|c| c.load(Ordering::Relaxed)).unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self, out: &mut String) -> fmt::Result {
        header(out, self.name, self.help, "counter")?;
        for r in self.map.iter() {
            writeln!(out, "{} {}", series(self.name, r.key()), r.value().load(Ordering::Relaxed))?;
        }
        Ok(())
    }
}

pub struct GaugeVec {
    name: &'static str,
    help: &'static str,
    map: DashMap<LabelKey, AtomicI64>,
}

impl GaugeVec {
    pub fn new(name: &'static str, help: &'static str) -> Self {
        Self { name, help, map: DashMap::new() }
    }

    /// Overwrite the value.
    pub fn set(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self.map.entry(label_key(labels)).or_insert_with(|| AtomicI64::new(0));
        gauge.store(v, Ordering::Relaxed);
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self, out: &mut String) -> fmt::Result {
        header(out, self.name, self.help, "gauge")?;
        for r in self.map.iter() {
            writeln!(out, "{} {}", series(self.name, r.key()), r.value().load(Ordering::Relaxed))?;
        }
        Ok(())
    }
}

struct AtomicHistogram {
    count: AtomicU64,
    sum_micros: AtomicU64,
    buckets: Vec<AtomicU64>,
}

impl AtomicHistogram {
    fn new(n: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_micros: AtomicU64::new(0),
            buckets: (0..n).map(|_| AtomicU64::new(0)).collect(),
        }
    }
}

/// Histogram over durations. Bucket bounds are in seconds; the sum is kept in
/// integer microseconds and rendered as seconds.
pub struct HistogramVec {
    name: &'static str,
    help: &'static str,
    bounds_micros: Vec<u64>,
    bounds_label: Vec<String>,
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// `buckets` must be positive and strictly increasing (checked by config validation).
    pub fn new(name: &'static str, help: &'static str, buckets: &[f64]) -> Self {
        Self {
            name,
            help,
            bounds_micros: buckets.iter().map(|b| (b * 1_000_000.0).round() as u64).collect(),
            bounds_label: buckets.iter().map(|b| b.to_string()).collect(),
            map: DashMap::new(),
        }
    }

    /// Observe a duration and increment cumulative buckets.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let n = self.bounds_micros.len();
        let hist = self.map.entry(label_key(labels)).or_insert_with(|| AtomicHistogram::new(n));
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum_micros.fetch_add(micros, Ordering::Relaxed);

        for (i, &b) in self.bounds_micros.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Observation count of one series.
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map.get(&label_key(labels)).map(|h| h.count.load(Ordering::Relaxed)).unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self, out: &mut String) -> fmt::Result {
        header(out, self.name, self.help, "histogram")?;
        for r in self.map.iter() {
            let key = r.key();
            let hist = r.value();

            let labels = label_str(key);
            let prefix = if labels.is_empty() { String::new() } else { format!("{},", labels) };

            for (i, le) in self.bounds_label.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", self.name, prefix, le, count)?;
            }
            let count = hist.count.load(Ordering::Relaxed);
            writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", self.name, prefix, count)?;

            let sum = hist.sum_micros.load(Ordering::Relaxed) as f64 / 1_000_000.0;
            writeln!(out, "{} {}", series(&format!("{}_sum", self.name), key), sum)?;
            writeln!(out, "{} {}", series(&format!("{}_count", self.name), key), count)?;
        }
        Ok(())
    }
}

/// All metrics the server exports besides process metrics.
pub struct ServerMetrics {
    pub request_duration: HistogramVec,
    pub request_operations: CounterVec,
    pub memory_usage: GaugeVec,
}

impl ServerMetrics {
    pub fn new(duration_buckets: &[f64]) -> Self {
        Self {
            request_duration: HistogramVec::new(
                "http_request_duration_seconds",
                "Duration of HTTP requests in seconds",
                duration_buckets,
            ),
            request_operations: CounterVec::new(
                "request_operations_total",
                "The total number of processed requests",
            ),
            memory_usage: GaugeVec::new(
                "process_memory_usage_bytes",
                "Memory usage of the process in bytes",
            ),
        }
    }

    /// Render all metrics, appending `extra` verbatim (already formatted lines).
    pub fn render(&self, extra: &str) -> Result<String, fmt::Error> {
        let mut out = String::new();
        self.request_operations.render(&mut out)?;
        self.memory_usage.render(&mut out)?;
        self.request_duration.render(&mut out)?;
        out.push_str(extra);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_buckets_are_cumulative() {
        let h = HistogramVec::new("d", "help", &[0.1, 0.5, 1.0]);
        let labels = [("route", "/metrics"), ("method", "GET")];
        h.observe(&labels, Duration::from_millis(50));
        h.observe(&labels, Duration::from_millis(300));
        h.observe(&labels, Duration::from_secs(2));

        let mut out = String::new();
        h.render(&mut out).unwrap();
        assert!(out.contains("# TYPE d histogram"));
        assert!(out.contains(r#"d_bucket{method="GET",route="/metrics",le="0.1"} 1"#));
        assert!(out.contains(r#"d_bucket{method="GET",route="/metrics",le="0.5"} 2"#));
        assert!(out.contains(r#"d_bucket{method="GET",route="/metrics",le="1"} 2"#));
        assert!(out.contains(r#"d_bucket{method="GET",route="/metrics",le="+Inf"} 3"#));
        assert!(out.contains(r#"d_sum{method="GET",route="/metrics"} 2.35"#));
        assert!(out.contains(r#"d_count{method="GET",route="/metrics"} 3"#));
        assert_eq!(h.count(&[("method", "GET"), ("route", "/metrics")]), 3);
    }

    #[test]
    fn unlabeled_series_have_no_braces() {
        let c = CounterVec::new("c_total", "help");
        c.add(&[], 2);
        let g = GaugeVec::new("g", "help");
        g.set(&[], 42);
        g.set(&[], 40);

        let mut out = String::new();
        c.render(&mut out).unwrap();
        g.render(&mut out).unwrap();
        assert!(out.contains("# HELP c_total help\n# TYPE c_total counter\nc_total 2\n"));
        assert!(out.contains("\ng 40\n"));
    }

    #[test]
    fn label_values_are_escaped() {
        let c = CounterVec::new("c_total", "help");
        c.inc(&[("route", "a\"b\\c\nd")]);
        let mut out = String::new();
        c.render(&mut out).unwrap();
        assert!(out.contains(r#"c_total{route="a\"b\\c\nd"} 1"#));
    }
}
