//! Process metrics sampled at scrape time.
//!
//! On Linux the values come from `/proc/self`. Anything that cannot be read is
//! left out of the output; sampling never fails.

use std::fmt::{self, Write};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// `/proc/<pid>/stat` times are in USER_HZ, fixed at 100 by the kernel ABI.
#[cfg(target_os = "linux")]
const USER_HZ: f64 = 100.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessSnapshot {
    pub cpu_seconds: Option<f64>,
    pub resident_bytes: Option<u64>,
    pub virtual_bytes: Option<u64>,
    pub open_fds: Option<u64>,
    pub start_time_seconds: f64,
    pub uptime_seconds: f64,
}

impl ProcessSnapshot {
    pub fn render(&self, out: &mut String) -> fmt::Result {
        if let Some(v) = self.cpu_seconds {
            metric_line(out, "process_cpu_seconds_total", "Total user and system CPU time spent in seconds", "counter", v)?;
        }
        if let Some(v) = self.resident_bytes {
            metric_line(out, "process_resident_memory_bytes", "Resident memory size in bytes", "gauge", v)?;
        }
        if let Some(v) = self.virtual_bytes {
            metric_line(out, "process_virtual_memory_bytes", "Virtual memory size in bytes", "gauge", v)?;
        }
        if let Some(v) = self.open_fds {
            metric_line(out, "process_open_fds", "Number of open file descriptors", "gauge", v)?;
        }
        metric_line(
            out,
            "process_start_time_seconds",
            "Start time of the process since unix epoch in seconds",
            "gauge",
            self.start_time_seconds,
        )?;
        metric_line(out, "process_uptime_seconds", "Seconds since the process started", "gauge", self.uptime_seconds)
    }
}

fn metric_line(out: &mut String, name: &str, help: &str, kind: &str, v: impl fmt::Display) -> fmt::Result {
    writeln!(out, "# HELP {} {}", name, help)?;
    writeln!(out, "# TYPE {} {}", name, kind)?;
    writeln!(out, "{} {}", name, v)
}

/// Samples process metrics relative to a fixed start point.
#[derive(Debug, Clone)]
pub struct ProcessSampler {
    started_at: SystemTime,
    started: Instant,
}

impl Default for ProcessSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSampler {
    pub fn new() -> Self {
        Self { started_at: SystemTime::now(), started: Instant::now() }
    }

    pub fn sample(&self) -> ProcessSnapshot {
        let start_time_seconds = self
            .started_at
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        let mut snap = ProcessSnapshot {
            start_time_seconds,
            uptime_seconds: self.started.elapsed().as_secs_f64(),
            ..ProcessSnapshot::default()
        };
        sample_os(&mut snap);
        snap
    }
}

#[cfg(target_os = "linux")]
fn sample_os(snap: &mut ProcessSnapshot) {
    if let Ok(stat) = std::fs::read_to_string("/proc/self/stat") {
        snap.cpu_seconds = parse_stat_cpu_ticks(&stat).map(|t| t as f64 / USER_HZ);
    }
    if let Ok(status) = std::fs::read_to_string("/proc/self/status") {
        let (rss, vsz) = parse_status_memory(&status);
        snap.resident_bytes = rss;
        snap.virtual_bytes = vsz;
    }
    if let Ok(rd) = std::fs::read_dir("/proc/self/fd") {
        snap.open_fds = Some(rd.count() as u64);
    }
}

#[cfg(not(target_os = "linux"))]
fn sample_os(_snap: &mut ProcessSnapshot) {}

/// utime + stime (fields 14 and 15) from `/proc/<pid>/stat`.
///
/// The command name (field 2) may contain spaces and parentheses, so fields are
/// counted from the last `)`.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_stat_cpu_ticks(stat: &str) -> Option<u64> {
    let rest = &stat[stat.rfind(')')? + 1..];
    let mut fields = rest.split_whitespace();
    // After ")" the first field is #3 (state); utime is #14.
    let utime: u64 = fields.nth(11)?.parse().ok()?;
    let stime: u64 = fields.next()?.parse().ok()?;
    Some(utime + stime)
}

/// `VmRSS` and `VmSize` from `/proc/<pid>/status`, in bytes.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_status_memory(status: &str) -> (Option<u64>, Option<u64>) {
    let kb = |line: &str| -> Option<u64> {
        line.split_whitespace().nth(1)?.parse::<u64>().ok().map(|v| v * 1024)
    };
    let mut rss = None;
    let mut vsz = None;
    for line in status.lines() {
        if line.starts_with("VmRSS:") {
            rss = kb(line);
        } else if line.starts_with("VmSize:") {
            vsz = kb(line);
        }
    }
    (rss, vsz)
}
