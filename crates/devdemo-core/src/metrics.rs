//! In-process metrics registry for the HTTP service.
//!
//! Two families are tracked: `http_requests_total` (counter keyed by
//! method/endpoint/status) and `http_request_duration_seconds` (histogram keyed
//! by endpoint). Series are created lazily on first observation and are never
//! removed, so cardinality only grows. Family headers are rendered even when a
//! family has no series yet, so both names are visible from process start.
//!
//! Counters are plain atomics. A histogram series sits behind its own mutex so a
//! render never observes a half-applied observation.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Latency bucket upper bounds in seconds (the usual client-library defaults).
pub const DEFAULT_BUCKETS: [f64; 14] = [
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_str<const N: usize>(names: &[&str; N], values: &[String; N]) -> String {
    names
        .iter()
        .zip(values.iter())
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn owned_key<const N: usize>(labels: [&str; N]) -> [String; N] {
    labels.map(str::to_owned)
}

fn write_header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, help);
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

/// Counter family with a fixed, ordered set of label names.
pub struct CounterVec<const N: usize> {
    name: &'static str,
    help: &'static str,
    label_names: [&'static str; N],
    map: DashMap<[String; N], AtomicU64>,
}

impl<const N: usize> CounterVec<N> {
    pub fn new(name: &'static str, help: &'static str, label_names: [&'static str; N]) -> Self {
        Self {
            name,
            help,
            label_names,
            map: DashMap::new(),
        }
    }

    /// Increment by 1.
    pub fn inc(&self, labels: [&str; N]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: [&str; N], v: u64) {
        let key = owned_key(labels);
        // Existing series only need the shard read lock.
        if let Some(counter) = self.map.get(&key) {
            counter.fetch_add(v, Ordering::Relaxed);
            return;
        }
        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value of one series, `None` if it was never observed.
    pub fn get(&self, labels: [&str; N]) -> Option<u64> {
        self.map
            .get(&owned_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Render in Prometheus text exposition format, series sorted by labels.
    fn render(&self, out: &mut String) {
        write_header(out, self.name, self.help, "counter");

        let mut rows: Vec<([String; N], u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, val) in rows {
            let _ = writeln!(out, "{}{{{}}} {}", self.name, label_str(&self.label_names, &key), val);
        }
    }
}

/// Point-in-time copy of one histogram series.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// `(upper_bound, cumulative_count)` for every finite bucket.
    pub buckets: Vec<(f64, u64)>,
    pub sum: f64,
    pub count: u64,
}

#[derive(Default)]
struct HistogramState {
    buckets: [u64; DEFAULT_BUCKETS.len()],
    sum: f64,
    count: u64,
}

impl HistogramState {
    fn observe(&mut self, v: f64) {
        self.count += 1;
        self.sum += v;

        // Cumulative buckets: every bound >= v counts the sample.
        for (i, &b) in DEFAULT_BUCKETS.iter().enumerate() {
            if v <= b {
                self.buckets[i] += 1;
            }
        }
    }

    fn snapshot(&self) -> HistogramSnapshot {
        HistogramSnapshot {
            buckets: DEFAULT_BUCKETS.iter().copied().zip(self.buckets).collect(),
            sum: self.sum,
            count: self.count,
        }
    }
}

/// Histogram family over [`DEFAULT_BUCKETS`] with a fixed set of label names.
pub struct HistogramVec<const N: usize> {
    name: &'static str,
    help: &'static str,
    label_names: [&'static str; N],
    map: DashMap<[String; N], Mutex<HistogramState>>,
}

impl<const N: usize> HistogramVec<N> {
    pub fn new(name: &'static str, help: &'static str, label_names: [&'static str; N]) -> Self {
        Self {
            name,
            help,
            label_names,
            map: DashMap::new(),
        }
    }

    /// Record one sample. The value is taken as-is; callers clamp if they need to.
    pub fn observe(&self, labels: [&str; N], v: f64) {
        let key = owned_key(labels);
        if let Some(hist) = self.map.get(&key) {
            hist.lock().observe(v);
            return;
        }
        let hist = self.map.entry(key).or_default();
        hist.lock().observe(v);
    }

    pub fn snapshot(&self, labels: [&str; N]) -> Option<HistogramSnapshot> {
        self.map.get(&owned_key(labels)).map(|h| h.lock().snapshot())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Render in Prometheus text exposition format (unit: seconds).
    fn render(&self, out: &mut String) {
        write_header(out, self.name, self.help, "histogram");

        let mut rows: Vec<([String; N], HistogramSnapshot)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().lock().snapshot()))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, hist) in rows {
            let label_str = label_str(&self.label_names, &key);
            let prefix = if label_str.is_empty() { String::new() } else { format!("{},", label_str) };

            for (le, count) in &hist.buckets {
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", self.name, prefix, le, count);
            }
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", self.name, prefix, hist.count);
            let _ = writeln!(out, "{}_sum{{{}}} {}", self.name, label_str, hist.sum);
            let _ = writeln!(out, "{}_count{{{}}} {}", self.name, label_str, hist.count);
        }
    }
}

/// Process-local registry for HTTP request metrics.
///
/// Built once at startup and shared behind an `Arc` by the timing middleware and
/// the `/metrics` handler. Dropped with the last handle at shutdown.
pub struct MetricsRegistry {
    requests_total: CounterVec<3>,
    request_duration: HistogramVec<1>,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            requests_total: CounterVec::new(
                HTTP_REQUESTS_TOTAL,
                "Total HTTP requests",
                ["method", "endpoint", "status"],
            ),
            request_duration: HistogramVec::new(
                HTTP_REQUEST_DURATION_SECONDS,
                "HTTP request latency in seconds",
                ["endpoint"],
            ),
        }
    }

    /// Find-or-create the `(method, endpoint, status)` counter and add 1.
    pub fn increment_counter(&self, method: &str, endpoint: &str, status: &str) {
        self.requests_total.inc([method, endpoint, status]);
    }

    /// Find-or-create the `endpoint` histogram and record one sample.
    pub fn observe_histogram(&self, endpoint: &str, duration_seconds: f64) {
        self.request_duration.observe([endpoint], duration_seconds);
    }

    pub fn counter_value(&self, method: &str, endpoint: &str, status: &str) -> Option<u64> {
        self.requests_total.get([method, endpoint, status])
    }

    pub fn histogram_snapshot(&self, endpoint: &str) -> Option<HistogramSnapshot> {
        self.request_duration.snapshot([endpoint])
    }

    /// Number of live series across both families.
    pub fn series_count(&self) -> usize {
        self.requests_total.len() + self.request_duration.len()
    }

    /// Render every family in Prometheus text exposition format (version 0.0.4).
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.requests_total.render(&mut out);
        self.request_duration.render(&mut out);
        out
    }
}
