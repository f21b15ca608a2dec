//! In-process metrics registry for the goal server.
//!
//! Counter/summary/histogram vectors with dynamic labels backed by `DashMap`.
//! Labels are flattened into sorted key vectors and series are rendered in
//! sorted order so scrapes are deterministic. Durations are accumulated as
//! integer microseconds and converted to seconds only when rendering.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

type LabelKey = Vec<(String, String)>;

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn micros_as_secs(micros: u64) -> f64 {
    micros as f64 / 1_000_000.0
}

fn write_header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, help);
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

fn write_sample(out: &mut String, name: &str, labels: &str, value: impl std::fmt::Display) {
    if labels.is_empty() {
        let _ = writeln!(out, "{} {}", name, value);
    } else {
        let _ = writeln!(out, "{}{{{}}} {}", name, labels, value);
    }
}

/// Snapshot `map` in label order.
fn sorted<V, T>(map: &DashMap<LabelKey, V>, f: impl Fn(&V) -> T) -> Vec<(LabelKey, T)> {
    let mut rows: Vec<(LabelKey, T)> = map
        .iter()
        .map(|r| (r.key().clone(), f(r.value())))
        .collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    rows
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        let counter = self.map.entry(label_key(labels)).or_default();
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Current value for one label set (0 if never incremented).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "counter");
        for (key, val) in sorted(&self.map, |c| c.load(Ordering::Relaxed)) {
            write_sample(out, name, &label_str(&key), val);
        }
    }
}

/// Unlabeled gauge.
#[derive(Default)]
pub struct Gauge {
    value: AtomicI64,
}

impl Gauge {
    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dec(&self) {
        self.value.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "gauge");
        write_sample(out, name, "", self.get());
    }
}

#[derive(Default)]
struct AtomicSummary {
    count: AtomicU64,
    sum_micros: AtomicU64,
}

/// Summary without quantiles: `_count` and `_sum` per label set.
#[derive(Default)]
pub struct SummaryVec {
    map: DashMap<LabelKey, AtomicSummary>,
}

impl SummaryVec {
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let summary = self.map.entry(label_key(labels)).or_default();
        summary.count.fetch_add(1, Ordering::Relaxed);
        summary.sum_micros.fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|s| s.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "summary");
        let rows = sorted(&self.map, |s| {
            (s.count.load(Ordering::Relaxed), s.sum_micros.load(Ordering::Relaxed))
        });
        for (key, (count, sum)) in rows {
            let labels = label_str(&key);
            write_sample(out, &format!("{name}_count"), &labels, count);
            write_sample(out, &format!("{name}_sum"), &labels, micros_as_secs(sum));
        }
    }
}

/// Latency bucket upper bounds: 0.1s, 0.5s, 1s, 2s, 5s.
pub const BUCKETS_MICROS: [u64; 5] = [100_000, 500_000, 1_000_000, 2_000_000, 5_000_000];
const BUCKET_LABELS: [&str; 5] = ["0.1", "0.5", "1.0", "2.0", "5.0"];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum_micros: AtomicU64,
    buckets: [AtomicU64; 5],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration and increment every cumulative bucket it fits in.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self.map.entry(label_key(labels)).or_default();
        let micros = duration.as_micros() as u64;

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum_micros.fetch_add(micros, Ordering::Relaxed);

        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Cumulative bucket counts followed by the `+Inf` count.
    pub fn buckets(&self, labels: &[(&str, &str)]) -> [u64; 6] {
        let mut out = [0; 6];
        if let Some(hist) = self.map.get(&label_key(labels)) {
            for (slot, bucket) in out.iter_mut().zip(hist.buckets.iter()) {
                *slot = bucket.load(Ordering::Relaxed);
            }
            out[5] = hist.count.load(Ordering::Relaxed);
        }
        out
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "histogram");
        let rows = sorted(&self.map, |h| {
            let buckets: Vec<u64> = h.buckets.iter().map(|b| b.load(Ordering::Relaxed)).collect();
            (buckets, h.count.load(Ordering::Relaxed), h.sum_micros.load(Ordering::Relaxed))
        });
        for (key, (buckets, count, sum)) in rows {
            let labels = label_str(&key);
            let prefix = if labels.is_empty() { String::new() } else { format!("{labels},") };

            for (le, n) in BUCKET_LABELS.iter().zip(buckets) {
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, n);
            }
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);
            write_sample(out, &format!("{name}_count"), &labels, count);
            write_sample(out, &format!("{name}_sum"), &labels, micros_as_secs(sum));
        }
    }
}

/// Wall-clock start of the process, rendered as
/// `process_start_time_seconds`.
pub struct ProcessStart {
    unix_secs: f64,
}

impl Default for ProcessStart {
    fn default() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            unix_secs: since_epoch.as_secs_f64(),
        }
    }
}

impl ProcessStart {
    pub fn unix_secs(&self) -> f64 {
        self.unix_secs
    }

    fn render(&self, out: &mut String) {
        write_header(
            out,
            PROCESS_START_TIME,
            "Start time of the process since unix epoch in seconds.",
            "gauge",
        );
        write_sample(out, PROCESS_START_TIME, "", self.unix_secs);
    }
}

pub const PROCESS_START_TIME: &str = "process_start_time_seconds";
pub const REQUEST_COUNT: &str = "custom_request_count_total";
pub const REQUEST_LATENCY: &str = "custom_request_latency_seconds";
pub const IN_PROGRESS: &str = "custom_in_progress_requests";
pub const REQUEST_LATENCY_HISTOGRAM: &str = "custom_request_latency_histogram_seconds";

/// Process-wide request metrics. Built once at startup and shared through
/// `AppState`; never reset.
#[derive(Default)]
pub struct Metrics {
    pub request_count: CounterVec,
    pub request_latency: SummaryVec,
    pub in_progress: Gauge,
    pub request_latency_histogram: HistogramVec,
    pub process_start: ProcessStart,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished request under (method, endpoint).
    pub fn observe_request(&self, method: &str, endpoint: &str, elapsed: Duration) {
        let labels = [("method", method), ("endpoint", endpoint)];
        self.request_count.inc(&labels);
        self.request_latency.observe(&labels, elapsed);
        self.request_latency_histogram.observe(&labels, elapsed);
    }

    /// Render the whole registry in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.process_start.render(&mut out);
        self.request_count
            .render(REQUEST_COUNT, "Total number of requests received", &mut out);
        self.request_latency
            .render(REQUEST_LATENCY, "Time spent processing request", &mut out);
        self.in_progress
            .render(IN_PROGRESS, "Number of requests in progress", &mut out);
        self.request_latency_histogram
            .render(REQUEST_LATENCY_HISTOGRAM, "Request latency histogram", &mut out);
        out
    }
}
