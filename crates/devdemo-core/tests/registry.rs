//! Registry accumulation and exposition tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use devdemo_core::metrics::{
    MetricsRegistry, DEFAULT_BUCKETS, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS,
};

#[test]
fn empty_registry_still_renders_families() {
    let reg = MetricsRegistry::new();
    let body = reg.render();

    assert!(body.contains("# TYPE http_requests_total counter"));
    assert!(body.contains("# TYPE http_request_duration_seconds histogram"));
    assert_eq!(reg.series_count(), 0);
}

#[test]
fn identical_increments_accumulate() {
    let reg = MetricsRegistry::new();
    for _ in 0..7 {
        reg.increment_counter("GET", "/healthz", "200");
    }

    assert_eq!(reg.counter_value("GET", "/healthz", "200"), Some(7));
    assert!(reg
        .render()
        .contains(r#"http_requests_total{method="GET",endpoint="/healthz",status="200"} 7"#));
}

#[test]
fn label_tuples_are_distinct_series() {
    let reg = MetricsRegistry::new();
    reg.increment_counter("GET", "/echo", "200");
    reg.increment_counter("POST", "/echo", "200");
    reg.increment_counter("POST", "/echo", "422");

    assert_eq!(reg.counter_value("GET", "/echo", "200"), Some(1));
    assert_eq!(reg.counter_value("POST", "/echo", "200"), Some(1));
    assert_eq!(reg.counter_value("POST", "/echo", "422"), Some(1));
    assert_eq!(reg.counter_value("DELETE", "/echo", "200"), None);
    assert_eq!(reg.series_count(), 3);
}

#[test]
fn observe_updates_count_sum_and_cumulative_buckets() {
    let reg = MetricsRegistry::new();
    reg.observe_histogram("/echo", 0.25);

    let snap = reg.histogram_snapshot("/echo").unwrap();
    assert_eq!(snap.count, 1);
    assert_eq!(snap.sum, 0.25);
    assert_eq!(snap.buckets.len(), DEFAULT_BUCKETS.len());
    for (le, count) in &snap.buckets {
        let expected = if *le >= 0.25 { 1 } else { 0 };
        assert_eq!(*count, expected, "bucket le={le}");
    }

    reg.observe_histogram("/echo", 0.5);
    let snap = reg.histogram_snapshot("/echo").unwrap();
    assert_eq!(snap.count, 2);
    assert_eq!(snap.sum, 0.75);
}

#[test]
fn zero_duration_lands_in_every_bucket() {
    let reg = MetricsRegistry::new();
    reg.observe_histogram("/healthz", 0.0);

    let snap = reg.histogram_snapshot("/healthz").unwrap();
    assert_eq!(snap.count, 1);
    assert_eq!(snap.sum, 0.0);
    assert!(snap.buckets.iter().all(|(_, c)| *c == 1));
}

#[test]
fn slow_sample_only_counts_in_inf() {
    let reg = MetricsRegistry::new();
    reg.observe_histogram("/slow", 42.0);

    let snap = reg.histogram_snapshot("/slow").unwrap();
    assert!(snap.buckets.iter().all(|(_, c)| *c == 0));

    let body = reg.render();
    assert!(body.contains(r#"http_request_duration_seconds_bucket{endpoint="/slow",le="10"} 0"#));
    assert!(body.contains(r#"http_request_duration_seconds_bucket{endpoint="/slow",le="+Inf"} 1"#));
    assert!(body.contains(r#"http_request_duration_seconds_sum{endpoint="/slow"} 42"#));
    assert!(body.contains(r#"http_request_duration_seconds_count{endpoint="/slow"} 1"#));
}

#[test]
fn render_is_sorted_and_stable() {
    let reg = MetricsRegistry::new();
    reg.increment_counter("POST", "/echo", "200");
    reg.increment_counter("GET", "/metrics", "200");
    reg.increment_counter("GET", "/healthz", "200");

    let first = reg.render();
    assert_eq!(first, reg.render());

    let series: Vec<&str> = first
        .lines()
        .filter(|l| l.starts_with(&format!("{HTTP_REQUESTS_TOTAL}{{")))
        .collect();
    assert_eq!(
        series,
        vec![
            r#"http_requests_total{method="GET",endpoint="/healthz",status="200"} 1"#,
            r#"http_requests_total{method="GET",endpoint="/metrics",status="200"} 1"#,
            r#"http_requests_total{method="POST",endpoint="/echo",status="200"} 1"#,
        ]
    );

    let counter_pos = first.find(HTTP_REQUESTS_TOTAL).unwrap();
    let hist_pos = first.find(HTTP_REQUEST_DURATION_SECONDS).unwrap();
    assert!(counter_pos < hist_pos);
}

#[test]
fn label_values_are_escaped() {
    let reg = MetricsRegistry::new();
    reg.increment_counter("GET", "/a\"b\\c\nd", "404");

    assert!(reg
        .render()
        .contains(r#"endpoint="/a\"b\\c\nd""#));
}

#[test]
fn concurrent_increments_are_not_lost() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 5_000;

    let reg = Arc::new(MetricsRegistry::new());
    std::thread::scope(|s| {
        for _ in 0..THREADS {
            let reg = Arc::clone(&reg);
            s.spawn(move || {
                for _ in 0..PER_THREAD {
                    reg.increment_counter("GET", "/healthz", "200");
                    reg.observe_histogram("/healthz", 0.001);
                }
            });
        }
        // A reader racing the writers must not block or panic.
        s.spawn(|| {
            for _ in 0..100 {
                let _ = reg.render();
            }
        });
    });

    let total = (THREADS * PER_THREAD) as u64;
    assert_eq!(reg.counter_value("GET", "/healthz", "200"), Some(total));

    let snap = reg.histogram_snapshot("/healthz").unwrap();
    assert_eq!(snap.count, total);
    assert!(snap.buckets.iter().all(|(_, c)| *c == total));
}
