pub mod logger;

pub mod logging_defs;
#[macro_use]
pub mod macros;

use logger::PerfListener;
use logging_defs::*;
use std::time::Duration;
use std::time::Instant;

/// Environment variable holding a comma-separated list of span names
/// (or `ALL`) that [`PerfConsoleListener::from_env`] should report.
pub const PERF_SPANS_ENV: &str = "GIST_PERF_SPANS";

/// A [`PerfListener`] that prints span events to stderr.
/// Only the spans it was built with are reported; the default instance is
/// silent.
#[derive(Default)]
pub struct PerfConsoleListener {
    spans: Vec<u64>,
}

impl PerfConsoleListener {
    pub fn new(spans: Vec<u64>) -> PerfConsoleListener {
        PerfConsoleListener { spans }
    }

    /// Build a listener from [`PERF_SPANS_ENV`].  Unknown span names are
    /// ignored; an unset variable yields a silent listener.
    pub fn from_env() -> PerfConsoleListener {
        match std::env::var(PERF_SPANS_ENV) {
            Ok(value) => PerfConsoleListener::new(parse_span_list(value.as_str())),
            Err(_) => PerfConsoleListener::default(),
        }
    }
}

fn parse_span_list(value: &str) -> Vec<u64> {
    if value.trim().eq_ignore_ascii_case("all") {
        return ALL_SPANS.to_vec();
    }
    value.split(',').filter_map(span_id).collect()
}

impl PerfListener for PerfConsoleListener {
    fn is_interested_in_span(&self, span_id: u64) -> bool {
        self.spans.contains(&span_id)
    }

    fn on_span_start(&self, span_id: u64, _start_time: Instant) {
        eprintln!("Start of span: {}", name(span_id));
    }

    fn on_check_point(
        &self,
        span_id: u64,
        _point_time: Instant,
        duration_since_last_checkpoint: Duration,
        point_label: &str,
    ) {
        eprintln!(
            "Span: \"{}\" point: \"{}\": {} seconds",
            name(span_id),
            point_label,
            duration_since_last_checkpoint.as_secs_f64()
        );
    }

    fn on_annotate(&self, span_id: u64, annotation: &str) {
        eprintln!("Span: \"{}\" annotation: \"{}\"", name(span_id), annotation);
    }

    fn on_span_end(&self, span_id: u64, span_duration: Duration) {
        eprintln!(
            "Span ended: \"{}\": {} seconds",
            name(span_id),
            span_duration.as_secs_f64()
        );
    }
}
