pub mod logger;

pub mod logging_defs;
#[macro_use]
pub mod macros;

use logger::PerfListener;
use logging_defs::*;
use std::time::Duration;
use std::time::Instant;

/// A [`PerfListener`] that prints span events to stderr.
///
/// Reports the [`EMIT`], [`BUILD_TREE`] and [`RENDER_TABLE`] spans, and only
/// while the `HTML2REST_PERF` environment variable is set.
pub struct PerfConsoleListener {
    enabled: bool,
}

impl PerfConsoleListener {
    pub fn from_env() -> PerfConsoleListener {
        PerfConsoleListener {
            enabled: std::env::var_os("HTML2REST_PERF").is_some(),
        }
    }
}

impl PerfListener for PerfConsoleListener {
    fn is_interested_in_span(&self, span_id: u64) -> bool {
        self.enabled && matches!(span_id, EMIT | BUILD_TREE | RENDER_TABLE)
    }

    fn on_span_start(&self, span_id: u64, _start_time: Instant) {
        eprintln!("Start of span: {}", name(span_id));
    }

    fn on_check_point(&self, span_id: u64, _point_time: Instant, since_previous: Duration, label: &str) {
        eprintln!(
            "Span: \"{}\" point: \"{}\": {} seconds",
            name(span_id),
            label,
            since_previous.as_secs_f64()
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
