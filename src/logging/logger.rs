use bitflags::bitflags;
use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Deref;
use std::rc::Rc;
use std::time::Duration;
use std::time::Instant;

bitflags! {
    /// Categories of `eprintln!` traces the emitter can produce in debug
    /// builds.  Selected through [`crate::EmitOptions::debug_categories`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DebugLogsCategories: u32 {
        const NONE                     = 0;
        const SUBSTITUTIONS            = 1 << 1;
        const TABLES                   = 1 << 2;
        const LISTS                    = 1 << 3;
        const INLINE_MARKUP            = 1 << 4;
        const UNKNOWN_NODES            = 1 << 5;
        const TREE_BUILDING            = 1 << 6;
        const ALL                      = u32::MAX;
    }
}

/// Observer interface for performance-span events.  Implement this trait
/// and wrap it in a [`Listener`] to receive timing data from a render pass.
///
/// Callbacks run synchronously inside the traversal; keep them cheap.
pub trait PerfListener {
    /// Whether this listener wants events for `span_id` at all.
    fn is_interested_in_span(&self, span_id: u64) -> bool;
    fn on_span_start(&self, span_id: u64, start_time: Instant);
    /// `since_previous` is measured from the previous checkpoint of the same
    /// span, or from the span start for the first one.
    fn on_check_point(&self, span_id: u64, point_time: Instant, since_previous: Duration, label: &str);
    fn on_annotate(&self, span_id: u64, annotation: &str);
    fn on_span_end(&self, span_id: u64, span_duration: Duration);
}

/// Shared handle to a [`PerfListener`].  Cloning only bumps an `Rc`.
#[derive(Clone)]
pub struct Listener {
    inner_impl: Rc<dyn PerfListener>,
}

impl Listener {
    pub fn new(listener: Rc<dyn PerfListener>) -> Listener {
        Listener {
            inner_impl: listener,
        }
    }
}

impl Deref for Listener {
    type Target = dyn PerfListener;
    fn deref(&self) -> &Self::Target {
        &*self.inner_impl
    }
}

struct OpenSpan {
    span_id: u64,
    started: Instant,
    last_point: Instant,
    annotations: Vec<String>,
    listeners: Vec<Listener>,
}

impl OpenSpan {
    fn check_point(&mut self, label: &str) {
        let now = Instant::now();
        let since_previous = now.duration_since(self.last_point);
        self.last_point = now;
        for l in &self.listeners {
            l.on_check_point(self.span_id, now, since_previous, label);
        }
    }

    fn annotate(&mut self, annotation: String) {
        for l in &self.listeners {
            l.on_annotate(self.span_id, annotation.as_str());
        }
        self.annotations.push(annotation);
    }
}

/// Tracks open performance spans of one render pass and fans their events
/// out to the registered [`Listener`]s.
///
/// Not `Send`/`Sync`; every render pass owns its own logger.  A logger
/// without listeners records nothing.
pub struct PerfLogger {
    spans: RefCell<HashMap<u64, OpenSpan>>,
    listeners: Vec<Listener>,
}

impl PerfLogger {
    pub fn new(listeners: Vec<Listener>) -> PerfLogger {
        PerfLogger {
            spans: RefCell::new(HashMap::new()),
            listeners,
        }
    }

    /// Open `span_id`.  Spans nobody listens to are not stored.
    pub fn start(&self, span_id: u64) {
        let listeners: Vec<Listener> = self
            .listeners
            .iter()
            .filter(|l| l.is_interested_in_span(span_id))
            .cloned()
            .collect();
        if listeners.is_empty() {
            return;
        }
        let started = Instant::now();
        for l in &listeners {
            l.on_span_start(span_id, started);
        }
        self.spans.borrow_mut().insert(
            span_id,
            OpenSpan {
                span_id,
                started,
                last_point: started,
                annotations: vec![],
                listeners,
            },
        );
    }

    pub fn check_point(&self, span_id: u64, label: impl AsRef<str>) {
        if let Some(span) = self.spans.borrow_mut().get_mut(&span_id) {
            span.check_point(label.as_ref());
        }
    }

    pub fn annotate(&self, span_id: u64, annotation: impl Into<String>) {
        if let Some(span) = self.spans.borrow_mut().get_mut(&span_id) {
            span.annotate(annotation.into());
        }
    }

    /// Annotations recorded so far on an open span.
    pub fn annotations(&self, span_id: u64) -> Vec<String> {
        self.spans
            .borrow()
            .get(&span_id)
            .map(|s| s.annotations.clone())
            .unwrap_or_default()
    }

    /// Close `span_id` and report its total duration.
    pub fn end(&self, span_id: u64) {
        if let Some(span) = self.spans.borrow_mut().remove(&span_id) {
            let duration = span.started.elapsed();
            for l in &span.listeners {
                l.on_span_end(span_id, duration);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl PerfListener for Recorder {
        fn is_interested_in_span(&self, span_id: u64) -> bool {
            span_id == 1
        }

        fn on_span_start(&self, span_id: u64, _start_time: Instant) {
            self.events.borrow_mut().push(format!("start {}", span_id));
        }

        fn on_check_point(&self, span_id: u64, _point_time: Instant, _since_previous: Duration, label: &str) {
            self.events.borrow_mut().push(format!("point {} {}", span_id, label));
        }

        fn on_annotate(&self, span_id: u64, annotation: &str) {
            self.events.borrow_mut().push(format!("note {} {}", span_id, annotation));
        }

        fn on_span_end(&self, span_id: u64, _span_duration: Duration) {
            self.events.borrow_mut().push(format!("end {}", span_id));
        }
    }

    #[test]
    fn only_interesting_spans_are_reported() {
        let recorder = Rc::new(Recorder::default());
        let logger = PerfLogger::new(vec![Listener::new(recorder.clone())]);

        logger.start(1);
        logger.start(2);
        logger.check_point(1, "rows");
        logger.check_point(2, "ignored");
        logger.annotate(1, "3 cells");
        assert_eq!(logger.annotations(1), vec!["3 cells".to_string()]);
        logger.end(2);
        logger.end(1);

        assert_eq!(
            *recorder.events.borrow(),
            vec!["start 1", "point 1 rows", "note 1 3 cells", "end 1"]
        );
        assert!(logger.annotations(1).is_empty());
    }
}
