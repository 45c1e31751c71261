use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Deref;
use std::rc::Rc;
use std::time::Duration;
use std::time::Instant;

/// Observer interface for performance-span events.  Implement this trait
/// and wrap it in a [`Listener`] to receive timing data from the summarizing
/// pipeline.
///
/// All methods are called synchronously from the extraction code; keep
/// them lightweight.
pub trait PerfListener {
    /// Return whether this listener cares about the given span.  If `false`,
    /// none of the other callbacks will fire for that span.
    fn is_interested_in_span(&self, span_id: u64) -> bool;
    /// Called when a span begins.
    fn on_span_start(&self, span_id: u64, start_time: Instant);
    /// Called at each checkpoint within a span, with the wall-clock duration
    /// since the previous checkpoint (or span start).
    fn on_check_point(
        &self,
        span_id: u64,
        point_time: Instant,
        duration_since_last_checkpoint: Duration,
        label: &str,
    );
    /// Called when a free-text annotation is attached to a span.
    fn on_annotate(&self, span_id: u64, annotation: &str);
    /// Called when a span ends, with its total duration.
    fn on_span_end(&self, span_id: u64, span_duration: Duration);
}

/// A clonable, reference-counted wrapper around a [`PerfListener`].
/// Clone is cheap (just an `Rc` bump); the underlying listener is shared.
#[derive(Clone)]
pub struct Listener {
    inner_impl: Rc<dyn PerfListener>,
}

impl Listener {
    /// Wrap a [`PerfListener`] implementation for use with [`PerfLogger`].
    pub fn new(listner: Rc<dyn PerfListener>) -> Listener {
        Listener {
            inner_impl: listner,
        }
    }
}

impl Deref for Listener {
    type Target = dyn PerfListener;
    fn deref(&self) -> &Self::Target {
        &*self.inner_impl
    }
}

struct PerfCheckPoint {
    pub label: String,
    pub time: Instant,
}

struct PerfEvent {
    pub span_id: u64,
    pub start_time: Instant,
    pub points: Vec<PerfCheckPoint>,
    pub annotations: Vec<String>,
    pub listeners: Vec<Listener>,
}

impl PerfEvent {
    pub fn point(&mut self, point: PerfCheckPoint) {
        let last_time = self
            .points
            .last()
            .map(|p| p.time)
            .unwrap_or(self.start_time);
        let duration_since_last_checkpoint = point.time.duration_since(last_time);
        self.listeners.iter().for_each(|l| {
            l.on_check_point(
                self.span_id,
                point.time,
                duration_since_last_checkpoint,
                point.label.as_str(),
            )
        });
        self.points.push(point);
    }

    pub fn annotate(&mut self, annotation: String) {
        self.listeners.iter().for_each(|l| {
            l.on_annotate(self.span_id, annotation.as_str());
        });
        self.annotations.push(annotation);
    }
}

/// Tracks in-flight performance spans and fans events out to registered
/// [`Listener`]s.
///
/// **Not `Send` or `Sync`**: the internal event map uses `RefCell`.  Each
/// pipeline run creates its own `PerfLogger`, so parallel workers never share
/// one.
pub struct PerfLogger {
    events: RefCell<HashMap<u64, PerfEvent>>,
    listeners: Vec<Listener>,
}

impl PerfLogger {
    /// Create a new logger with the given set of listeners.  Pass an empty
    /// `Vec` to disable all perf logging.
    pub fn new(listeners: Vec<Listener>) -> PerfLogger {
        PerfLogger {
            events: RefCell::new(HashMap::new()),
            listeners,
        }
    }

    /// Begin a new span identified by `span_id`.  Only listeners that
    /// return `true` from [`PerfListener::is_interested_in_span`] are
    /// notified and stored.
    pub fn start(&self, span_id: u64) {
        let event_listeners = self
            .listeners
            .iter()
            .filter(|l| l.is_interested_in_span(span_id))
            .cloned()
            .collect::<Vec<_>>();
        if !event_listeners.is_empty() {
            let start_time = Instant::now();
            event_listeners
                .iter()
                .for_each(|l| l.on_span_start(span_id, start_time));
            let event = PerfEvent {
                span_id,
                start_time,
                points: vec![],
                annotations: vec![],
                listeners: event_listeners,
            };
            self.events.borrow_mut().insert(span_id, event);
        }
    }

    /// Record a checkpoint with a `&str` label inside the given span.
    pub fn check_point_str(&self, span_id: u64, label: &str) {
        if let Some(event) = self.events.borrow_mut().get_mut(&span_id) {
            let time = Instant::now();
            let point = PerfCheckPoint {
                label: String::from(label),
                time,
            };

            event.point(point);
        }
    }

    /// Attach a free-text annotation (owned `String`) to the given span.
    pub fn annotate(&self, span_id: u64, annotation: String) {
        if let Some(event) = self.events.borrow_mut().get_mut(&span_id) {
            event.annotate(annotation);
        }
    }

    /// End the span, notify listeners with the total duration, and remove
    /// it from the active-events map.
    pub fn end(&self, span_id: u64) {
        if let Some(event) = self.events.borrow().get(&span_id) {
            let now = Instant::now();
            let duration = now.duration_since(event.start_time);
            event.listeners.iter().for_each(|l| {
                l.on_span_end(span_id, duration);
            });
        }
        self.events.borrow_mut().remove(&span_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::logging_defs::*;

    #[derive(Default)]
    struct RecordingListener {
        events: RefCell<Vec<String>>,
    }

    impl PerfListener for RecordingListener {
        fn is_interested_in_span(&self, span_id: u64) -> bool {
            span_id == SCORE_WORDS
        }

        fn on_span_start(&self, span_id: u64, _start_time: Instant) {
            self.events.borrow_mut().push(format!("start:{}", name(span_id)));
        }

        fn on_check_point(&self, _span_id: u64, _point_time: Instant, _d: Duration, label: &str) {
            self.events.borrow_mut().push(format!("point:{}", label));
        }

        fn on_annotate(&self, _span_id: u64, annotation: &str) {
            self.events.borrow_mut().push(format!("note:{}", annotation));
        }

        fn on_span_end(&self, span_id: u64, _span_duration: Duration) {
            self.events.borrow_mut().push(format!("end:{}", name(span_id)));
        }
    }

    #[test]
    fn only_interesting_spans_reach_the_listener() {
        let recorder = Rc::new(RecordingListener::default());
        let logger = PerfLogger::new(vec![Listener::new(recorder.clone())]);

        logger.start(SELECT_TOP);
        logger.check_point_str(SELECT_TOP, "ignored");
        logger.end(SELECT_TOP);

        logger.start(SCORE_WORDS);
        logger.check_point_str(SCORE_WORDS, "counted");
        logger.annotate(SCORE_WORDS, String::from("12 distinct words"));
        logger.end(SCORE_WORDS);

        assert_eq!(
            *recorder.events.borrow(),
            vec![
                "start:SCORE_WORDS",
                "point:counted",
                "note:12 distinct words",
                "end:SCORE_WORDS",
            ]
        );
    }

    #[test]
    fn span_ids_have_names() {
        assert_eq!(name(EXTRACT_CANDIDATE), "EXTRACT_CANDIDATE");
        assert_eq!(name(999), "UNKNOWN_SPAN");
    }
}
