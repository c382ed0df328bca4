//! Instrumentation for capturing simulation notices emitted via `tracing`.
//!
//! The engine logs field-style events for deaths, life-stage and psyche
//! transitions, and funeral activity. This crate provides a subscriber that
//! records those events into an in-memory log tests can drain and query.
//!
//! # Usage
//!
//! ```ignore
//! // In simulation code:
//! tracing::info!(target: "death", identity = id, age = age, cause = cause);
//!
//! // In test:
//! let log = instrument::capture(|| {
//!     // ... run simulation ...
//! });
//! assert_eq!(log.count("death"), 1);
//! ```

use std::cell::RefCell;

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Record};
use tracing::{Event, Id, Metadata, Subscriber};

/// A single recorded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    U64(u64),
    I64(i64),
    F64(f64),
    Bool(bool),
    Str(String),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::U64(v) => Some(*v),
            FieldValue::I64(v) if *v >= 0 => Some(*v as u64),
            _ => None,
        }
    }
}

/// One recorded event: its target plus every field in emission order.
#[derive(Debug, Clone, Default)]
pub struct Recorded {
    pub target: String,
    pub fields: Vec<(String, FieldValue)>,
}

impl Recorded {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

/// The drained event log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<Recorded>,
}

impl EventLog {
    /// All events recorded under a target, in emission order.
    pub fn for_target<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a Recorded> {
        self.events.iter().filter(move |e| e.target == target)
    }

    pub fn count(&self, target: &str) -> usize {
        self.for_target(target).count()
    }
}

thread_local! {
    static LOG: RefCell<EventLog> = RefCell::default();
}

/// Visitor that copies event fields into a [`Recorded`] row.
struct FieldCollector<'a> {
    row: &'a mut Recorded,
}

impl Visit for FieldCollector<'_> {
    fn record_u64(&mut self, field: &Field, value: u64) {
        self.row
            .fields
            .push((field.name().to_string(), FieldValue::U64(value)));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.row
            .fields
            .push((field.name().to_string(), FieldValue::I64(value)));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.row
            .fields
            .push((field.name().to_string(), FieldValue::F64(value)));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.row
            .fields
            .push((field.name().to_string(), FieldValue::Bool(value)));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.row
            .fields
            .push((field.name().to_string(), FieldValue::Str(value.to_string())));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, &format!("{:?}", value));
    }
}

/// Tracing subscriber that appends info-level events to the thread-local log.
pub struct EventLogSubscriber;

impl Subscriber for EventLogSubscriber {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        // Only collect info-level events (not spans, not debug/trace)
        metadata.is_event() && *metadata.level() <= tracing::Level::INFO
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        // Spans are not tracked
        Id::from_u64(1)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let mut row = Recorded {
            target: event.metadata().target().to_string(),
            fields: Vec::new(),
        };
        event.record(&mut FieldCollector { row: &mut row });

        LOG.with(|log| log.borrow_mut().events.push(row));
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

/// Drain all recorded events from the thread-local log.
pub fn drain() -> EventLog {
    LOG.with(|log| std::mem::take(&mut *log.borrow_mut()))
}

/// Clear all recorded events without returning them.
pub fn clear() {
    LOG.with(|log| *log.borrow_mut() = EventLog::default());
}

/// Run `f` with the recording subscriber installed for the current thread
/// and return everything it emitted. Scoped, so parallel tests don't share
/// a global subscriber.
pub fn capture<F: FnOnce()>(f: F) -> EventLog {
    clear();
    tracing::subscriber::with_default(EventLogSubscriber, f);
    drain()
}
