#![forbid(unsafe_code)]

//! Structured logging: commit decisions are observable through `tracing`.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use formbind_harness::TextFixture;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;

#[derive(Clone, Default)]
struct Capture {
    events: Arc<Mutex<Vec<(Level, String, Vec<String>)>>>,
}

#[derive(Default)]
struct Fields {
    message: String,
    names: Vec<String>,
}

impl Visit for Fields {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.names.push(field.name().to_string());
        }
    }
}

impl<S: Subscriber> Layer<S> for Capture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        if let Ok(mut events) = self.events.lock() {
            events.push((*event.metadata().level(), fields.message, fields.names));
        }
    }
}

impl Capture {
    fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .map(|events| events.iter().map(|(_, m, _)| m.clone()).collect())
            .unwrap_or_default()
    }

    fn find(&self, message: &str) -> Option<(Level, Vec<String>)> {
        self.events.lock().ok().and_then(|events| {
            events
                .iter()
                .find(|(_, m, _)| m == message)
                .map(|(level, _, names)| (*level, names.clone()))
        })
    }
}

#[test]
fn commit_is_logged_with_field_context() {
    let capture = Capture::default();
    let subscriber = Registry::default().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut fx = TextFixture::new("foo", 250);
        fx.type_at(0, "bar");
        fx.advance_to(250);
        assert_eq!(fx.log.len(), 1);
    });

    let (level, names) = capture.find("commit").expect("commit event");
    assert_eq!(level, Level::DEBUG);
    for expected in ["field", "name", "trigger", "value"] {
        assert!(names.iter().any(|n| n == expected), "missing {expected}");
    }
    assert!(capture.messages().iter().any(|m| m == "field mounted"));
}

#[test]
fn external_reset_is_logged() {
    let capture = Capture::default();
    let subscriber = Registry::default().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut fx = TextFixture::new("foo", 250);
        fx.type_at(0, "draft");
        fx.external_at(10, "reloaded");
        let _ = fx.view();
        fx.field.destroy();
    });

    let messages = capture.messages();
    assert!(messages.iter().any(|m| m == "external change reset buffer"));
    assert!(messages.iter().any(|m| m == "field destroyed"));
    assert!(!messages.iter().any(|m| m == "commit"));
}
