//! Observability
//!
//! Structured JSON logging of lifecycle and validation events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on validation results
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use docschema::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::DocumentRejected, &[("collection", "user")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    /// Renders an event the way `log_event_with_fields` writes it.
    fn capture_event(event: Event, fields: &[(&str, &str)]) -> Value {
        let line = logger::capture_log(event.severity(), event.as_str(), fields);
        serde_json::from_str(&line).unwrap()
    }

    #[test]
    fn test_log_event() {
        let begin = capture_event(Event::ValidationBegin, &[]);
        assert_eq!(begin["event"], "VALIDATION_BEGIN");
        assert_eq!(begin["severity"], "INFO");

        let rejected = capture_event(Event::DocumentRejected, &[]);
        assert_eq!(rejected["event"], "DOCUMENT_REJECTED");
        assert_eq!(rejected["severity"], "WARN");
    }

    #[test]
    fn test_log_event_with_fields() {
        let loaded = capture_event(Event::ConfigLoaded, &[("unknown_fields", "ignore")]);
        assert_eq!(loaded["event"], "CONFIG_LOADED");
        assert_eq!(loaded["severity"], "INFO");
        assert_eq!(loaded["unknown_fields"], "ignore");
    }

    #[test]
    fn test_accepted_documents_below_default_threshold() {
        assert_eq!(Event::DocumentAccepted.severity(), Severity::Trace);
        assert!(!Logger::enabled(Event::DocumentAccepted.severity()));
        assert!(Logger::enabled(Event::UnknownSchema.severity()));
    }
}
