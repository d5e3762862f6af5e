//! Observable events
//!
//! Events are explicit and typed. Each carries the severity it is logged at.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded (or defaults applied)
    ConfigLoaded,

    // Catalog
    /// Schema catalog written to output
    CatalogListed,

    // Validation stream
    /// Validation stream started
    ValidationBegin,
    /// Document accepted
    DocumentAccepted,
    /// Document rejected with violations
    DocumentRejected,
    /// Input line was not JSON
    MalformedInput,
    /// Validation stream finished
    ValidationComplete,

    // Failures
    /// Requested schema does not exist
    UnknownSchema,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CatalogListed => "CATALOG_LISTED",
            Event::ValidationBegin => "VALIDATION_BEGIN",
            Event::DocumentAccepted => "DOCUMENT_ACCEPTED",
            Event::DocumentRejected => "DOCUMENT_REJECTED",
            Event::MalformedInput => "MALFORMED_INPUT",
            Event::ValidationComplete => "VALIDATION_COMPLETE",
            Event::UnknownSchema => "UNKNOWN_SCHEMA",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::DocumentAccepted => Severity::Trace,
            Event::DocumentRejected | Event::MalformedInput => Severity::Warn,
            Event::UnknownSchema => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
