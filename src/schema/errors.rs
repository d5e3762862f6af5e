//! Schema error types
//!
//! Error codes:
//! - DOC_VALIDATION_FAILED (REJECT)
//! - DOC_UNKNOWN_SCHEMA (REJECT)
//! - DOC_MALFORMED_INPUT (REJECT)
//! - DOC_CODEC_FAILED (ERROR, indicates a defect in a record definition)

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Kind of a single constraint failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Required field missing or null
    RequiredMissing,
    /// Value has the wrong type and could not be coerced
    TypeMismatch,
    /// Numeric value outside its declared range
    OutOfRange,
    /// String length outside its declared range
    LengthOutOfRange,
    /// Undeclared field under the reject policy
    UnknownField,
}

impl ViolationKind {
    /// Returns the wire name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::RequiredMissing => "required_missing",
            ViolationKind::TypeMismatch => "type_mismatch",
            ViolationKind::OutOfRange => "out_of_range",
            ViolationKind::LengthOutOfRange => "length_out_of_range",
            ViolationKind::UnknownField => "unknown_field",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violated field constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field path (e.g., "tags[2]")
    pub field: String,
    /// What went wrong
    pub kind: ViolationKind,
    /// Expected condition and actual value
    pub detail: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind, detail: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            detail: detail.into(),
        }
    }

    pub fn required_missing(field: impl Into<String>) -> Self {
        Self::new(field, ViolationKind::RequiredMissing, "expected field to be present, got missing")
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &str, actual: &str) -> Self {
        Self::new(
            field,
            ViolationKind::TypeMismatch,
            format!("expected {}, got {}", expected, actual),
        )
    }

    pub fn out_of_range(field: impl Into<String>, bound: &str, actual: impl fmt::Display) -> Self {
        Self::new(
            field,
            ViolationKind::OutOfRange,
            format!("expected {}, got {}", bound, actual),
        )
    }

    pub fn length_out_of_range(field: impl Into<String>, bound: &str, actual: usize) -> Self {
        Self::new(
            field,
            ViolationKind::LengthOutOfRange,
            format!("expected {}, got length {}", bound, actual),
        )
    }

    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::new(field, ViolationKind::UnknownField, "expected no undeclared fields")
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}' [{}]: {}", self.field, self.kind, self.detail)
    }
}

/// A rejected document, with every violated constraint in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("document rejected by schema '{schema}': {}", join_violations(.violations))]
pub struct ValidationError {
    schema: String,
    violations: Vec<Violation>,
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Stable error code for rejected documents
    pub const CODE: &'static str = "DOC_VALIDATION_FAILED";

    /// Create a validation error. `violations` should be non-empty.
    pub fn new(schema: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            schema: schema.into(),
            violations,
        }
    }

    /// Name of the schema that rejected the document
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// All violations, in the order they were found
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Returns the first violation for the given field, if any
    pub fn violation_for(&self, field: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.field == field)
    }

    /// Returns true if the given field failed with the given kind
    pub fn has(&self, field: &str, kind: ViolationKind) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.kind == kind)
    }
}

/// Crate-level error for validation entry points
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Document violates its schema
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No schema with that name or collection
    #[error("unknown schema '{0}'")]
    UnknownSchema(String),

    /// Input text is not JSON
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A validated document did not map onto its record type
    #[error("failed to convert {record} document: {reason}")]
    Codec { record: &'static str, reason: String },
}

impl SchemaError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::Validation(_) => ValidationError::CODE,
            SchemaError::UnknownSchema(_) => "DOC_UNKNOWN_SCHEMA",
            SchemaError::MalformedInput(_) => "DOC_MALFORMED_INPUT",
            SchemaError::Codec { .. } => "DOC_CODEC_FAILED",
        }
    }

    /// Violations if this is a validation failure
    pub fn violations(&self) -> Option<&[Violation]> {
        match self {
            SchemaError::Validation(e) => Some(e.violations()),
            _ => None,
        }
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
