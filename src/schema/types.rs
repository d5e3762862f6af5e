//! Schema type definitions
//!
//! Supported field types:
//! - string: UTF-8 string
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - bool: Boolean
//! - array: Homogeneous array with element type
//!
//! A field declares its type, how absence is handled (required, optional or
//! defaulted) and zero or more constraints (numeric range, string length).

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Supported field types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// Homogeneous array with single element type
    Array {
        /// Element type (boxed to allow recursive types)
        element_type: Box<FieldType>,
    },
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::Array { .. } => "array",
        }
    }

    /// Array of strings
    pub fn string_array() -> Self {
        FieldType::Array {
            element_type: Box::new(FieldType::String),
        }
    }

    /// Returns true if the given (already coerced) value has this type.
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Int => value.is_i64(),
            FieldType::Float => value.is_number(),
            FieldType::Bool => value.is_boolean(),
            FieldType::Array { element_type } => value
                .as_array()
                .is_some_and(|items| items.iter().all(|item| element_type.admits(item))),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Array { element_type } => write!(f, "array<{}>", element_type),
            other => f.write_str(other.type_name()),
        }
    }
}

/// Value used when a defaulted field is absent.
///
/// Defaults are instantiated on every call, so list defaults are never shared
/// between documents.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Bool(bool),
    String(String),
    EmptyList,
}

impl DefaultValue {
    /// Builds a fresh JSON value for this default.
    pub fn instantiate(&self) -> Value {
        match self {
            DefaultValue::Bool(b) => Value::Bool(*b),
            DefaultValue::String(s) => Value::String(s.clone()),
            DefaultValue::EmptyList => Value::Array(Vec::new()),
        }
    }
}

/// How a field is treated when it is absent from the input.
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    /// Must be present and non-null
    Required,
    /// May be absent or null; normalizes to null
    Optional,
    /// May be absent; filled with the default. Null is a type mismatch.
    Defaulted(DefaultValue),
}

impl Presence {
    fn label(&self) -> &'static str {
        match self {
            Presence::Required => "required",
            Presence::Optional => "optional",
            Presence::Defaulted(_) => "defaulted",
        }
    }
}

/// Per-field constraint, checked after type coercion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Inclusive numeric range
    Range { min: Option<f64>, max: Option<f64> },
    /// Inclusive string length range, counted in characters
    Length { min: Option<usize>, max: Option<usize> },
}

impl Constraint {
    /// Human-readable bound, used in violation details.
    pub fn bound(&self) -> String {
        match *self {
            Constraint::Range { min, max } => describe_bound("value", min, max),
            Constraint::Length { min, max } => describe_bound("length", min, max),
        }
    }

    /// Returns true if the constraint can be declared on the given type.
    pub fn applies_to(&self, field_type: &FieldType) -> bool {
        match self {
            Constraint::Range { .. } => matches!(field_type, FieldType::Int | FieldType::Float),
            Constraint::Length { .. } => matches!(field_type, FieldType::String),
        }
    }

    fn is_empty_range(&self) -> bool {
        match *self {
            Constraint::Range {
                min: Some(lo),
                max: Some(hi),
            } => lo > hi,
            Constraint::Length {
                min: Some(lo),
                max: Some(hi),
            } => lo > hi,
            _ => false,
        }
    }
}

fn describe_bound<T: fmt::Display>(subject: &str, min: Option<T>, max: Option<T>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("{} <= {} <= {}", lo, subject, hi),
        (Some(lo), None) => format!("{} >= {}", subject, lo),
        (None, Some(hi)) => format!("{} <= {}", subject, hi),
        (None, None) => "unbounded".into(),
    }
}

/// Field definition
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name as it appears in documents
    pub name: String,
    /// Field data type
    pub field_type: FieldType,
    /// Absence handling
    pub presence: Presence,
    /// Constraints applied to present values
    pub constraints: Vec<Constraint>,
    /// Optional human description
    pub description: Option<String>,
}

impl FieldDef {
    /// Create a field with no constraints
    pub fn new(name: impl Into<String>, field_type: FieldType, presence: Presence) -> Self {
        Self {
            name: name.into(),
            field_type,
            presence,
            constraints: Vec::new(),
            description: None,
        }
    }

    /// Create a required string field
    pub fn required_string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String, Presence::Required)
    }

    /// Create an optional string field
    pub fn optional_string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String, Presence::Optional)
    }

    /// Create a string field with a default
    pub fn defaulted_string(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldType::String,
            Presence::Defaulted(DefaultValue::String(default.into())),
        )
    }

    /// Create an optional int field
    pub fn optional_int(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Int, Presence::Optional)
    }

    /// Create a required float field
    pub fn required_float(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Float, Presence::Required)
    }

    /// Create a bool field with a default
    pub fn defaulted_bool(name: impl Into<String>, default: bool) -> Self {
        Self::new(
            name,
            FieldType::Bool,
            Presence::Defaulted(DefaultValue::Bool(default)),
        )
    }

    /// Create a string array field that defaults to an empty list
    pub fn string_list(name: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldType::string_array(),
            Presence::Defaulted(DefaultValue::EmptyList),
        )
    }

    /// Adds an inclusive numeric range
    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.constraints.push(Constraint::Range { min, max });
        self
    }

    /// Adds an inclusive character-length range
    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.constraints.push(Constraint::Length { min, max });
        self
    }

    /// Attaches a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true if the field must be present
    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }
}

impl Serialize for FieldDef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type", &self.field_type.to_string())?;
        map.serialize_entry("presence", self.presence.label())?;
        if let Presence::Defaulted(default) = &self.presence {
            map.serialize_entry("default", &default.instantiate())?;
        }
        let bounds: Vec<String> = self.constraints.iter().map(Constraint::bound).collect();
        if !bounds.is_empty() {
            map.serialize_entry("constraints", &bounds)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        map.end()
    }
}

/// Policy for input keys that the schema does not declare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Drop undeclared keys silently
    #[default]
    Ignore,
    /// Report each undeclared key as a violation
    Reject,
}

impl UnknownFieldPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnknownFieldPolicy::Ignore => "ignore",
            UnknownFieldPolicy::Reject => "reject",
        }
    }
}

/// Complete schema definition for one record type
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Record type name, e.g. `BlogPost`
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Field definitions in declaration order
    pub fields: Vec<FieldDef>,
}

impl Schema {
    /// Create a new schema
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields,
        }
    }

    /// Attaches a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Storage partition name: the lower-cased type name.
    pub fn collection(&self) -> String {
        self.name.to_lowercase()
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns true if the schema declares the given field
    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Validates the schema structure itself (not a document)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Schema name must not be empty".into());
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(format!("Field '{}' is declared twice", field.name));
            }

            if let Presence::Defaulted(default) = &field.presence {
                if !field.field_type.admits(&default.instantiate()) {
                    return Err(format!(
                        "Default for '{}' does not match type {}",
                        field.name, field.field_type
                    ));
                }
            }

            for constraint in &field.constraints {
                if !constraint.applies_to(&field.field_type) {
                    return Err(format!(
                        "Constraint '{}' cannot apply to {} field '{}'",
                        constraint.bound(),
                        field.field_type,
                        field.name
                    ));
                }
                if constraint.is_empty_range() {
                    return Err(format!(
                        "Constraint '{}' on '{}' admits no values",
                        constraint.bound(),
                        field.name
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("collection", &self.collection())?;
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        map.serialize_entry("fields", &self.fields)?;
        map.end()
    }
}
