//! Schema validator for document validation
//!
//! Validation semantics:
//! - Required fields must be present and non-null
//! - Present values are coerced to the declared type (lax mode) or must
//!   match it exactly (strict mode)
//! - Coerced values must satisfy every declared constraint
//! - Absent optional fields are filled with their default
//! - Undeclared fields are dropped or rejected per policy
//!
//! Every violation is collected; a document is accepted only when there
//! are none. The validator never mutates its input and holds no state
//! besides its options.

use serde_json::{Map, Number, Value};

use super::catalog;
use super::errors::{SchemaError, SchemaResult, ValidationError, Violation};
use super::records::Record;
use super::types::{Constraint, FieldDef, FieldType, Presence, Schema, UnknownFieldPolicy};

/// A normalized document: every declared field present, in declaration order.
pub type Document = Map<String, Value>;

/// Options controlling validator leniency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// What to do with undeclared input keys
    pub unknown_fields: UnknownFieldPolicy,
    /// Whether compatible values (e.g. `"30"` for an int) are converted
    pub coerce: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Ignore,
            coerce: true,
        }
    }
}

impl ValidatorOptions {
    /// Exact types only; integers are still accepted for float fields.
    pub fn strict() -> Self {
        Self {
            coerce: false,
            ..Self::default()
        }
    }

    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }
}

/// Validator that enforces schema rules on documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    options: ValidatorOptions,
}

impl Validator {
    /// Creates a validator with the given options.
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ValidatorOptions {
        self.options
    }

    /// Validates a document against a schema.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` listing every violated constraint. A
    /// non-object input yields a single type mismatch on `$root`.
    pub fn validate(&self, schema: &Schema, input: &Value) -> Result<Document, ValidationError> {
        let obj = input.as_object().ok_or_else(|| {
            ValidationError::new(
                &schema.name,
                vec![Violation::type_mismatch("$root", "object", json_type_name(input))],
            )
        })?;

        self.validate_map(schema, obj)
    }

    /// Validates a key-value mapping against a schema.
    pub fn validate_map(
        &self,
        schema: &Schema,
        obj: &Map<String, Value>,
    ) -> Result<Document, ValidationError> {
        let mut document = Document::new();
        let mut violations = Vec::new();

        for field in &schema.fields {
            match self.validate_field(field, obj.get(&field.name)) {
                Ok(value) => {
                    document.insert(field.name.clone(), value);
                }
                Err(mut found) => violations.append(&mut found),
            }
        }

        if self.options.unknown_fields == UnknownFieldPolicy::Reject {
            violations.extend(
                obj.keys()
                    .filter(|key| !schema.declares(key))
                    .map(Violation::unknown_field),
            );
        }

        if violations.is_empty() {
            Ok(document)
        } else {
            Err(ValidationError::new(&schema.name, violations))
        }
    }

    /// Validates and decodes a typed record.
    pub fn validate_record<R: Record>(&self, input: &Value) -> SchemaResult<R> {
        let document = self.validate(&R::schema(), input)?;
        R::from_document(document)
    }

    /// Validates against a catalog schema looked up by name or collection.
    pub fn validate_collection(&self, collection: &str, input: &Value) -> SchemaResult<Document> {
        let schema = catalog::find(collection)
            .ok_or_else(|| SchemaError::UnknownSchema(collection.to_string()))?;
        Ok(self.validate(&schema, input)?)
    }

    /// Parses JSON text and validates it against a catalog schema.
    pub fn validate_str(&self, collection: &str, text: &str) -> SchemaResult<Document> {
        let input: Value = serde_json::from_str(text)
            .map_err(|e| SchemaError::MalformedInput(e.to_string()))?;
        self.validate_collection(collection, &input)
    }

    /// Validates a single field. Returns the normalized value on success.
    fn validate_field(&self, field: &FieldDef, value: Option<&Value>) -> Result<Value, Vec<Violation>> {
        let value = match value {
            None => return absent(field),
            Some(Value::Null) => return null(field),
            Some(v) => v,
        };

        if matches!(field.field_type, FieldType::Int) && exceeds_int_width(value, self.options.coerce) {
            return Err(vec![Violation::out_of_range(&field.name, &int_bound(field), value)]);
        }

        let coerced = self.coerce(&field.name, &field.field_type, value)?;

        let violations: Vec<Violation> = field
            .constraints
            .iter()
            .filter_map(|c| check_constraint(&field.name, c, &coerced))
            .collect();

        if violations.is_empty() {
            Ok(coerced)
        } else {
            Err(violations)
        }
    }

    /// Converts a value to the expected type.
    fn coerce(&self, path: &str, expected: &FieldType, value: &Value) -> Result<Value, Vec<Violation>> {
        let mismatch = || vec![Violation::type_mismatch(path, expected.type_name(), json_type_name(value))];

        match expected {
            FieldType::String => value.is_string().then(|| value.clone()).ok_or_else(mismatch),
            FieldType::Int => self.coerce_int(value).map(Value::from).ok_or_else(mismatch),
            FieldType::Float => self
                .coerce_float(value)
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(mismatch),
            FieldType::Bool => self.coerce_bool(value).map(Value::Bool).ok_or_else(mismatch),
            FieldType::Array { element_type } => {
                let items = value.as_array().ok_or_else(mismatch)?;
                let mut normalized = Vec::with_capacity(items.len());
                let mut violations = Vec::new();

                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, i);
                    match self.coerce(&item_path, element_type, item) {
                        Ok(v) => normalized.push(v),
                        Err(mut found) => violations.append(&mut found),
                    }
                }

                if violations.is_empty() {
                    Ok(Value::Array(normalized))
                } else {
                    Err(violations)
                }
            }
        }
    }

    fn coerce_int(&self, value: &Value) -> Option<i64> {
        if let Some(i) = value.as_i64() {
            return Some(i);
        }
        if !self.options.coerce {
            return None;
        }
        match value {
            Value::Number(n) => n.as_f64().and_then(integral_f64),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    fn coerce_float(&self, value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) if self.options.coerce => {
                s.trim().parse::<f64>().ok().filter(|f| f.is_finite())
            }
            _ => None,
        }
    }

    fn coerce_bool(&self, value: &Value) -> Option<bool> {
        if let Some(b) = value.as_bool() {
            return Some(b);
        }
        if !self.options.coerce {
            return None;
        }
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
                "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Handles a field missing from the input.
fn absent(field: &FieldDef) -> Result<Value, Vec<Violation>> {
    match &field.presence {
        Presence::Required => Err(vec![Violation::required_missing(&field.name)]),
        Presence::Optional => Ok(Value::Null),
        Presence::Defaulted(default) => Ok(default.instantiate()),
    }
}

/// Handles an explicit null in the input.
fn null(field: &FieldDef) -> Result<Value, Vec<Violation>> {
    match &field.presence {
        Presence::Required => Err(vec![Violation::required_missing(&field.name)]),
        Presence::Optional => Ok(Value::Null),
        Presence::Defaulted(_) => Err(vec![Violation::type_mismatch(
            &field.name,
            field.field_type.type_name(),
            "null",
        )]),
    }
}

/// Checks one constraint against a coerced value.
fn check_constraint(path: &str, constraint: &Constraint, value: &Value) -> Option<Violation> {
    match *constraint {
        Constraint::Range { min, max } => {
            let n = value.as_f64()?;
            let below = min.is_some_and(|lo| n < lo);
            let above = max.is_some_and(|hi| n > hi);
            (below || above).then(|| Violation::out_of_range(path, &constraint.bound(), value))
        }
        Constraint::Length { min, max } => {
            let len = value.as_str()?.chars().count();
            let below = min.is_some_and(|lo| len < lo);
            let above = max.is_some_and(|hi| len > hi);
            (below || above).then(|| Violation::length_out_of_range(path, &constraint.bound(), len))
        }
    }
}

/// Returns `f` as an i64 if it has no fractional part and fits.
fn integral_f64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.fract() == 0.0 && f >= -LIMIT && f < LIMIT).then(|| f as i64)
}

/// Returns true for a whole number that is an int by type but too wide for i64.
fn exceeds_int_width(value: &Value, coerce: bool) -> bool {
    match value {
        Value::Number(n) if n.is_u64() => !n.is_i64(),
        Value::Number(n) if coerce && !n.is_i64() => n
            .as_f64()
            .is_some_and(|f| f.fract() == 0.0 && integral_f64(f).is_none()),
        _ => false,
    }
}

/// The declared range of an int field, or the i64 range when none is declared.
fn int_bound(field: &FieldDef) -> String {
    field
        .constraints
        .iter()
        .find(|c| matches!(c, Constraint::Range { .. }))
        .map(Constraint::bound)
        .unwrap_or_else(|| format!("{} <= value <= {}", i64::MIN, i64::MAX))
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
