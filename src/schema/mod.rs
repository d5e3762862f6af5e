//! Record schemas and the validator that enforces them
//!
//! # Design Principles
//!
//! - Validation is a pure function of schema, options and input
//! - Every violation is reported, not only the first
//! - A document is accepted whole or rejected whole
//! - Defaults are built per call and never shared
//! - Output documents list every declared field in declaration order

pub mod catalog;
mod errors;
mod records;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaResult, ValidationError, Violation, ViolationKind};
pub use records::{BlogPost, Product, Record, User};
pub use types::{
    Constraint, DefaultValue, FieldDef, FieldType, Presence, Schema, UnknownFieldPolicy,
};
pub use validator::{Document, Validator, ValidatorOptions};
