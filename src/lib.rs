//! docschema - declarative record schemas for a schema-less document store
//!
//! Documents are validated against one of the built-in schemas (`User`,
//! `Product`, `BlogPost`) before a persistence layer stores them in the
//! collection named by the lower-cased type name.

pub mod cli;
pub mod config;
pub mod observability;
pub mod schema;

pub use schema::{
    BlogPost, Document, Product, Record, SchemaError, SchemaResult, User, ValidationError,
    Validator, ValidatorOptions, Violation, ViolationKind,
};
