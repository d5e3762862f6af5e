//! Typed records
//!
//! Each record is the typed form of a document accepted by its catalog
//! schema. Optional fields serialize as `null`, so a record converts back
//! to exactly the normalized document it was built from.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::catalog;
use super::errors::{SchemaError, SchemaResult};
use super::types::Schema;
use super::validator::{Document, Validator};

/// A record type backed by a catalog schema.
pub trait Record: Serialize + DeserializeOwned {
    /// Record type name
    const NAME: &'static str;

    /// Schema that documents of this type must satisfy
    fn schema() -> Schema;

    /// Storage partition name
    fn collection() -> String {
        Self::NAME.to_lowercase()
    }

    /// Validates untyped input with default options.
    fn validate(input: &Value) -> SchemaResult<Self> {
        Validator::default().validate_record(input)
    }

    /// Decodes an already-normalized document.
    fn from_document(document: Document) -> SchemaResult<Self> {
        serde_json::from_value(Value::Object(document)).map_err(|e| SchemaError::Codec {
            record: Self::NAME,
            reason: e.to_string(),
        })
    }

    /// Encodes the record as a normalized document.
    fn to_document(&self) -> SchemaResult<Document> {
        match serde_json::to_value(self) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(other) => Err(SchemaError::Codec {
                record: Self::NAME,
                reason: format!("expected object, encoded {}", other),
            }),
            Err(e) => Err(SchemaError::Codec {
                record: Self::NAME,
                reason: e.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub address: String,
    pub age: Option<i64>,
    pub is_active: bool,
}

impl Record for User {
    const NAME: &'static str = "User";

    fn schema() -> Schema {
        catalog::user()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

impl Record for Product {
    const NAME: &'static str = "Product";

    fn schema() -> Schema {
        catalog::product()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
}

impl Record for BlogPost {
    const NAME: &'static str = "BlogPost";

    fn schema() -> Schema {
        catalog::blog_post()
    }
}
