//! Built-in record schemas
//!
//! Each schema maps to one collection, named by lower-casing the type name:
//! - User -> "user"
//! - Product -> "product"
//! - BlogPost -> "blogpost"

use super::types::{FieldDef, Schema};

/// Users collection schema
pub fn user() -> Schema {
    Schema::new(
        "User",
        vec![
            FieldDef::required_string("name").with_description("Full name"),
            FieldDef::required_string("email").with_description("Email address"),
            FieldDef::required_string("address").with_description("Address"),
            FieldDef::optional_int("age")
                .with_range(Some(0.0), Some(120.0))
                .with_description("Age in years"),
            FieldDef::defaulted_bool("is_active", true).with_description("Whether user is active"),
        ],
    )
    .with_description("Users collection schema")
}

/// Products collection schema
pub fn product() -> Schema {
    Schema::new(
        "Product",
        vec![
            FieldDef::required_string("title").with_description("Product title"),
            FieldDef::optional_string("description").with_description("Product description"),
            FieldDef::required_float("price")
                .with_range(Some(0.0), None)
                .with_description("Price in dollars"),
            FieldDef::required_string("category").with_description("Product category"),
            FieldDef::defaulted_bool("in_stock", true)
                .with_description("Whether product is in stock"),
        ],
    )
    .with_description("Products collection schema")
}

/// Blog posts collection schema
pub fn blog_post() -> Schema {
    Schema::new(
        "BlogPost",
        vec![
            FieldDef::required_string("title")
                .with_length(Some(1), Some(180))
                .with_description("Post title"),
            FieldDef::optional_string("summary")
                .with_length(None, Some(300))
                .with_description("Short summary"),
            FieldDef::required_string("content").with_description("Full content"),
            FieldDef::defaulted_string("author", "AI Writer").with_description("Author name"),
            FieldDef::string_list("tags").with_description("Tags for the post"),
            FieldDef::optional_string("cover_image")
                .with_description("Optional cover image URL"),
        ],
    )
    .with_description("Blog posts collection schema")
}

/// All built-in schemas, in a stable order.
pub fn all() -> Vec<Schema> {
    vec![user(), product(), blog_post()]
}

/// Finds a schema by type name or collection name, ignoring case.
pub fn find(name: &str) -> Option<Schema> {
    let wanted = name.trim().to_lowercase();
    all().into_iter().find(|schema| schema.collection() == wanted)
}
