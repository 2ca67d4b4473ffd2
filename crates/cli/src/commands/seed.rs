//! Seed the mock store's database file with the product catalog.
//!
//! The catalog is compiled into the binary. Every product gets a fresh
//! `createdAt`; users, carts and orders already in the file are kept.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::info;

const PRODUCTS: &str = include_str!("../../data/products.json");

/// Collections json-server expects in the database file.
const COLLECTIONS: [&str; 3] = ["users", "carts", "orders"];

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The database file could not be read or written.
    #[error("Could not access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The existing database file or the bundled catalog is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The database file is JSON but not an object.
    #[error("{0} does not contain a JSON object")]
    NotAnObject(String),
}

/// Write the bundled products into `db_path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written or holds
/// something other than a JSON object.
pub async fn products(db_path: &Path) -> Result<(), SeedError> {
    let db_display = db_path.display().to_string();
    let io_err = |source| SeedError::Io {
        path: db_display.clone(),
        source,
    };

    let existing = match tokio::fs::read_to_string(db_path).await {
        Ok(raw) => Some(raw),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(io_err(e)),
    };

    let db = build_database(existing.as_deref(), &db_display)?;
    let count = db
        .get("products")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    let mut out = serde_json::to_string_pretty(&db)?;
    out.push('\n');
    tokio::fs::write(db_path, out).await.map_err(io_err)?;

    info!(path = %db_display, products = count, "Seeded product catalog");
    Ok(())
}

/// Merge the bundled catalog into an existing database document.
fn build_database(existing: Option<&str>, path: &str) -> Result<Value, SeedError> {
    let mut db = match existing {
        Some(raw) => match serde_json::from_str(raw)? {
            Value::Object(map) => map,
            _ => return Err(SeedError::NotAnObject(path.to_string())),
        },
        None => Map::new(),
    };

    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut products: Vec<Value> = serde_json::from_str(PRODUCTS)?;
    for product in &mut products {
        if let Some(fields) = product.as_object_mut() {
            fields.insert("createdAt".to_string(), json!(created_at));
        }
    }

    db.insert("products".to_string(), Value::Array(products));
    for name in COLLECTIONS {
        db.entry(name).or_insert_with(|| json!([]));
    }
    Ok(Value::Object(db))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use grocerease_core::Product;

    use super::*;

    #[test]
    fn test_bundled_catalog_decodes() {
        let products: Vec<Product> = serde_json::from_str(PRODUCTS).unwrap();
        assert_eq!(products.len(), 52);
        assert!(products.iter().any(|p| p.has_offer()));
        assert!(products.iter().any(|p| p.best_seller));
    }

    #[test]
    fn test_fresh_database_has_all_collections() {
        let db = build_database(None, "db.json").unwrap();
        for name in ["products", "users", "carts", "orders"] {
            assert!(db[name].is_array(), "{name} missing");
        }
        assert!(db["products"][0]["createdAt"].is_string());
    }

    #[test]
    fn test_existing_records_are_kept() {
        let existing = r#"{
            "products": [{"id": 99}],
            "users": [{"id": 1, "username": "demo", "password": "demo123"}],
            "orders": [{"id": 5}]
        }"#;

        let db = build_database(Some(existing), "db.json").unwrap();

        assert_eq!(db["users"][0]["username"], "demo");
        assert_eq!(db["orders"][0]["id"], 5);
        assert!(db["carts"].as_array().unwrap().is_empty());
        assert_eq!(db["products"].as_array().unwrap().len(), 52);
    }

    #[test]
    fn test_rejects_non_object_file() {
        assert!(matches!(
            build_database(Some("[]"), "db.json"),
            Err(SeedError::NotAnObject(_))
        ));
    }

    #[tokio::test]
    async fn test_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");

        products(&path).await.unwrap();
        products(&path).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let db: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(db["products"].as_array().unwrap().len(), 52);
    }
}
