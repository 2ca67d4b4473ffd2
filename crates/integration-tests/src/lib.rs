//! Integration test support for GrocerEase.
//!
//! [`MockStore`] is an in-process stand-in for the json-server REST store:
//! plain JSON collections, `?field=value` filters, `POST` to create and
//! `PUT /:collection/:id` to replace. Tests point the real
//! [`RestClient`](grocerease_storefront::api::RestClient) at it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p grocerease-integration-tests
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use grocerease_storefront::api::RestClient;
use serde_json::{Value, json};
use url::Url;

#[derive(Default)]
struct Db {
    collections: HashMap<String, Vec<Value>>,
    next_id: i64,
    failing: bool,
    requests: Vec<String>,
}

type Shared = Arc<Mutex<Db>>;

/// A json-server look-alike listening on a random local port.
///
/// Dropping the handle does not stop the server; it lives until the test's
/// runtime shuts down.
#[derive(Clone)]
pub struct MockStore {
    addr: SocketAddr,
    db: Shared,
}

impl MockStore {
    /// Start an empty store.
    pub async fn spawn() -> Self {
        let db = Shared::default();
        let app = Router::new()
            .route("/{collection}", get(list).post(create))
            .route("/{collection}/{id}", put(replace))
            .with_state(Arc::clone(&db));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock store");
        let addr = listener.local_addr().expect("mock store address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock store");
        });

        Self { addr, db }
    }

    /// Start a store holding [`products`] and [`users`].
    pub async fn seeded() -> Self {
        let store = Self::spawn().await;
        store.set_collection("products", products());
        store.set_collection("users", users());
        store
    }

    fn with<T>(&self, f: impl FnOnce(&mut Db) -> T) -> T {
        let mut db = self.db.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut db)
    }

    /// Base URL of the store.
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.addr)).expect("mock store url")
    }

    /// A client for this store.
    pub fn client(&self) -> RestClient {
        RestClient::with_base_url(self.url())
    }

    /// Make every request fail with 503 until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.with(|db| db.failing = failing);
    }

    /// Replace a collection's records.
    pub fn set_collection(&self, name: &str, records: Vec<Value>) {
        self.with(|db| {
            db.collections.insert(name.to_string(), records);
        });
    }

    /// Current records of a collection.
    pub fn collection(&self, name: &str) -> Vec<Value> {
        self.with(|db| db.collections.get(name).cloned().unwrap_or_default())
    }

    /// Requests served so far, as `METHOD /path`.
    pub fn requests(&self) -> Vec<String> {
        self.with(|db| db.requests.clone())
    }
}

fn unavailable() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "store unavailable").into_response()
}

fn id_matches(record: &Value, id: &str) -> bool {
    match record.get("id") {
        Some(Value::String(s)) => s == id,
        Some(other) => other.to_string() == id,
        None => false,
    }
}

fn field_matches(record: &Value, field: &str, expected: &str) -> bool {
    match record.get(field) {
        Some(Value::String(s)) => s == expected,
        Some(other) => other.to_string() == expected,
        None => false,
    }
}

async fn list(
    State(db): State<Shared>,
    Path(collection): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
) -> Response {
    let mut db = db.lock().unwrap_or_else(PoisonError::into_inner);
    db.requests.push(format!("GET /{collection}"));
    if db.failing {
        return unavailable();
    }

    let records: Vec<Value> = db
        .collections
        .get(&collection)
        .map(|records| {
            records
                .iter()
                .filter(|r| filters.iter().all(|(k, v)| field_matches(r, k, v)))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Json(records).into_response()
}

async fn create(
    State(db): State<Shared>,
    Path(collection): Path<String>,
    Json(mut record): Json<Value>,
) -> Response {
    let mut db = db.lock().unwrap_or_else(PoisonError::into_inner);
    db.requests.push(format!("POST /{collection}"));
    if db.failing {
        return unavailable();
    }

    db.next_id += 1;
    let id = db.next_id;
    if let Some(fields) = record.as_object_mut() {
        fields.entry("id").or_insert_with(|| json!(id));
    }
    db.collections
        .entry(collection)
        .or_default()
        .push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn replace(
    State(db): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
    Json(mut record): Json<Value>,
) -> Response {
    let mut db = db.lock().unwrap_or_else(PoisonError::into_inner);
    db.requests.push(format!("PUT /{collection}/{id}"));
    if db.failing {
        return unavailable();
    }

    let Some(slot) = db
        .collections
        .get_mut(&collection)
        .and_then(|records| records.iter_mut().find(|r| id_matches(r, &id)))
    else {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    };

    if let (Some(fields), Some(existing)) = (record.as_object_mut(), slot.get("id")) {
        fields.insert("id".to_string(), existing.clone());
    }
    *slot = record.clone();
    Json(record).into_response()
}

/// A small catalog in store format.
pub fn products() -> Vec<Value> {
    vec![
        json!({
            "id": 1, "name": "Basmati Rice (Premium)",
            "description": "Premium long grain basmati rice, 1 kg pack",
            "price": 4.5, "image": "", "category": "Grains & Pulses",
            "stock": 100, "rating": 4.8, "unit": "per kg", "bestSeller": true
        }),
        json!({
            "id": 2, "name": "Toor Dal (Split Pigeon Peas)",
            "description": "Fresh toor dal, rich in protein, 1 kg",
            "price": 2.2, "image": "", "category": "Grains & Pulses",
            "stock": 80, "rating": 4.6, "unit": "per kg", "discountPercentage": 15
        }),
        json!({
            "id": 8, "name": "Red Chili Powder",
            "description": "Spicy red chili powder, 200g",
            "price": 1.5, "image": "", "category": "Spices & Condiments",
            "stock": 110, "rating": 4.5, "unit": "per pack"
        }),
        json!({
            "id": 45, "name": "Salt (Iodized)",
            "description": "Iodized table salt, 1 kg",
            "price": 0.5, "image": "", "category": "Beverages",
            "stock": 200, "rating": 4.4, "unit": "per kg",
            "createdAt": "2026-10-01T09:30:00.000Z"
        }),
    ]
}

/// Credential records in store format.
pub fn users() -> Vec<Value> {
    vec![
        json!({
            "id": 1, "username": "demo", "password": "demo123",
            "email": "demo@grocerease.in", "name": "Demo User"
        }),
        json!({
            "id": 2, "username": "asha", "password": "chai",
            "email": "asha@example.in", "name": "Asha Rao"
        }),
    ]
}
