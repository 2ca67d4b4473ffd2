//! In-memory [`RemoteStore`] for unit tests.

use std::sync::{Arc, Mutex, PoisonError};

use grocerease_core::{Order, Product, ProductId, RecordId, UserId, UserRecord};

use crate::api::{ApiError, CartRecord, RemoteStore};

#[derive(Default)]
struct FakeState {
    products: Vec<Product>,
    users: Vec<UserRecord>,
    carts: Vec<CartRecord>,
    orders: Vec<Order>,
    fail_reads: bool,
    fail_writes: bool,
    product_fetches: usize,
    cart_writes: usize,
    next_id: i64,
}

/// Shared-state fake; clones see the same data.
#[derive(Clone, Default)]
pub struct FakeRemote {
    state: Arc<Mutex<FakeState>>,
}

fn unavailable(path: &str) -> ApiError {
    ApiError::Status {
        status: 503,
        path: path.to_string(),
    }
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<T>(&self, f: impl FnOnce(&mut FakeState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    pub fn set_products(&self, products: Vec<Product>) {
        self.with(|s| s.products = products);
    }

    pub fn set_users(&self, users: Vec<UserRecord>) {
        self.with(|s| s.users = users);
    }

    pub fn insert_cart(&self, mut record: CartRecord) {
        self.with(|s| {
            s.next_id += 1;
            record.id = Some(RecordId::Number(s.next_id));
            s.carts.push(record);
        });
    }

    pub fn fail_reads(&self, fail: bool) {
        self.with(|s| s.fail_reads = fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.with(|s| s.fail_writes = fail);
    }

    pub fn product_fetches(&self) -> usize {
        self.with(|s| s.product_fetches)
    }

    pub fn cart_writes(&self) -> usize {
        self.with(|s| s.cart_writes)
    }

    pub fn carts(&self) -> Vec<CartRecord> {
        self.with(|s| s.carts.clone())
    }

    pub fn orders(&self) -> Vec<Order> {
        self.with(|s| s.orders.clone())
    }
}

impl RemoteStore for FakeRemote {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.with(|s| {
            if s.fail_reads {
                return Err(unavailable("products"));
            }
            s.product_fetches += 1;
            Ok(s.products.clone())
        })
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.with(|s| {
            if s.fail_reads {
                return Err(unavailable("users"));
            }
            Ok(s.users.clone())
        })
    }

    async fn find_carts(&self, user_id: UserId) -> Result<Vec<CartRecord>, ApiError> {
        self.with(|s| {
            if s.fail_reads {
                return Err(unavailable("carts"));
            }
            Ok(s.carts.iter().filter(|c| c.user_id == user_id).cloned().collect())
        })
    }

    async fn create_cart(&self, cart: &CartRecord) -> Result<CartRecord, ApiError> {
        self.with(|s| {
            if s.fail_writes {
                return Err(unavailable("carts"));
            }
            s.next_id += 1;
            s.cart_writes += 1;
            let mut record = cart.clone();
            record.id = Some(RecordId::Number(s.next_id));
            s.carts.push(record.clone());
            Ok(record)
        })
    }

    async fn replace_cart(&self, id: &RecordId, cart: &CartRecord) -> Result<CartRecord, ApiError> {
        self.with(|s| {
            if s.fail_writes {
                return Err(unavailable("carts"));
            }
            let slot = s
                .carts
                .iter_mut()
                .find(|c| c.id.as_ref() == Some(id))
                .ok_or_else(|| ApiError::Status {
                    status: 404,
                    path: format!("carts/{id}"),
                })?;
            let mut record = cart.clone();
            record.id = Some(id.clone());
            *slot = record.clone();
            s.cart_writes += 1;
            Ok(record)
        })
    }

    async fn list_orders(&self, user_id: UserId) -> Result<Vec<Order>, ApiError> {
        self.with(|s| {
            if s.fail_reads {
                return Err(unavailable("orders"));
            }
            Ok(s.orders.iter().filter(|o| o.user_id == user_id).cloned().collect())
        })
    }

    async fn create_order(&self, order: &Order) -> Result<Order, ApiError> {
        self.with(|s| {
            if s.fail_writes {
                return Err(unavailable("orders"));
            }
            s.next_id += 1;
            let mut record = order.clone();
            record.id = Some(RecordId::Number(s.next_id));
            s.orders.push(record.clone());
            Ok(record)
        })
    }
}

/// A plain product with the given id and dollar price.
pub fn product(id: i64, price: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        description: String::new(),
        price: price.parse().unwrap_or_default(),
        image: String::new(),
        category: "Grains & Pulses".to_string(),
        stock: 50,
        rating: 4.0,
        unit: "per kg".to_string(),
        best_seller: false,
        discount_percentage: None,
        discount: None,
        created_at: None,
    }
}

/// A credential record.
pub fn user(id: i64, username: &str, password: &str) -> UserRecord {
    UserRecord {
        id: UserId::new(id),
        username: username.to_string(),
        password: Some(password.to_string()),
        email: format!("{username}@grocerease.in"),
        name: username.to_string(),
    }
}
