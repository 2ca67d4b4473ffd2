//! Cart manager against the HTTP store and the file cache.

#![allow(clippy::unwrap_used)]

use grocerease_core::{Cart, CartLine, Product, ProductId, UserId};
use grocerease_integration_tests::MockStore;
use grocerease_storefront::api::{RemoteStore, RestClient};
use grocerease_storefront::services::CartManager;
use grocerease_storefront::storage::{self, FileStore, keys};
use rust_decimal::Decimal;

async fn catalog(store: &MockStore) -> Vec<Product> {
    store.client().list_products().await.unwrap()
}

fn find(products: &[Product], id: i64) -> &Product {
    products.iter().find(|p| p.id == ProductId::new(id)).unwrap()
}

async fn cached_lines(local: &FileStore) -> Option<Vec<CartLine>> {
    storage::load_json(local, keys::CART).await.unwrap()
}

fn manager(store: &MockStore, local: &FileStore) -> CartManager<RestClient, FileStore> {
    CartManager::new(store.client(), local.clone())
}

// =============================================================================
// Remote Persistence
// =============================================================================

#[tokio::test]
async fn test_first_mutation_creates_record_then_replaces_it() {
    let store = MockStore::seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let local = FileStore::new(dir.path());
    let products = catalog(&store).await;

    let mut cart = manager(&store, &local);
    cart.set_user(Some(UserId::new(1))).await;
    cart.add(find(&products, 1), 2).await;
    cart.add(find(&products, 1), 1).await;

    let carts = store.collection("carts");
    assert_eq!(carts.len(), 1);
    assert_eq!(carts[0]["userId"], 1);
    assert_eq!(carts[0]["items"][0]["quantity"], 3);
    assert_eq!(carts[0]["items"][0]["name"], "Basmati Rice (Premium)");
    assert!(carts[0]["updatedAt"].is_string());

    let requests = store.requests();
    assert!(requests.contains(&"POST /carts".to_string()));
    assert!(requests.iter().any(|r| r.starts_with("PUT /carts/")));

    assert_eq!(cart.total(), Decimal::new(135, 1));
    assert_eq!(cached_lines(&local).await.unwrap()[0].quantity, 3);
}

#[tokio::test]
async fn test_new_manager_adopts_remote_cart() {
    let store = MockStore::seeded().await;
    let products = catalog(&store).await;

    let first_dir = tempfile::tempdir().unwrap();
    let mut first = manager(&store, &FileStore::new(first_dir.path()));
    first.set_user(Some(UserId::new(2))).await;
    first.add(find(&products, 2), 1).await;
    first.add(find(&products, 8), 4).await;

    // A different device: empty local cache, same user.
    let second_dir = tempfile::tempdir().unwrap();
    let mut second = manager(&store, &FileStore::new(second_dir.path()));
    second.set_user(Some(UserId::new(2))).await;

    assert_eq!(second.cart(), first.cart());
    assert_eq!(second.item_count(), 5);
}

#[tokio::test]
async fn test_remove_and_update_to_zero_are_persisted() {
    let store = MockStore::seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let local = FileStore::new(dir.path());
    let products = catalog(&store).await;

    let mut cart = manager(&store, &local);
    cart.set_user(Some(UserId::new(1))).await;
    cart.add(find(&products, 1), 1).await;
    cart.add(find(&products, 2), 1).await;
    cart.add(find(&products, 8), 1).await;

    cart.update_quantity(ProductId::new(2), 0).await;
    cart.remove(ProductId::new(8)).await;

    let items = store.collection("carts")[0]["items"].clone();
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["id"], 1);
}

// =============================================================================
// Degraded Operation
// =============================================================================

#[tokio::test]
async fn test_store_down_during_mutation_still_caches_locally() {
    let store = MockStore::seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let local = FileStore::new(dir.path());
    let products = catalog(&store).await;

    let mut cart = manager(&store, &local);
    cart.set_user(Some(UserId::new(1))).await;
    store.set_failing(true);

    let lines = cart.add(find(&products, 8), 2).await;

    assert_eq!(lines.len(), 1);
    assert!(!cart.is_loading());
    assert_eq!(cached_lines(&local).await.unwrap()[0].quantity, 2);
    store.set_failing(false);
    assert!(store.collection("carts").is_empty());
}

#[tokio::test]
async fn test_load_falls_back_to_file_cache() {
    let store = MockStore::seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let local = FileStore::new(dir.path());
    let products = catalog(&store).await;

    let mut cached = Cart::new();
    cached.add(find(&products, 45), 6);
    storage::save_json(&local, keys::CART, cached.lines()).await.unwrap();
    store.set_failing(true);

    let mut cart = manager(&store, &local);
    cart.set_user(Some(UserId::new(1))).await;

    assert_eq!(cart.cart(), &cached);
}

#[tokio::test]
async fn test_corrupt_cache_file_is_ignored() {
    let store = MockStore::seeded().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("grocerease_cart.json"), "[{\"id\":").unwrap();
    let local = FileStore::new(dir.path());

    let mut cart = manager(&store, &local);
    cart.set_user(None).await;

    assert!(cart.items().is_empty());
}

// =============================================================================
// Guests
// =============================================================================

#[tokio::test]
async fn test_guest_cart_survives_restart_without_store_writes() {
    let store = MockStore::seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let local = FileStore::new(dir.path());
    let products = catalog(&store).await;

    let mut cart = manager(&store, &local);
    cart.set_user(None).await;
    cart.add(find(&products, 1), 1).await;

    let mut restarted = manager(&store, &local);
    restarted.set_user(None).await;

    assert_eq!(restarted.item_count(), 1);
    assert!(!store.requests().iter().any(|r| r.contains("/carts")));
}
