//! File-backed state across store instances.

#![allow(clippy::unwrap_used)]

use bazaar_core::{OrderStatus, ProductId, Tier};
use bazaar_store::storage::FileBackend;
use bazaar_store::{AdminUserForm, Store};

fn open(dir: &std::path::Path) -> Store {
    Store::open(FileBackend::new(dir).unwrap())
}

#[test]
fn test_fresh_directory_reads_seeds_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(dir.path());

    let snapshot = store.snapshot();
    assert_eq!(snapshot.admin_products.len(), 12);
    assert_eq!(snapshot.admin_categories.len(), 5);
    assert_eq!(snapshot.admin_discounts.len(), 2);
    assert_eq!(snapshot.orders.len(), 25);
    assert!(snapshot.cart.is_empty());

    // opening alone persists nothing
    assert!(!dir.path().join("bazaar_cart.json").exists());
    assert!(!dir.path().join("bazaar_orders.json").exists());
}

#[test]
fn test_mutations_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let store = open(dir.path());
    store.add_to_cart(&ProductId::new("p-3"), 2).unwrap();
    store.toggle_wishlist(&ProductId::new("p-9")).unwrap();
    let order_id = store.snapshot().orders.last().unwrap().id.clone();
    store
        .update_order_status(&order_id, OrderStatus::Delivered)
        .unwrap();
    let user = store
        .create_admin_user(AdminUserForm {
            username: "survivor".to_string(),
            tier: Some(Tier::Silver),
            ..AdminUserForm::default()
        })
        .unwrap();
    drop(store);

    let reopened = open(dir.path());
    let snapshot = reopened.snapshot();
    assert_eq!(snapshot.cart.len(), 1);
    assert_eq!(snapshot.cart.first().unwrap().quantity, 2);
    assert!(reopened.is_in_wishlist(&ProductId::new("p-9")));
    assert_eq!(
        snapshot
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .unwrap()
            .status,
        OrderStatus::Delivered
    );
    let roster = &snapshot.admin_users;
    assert_eq!(roster.last().unwrap().id, user.id);
    assert_eq!(roster.last().unwrap().tier, Some(Tier::Silver));
}

#[test]
fn test_each_collection_is_its_own_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(dir.path());

    store.add_to_cart(&ProductId::new("p-1"), 1).unwrap();

    let cart_path = dir.path().join("bazaar_cart.json");
    assert!(cart_path.is_file());
    // a cart mutation does not touch the other keys
    assert!(!dir.path().join("bazaar_orders.json").exists());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(cart_path).unwrap()).unwrap();
    let lines = json.as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["productId"], "p-1");
    assert_eq!(lines[0]["quantity"], 1);
}

#[test]
fn test_corrupt_key_falls_back_without_failing_the_open() {
    let dir = tempfile::tempdir().unwrap();

    let store = open(dir.path());
    store.add_to_cart(&ProductId::new("p-1"), 1).unwrap();
    store.clear_orders().unwrap();
    drop(store);

    std::fs::write(dir.path().join("bazaar_orders.json"), "{not json").unwrap();

    let reopened = open(dir.path());
    let snapshot = reopened.snapshot();
    // unreadable orders fall back to the seed history; the intact cart loads
    assert_eq!(snapshot.orders.len(), 25);
    assert_eq!(snapshot.cart.len(), 1);
}

#[test]
fn test_session_survives_a_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let store = open(dir.path());
    let session = store.admin_login("admin2", "admin2").unwrap();
    drop(store);

    let reopened = open(dir.path());
    let restored = reopened.admin_session().unwrap();
    assert_eq!(restored.user_id, session.user_id);
    assert_eq!(restored.store_id.unwrap().as_str(), "store-2");
}
