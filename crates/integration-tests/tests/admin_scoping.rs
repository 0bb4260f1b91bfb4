//! Per-store visibility, product quotas, and tier upgrades in the admin panel.

#![allow(clippy::unwrap_used)]

use bazaar_admin::{ScopedState, SessionView};
use bazaar_core::Tier;
use bazaar_store::{AdminUserForm, ProductForm, Store, StoreError};

fn product_form(title: &str) -> ProductForm {
    ProductForm {
        title: Some(title.to_string()),
        stock_quantity: Some(5),
        ..ProductForm::default()
    }
}

#[test]
fn test_store_owner_sees_only_their_store() {
    let store = Store::in_memory();
    store.admin_login("admin1", "admin1").unwrap();

    let scoped = ScopedState::project(&store.snapshot());
    assert_eq!(scoped.products.len(), 6);
    assert!(scoped.products.iter().all(|p| p.store_id.as_str() == "store-1"));
    assert_eq!(scoped.discounts.len(), 1);
    assert_eq!(scoped.discounts.first().unwrap().code, "FASHION20");
    // seed orders carry only the legacy store_id field
    assert_eq!(scoped.orders.len(), 13);
    assert!(
        scoped
            .orders
            .iter()
            .all(|o| o.store_id.as_ref().unwrap().as_str() == "store-1")
    );
}

#[test]
fn test_superadmin_and_logged_out_are_unscoped() {
    let store = Store::in_memory();

    let scoped = ScopedState::project(&store.snapshot());
    assert_eq!(scoped.products.len(), 12);
    assert_eq!(scoped.orders.len(), 25);

    store.admin_login("superadmin", "superadmin").unwrap();
    let scoped = ScopedState::project(&store.snapshot());
    assert_eq!(scoped.products.len(), 12);
    assert_eq!(scoped.orders.len(), 25);
    assert_eq!(scoped.discounts.len(), 2);
}

#[test]
fn test_quota_blocks_third_product_until_tier_upgrade() {
    let store = Store::in_memory();
    // a fresh owner starts with an empty store; the seeded ones are already
    // over the free cap
    store
        .create_admin_user(AdminUserForm {
            username: "newowner".to_string(),
            store_name: Some("Quota Shop".to_string()),
            ..AdminUserForm::default()
        })
        .unwrap();
    store.admin_login("newowner", "admin123").unwrap();

    store.upsert_admin_product(product_form("First")).unwrap();
    store.upsert_admin_product(product_form("Second")).unwrap();

    let before = store.snapshot();
    let err = store.upsert_admin_product(product_form("Third")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::ProductQuotaExceeded { max_products: 2, .. }
    ));
    assert_eq!(
        err.to_string(),
        "Your Free plan allows up to 2 products. Upgrade your tier to add more."
    );
    // a rejected create commits nothing
    assert_eq!(before.admin_products.len(), store.snapshot().admin_products.len());

    store.buy_tier_for_current_store(Tier::Bronze).unwrap();
    let view = SessionView::project(&store.snapshot());
    assert_eq!(view.tier, Some(Tier::Bronze));

    let product = store.upsert_admin_product(product_form("Third")).unwrap();
    assert_eq!(product.title, "Third");
}

#[test]
fn test_editing_an_existing_product_bypasses_the_quota() {
    let store = Store::in_memory();
    store.admin_login("admin1", "admin1").unwrap();

    // store-1 already has 6 products on a free tier; patches must still land
    let scoped = ScopedState::project(&store.snapshot());
    let existing = scoped.products.first().unwrap();
    let patched = store
        .upsert_admin_product(ProductForm {
            id: Some(existing.id.clone()),
            title: Some("Renamed".to_string()),
            ..ProductForm::default()
        })
        .unwrap();
    assert_eq!(patched.title, "Renamed");
    assert_eq!(patched.id, existing.id);
}

#[test]
fn test_buy_tier_requires_a_store_owner_session() {
    let store = Store::in_memory();

    let err = store.buy_tier_for_current_store(Tier::Gold).unwrap_err();
    assert!(matches!(err, StoreError::NotAStoreOwner));

    store.admin_login("superadmin", "superadmin").unwrap();
    let err = store.buy_tier_for_current_store(Tier::Gold).unwrap_err();
    assert_eq!(err.to_string(), "Only store owners can buy tiers.");
}

#[test]
fn test_quota_caps_per_tier() {
    assert_eq!(Tier::Free.plan().max_products, 2);
    assert_eq!(Tier::Bronze.plan().max_products, 10);
    assert_eq!(Tier::Silver.plan().max_products, 20);
    assert_eq!(Tier::Gold.plan().max_products, 100);
}
