//! Admin panel operations: session, analytics, and user management.

use bazaar_admin::{DashboardStats, PlatformOverview, ScopedState, SessionView};
use bazaar_core::{AdminUserId, Tier};
use bazaar_store::{AdminUserForm, Store, StoreError};

/// # Errors
///
/// Returns [`StoreError::InvalidCredentials`] on a failed login, or a
/// persistence error.
pub fn login(store: &Store, username: &str, password: &str) -> Result<(), StoreError> {
    let session = store.admin_login(username, password)?;
    tracing::info!(
        username = %session.username,
        role = %session.role,
        store = session.store_name.as_deref().unwrap_or("-"),
        "Logged in"
    );
    Ok(())
}

/// # Errors
///
/// Returns an error if the session could not be persisted.
pub fn logout(store: &Store) -> Result<(), StoreError> {
    store.admin_logout()?;
    tracing::info!("Logged out");
    Ok(())
}

pub fn whoami(store: &Store) {
    let view = SessionView::project(&store.snapshot());
    match view.session {
        Some(session) => tracing::info!(
            username = %session.username,
            name = %session.name,
            role = %session.role,
            store = session.store_name.as_deref().unwrap_or("-"),
            tier = session.tier.map_or("-", Tier::name),
            "Current session"
        ),
        None => tracing::info!("Not logged in"),
    }
}

/// Dashboard stats over the current session's scope.
pub fn stats(store: &Store) {
    let snapshot = store.snapshot();
    let stats = DashboardStats::compute(&ScopedState::project(&snapshot));
    tracing::info!(
        orders = stats.orders_count,
        products = stats.products_count,
        revenue = %stats.revenue,
        delivered = stats.delivered_count,
        accepted = stats.accepted_count,
        "Dashboard"
    );
    for customer in stats.customers.iter().take(5) {
        tracing::info!(
            orders = customer.orders_count,
            spent = %customer.total_spent,
            "{} <{}>",
            customer.name,
            customer.email
        );
    }
}

/// The superadmin's per-store overview. Projected for whoever asks; the
/// panel itself gates the page by role.
pub fn platform(store: &Store) {
    let overview = PlatformOverview::project(&store.snapshot());
    tracing::info!(
        stores = overview.store_count,
        orders = overview.total_orders,
        revenue = %overview.total_revenue,
        "Platform"
    );
    for row in &overview.rows {
        tracing::info!(
            store = %row.store_name,
            tier = row.tier.name(),
            products = row.products_count,
            orders = row.orders_count,
            revenue = %row.revenue,
            fee = %row.platform_fee,
            payout = %row.payout,
            "Store row"
        );
    }
}

/// # Errors
///
/// Returns an error if the roster could not be persisted.
pub fn create_user(store: &Store, form: AdminUserForm) -> Result<(), StoreError> {
    let user = store.create_admin_user(form)?;
    tracing::info!(
        id = %user.id,
        username = %user.username,
        store_id = %user.store_id.as_ref().map_or("-", |id| id.as_str()),
        "Store owner created"
    );
    Ok(())
}

pub fn list_users(store: &Store) {
    for user in store.snapshot().admin_users.iter() {
        tracing::info!(
            id = %user.id,
            role = %user.role,
            store = user.store_name.as_deref().unwrap_or("-"),
            tier = user.tier.map_or("-", Tier::name),
            "{}",
            user.username
        );
    }
}

/// # Errors
///
/// Returns an error if the roster could not be persisted.
pub fn delete_user(store: &Store, user_id: &str) -> Result<(), StoreError> {
    store.delete_admin_user(&AdminUserId::new(user_id))?;
    tracing::info!(id = user_id, "Store owner deleted");
    Ok(())
}

/// # Errors
///
/// Returns [`StoreError::NotAStoreOwner`] unless a store owner is logged
/// in, or a persistence error.
pub fn buy_tier(store: &Store, tier: Tier) -> Result<(), StoreError> {
    store.buy_tier_for_current_store(tier)?;
    tracing::info!(tier = tier.name(), "Tier purchased");
    Ok(())
}
