//! Inspect and manage the order history.

use bazaar_admin::{OrderBucket, OrderFilter, OrdersTable, ScopedState};
use bazaar_core::{OrderId, OrderStatus};
use bazaar_store::{Store, StoreError};

/// List orders through the admin workbench, scoped to the current session.
pub fn list(store: &Store, bucket: Option<OrderBucket>, query: &str, page: usize) {
    let scoped = ScopedState::project(&store.snapshot());
    let table = OrdersTable::project(
        &scoped.orders,
        &OrderFilter {
            bucket,
            query: query.to_string(),
            page,
            ..OrderFilter::default()
        },
    );
    tracing::info!(
        matches = table.total_matches,
        page = table.page,
        pages = table.page_count,
        pending = table.counts.pending,
        completed = table.counts.completed,
        "Orders"
    );
    for order in &table.rows {
        tracing::info!(
            id = %order.id,
            status = %order.status,
            total = %order.total,
            items = order.item_count(),
            "{} <{}>",
            order.customer.name,
            order.customer.email
        );
    }
}

/// # Errors
///
/// Returns an error if the order history could not be persisted.
pub fn set_status(store: &Store, order_id: &str, status: OrderStatus) -> Result<(), StoreError> {
    store.update_order_status(&OrderId::new(order_id), status)?;
    tracing::info!(id = order_id, status = %status, "Order status updated");
    Ok(())
}

/// # Errors
///
/// Returns an error if the order history could not be persisted.
pub fn delete(store: &Store, order_id: &str) -> Result<(), StoreError> {
    store.delete_order(&OrderId::new(order_id))?;
    tracing::info!(id = order_id, "Order deleted");
    Ok(())
}

/// # Errors
///
/// Returns an error if the order history could not be persisted.
pub fn clear(store: &Store) -> Result<(), StoreError> {
    store.clear_orders()?;
    tracing::info!("Order history cleared");
    Ok(())
}
