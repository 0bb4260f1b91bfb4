//! Dashboard aggregates over the scoped order and product slices.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use bazaar_core::{Order, OrderStatus};

use crate::scope::ScopedState;

/// One row of the customer roll-up.
///
/// Customers are deduplicated by email, falling back to phone, then to the
/// order id itself for fully anonymous orders (which therefore never merge).
/// Blank contact fields render as "-".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStat {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub orders_count: usize,
    pub total_spent: Decimal,
}

/// The dashboard's headline numbers plus the customer roll-up.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub orders_count: usize,
    pub products_count: usize,
    /// Sum of order totals across the scoped slice, all statuses included.
    pub revenue: Decimal,
    pub delivered_count: usize,
    pub accepted_count: usize,
    /// Customers sorted by spend, biggest first.
    pub customers: Vec<CustomerStat>,
}

impl DashboardStats {
    #[must_use]
    pub fn compute(scoped: &ScopedState) -> Self {
        Self {
            orders_count: scoped.orders.len(),
            products_count: scoped.products.len(),
            revenue: scoped.orders.iter().map(|order| order.total).sum(),
            delivered_count: count_status(&scoped.orders, OrderStatus::Delivered),
            accepted_count: count_status(&scoped.orders, OrderStatus::Accepted),
            customers: roll_up_customers(&scoped.orders),
        }
    }
}

fn count_status(orders: &[Order], status: OrderStatus) -> usize {
    orders.iter().filter(|order| order.status == status).count()
}

fn dedup_key(order: &Order) -> String {
    let email = order.customer.email.trim();
    if !email.is_empty() {
        return email.to_string();
    }
    let phone = order.customer.phone.trim();
    if !phone.is_empty() {
        return phone.to_string();
    }
    order.id.as_str().to_string()
}

fn display_or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn roll_up_customers(orders: &[Order]) -> Vec<CustomerStat> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut customers: Vec<CustomerStat> = Vec::new();

    for order in orders {
        let key = dedup_key(order);
        let slot = *index.entry(key).or_insert_with(|| {
            customers.push(CustomerStat {
                name: if order.customer.name.trim().is_empty() {
                    "Unknown".to_string()
                } else {
                    order.customer.name.clone()
                },
                email: display_or_dash(&order.customer.email),
                phone: display_or_dash(&order.customer.phone),
                orders_count: 0,
                total_spent: Decimal::ZERO,
            });
            customers.len() - 1
        });
        if let Some(customer) = customers.get_mut(slot) {
            customer.orders_count += 1;
            customer.total_spent += order.total;
        }
    }

    customers.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
    customers
}
