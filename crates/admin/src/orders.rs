//! The order workbench: status buckets, search, date range, sortable
//! columns, and row paging for the admin orders page.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use bazaar_core::{Order, OrderStatus};

/// Workbench tab an order falls into. Coarser than [`OrderStatus`]: anything
/// not yet delivered, cancelled, or refunded is pending work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBucket {
    Pending,
    Completed,
    Cancelled,
    Refunded,
}

impl OrderBucket {
    #[must_use]
    pub const fn of(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Delivered => Self::Completed,
            OrderStatus::Cancelled => Self::Cancelled,
            OrderStatus::Refunded => Self::Refunded,
            OrderStatus::Created | OrderStatus::Accepted => Self::Pending,
        }
    }
}

impl FromStr for OrderBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "refunded" => Ok(Self::Refunded),
            _ => Err(format!("invalid order bucket: {s}")),
        }
    }
}

/// Tab badge counts. Computed after search and date filtering so the tabs
/// agree with what switching to them would show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketCounts {
    pub all: usize,
    pub pending: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub refunded: usize,
}

/// Sortable workbench column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderColumn {
    Order,
    Customer,
    Phone,
    #[default]
    Date,
    Qty,
    /// Average unit price: `total / item count`, zero for empty orders.
    Unit,
    Total,
    Status,
}

impl FromStr for OrderColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "order" => Ok(Self::Order),
            "customer" => Ok(Self::Customer),
            "phone" => Ok(Self::Phone),
            "date" => Ok(Self::Date),
            "qty" => Ok(Self::Qty),
            "unit" => Ok(Self::Unit),
            "total" => Ok(Self::Total),
            "status" => Ok(Self::Status),
            _ => Err(format!("invalid order column: {s}")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

/// Workbench filter form. The `Default` filter matches every order.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Tab selection; `None` is the All tab.
    pub bucket: Option<OrderBucket>,
    /// Case-insensitive substring over order id, customer name, email,
    /// and phone.
    pub query: String,
    /// Inclusive creation-date lower bound.
    pub from: Option<NaiveDate>,
    /// Inclusive creation-date upper bound (whole day).
    pub to: Option<NaiveDate>,
    pub sort: OrderColumn,
    pub dir: SortDir,
    /// Requested 1-based page, clamped into range on projection.
    pub page: usize,
    pub rows_per_page: usize,
}

impl OrderFilter {
    fn matches(&self, order: &Order, query: &str) -> bool {
        if !query.is_empty() {
            let haystack = format!(
                "{} {} {} {}",
                order.id, order.customer.name, order.customer.email, order.customer.phone
            )
            .to_lowercase();
            if !haystack.contains(query) {
                return false;
            }
        }
        let date = order.created_at.date_naive();
        if self.from.is_some_and(|from| date < from) {
            return false;
        }
        if self.to.is_some_and(|to| date > to) {
            return false;
        }
        true
    }
}

/// One page of the workbench table.
#[derive(Debug, Clone)]
pub struct OrdersTable {
    pub rows: Vec<Order>,
    /// Matches on the selected tab, across all pages.
    pub total_matches: usize,
    /// The page actually served after clamping.
    pub page: usize,
    pub page_count: usize,
    pub counts: BucketCounts,
}

const DEFAULT_ROWS_PER_PAGE: usize = 10;

fn unit_price(order: &Order) -> Decimal {
    let qty = order.item_count();
    if qty == 0 {
        Decimal::ZERO
    } else {
        order.total / Decimal::from(qty)
    }
}

fn status_rank(status: OrderStatus) -> usize {
    OrderStatus::ALL
        .iter()
        .position(|s| *s == status)
        .unwrap_or(OrderStatus::ALL.len())
}

fn compare(a: &Order, b: &Order, column: OrderColumn) -> Ordering {
    match column {
        OrderColumn::Order => a.id.as_str().cmp(b.id.as_str()),
        OrderColumn::Customer => a
            .customer
            .name
            .to_lowercase()
            .cmp(&b.customer.name.to_lowercase()),
        OrderColumn::Phone => a.customer.phone.cmp(&b.customer.phone),
        OrderColumn::Date => a.created_at.cmp(&b.created_at),
        OrderColumn::Qty => a.item_count().cmp(&b.item_count()),
        OrderColumn::Unit => unit_price(a).cmp(&unit_price(b)),
        OrderColumn::Total => a.total.cmp(&b.total),
        OrderColumn::Status => status_rank(a.status).cmp(&status_rank(b.status)),
    }
}

impl OrdersTable {
    /// Project the workbench over an already-scoped order slice.
    #[must_use]
    pub fn project(orders: &[Order], filter: &OrderFilter) -> Self {
        let query = filter.query.trim().to_lowercase();
        let searched: Vec<&Order> = orders
            .iter()
            .filter(|order| filter.matches(order, &query))
            .collect();

        let mut counts = BucketCounts {
            all: searched.len(),
            ..BucketCounts::default()
        };
        for order in &searched {
            match OrderBucket::of(order.status) {
                OrderBucket::Pending => counts.pending += 1,
                OrderBucket::Completed => counts.completed += 1,
                OrderBucket::Cancelled => counts.cancelled += 1,
                OrderBucket::Refunded => counts.refunded += 1,
            }
        }

        let mut matches: Vec<&Order> = searched
            .into_iter()
            .filter(|order| {
                filter
                    .bucket
                    .is_none_or(|bucket| OrderBucket::of(order.status) == bucket)
            })
            .collect();
        matches.sort_by(|a, b| {
            let ordering = compare(a, b, filter.sort);
            match filter.dir {
                SortDir::Asc => ordering,
                SortDir::Desc => ordering.reverse(),
            }
        });

        let rows_per_page = if filter.rows_per_page == 0 {
            DEFAULT_ROWS_PER_PAGE
        } else {
            filter.rows_per_page
        };
        let total_matches = matches.len();
        let page_count = total_matches.div_ceil(rows_per_page).max(1);
        let page = filter.page.clamp(1, page_count);
        let rows = matches
            .into_iter()
            .skip((page - 1) * rows_per_page)
            .take(rows_per_page)
            .cloned()
            .collect();

        Self {
            rows,
            total_matches,
            page,
            page_count,
            counts,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_store::{Store, seed};
    use rust_decimal_macros::dec;

    use super::*;

    fn table(filter: &OrderFilter) -> OrdersTable {
        let orders = seed::orders();
        OrdersTable::project(&orders, filter)
    }

    #[test]
    fn test_buckets_partition_the_statuses() {
        assert_eq!(OrderBucket::of(OrderStatus::Created), OrderBucket::Pending);
        assert_eq!(OrderBucket::of(OrderStatus::Accepted), OrderBucket::Pending);
        assert_eq!(OrderBucket::of(OrderStatus::Delivered), OrderBucket::Completed);
        assert_eq!(OrderBucket::of(OrderStatus::Cancelled), OrderBucket::Cancelled);
        assert_eq!(OrderBucket::of(OrderStatus::Refunded), OrderBucket::Refunded);
    }

    #[test]
    fn test_counts_over_seed_orders() {
        // 25 seed orders cycle the 5 statuses evenly.
        let view = table(&OrderFilter::default());
        assert_eq!(view.counts.all, 25);
        assert_eq!(view.counts.pending, 10);
        assert_eq!(view.counts.completed, 5);
        assert_eq!(view.counts.cancelled, 5);
        assert_eq!(view.counts.refunded, 5);
    }

    #[test]
    fn test_bucket_tab_filters_rows_but_not_counts() {
        let view = table(&OrderFilter {
            bucket: Some(OrderBucket::Completed),
            ..OrderFilter::default()
        });
        assert_eq!(view.total_matches, 5);
        assert!(
            view.rows
                .iter()
                .all(|o| o.status == OrderStatus::Delivered)
        );
        assert_eq!(view.counts.all, 25);
    }

    #[test]
    fn test_query_searches_id_name_email_phone() {
        let by_name = table(&OrderFilter {
            query: "  IVANOVA ".to_string(),
            ..OrderFilter::default()
        });
        assert_eq!(by_name.total_matches, 1);

        let by_id = table(&OrderFilter {
            query: "ord-1700000000000".to_string(),
            ..OrderFilter::default()
        });
        assert_eq!(by_id.total_matches, 1);

        let by_email = table(&OrderFilter {
            query: "@mail.ru".to_string(),
            ..OrderFilter::default()
        });
        assert_eq!(by_email.total_matches, 25);

        let by_phone = table(&OrderFilter {
            query: "+7 (910)".to_string(),
            ..OrderFilter::default()
        });
        assert_eq!(by_phone.total_matches, 1);
    }

    #[test]
    fn test_query_narrows_the_tab_counts() {
        let view = table(&OrderFilter {
            query: "Ivanova".to_string(),
            ..OrderFilter::default()
        });
        assert_eq!(view.counts.all, 1);
        assert_eq!(view.counts.pending, 1);
        assert_eq!(view.counts.completed, 0);
    }

    #[test]
    fn test_date_range_inclusive() {
        let orders = seed::orders();
        let newest = orders.first().unwrap().created_at.date_naive();
        // Seed orders step back two days each; a [newest-2, newest] window
        // holds exactly the first two.
        let view = OrdersTable::project(
            &orders,
            &OrderFilter {
                from: Some(newest - chrono::Duration::days(2)),
                to: Some(newest),
                ..OrderFilter::default()
            },
        );
        assert_eq!(view.total_matches, 2);
    }

    #[test]
    fn test_sort_by_total_desc_and_asc() {
        let desc = table(&OrderFilter {
            sort: OrderColumn::Total,
            dir: SortDir::Desc,
            ..OrderFilter::default()
        });
        let first = desc.rows.first().unwrap().total;
        let last = table(&OrderFilter {
            sort: OrderColumn::Total,
            dir: SortDir::Asc,
            ..OrderFilter::default()
        })
        .rows
        .first()
        .unwrap()
        .total;
        assert!(first > last);
    }

    #[test]
    fn test_unit_price_handles_empty_orders() {
        let mut order = seed::orders().into_iter().next().unwrap();
        assert_eq!(unit_price(&order), order.total);
        order.items.clear();
        assert_eq!(unit_price(&order), Decimal::ZERO);
    }

    #[test]
    fn test_unit_price_divides_total_by_quantity() {
        let orders = Store::in_memory().snapshot().orders.as_ref().clone();
        let second = orders.get(1).unwrap();
        // 260.55 across 3 units
        assert_eq!(second.item_count(), 3);
        assert_eq!(unit_price(second), dec!(86.85));
    }

    #[test]
    fn test_paging_clamps_and_splits() {
        let view = table(&OrderFilter {
            rows_per_page: 10,
            page: 99,
            ..OrderFilter::default()
        });
        assert_eq!(view.page_count, 3);
        assert_eq!(view.page, 3);
        assert_eq!(view.rows.len(), 5);

        let empty = table(&OrderFilter {
            query: "no such order".to_string(),
            ..OrderFilter::default()
        });
        assert_eq!(empty.page_count, 1);
        assert_eq!(empty.page, 1);
        assert!(empty.rows.is_empty());
    }

    #[test]
    fn test_column_and_bucket_parsing() {
        assert_eq!("unit".parse::<OrderColumn>().unwrap(), OrderColumn::Unit);
        assert_eq!("Completed".parse::<OrderBucket>().unwrap(), OrderBucket::Completed);
        assert!("risk".parse::<OrderColumn>().is_err());
    }
}
