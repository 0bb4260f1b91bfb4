//! Seed data: demo accounts, catalog, discounts, and generated orders.
//!
//! Seeds are what a fresh store loads for a key that has never been written.
//! The `reset_*` mutators persist them explicitly. Order generation is
//! deterministic apart from the clock-relative timestamps.

use chrono::{Duration, Timelike, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use bazaar_core::{
    AdminRole, AdminUser, AdminUserId, Category, CategoryId, Customer, DeliveryInfo, Discount,
    DiscountId, Order, OrderId, OrderLine, OrderStatus, PaymentMethod, Product, ProductId, StoreId,
    Tier,
};

/// Standard delivery fee on generated orders; every fourth ships free.
const SEED_DELIVERY_FEE: Decimal = dec!(5);

// ============================================================================
// Admin users
// ============================================================================

/// The platform superadmin plus two demo store owners.
#[must_use]
pub fn admin_users() -> Vec<AdminUser> {
    vec![
        AdminUser {
            id: AdminUserId::new("sa-1"),
            username: "superadmin".to_string(),
            password: "superadmin".to_string(),
            name: "Super Admin".to_string(),
            role: AdminRole::SuperAdmin,
            store_id: None,
            store_name: None,
            tier: None,
        },
        AdminUser {
            id: AdminUserId::new("admin-1"),
            username: "admin1".to_string(),
            password: "admin1".to_string(),
            name: "Admin One".to_string(),
            role: AdminRole::Admin,
            store_id: Some(StoreId::new("store-1")),
            store_name: Some("Fashion Hub".to_string()),
            tier: Some(Tier::Free),
        },
        AdminUser {
            id: AdminUserId::new("admin-2"),
            username: "admin2".to_string(),
            password: "admin2".to_string(),
            name: "Admin Two".to_string(),
            role: AdminRole::Admin,
            store_id: Some(StoreId::new("store-2")),
            store_name: Some("TechWorld".to_string()),
            tier: Some(Tier::Free),
        },
    ]
}

// ============================================================================
// Categories
// ============================================================================

/// The five stock categories.
#[must_use]
pub fn categories() -> Vec<Category> {
    [
        ("cat-001", "Apparel", "apparel", "Clothing and essentials"),
        ("cat-002", "Shoes", "shoes", "Sneakers, boots and more"),
        ("cat-003", "Bags", "bags", "Backpacks and travel bags"),
        ("cat-004", "Electronics", "electronics", "Gadgets and accessories"),
        ("cat-005", "Accessories", "accessories", "Small daily add-ons"),
    ]
    .into_iter()
    .map(|(id, name, slug, description)| Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        slug: slug.to_string(),
        description: description.to_string(),
    })
    .collect()
}

// ============================================================================
// Discounts
// ============================================================================

/// One demo discount per demo store.
#[must_use]
pub fn discounts() -> Vec<Discount> {
    vec![
        Discount {
            id: DiscountId::new("disc-1"),
            code: "FASHION20".to_string(),
            store_id: StoreId::new("store-1"),
            discount_value: dec!(20),
            quantity: 50,
            used_count: 0,
            active: true,
            created_at: Utc::now(),
        },
        Discount {
            id: DiscountId::new("disc-2"),
            code: "TECH15".to_string(),
            store_id: StoreId::new("store-2"),
            discount_value: dec!(15),
            quantity: 30,
            used_count: 0,
            active: true,
            created_at: Utc::now(),
        },
    ]
}

// ============================================================================
// Products
// ============================================================================

struct ProductSeed {
    id: &'static str,
    store_id: &'static str,
    title: &'static str,
    brand: &'static str,
    category: &'static str,
    price: Decimal,
    rating: Decimal,
    stock_quantity: u32,
    fast_delivery: bool,
    colors: &'static [&'static str],
    sizes: &'static [&'static str],
    description: &'static str,
}

const PRODUCT_SEEDS: [ProductSeed; 12] = [
    ProductSeed {
        id: "p-1",
        store_id: "store-1",
        title: "Classic Crewneck Tee",
        brand: "Northloom",
        category: "Apparel",
        price: dec!(25),
        rating: dec!(4.6),
        stock_quantity: 120,
        fast_delivery: true,
        colors: &["black", "white", "olive"],
        sizes: &["S", "M", "L", "XL"],
        description: "Midweight combed cotton tee with a reinforced collar.",
    },
    ProductSeed {
        id: "p-2",
        store_id: "store-1",
        title: "Relaxed Denim Jacket",
        brand: "Northloom",
        category: "Apparel",
        price: dec!(79),
        rating: dec!(4.8),
        stock_quantity: 35,
        fast_delivery: false,
        colors: &["indigo"],
        sizes: &["S", "M", "L"],
        description: "Stonewashed denim with an easy, boxy fit.",
    },
    ProductSeed {
        id: "p-3",
        store_id: "store-1",
        title: "Trail Runner Sneakers",
        brand: "Strideform",
        category: "Shoes",
        price: dec!(95),
        rating: dec!(4.7),
        stock_quantity: 48,
        fast_delivery: true,
        colors: &["grey", "blue"],
        sizes: &["40", "41", "42", "43", "44"],
        description: "Grippy lugged outsole and a breathable knit upper.",
    },
    ProductSeed {
        id: "p-4",
        store_id: "store-1",
        title: "Leather Chelsea Boots",
        brand: "Strideform",
        category: "Shoes",
        price: dec!(129),
        rating: dec!(4.5),
        stock_quantity: 22,
        fast_delivery: false,
        colors: &["brown", "black"],
        sizes: &["41", "42", "43", "44"],
        description: "Full-grain leather with elastic side gores.",
    },
    ProductSeed {
        id: "p-5",
        store_id: "store-1",
        title: "Canvas Weekender Bag",
        brand: "Dunewear",
        category: "Bags",
        price: dec!(64),
        rating: dec!(4.4),
        stock_quantity: 40,
        fast_delivery: true,
        colors: &["sand", "navy"],
        sizes: &[],
        description: "Waxed canvas duffel sized for a two-day trip.",
    },
    ProductSeed {
        id: "p-6",
        store_id: "store-1",
        title: "Commuter Backpack 20L",
        brand: "Dunewear",
        category: "Bags",
        price: dec!(58),
        rating: dec!(4.6),
        stock_quantity: 75,
        fast_delivery: true,
        colors: &["black", "forest"],
        sizes: &[],
        description: "Padded laptop sleeve and a weatherproof zip.",
    },
    ProductSeed {
        id: "p-7",
        store_id: "store-2",
        title: "Wireless Earbuds Pro",
        brand: "Auralis",
        category: "Electronics",
        price: dec!(89),
        rating: dec!(4.7),
        stock_quantity: 150,
        fast_delivery: true,
        colors: &["white", "black"],
        sizes: &[],
        description: "Active noise cancelling with a 30-hour case.",
    },
    ProductSeed {
        id: "p-8",
        store_id: "store-2",
        title: "Smart Fitness Band",
        brand: "Auralis",
        category: "Electronics",
        price: dec!(49),
        rating: dec!(4.3),
        stock_quantity: 200,
        fast_delivery: true,
        colors: &["black", "coral"],
        sizes: &[],
        description: "Heart rate, sleep tracking, and a ten-day battery.",
    },
    ProductSeed {
        id: "p-9",
        store_id: "store-2",
        title: "Mechanical Keyboard TKL",
        brand: "Keybright",
        category: "Electronics",
        price: dec!(119),
        rating: dec!(4.8),
        stock_quantity: 60,
        fast_delivery: false,
        colors: &["charcoal"],
        sizes: &[],
        description: "Hot-swappable switches and PBT keycaps.",
    },
    ProductSeed {
        id: "p-10",
        store_id: "store-2",
        title: "USB-C Hub 7-in-1",
        brand: "Portly",
        category: "Accessories",
        price: dec!(39),
        rating: dec!(4.2),
        stock_quantity: 90,
        fast_delivery: true,
        colors: &["silver"],
        sizes: &[],
        description: "HDMI, card readers, and pass-through charging.",
    },
    ProductSeed {
        id: "p-11",
        store_id: "store-2",
        title: "Laptop Sleeve 14\"",
        brand: "Portly",
        category: "Accessories",
        price: dec!(29),
        rating: dec!(4.5),
        stock_quantity: 110,
        fast_delivery: true,
        colors: &["grey", "black"],
        sizes: &[],
        description: "Wool-felt sleeve with a magnetic closure.",
    },
    ProductSeed {
        id: "p-12",
        store_id: "store-2",
        title: "4K Action Camera",
        brand: "Vistacore",
        category: "Electronics",
        price: dec!(149),
        rating: dec!(4.6),
        stock_quantity: 0,
        fast_delivery: false,
        colors: &["black"],
        sizes: &[],
        description: "Waterproof to 10 m with in-body stabilization.",
    },
];

/// The demo catalog: six products per demo store.
#[must_use]
pub fn products() -> Vec<Product> {
    PRODUCT_SEEDS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            store_id: StoreId::new(seed.store_id),
            title: seed.title.to_string(),
            brand: seed.brand.to_string(),
            category: seed.category.to_string(),
            price: seed.price,
            rating: seed.rating,
            in_stock: seed.stock_quantity > 0,
            fast_delivery: seed.fast_delivery,
            stock_quantity: seed.stock_quantity,
            colors: seed.colors.iter().map(ToString::to_string).collect(),
            sizes: seed.sizes.iter().map(ToString::to_string).collect(),
            image: format!("https://picsum.photos/seed/{}/800/600", seed.id),
            thumbnail: format!("https://picsum.photos/seed/{}/400/300", seed.id),
            description: seed.description.to_string(),
        })
        .collect()
}

// ============================================================================
// Orders
// ============================================================================

const CUSTOMER_NAMES: [&str; 25] = [
    "Anna Ivanova",
    "Dmitry Petrov",
    "Maria Sidorova",
    "Alexei Kuznetsov",
    "Olga Smirnova",
    "Sergei Volkov",
    "Elena Morozova",
    "Ivan Lebedev",
    "Natalia Kozlova",
    "Pavel Novikov",
    "Tatiana Fedorova",
    "Andrei Popov",
    "Yulia Egorova",
    "Roman Orlov",
    "Ekaterina Belova",
    "Mikhail Tarasov",
    "Ksenia Baranova",
    "Nikolai Kovalev",
    "Daria Sokolova",
    "Viktor Zhukov",
    "Irina Makarova",
    "Artem Golubev",
    "Svetlana Vinogradova",
    "Denis Gusev",
    "Polina Lazareva",
];

const CITIES: [&str; 8] = [
    "Moscow",
    "Saint Petersburg",
    "Novosibirsk",
    "Yekaterinburg",
    "Kazan",
    "Samara",
    "Omsk",
    "Chelyabinsk",
];

const PAYMENTS: [PaymentMethod; 3] = [
    PaymentMethod::Card,
    PaymentMethod::CashOnDelivery,
    PaymentMethod::Sbp,
];

fn leading_digits(n: u32, count: usize) -> String {
    n.to_string().chars().take(count).collect()
}

/// 25 generated orders in the legacy single-store shape (`store_id` only,
/// no per-line store ids), cycling through customers, cities, statuses, and
/// payment methods.
#[must_use]
pub fn orders() -> Vec<Order> {
    let products = products();
    let mut orders = Vec::with_capacity(25);

    for i in 0u32..25 {
        let name = CUSTOMER_NAMES
            .get(i as usize % CUSTOMER_NAMES.len())
            .copied()
            .unwrap_or_default();
        let email = format!(
            "{}@mail.ru",
            name.to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(".")
        );
        let phone = format!(
            "+7 (9{:02}) {}-{}-{}",
            10 + i,
            leading_digits(100 + i * 37, 3),
            leading_digits(10 + i * 13, 2),
            leading_digits(10 + i * 7, 2),
        );
        let city = CITIES.get(i as usize % CITIES.len()).copied().unwrap_or_default();
        let status = OrderStatus::ALL
            .get(i as usize % OrderStatus::ALL.len())
            .copied()
            .unwrap_or_default();
        let payment_method = PAYMENTS
            .get(i as usize % PAYMENTS.len())
            .copied()
            .unwrap_or_default();

        let line_count = 1 + (i % 3);
        let items: Vec<OrderLine> = products
            .iter()
            .cycle()
            .skip(i as usize)
            .take(line_count as usize)
            .zip(0u32..)
            .map(|(product, j)| OrderLine {
                product_id: product.id.clone(),
                quantity: 1 + (j % 3),
                store_id: None,
            })
            .collect();
        let store_id = products
            .get(i as usize % products.len())
            .map(|p| p.store_id.clone());

        let subtotal: Decimal = items
            .iter()
            .map(|item| {
                products
                    .iter()
                    .find(|p| p.id == item.product_id)
                    .map_or(Decimal::ZERO, |p| p.price * Decimal::from(item.quantity))
            })
            .sum();
        let discount = (subtotal * dec!(0.05)).round_dp(2);
        let delivery = if i % 4 == 0 {
            Decimal::ZERO
        } else {
            SEED_DELIVERY_FEE
        };
        let total = (subtotal - discount + delivery).round_dp(2);

        let base = Utc::now() - Duration::days(i64::from(i) * 2);
        let created_at = base
            .with_hour(9 + (i % 12))
            .and_then(|d| d.with_minute((i * 17) % 60))
            .and_then(|d| d.with_second(0))
            .and_then(|d| d.with_nanosecond(0))
            .unwrap_or(base);

        orders.push(Order {
            id: OrderId::new(format!("ORD-{}", 1_700_000_000_000_i64 + i64::from(i) * 86_400_000)),
            created_at,
            status,
            store_id,
            store_ids: Vec::new(),
            items,
            subtotal,
            discount,
            delivery,
            total,
            discount_code: None,
            discount_store_id: None,
            customer: Customer {
                name: name.to_string(),
                phone,
                email,
            },
            delivery_info: DeliveryInfo {
                city: city.to_string(),
                address: format!("ul. Lenina {}", 10 + i),
                comment: if i % 3 == 0 {
                    "Leave at the door".to_string()
                } else {
                    String::new()
                },
            },
            payment_method,
        });
    }

    orders
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_split_across_stores() {
        let products = products();
        assert_eq!(products.len(), 12);
        let store_1 = products
            .iter()
            .filter(|p| p.store_id.as_str() == "store-1")
            .count();
        assert_eq!(store_1, 6);
        // the action camera is the one out-of-stock item
        let camera = products.iter().find(|p| p.id.as_str() == "p-12").unwrap();
        assert!(!camera.in_stock);
        assert_eq!(products.iter().filter(|p| p.in_stock).count(), 11);
    }

    #[test]
    fn test_seed_users_and_discounts() {
        let users = admin_users();
        assert_eq!(users.len(), 3);
        let superadmin = users.first().unwrap();
        assert_eq!(superadmin.role, AdminRole::SuperAdmin);
        assert_eq!(superadmin.store_id, None);
        assert_eq!(superadmin.tier, None);

        let discounts = discounts();
        assert_eq!(discounts.len(), 2);
        assert!(discounts.iter().all(|d| d.active && d.used_count == 0));
    }

    #[test]
    fn test_generated_orders_first_entry() {
        let orders = orders();
        assert_eq!(orders.len(), 25);

        let first = orders.first().unwrap();
        assert_eq!(first.id.as_str(), "ORD-1700000000000");
        assert_eq!(first.status, OrderStatus::Created);
        assert_eq!(first.items.len(), 1);
        assert_eq!(first.items.first().unwrap().quantity, 1);
        assert_eq!(first.customer.name, "Anna Ivanova");
        assert_eq!(first.customer.email, "anna.ivanova@mail.ru");
        assert_eq!(first.customer.phone, "+7 (910) 100-10-10");
        assert_eq!(first.store_id.as_ref().unwrap().as_str(), "store-1");
        // free delivery on every fourth order, starting with the first
        assert_eq!(first.delivery, Decimal::ZERO);
        assert_eq!(first.subtotal, dec!(25));
        assert_eq!(first.discount, dec!(1.25));
        assert_eq!(first.total, dec!(23.75));
        assert_eq!(first.delivery_info.comment, "Leave at the door");
    }

    #[test]
    fn test_generated_orders_cycle_and_charge_delivery() {
        let orders = orders();
        let second = orders.get(1).unwrap();
        assert_eq!(second.status, OrderStatus::Accepted);
        assert_eq!(second.items.len(), 2);
        // p-2 x1 + p-3 x2
        assert_eq!(second.subtotal, dec!(269));
        assert_eq!(second.delivery, SEED_DELIVERY_FEE);
        assert_eq!(second.total, dec!(260.55));
        assert!(second.delivery_info.comment.is_empty());

        // legacy shape: no multi-store fields anywhere
        assert!(orders.iter().all(|o| o.store_ids.is_empty()));
        assert!(
            orders
                .iter()
                .flat_map(|o| o.items.iter())
                .all(|line| line.store_id.is_none())
        );
    }

    #[test]
    fn test_generated_order_statuses_cover_all_buckets() {
        let orders = orders();
        for status in OrderStatus::ALL {
            assert!(orders.iter().any(|o| o.status == status));
        }
    }
}
