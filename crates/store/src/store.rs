//! The reactive store: one context object owning every collection.
//!
//! Mutators follow a fixed sequence: compute the next collection value,
//! persist it under its storage key, commit a rebuilt snapshot, then notify
//! subscribers. A failed persist aborts before the commit, so readers and
//! subscribers never observe state that is not on disk.
//!
//! Subscribers run synchronously on the mutating thread, after the state
//! lock is released. A callback may call back into the store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;

use bazaar_core::{
    AdminRole, AdminSession, AdminUser, AdminUserId, Banner, BannerId, CartLine, Category,
    CategoryId, Discount, DiscountId, Order, OrderId, OrderStatus, Product, ProductId,
    ShopperProfile, StoreId, Tier,
};

use crate::error::{Result, StorageError, StoreError};
use crate::forms::{
    AdminUserForm, AdminUserPatch, BannerForm, BannerPatch, CategoryForm, DiscountForm, OrderDraft,
    ProductForm, ProfilePatch, SignInDetails,
};
use crate::seed;
use crate::snapshot::{Counts, Snapshot};
use crate::storage::{MemoryBackend, StorageBackend, keys};

/// Fallback store for records created without an owning store in scope.
const DEFAULT_STORE_ID: &str = "store-1";

/// Category products fall back to when theirs is deleted or unset.
const DEFAULT_CATEGORY: &str = "Accessories";

type Callback = Arc<dyn Fn(&Arc<Snapshot>) + Send + Sync>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

struct StoreInner {
    backend: Box<dyn StorageBackend>,
    snapshot: Mutex<Arc<Snapshot>>,
    subscribers: Mutex<Subscribers>,
    /// Last minted millisecond timestamp; ids must stay unique even when
    /// two records are created within the same millisecond.
    id_clock: Mutex<i64>,
}

impl StoreInner {
    fn lock_state(&self) -> MutexGuard<'_, Arc<Snapshot>> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, Subscribers> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to the shared store context. Cloning shares the same state.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

/// Guard returned by [`Store::subscribe`]. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes its callback"]
pub struct Subscription {
    id: u64,
    inner: Weak<StoreInner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock_subscribers().entries.retain(|(id, _)| *id != self.id);
        }
    }
}

fn load_or<T: DeserializeOwned>(
    backend: &dyn StorageBackend,
    key: &str,
    default: impl FnOnce() -> T,
) -> T {
    match backend.load(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "Ignoring unreadable stored value");
                default()
            }
        },
        Ok(None) => default(),
        Err(err) => {
            tracing::warn!(key, error = %err, "Storage read failed, using default");
            default()
        }
    }
}

impl Store {
    // ========================================================================
    // Construction and observation
    // ========================================================================

    /// Open a store over `backend`, loading every persisted collection.
    ///
    /// Missing or unreadable keys fall back to their defaults (seed data for
    /// the catalog collections, empty state for the shopper's). Nothing is
    /// written back until the first mutation.
    pub fn open(backend: impl StorageBackend + 'static) -> Self {
        let backend: Box<dyn StorageBackend> = Box::new(backend);
        let snapshot = Snapshot {
            cart: Arc::new(load_or(backend.as_ref(), keys::CART, Vec::new)),
            wishlist: Arc::new(load_or(backend.as_ref(), keys::WISHLIST, Vec::new)),
            auth: Arc::new(load_or(backend.as_ref(), keys::AUTH, ShopperProfile::default)),
            orders: Arc::new(load_or(backend.as_ref(), keys::ORDERS, seed::orders)),
            admin_products: Arc::new(load_or(
                backend.as_ref(),
                keys::ADMIN_PRODUCTS,
                seed::products,
            )),
            admin_categories: Arc::new(load_or(
                backend.as_ref(),
                keys::ADMIN_CATEGORIES,
                seed::categories,
            )),
            admin_users: Arc::new(load_or(backend.as_ref(), keys::ADMIN_USERS, seed::admin_users)),
            admin_session: Arc::new(load_or(backend.as_ref(), keys::ADMIN_SESSION, || None)),
            admin_discounts: Arc::new(load_or(
                backend.as_ref(),
                keys::ADMIN_DISCOUNTS,
                seed::discounts,
            )),
            banners: Arc::new(load_or(backend.as_ref(), keys::BANNERS, Vec::new)),
            highlights: Arc::new(load_or(backend.as_ref(), keys::HIGHLIGHTS, Default::default)),
        };
        Self {
            inner: Arc::new(StoreInner {
                backend,
                snapshot: Mutex::new(Arc::new(snapshot)),
                subscribers: Mutex::new(Subscribers::default()),
                id_clock: Mutex::new(0),
            }),
        }
    }

    /// Open a store over a fresh [`MemoryBackend`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::open(MemoryBackend::new())
    }

    /// The current snapshot.
    ///
    /// Returns the same `Arc` until a mutation commits, so callers can use
    /// [`Arc::ptr_eq`] to skip work when nothing changed.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.inner.lock_state())
    }

    /// Register `callback` to run after every committed mutation.
    ///
    /// The callback receives the fresh snapshot and runs synchronously on
    /// the mutating thread, outside the store's locks. Keep the returned
    /// [`Subscription`] alive for as long as the callback should fire.
    pub fn subscribe(&self, callback: impl Fn(&Arc<Snapshot>) + Send + Sync + 'static) -> Subscription {
        let mut subscribers = self.inner.lock_subscribers();
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.entries.push((id, Arc::new(callback)));
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Badge counts for the current snapshot.
    #[must_use]
    pub fn counts(&self) -> Counts {
        self.snapshot().counts()
    }

    /// Whether `product_id` is currently wishlisted.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.snapshot().is_in_wishlist(product_id)
    }

    /// The current admin session, if someone is logged in.
    #[must_use]
    pub fn admin_session(&self) -> Option<AdminSession> {
        self.snapshot().admin_session.as_ref().clone()
    }

    /// Resolve a promo code without consuming a redemption.
    #[must_use]
    pub fn validate_discount_code(&self, code: &str) -> Option<Discount> {
        self.snapshot().validate_discount_code(code).cloned()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Serialize `value` and write it under `key`. Called before commit, so
    /// an error here leaves the store on its previous snapshot.
    fn persist<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).map_err(StorageError::from)?;
        self.inner.backend.save(key, &json)?;
        Ok(())
    }

    /// Swap in `next` as the current snapshot, release the state lock, then
    /// notify subscribers with the fresh snapshot.
    fn finish(&self, mut guard: MutexGuard<'_, Arc<Snapshot>>, next: Snapshot) {
        let fresh = Arc::new(next);
        *guard = Arc::clone(&fresh);
        drop(guard);

        let callbacks: Vec<Callback> = self
            .inner
            .lock_subscribers()
            .entries
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(&fresh);
        }
    }

    /// Mint a unique millisecond timestamp for record ids. Strictly
    /// increasing even when called twice within one millisecond.
    fn mint_millis(&self) -> i64 {
        let mut last = self
            .inner
            .id_clock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let now = Utc::now().timestamp_millis();
        let minted = if now > *last { now } else { *last + 1 };
        *last = minted;
        minted
    }

    // ========================================================================
    // Cart
    // ========================================================================

    /// Add `quantity` of a product to the cart, merging into an existing
    /// line when there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be persisted.
    pub fn add_to_cart(&self, product_id: &ProductId, quantity: u32) -> Result<()> {
        let guard = self.inner.lock_state();
        let mut cart: Vec<CartLine> = guard.cart.as_ref().clone();
        match cart.iter_mut().find(|line| &line.product_id == product_id) {
            Some(line) => line.quantity += quantity,
            None => cart.push(CartLine::new(product_id.clone(), quantity)),
        }
        self.persist(keys::CART, &cart)?;
        let next = Snapshot {
            cart: Arc::new(cart),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Set a line's quantity. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be persisted.
    pub fn update_cart_quantity(&self, product_id: &ProductId, quantity: u32) -> Result<()> {
        let guard = self.inner.lock_state();
        let cart: Vec<CartLine> = guard
            .cart
            .iter()
            .map(|line| {
                if &line.product_id == product_id {
                    CartLine::new(line.product_id.clone(), quantity)
                } else {
                    line.clone()
                }
            })
            .filter(|line| line.quantity > 0)
            .collect();
        self.persist(keys::CART, &cart)?;
        let next = Snapshot {
            cart: Arc::new(cart),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Remove a product's line from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be persisted.
    pub fn remove_from_cart(&self, product_id: &ProductId) -> Result<()> {
        let guard = self.inner.lock_state();
        let cart: Vec<CartLine> = guard
            .cart
            .iter()
            .filter(|line| &line.product_id != product_id)
            .cloned()
            .collect();
        self.persist(keys::CART, &cart)?;
        let next = Snapshot {
            cart: Arc::new(cart),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be persisted.
    pub fn clear_cart(&self) -> Result<()> {
        let guard = self.inner.lock_state();
        let cart: Vec<CartLine> = Vec::new();
        self.persist(keys::CART, &cart)?;
        let next = Snapshot {
            cart: Arc::new(cart),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    // ========================================================================
    // Wishlist
    // ========================================================================

    /// Add the product to the wishlist, or remove it if already there.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist could not be persisted.
    pub fn toggle_wishlist(&self, product_id: &ProductId) -> Result<()> {
        let guard = self.inner.lock_state();
        let mut wishlist: Vec<ProductId> = guard.wishlist.as_ref().clone();
        if let Some(index) = wishlist.iter().position(|id| id == product_id) {
            wishlist.remove(index);
        } else {
            wishlist.push(product_id.clone());
        }
        self.persist(keys::WISHLIST, &wishlist)?;
        let next = Snapshot {
            wishlist: Arc::new(wishlist),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    // ========================================================================
    // Shopper auth
    // ========================================================================

    /// Sign the shopper in, overwriting the whole profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile could not be persisted.
    pub fn sign_in(&self, details: SignInDetails) -> Result<()> {
        let guard = self.inner.lock_state();
        let auth = ShopperProfile {
            is_authenticated: true,
            name: details.name,
            phone: details.phone,
            email: details.email,
        };
        self.persist(keys::AUTH, &auth)?;
        let next = Snapshot {
            auth: Arc::new(auth),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Sign the shopper out, resetting the profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile could not be persisted.
    pub fn sign_out(&self) -> Result<()> {
        let guard = self.inner.lock_state();
        let auth = ShopperProfile::default();
        self.persist(keys::AUTH, &auth)?;
        let next = Snapshot {
            auth: Arc::new(auth),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Patch profile fields, leaving the sign-in flag alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile could not be persisted.
    pub fn update_profile(&self, patch: ProfilePatch) -> Result<()> {
        let guard = self.inner.lock_state();
        let mut auth = guard.auth.as_ref().clone();
        if let Some(name) = patch.name {
            auth.name = name;
        }
        if let Some(phone) = patch.phone {
            auth.phone = phone;
        }
        if let Some(email) = patch.email {
            auth.email = email;
        }
        self.persist(keys::AUTH, &auth)?;
        let next = Snapshot {
            auth: Arc::new(auth),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Create an order from a checkout draft and prepend it to the history.
    ///
    /// The store assigns the `ORD-<millis>` id, the creation timestamp, and
    /// the initial [`OrderStatus::Created`] status.
    ///
    /// # Errors
    ///
    /// Returns an error if the order history could not be persisted.
    pub fn create_order(&self, draft: OrderDraft) -> Result<Order> {
        let guard = self.inner.lock_state();
        let order = Order {
            id: OrderId::new(format!("ORD-{}", self.mint_millis())),
            created_at: Utc::now(),
            status: OrderStatus::Created,
            store_id: draft.store_id,
            store_ids: draft.store_ids,
            items: draft.items,
            subtotal: draft.subtotal,
            discount: draft.discount,
            delivery: draft.delivery,
            total: draft.total,
            discount_code: draft.discount_code,
            discount_store_id: draft.discount_store_id,
            customer: draft.customer,
            delivery_info: draft.delivery_info,
            payment_method: draft.payment_method,
        };
        let mut orders: Vec<Order> = guard.orders.as_ref().clone();
        orders.insert(0, order.clone());
        self.persist(keys::ORDERS, &orders)?;
        let next = Snapshot {
            orders: Arc::new(orders),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(order)
    }

    /// Set an order's status. An unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the order history could not be persisted.
    pub fn update_order_status(&self, order_id: &OrderId, status: OrderStatus) -> Result<()> {
        let guard = self.inner.lock_state();
        let orders: Vec<Order> = guard
            .orders
            .iter()
            .map(|order| {
                if &order.id == order_id {
                    let mut order = order.clone();
                    order.status = status;
                    order
                } else {
                    order.clone()
                }
            })
            .collect();
        self.persist(keys::ORDERS, &orders)?;
        let next = Snapshot {
            orders: Arc::new(orders),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Delete an order from the history.
    ///
    /// # Errors
    ///
    /// Returns an error if the order history could not be persisted.
    pub fn delete_order(&self, order_id: &OrderId) -> Result<()> {
        let guard = self.inner.lock_state();
        let orders: Vec<Order> = guard
            .orders
            .iter()
            .filter(|order| &order.id != order_id)
            .cloned()
            .collect();
        self.persist(keys::ORDERS, &orders)?;
        let next = Snapshot {
            orders: Arc::new(orders),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Delete every order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order history could not be persisted.
    pub fn clear_orders(&self) -> Result<()> {
        let guard = self.inner.lock_state();
        let orders: Vec<Order> = Vec::new();
        self.persist(keys::ORDERS, &orders)?;
        let next = Snapshot {
            orders: Arc::new(orders),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Replace the order history with the generated demo orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the order history could not be persisted.
    pub fn reset_orders(&self) -> Result<()> {
        let guard = self.inner.lock_state();
        let orders = seed::orders();
        self.persist(keys::ORDERS, &orders)?;
        let next = Snapshot {
            orders: Arc::new(orders),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    // ========================================================================
    // Admin products
    // ========================================================================

    /// Create or patch a catalog product.
    ///
    /// A form with a known id patches that product field-wise (`in_stock` is
    /// recomputed when the stock quantity changes). Any other form creates a
    /// product with defaults for missing fields and prepends it. Creation by
    /// a store-owner session is subject to the tier's product quota.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProductQuotaExceeded`] when the session's store
    /// is at its tier cap, or a storage error if persisting fails. Neither
    /// commits any change.
    pub fn upsert_admin_product(&self, form: ProductForm) -> Result<Product> {
        let guard = self.inner.lock_state();

        if let Some(current) = form
            .id
            .as_ref()
            .and_then(|id| guard.admin_products.iter().find(|p| &p.id == id))
        {
            let mut product = current.clone();
            apply_product_patch(&mut product, &form);
            let admin_products: Vec<Product> = guard
                .admin_products
                .iter()
                .map(|p| {
                    if p.id == product.id {
                        product.clone()
                    } else {
                        p.clone()
                    }
                })
                .collect();
            self.persist(keys::ADMIN_PRODUCTS, &admin_products)?;
            let next = Snapshot {
                admin_products: Arc::new(admin_products),
                ..(**guard).clone()
            };
            self.finish(guard, next);
            return Ok(product);
        }

        // Quota applies only to store-owner sessions; the superadmin and
        // headless callers create freely.
        let session = guard.admin_session.as_ref().as_ref();
        if let Some(session) = session {
            if session.role == AdminRole::Admin {
                if let Some(store_id) = session.store_id.as_ref() {
                    let plan = session.tier.unwrap_or_default().plan();
                    let count = guard
                        .admin_products
                        .iter()
                        .filter(|p| &p.store_id == store_id)
                        .count();
                    if count >= plan.max_products {
                        return Err(StoreError::ProductQuotaExceeded {
                            plan: plan.name,
                            max_products: plan.max_products,
                        });
                    }
                }
            }
        }

        let stock_quantity = form.stock_quantity.unwrap_or(0);
        let image = form.image.unwrap_or_default();
        let product = Product {
            id: ProductId::new(format!("p-{}", self.mint_millis())),
            store_id: form
                .store_id
                .or_else(|| session.and_then(|s| s.store_id.clone()))
                .unwrap_or_else(|| StoreId::new(DEFAULT_STORE_ID)),
            title: form.title.unwrap_or_else(|| "New product".to_string()),
            brand: form.brand.unwrap_or_else(|| "Brand".to_string()),
            category: form
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            price: form.price.unwrap_or(Decimal::ZERO),
            rating: form.rating.unwrap_or(Decimal::ZERO),
            in_stock: stock_quantity > 0,
            fast_delivery: form.fast_delivery.unwrap_or(false),
            stock_quantity,
            colors: form.colors.unwrap_or_default(),
            sizes: form.sizes.unwrap_or_default(),
            thumbnail: form.thumbnail.unwrap_or_else(|| image.clone()),
            image,
            description: form.description.unwrap_or_default(),
        };
        let mut admin_products: Vec<Product> = guard.admin_products.as_ref().clone();
        admin_products.insert(0, product.clone());
        self.persist(keys::ADMIN_PRODUCTS, &admin_products)?;
        let next = Snapshot {
            admin_products: Arc::new(admin_products),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(product)
    }

    /// Delete a product from the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog could not be persisted.
    pub fn delete_admin_product(&self, product_id: &ProductId) -> Result<()> {
        let guard = self.inner.lock_state();
        let admin_products: Vec<Product> = guard
            .admin_products
            .iter()
            .filter(|p| &p.id != product_id)
            .cloned()
            .collect();
        self.persist(keys::ADMIN_PRODUCTS, &admin_products)?;
        let next = Snapshot {
            admin_products: Arc::new(admin_products),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Restore the seed catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog could not be persisted.
    pub fn reset_admin_products(&self) -> Result<()> {
        let guard = self.inner.lock_state();
        let admin_products = seed::products();
        self.persist(keys::ADMIN_PRODUCTS, &admin_products)?;
        let next = Snapshot {
            admin_products: Arc::new(admin_products),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    // ========================================================================
    // Admin categories
    // ========================================================================

    /// Create or patch a category.
    ///
    /// A form with a known id patches; anything else creates with defaults
    /// (name "New Category", slug derived from the name) and prepends.
    ///
    /// # Errors
    ///
    /// Returns an error if the category list could not be persisted.
    pub fn upsert_admin_category(&self, form: CategoryForm) -> Result<Category> {
        let guard = self.inner.lock_state();

        if let Some(current) = form
            .id
            .as_ref()
            .and_then(|id| guard.admin_categories.iter().find(|c| &c.id == id))
        {
            let mut category = current.clone();
            if let Some(name) = form.name {
                category.name = name;
            }
            if let Some(slug) = form.slug {
                category.slug = slug;
            }
            if let Some(description) = form.description {
                category.description = description;
            }
            let admin_categories: Vec<Category> = guard
                .admin_categories
                .iter()
                .map(|c| {
                    if c.id == category.id {
                        category.clone()
                    } else {
                        c.clone()
                    }
                })
                .collect();
            self.persist(keys::ADMIN_CATEGORIES, &admin_categories)?;
            let next = Snapshot {
                admin_categories: Arc::new(admin_categories),
                ..(**guard).clone()
            };
            self.finish(guard, next);
            return Ok(category);
        }

        let name = form.name.unwrap_or_else(|| "New Category".to_string());
        let category = Category {
            id: CategoryId::new(format!("cat-{}", self.mint_millis())),
            slug: form.slug.unwrap_or_else(|| Category::slug_from_name(&name)),
            description: form.description.unwrap_or_default(),
            name,
        };
        let mut admin_categories: Vec<Category> = guard.admin_categories.as_ref().clone();
        admin_categories.insert(0, category.clone());
        self.persist(keys::ADMIN_CATEGORIES, &admin_categories)?;
        let next = Snapshot {
            admin_categories: Arc::new(admin_categories),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(category)
    }

    /// Delete a category and reassign its products to "Accessories".
    ///
    /// Products are matched by category NAME. Both collections are written
    /// and committed together, with a single notification.
    ///
    /// # Errors
    ///
    /// Returns an error if either collection could not be persisted.
    pub fn delete_admin_category(&self, category_id: &CategoryId) -> Result<()> {
        let guard = self.inner.lock_state();
        let target = guard
            .admin_categories
            .iter()
            .find(|c| &c.id == category_id)
            .cloned();
        let admin_categories: Vec<Category> = guard
            .admin_categories
            .iter()
            .filter(|c| &c.id != category_id)
            .cloned()
            .collect();

        let mut next = (**guard).clone();
        if let Some(target) = target {
            let admin_products: Vec<Product> = guard
                .admin_products
                .iter()
                .map(|p| {
                    if p.category == target.name {
                        let mut p = p.clone();
                        p.category = DEFAULT_CATEGORY.to_string();
                        p
                    } else {
                        p.clone()
                    }
                })
                .collect();
            self.persist(keys::ADMIN_PRODUCTS, &admin_products)?;
            next.admin_products = Arc::new(admin_products);
        }
        self.persist(keys::ADMIN_CATEGORIES, &admin_categories)?;
        next.admin_categories = Arc::new(admin_categories);
        self.finish(guard, next);
        Ok(())
    }

    /// Restore the seed categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the category list could not be persisted.
    pub fn reset_admin_categories(&self) -> Result<()> {
        let guard = self.inner.lock_state();
        let admin_categories = seed::categories();
        self.persist(keys::ADMIN_CATEGORIES, &admin_categories)?;
        let next = Snapshot {
            admin_categories: Arc::new(admin_categories),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    // ========================================================================
    // Admin session
    // ========================================================================

    /// Log an admin in. Username matching is case-insensitive, the password
    /// check is exact.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCredentials`] when no user matches (no
    /// commit happens), or a storage error if persisting the session fails.
    pub fn admin_login(&self, username: &str, password: &str) -> Result<AdminSession> {
        let guard = self.inner.lock_state();
        let user = guard
            .admin_users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username) && u.password == password)
            .ok_or(StoreError::InvalidCredentials)?;
        let session = AdminSession::for_user(user);
        let stored = Some(session.clone());
        self.persist(keys::ADMIN_SESSION, &stored)?;
        let next = Snapshot {
            admin_session: Arc::new(stored),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(session)
    }

    /// Clear the admin session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session could not be persisted.
    pub fn admin_logout(&self) -> Result<()> {
        let guard = self.inner.lock_state();
        let stored: Option<AdminSession> = None;
        self.persist(keys::ADMIN_SESSION, &stored)?;
        let next = Snapshot {
            admin_session: Arc::new(stored),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    // ========================================================================
    // Admin users
    // ========================================================================

    /// Create a store-owner account with a fresh store id.
    ///
    /// The role is always `admin`; the superadmin is seeded, never created.
    /// Missing fields default (password "admin123", name "Store Owner",
    /// store name "New Store", free tier). Appended to the roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster could not be persisted.
    pub fn create_admin_user(&self, form: AdminUserForm) -> Result<AdminUser> {
        let guard = self.inner.lock_state();
        let millis = self.mint_millis();
        let user = AdminUser {
            id: AdminUserId::new(format!("admin-{millis}")),
            username: form.username,
            password: form.password.unwrap_or_else(|| "admin123".to_string()),
            name: form.name.unwrap_or_else(|| "Store Owner".to_string()),
            role: AdminRole::Admin,
            store_id: Some(StoreId::new(format!("store-{millis}"))),
            store_name: Some(form.store_name.unwrap_or_else(|| "New Store".to_string())),
            tier: Some(form.tier.unwrap_or_default()),
        };
        let mut admin_users: Vec<AdminUser> = guard.admin_users.as_ref().clone();
        admin_users.push(user.clone());
        self.persist(keys::ADMIN_USERS, &admin_users)?;
        let next = Snapshot {
            admin_users: Arc::new(admin_users),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(user)
    }

    /// Patch an admin user. An unknown id is a no-op.
    ///
    /// When the patched user owns the live session, the session's
    /// `store_name`, `tier`, `name`, and `username` are synced; its role and
    /// store id never change after login.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster (or synced session) could not be
    /// persisted.
    pub fn update_admin_user(&self, user_id: &AdminUserId, patch: AdminUserPatch) -> Result<()> {
        let guard = self.inner.lock_state();
        let admin_users: Vec<AdminUser> = guard
            .admin_users
            .iter()
            .map(|u| {
                if &u.id == user_id {
                    let mut u = u.clone();
                    if let Some(username) = patch.username.clone() {
                        u.username = username;
                    }
                    if let Some(password) = patch.password.clone() {
                        u.password = password;
                    }
                    if let Some(name) = patch.name.clone() {
                        u.name = name;
                    }
                    if let Some(store_name) = patch.store_name.clone() {
                        u.store_name = Some(store_name);
                    }
                    if let Some(tier) = patch.tier {
                        u.tier = Some(tier);
                    }
                    u
                } else {
                    u.clone()
                }
            })
            .collect();

        let mut next = (**guard).clone();
        let session_owned = guard
            .admin_session
            .as_ref()
            .as_ref()
            .is_some_and(|s| &s.user_id == user_id);
        if session_owned {
            if let (Some(updated), Some(session)) = (
                admin_users.iter().find(|u| &u.id == user_id),
                guard.admin_session.as_ref().clone(),
            ) {
                let session = AdminSession {
                    store_name: updated.store_name.clone(),
                    tier: updated.tier,
                    name: updated.name.clone(),
                    username: updated.username.clone(),
                    ..session
                };
                let stored = Some(session);
                self.persist(keys::ADMIN_SESSION, &stored)?;
                next.admin_session = Arc::new(stored);
            }
        }

        self.persist(keys::ADMIN_USERS, &admin_users)?;
        next.admin_users = Arc::new(admin_users);
        self.finish(guard, next);
        Ok(())
    }

    /// Delete an admin user. An active session for that user is left in
    /// place; scoped queries simply stop resolving it.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster could not be persisted.
    pub fn delete_admin_user(&self, user_id: &AdminUserId) -> Result<()> {
        let guard = self.inner.lock_state();
        let admin_users: Vec<AdminUser> = guard
            .admin_users
            .iter()
            .filter(|u| &u.id != user_id)
            .cloned()
            .collect();
        self.persist(keys::ADMIN_USERS, &admin_users)?;
        let next = Snapshot {
            admin_users: Arc::new(admin_users),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Restore the seed roster and clear the session, in one commit.
    ///
    /// # Errors
    ///
    /// Returns an error if either key could not be persisted.
    pub fn reset_admin_users(&self) -> Result<()> {
        let guard = self.inner.lock_state();
        let admin_users = seed::admin_users();
        let stored: Option<AdminSession> = None;
        self.persist(keys::ADMIN_USERS, &admin_users)?;
        self.persist(keys::ADMIN_SESSION, &stored)?;
        let next = Snapshot {
            admin_users: Arc::new(admin_users),
            admin_session: Arc::new(stored),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Buy a tier for the logged-in store owner's store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAStoreOwner`] unless the session belongs to
    /// a store-owner (`admin` role) account, or a storage error if the
    /// update fails.
    pub fn buy_tier_for_current_store(&self, tier: Tier) -> Result<()> {
        let session = self
            .admin_session()
            .filter(|s| s.role == AdminRole::Admin)
            .ok_or(StoreError::NotAStoreOwner)?;
        self.update_admin_user(
            &session.user_id,
            AdminUserPatch {
                tier: Some(tier),
                ..AdminUserPatch::default()
            },
        )
    }

    // ========================================================================
    // Discounts
    // ========================================================================

    /// Create or patch a discount code.
    ///
    /// A form with a known id patches field-wise. Anything else creates one:
    /// the code is uppercased with all whitespace stripped (default "CODE"),
    /// the store id falls back to the session's store, quantity defaults to
    /// 1, and the code is active unless the form says otherwise. Prepended.
    ///
    /// # Errors
    ///
    /// Returns an error if the discount list could not be persisted.
    pub fn upsert_admin_discount(&self, form: DiscountForm) -> Result<Discount> {
        let guard = self.inner.lock_state();

        if let Some(current) = form
            .id
            .as_ref()
            .and_then(|id| guard.admin_discounts.iter().find(|d| &d.id == id))
        {
            let mut discount = current.clone();
            if let Some(code) = form.code {
                discount.code = code;
            }
            if let Some(store_id) = form.store_id {
                discount.store_id = store_id;
            }
            if let Some(value) = form.discount_value {
                discount.discount_value = value;
            }
            if let Some(quantity) = form.quantity {
                discount.quantity = quantity;
            }
            if let Some(active) = form.active {
                discount.active = active;
            }
            let admin_discounts: Vec<Discount> = guard
                .admin_discounts
                .iter()
                .map(|d| {
                    if d.id == discount.id {
                        discount.clone()
                    } else {
                        d.clone()
                    }
                })
                .collect();
            self.persist(keys::ADMIN_DISCOUNTS, &admin_discounts)?;
            let next = Snapshot {
                admin_discounts: Arc::new(admin_discounts),
                ..(**guard).clone()
            };
            self.finish(guard, next);
            return Ok(discount);
        }

        let discount = Discount {
            id: DiscountId::new(format!("disc-{}", self.mint_millis())),
            code: Discount::normalize_code(form.code.as_deref().unwrap_or("CODE")),
            store_id: form
                .store_id
                .or_else(|| {
                    guard
                        .admin_session
                        .as_ref()
                        .as_ref()
                        .and_then(|s| s.store_id.clone())
                })
                .unwrap_or_else(|| StoreId::new(DEFAULT_STORE_ID)),
            discount_value: form.discount_value.unwrap_or(Decimal::ZERO),
            quantity: form.quantity.unwrap_or(1),
            used_count: 0,
            active: form.active.unwrap_or(true),
            created_at: Utc::now(),
        };
        let mut admin_discounts: Vec<Discount> = guard.admin_discounts.as_ref().clone();
        admin_discounts.insert(0, discount.clone());
        self.persist(keys::ADMIN_DISCOUNTS, &admin_discounts)?;
        let next = Snapshot {
            admin_discounts: Arc::new(admin_discounts),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(discount)
    }

    /// Delete a discount code.
    ///
    /// # Errors
    ///
    /// Returns an error if the discount list could not be persisted.
    pub fn delete_admin_discount(&self, discount_id: &DiscountId) -> Result<()> {
        let guard = self.inner.lock_state();
        let admin_discounts: Vec<Discount> = guard
            .admin_discounts
            .iter()
            .filter(|d| &d.id != discount_id)
            .cloned()
            .collect();
        self.persist(keys::ADMIN_DISCOUNTS, &admin_discounts)?;
        let next = Snapshot {
            admin_discounts: Arc::new(admin_discounts),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Restore the seed discounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the discount list could not be persisted.
    pub fn reset_admin_discounts(&self) -> Result<()> {
        let guard = self.inner.lock_state();
        let admin_discounts = seed::discounts();
        self.persist(keys::ADMIN_DISCOUNTS, &admin_discounts)?;
        let next = Snapshot {
            admin_discounts: Arc::new(admin_discounts),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Consume one redemption of a discount. No bounds check: `used_count`
    /// may pass `quantity`, after which validation stops matching the code.
    ///
    /// # Errors
    ///
    /// Returns an error if the discount list could not be persisted.
    pub fn use_discount_code(&self, discount_id: &DiscountId) -> Result<()> {
        let guard = self.inner.lock_state();
        let admin_discounts: Vec<Discount> = guard
            .admin_discounts
            .iter()
            .map(|d| {
                if &d.id == discount_id {
                    let mut d = d.clone();
                    d.used_count += 1;
                    d
                } else {
                    d.clone()
                }
            })
            .collect();
        self.persist(keys::ADMIN_DISCOUNTS, &admin_discounts)?;
        let next = Snapshot {
            admin_discounts: Arc::new(admin_discounts),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    // ========================================================================
    // Banners
    // ========================================================================

    /// Add a carousel banner at the end of the current order.
    ///
    /// # Errors
    ///
    /// Returns an error if the banner list could not be persisted.
    pub fn add_banner(&self, form: BannerForm) -> Result<Banner> {
        let guard = self.inner.lock_state();
        let banner = Banner {
            id: BannerId::new(format!("banner-{}", self.mint_millis())),
            title: form.title,
            image: form.image,
            order: u32::try_from(guard.banners.len()).unwrap_or(u32::MAX),
        };
        let mut banners: Vec<Banner> = guard.banners.as_ref().clone();
        banners.push(banner.clone());
        self.persist(keys::BANNERS, &banners)?;
        let next = Snapshot {
            banners: Arc::new(banners),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(banner)
    }

    /// Patch a banner's title or image. An unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the banner list could not be persisted.
    pub fn update_banner(&self, banner_id: &BannerId, patch: BannerPatch) -> Result<()> {
        let guard = self.inner.lock_state();
        let banners: Vec<Banner> = guard
            .banners
            .iter()
            .map(|b| {
                if &b.id == banner_id {
                    let mut b = b.clone();
                    if let Some(title) = patch.title.clone() {
                        b.title = title;
                    }
                    if let Some(image) = patch.image.clone() {
                        b.image = image;
                    }
                    b
                } else {
                    b.clone()
                }
            })
            .collect();
        self.persist(keys::BANNERS, &banners)?;
        let next = Snapshot {
            banners: Arc::new(banners),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Delete a banner.
    ///
    /// # Errors
    ///
    /// Returns an error if the banner list could not be persisted.
    pub fn delete_banner(&self, banner_id: &BannerId) -> Result<()> {
        let guard = self.inner.lock_state();
        let banners: Vec<Banner> = guard
            .banners
            .iter()
            .filter(|b| &b.id != banner_id)
            .cloned()
            .collect();
        self.persist(keys::BANNERS, &banners)?;
        let next = Snapshot {
            banners: Arc::new(banners),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Renumber banners to match `ordered`: each listed id gets its position
    /// as its order, unlisted banners keep theirs.
    ///
    /// # Errors
    ///
    /// Returns an error if the banner list could not be persisted.
    pub fn reorder_banners(&self, ordered: &[BannerId]) -> Result<()> {
        let guard = self.inner.lock_state();
        let banners: Vec<Banner> = guard
            .banners
            .iter()
            .map(|b| match ordered.iter().position(|id| id == &b.id) {
                Some(position) => {
                    let mut b = b.clone();
                    b.order = u32::try_from(position).unwrap_or(u32::MAX);
                    b
                }
                None => b.clone(),
            })
            .collect();
        self.persist(keys::BANNERS, &banners)?;
        let next = Snapshot {
            banners: Arc::new(banners),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    // ========================================================================
    // Highlights
    // ========================================================================

    /// Feature a product on the home page for one store, replacing any
    /// previous pick for that store.
    ///
    /// # Errors
    ///
    /// Returns an error if the highlights could not be persisted.
    pub fn set_highlight_product(&self, store_id: StoreId, product_id: ProductId) -> Result<()> {
        let guard = self.inner.lock_state();
        let mut highlights = guard.highlights.as_ref().clone();
        highlights.insert(store_id, product_id);
        self.persist(keys::HIGHLIGHTS, &highlights)?;
        let next = Snapshot {
            highlights: Arc::new(highlights),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }

    /// Remove a store's featured product.
    ///
    /// # Errors
    ///
    /// Returns an error if the highlights could not be persisted.
    pub fn remove_highlight_product(&self, store_id: &StoreId) -> Result<()> {
        let guard = self.inner.lock_state();
        let mut highlights = guard.highlights.as_ref().clone();
        highlights.remove(store_id);
        self.persist(keys::HIGHLIGHTS, &highlights)?;
        let next = Snapshot {
            highlights: Arc::new(highlights),
            ..(**guard).clone()
        };
        self.finish(guard, next);
        Ok(())
    }
}

fn apply_product_patch(product: &mut Product, form: &ProductForm) {
    if let Some(store_id) = form.store_id.clone() {
        product.store_id = store_id;
    }
    if let Some(title) = form.title.clone() {
        product.title = title;
    }
    if let Some(brand) = form.brand.clone() {
        product.brand = brand;
    }
    if let Some(category) = form.category.clone() {
        product.category = category;
    }
    if let Some(price) = form.price {
        product.price = price;
    }
    if let Some(rating) = form.rating {
        product.rating = rating;
    }
    if let Some(stock_quantity) = form.stock_quantity {
        product.stock_quantity = stock_quantity;
        product.in_stock = stock_quantity > 0;
    }
    if let Some(fast_delivery) = form.fast_delivery {
        product.fast_delivery = fast_delivery;
    }
    if let Some(colors) = form.colors.clone() {
        product.colors = colors;
    }
    if let Some(sizes) = form.sizes.clone() {
        product.sizes = sizes;
    }
    if let Some(image) = form.image.clone() {
        product.image = image;
    }
    if let Some(thumbnail) = form.thumbnail.clone() {
        product.thumbnail = thumbnail;
    }
    if let Some(description) = form.description.clone() {
        product.description = description;
    }
}
