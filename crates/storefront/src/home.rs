//! Home page projection: banners, highlights, and curated product rails.

use serde::Serialize;

use bazaar_core::{Banner, Product};
use bazaar_store::Snapshot;

use crate::stores::StoreInfo;

/// How many products the featured rail shows.
const FEATURED_COUNT: usize = 8;

/// How many products the top-rated rail shows.
const TOP_RATED_COUNT: usize = 6;

/// A store's highlighted product, resolved for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightView {
    pub store: StoreInfo,
    pub product: Product,
}

/// Everything the home page renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    /// Carousel banners, sorted by their `order` field.
    pub banners: Vec<Banner>,
    /// Store highlight picks; entries whose store or product no longer
    /// exists are dropped.
    pub highlights: Vec<HighlightView>,
    /// First products of the catalog.
    pub featured: Vec<Product>,
    /// The tail of the catalog, after the featured window.
    pub fresh: Vec<Product>,
    /// Highest-rated products, best first.
    pub top_rated: Vec<Product>,
    /// Distinct category names in first-seen catalog order.
    pub categories: Vec<String>,
}

impl HomeView {
    #[must_use]
    pub fn project(snapshot: &Snapshot) -> Self {
        let mut banners: Vec<Banner> = snapshot.banners.as_ref().clone();
        banners.sort_by_key(|banner| banner.order);

        let mut highlights: Vec<HighlightView> = Vec::new();
        for store in StoreInfo::directory(snapshot) {
            if let Some(product) = snapshot
                .highlights
                .get(&store.id)
                .and_then(|product_id| snapshot.product(product_id))
            {
                let product = product.clone();
                highlights.push(HighlightView { store, product });
            }
        }

        let products = &snapshot.admin_products;
        let featured: Vec<Product> = products.iter().take(FEATURED_COUNT).cloned().collect();
        let fresh: Vec<Product> = products.iter().skip(4).take(FEATURED_COUNT).cloned().collect();
        let mut top_rated: Vec<Product> = products.iter().cloned().collect();
        top_rated.sort_by(|a, b| b.rating.cmp(&a.rating));
        top_rated.truncate(TOP_RATED_COUNT);

        let mut categories: Vec<String> = Vec::new();
        for product in products.iter() {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }

        Self {
            banners,
            highlights,
            featured,
            fresh,
            top_rated,
            categories,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::{BannerId, ProductId, StoreId};
    use bazaar_store::{BannerForm, Store};

    use super::*;

    #[test]
    fn test_banners_sorted_by_order() {
        let store = Store::in_memory();
        let first = store
            .add_banner(BannerForm {
                title: "Summer sale".to_string(),
                image: "summer.jpg".to_string(),
            })
            .unwrap();
        let second = store
            .add_banner(BannerForm {
                title: "New arrivals".to_string(),
                image: "new.jpg".to_string(),
            })
            .unwrap();
        store
            .reorder_banners(&[second.id.clone(), first.id.clone()])
            .unwrap();

        let view = HomeView::project(&store.snapshot());
        let ids: Vec<&BannerId> = view.banners.iter().map(|b| &b.id).collect();
        assert_eq!(ids, [&second.id, &first.id]);
    }

    #[test]
    fn test_highlights_resolve_store_and_product() {
        let store = Store::in_memory();
        store
            .set_highlight_product(StoreId::new("store-2"), ProductId::new("p-7"))
            .unwrap();

        let view = HomeView::project(&store.snapshot());
        assert_eq!(view.highlights.len(), 1);
        let highlight = view.highlights.first().unwrap();
        assert_eq!(highlight.store.name, "TechWorld");
        assert_eq!(highlight.product.id, ProductId::new("p-7"));
    }

    #[test]
    fn test_dangling_highlight_dropped() {
        let store = Store::in_memory();
        store
            .set_highlight_product(StoreId::new("store-1"), ProductId::new("p-1"))
            .unwrap();
        store.delete_admin_product(&ProductId::new("p-1")).unwrap();

        let view = HomeView::project(&store.snapshot());
        assert!(view.highlights.is_empty());
    }

    #[test]
    fn test_product_rails_from_seed_catalog() {
        let store = Store::in_memory();
        let view = HomeView::project(&store.snapshot());

        assert_eq!(view.featured.len(), 8);
        assert_eq!(view.featured.first().unwrap().id.as_str(), "p-1");
        assert_eq!(view.fresh.len(), 8);
        assert_eq!(view.fresh.first().unwrap().id.as_str(), "p-5");
        assert_eq!(view.top_rated.len(), 6);
        // p-2 and p-9 share the top rating of 4.8; stored order breaks the tie.
        assert_eq!(view.top_rated.first().unwrap().id.as_str(), "p-2");
        assert_eq!(
            view.categories,
            ["Apparel", "Shoes", "Bags", "Electronics", "Accessories"]
        );
    }
}
