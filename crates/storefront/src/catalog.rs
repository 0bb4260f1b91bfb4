//! Catalog browsing: filter, sort, and paginate the product collection.

use std::str::FromStr;

use bazaar_core::Product;
use bazaar_store::Snapshot;
use rust_decimal::Decimal;
use serde::Serialize;

/// Products shown per catalog page.
pub const PAGE_SIZE: usize = 8;

/// Sort order for catalog results. All sorts are stable, so ties keep the
/// stored collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogSort {
    /// Stored collection order (newest upserts first).
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl FromStr for CatalogSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "rating_desc" => Ok(Self::RatingDesc),
            _ => Err(format!("invalid catalog sort: {s}")),
        }
    }
}

/// Catalog filter form. The `Default` query matches every product.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Case-insensitive substring over title and brand.
    pub term: String,
    /// Category name equality; `None` shows all categories.
    pub category: Option<String>,
    /// Inclusive price bounds. Zero or unset disables a bound.
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Minimum rating; zero or unset disables the floor.
    pub min_rating: Option<Decimal>,
    pub fast_delivery_only: bool,
    pub in_stock_only: bool,
    pub sort: CatalogSort,
    /// Requested 1-based page, clamped into range on projection.
    pub page: usize,
}

impl CatalogQuery {
    fn matches(&self, product: &Product, term: &str) -> bool {
        if !term.is_empty()
            && !product.title.to_lowercase().contains(term)
            && !product.brand.to_lowercase().contains(term)
        {
            return false;
        }
        if let Some(category) = &self.category {
            if product.category != *category {
                return false;
            }
        }
        if let Some(min) = self.min_price.filter(|bound| !bound.is_zero()) {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price.filter(|bound| !bound.is_zero()) {
            if product.price > max {
                return false;
            }
        }
        if let Some(floor) = self.min_rating.filter(|bound| !bound.is_zero()) {
            if product.rating < floor {
                return false;
            }
        }
        if self.fast_delivery_only && !product.fast_delivery {
            return false;
        }
        if self.in_stock_only && !product.in_stock {
            return false;
        }
        true
    }
}

/// One page of catalog results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub products: Vec<Product>,
    pub total_matches: usize,
    /// The page actually served after clamping.
    pub page: usize,
    pub page_count: usize,
}

impl CatalogView {
    #[must_use]
    pub fn project(snapshot: &Snapshot, query: &CatalogQuery) -> Self {
        let term = query.term.trim().to_lowercase();
        let mut matches: Vec<&Product> = snapshot
            .admin_products
            .iter()
            .filter(|product| query.matches(product, &term))
            .collect();

        match query.sort {
            CatalogSort::Default => {}
            CatalogSort::PriceAsc => matches.sort_by(|a, b| a.price.cmp(&b.price)),
            CatalogSort::PriceDesc => matches.sort_by(|a, b| b.price.cmp(&a.price)),
            CatalogSort::RatingDesc => matches.sort_by(|a, b| b.rating.cmp(&a.rating)),
        }

        let total_matches = matches.len();
        let page_count = total_matches.div_ceil(PAGE_SIZE).max(1);
        let page = query.page.clamp(1, page_count);
        let products = matches
            .into_iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .cloned()
            .collect();

        Self {
            products,
            total_matches,
            page,
            page_count,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_store::Store;
    use rust_decimal_macros::dec;

    use super::*;

    fn project(query: &CatalogQuery) -> CatalogView {
        let store = Store::in_memory();
        CatalogView::project(&store.snapshot(), query)
    }

    #[test]
    fn test_default_query_matches_whole_catalog() {
        let view = project(&CatalogQuery::default());
        assert_eq!(view.total_matches, 12);
        assert_eq!(view.page, 1);
        assert_eq!(view.page_count, 2);
        assert_eq!(view.products.len(), PAGE_SIZE);
    }

    #[test]
    fn test_term_matches_title_and_brand_case_insensitive() {
        let by_brand = project(&CatalogQuery {
            term: "NORTH".to_string(),
            ..CatalogQuery::default()
        });
        assert_eq!(by_brand.total_matches, 2);

        let by_title = project(&CatalogQuery {
            term: "  tee ".to_string(),
            ..CatalogQuery::default()
        });
        assert_eq!(by_title.total_matches, 1);
        assert_eq!(
            by_title.products.first().unwrap().title,
            "Classic Crewneck Tee"
        );
    }

    #[test]
    fn test_category_and_boolean_gates() {
        let shoes = project(&CatalogQuery {
            category: Some("Shoes".to_string()),
            ..CatalogQuery::default()
        });
        assert_eq!(shoes.total_matches, 2);

        let in_stock = project(&CatalogQuery {
            in_stock_only: true,
            ..CatalogQuery::default()
        });
        assert_eq!(in_stock.total_matches, 11);

        let fast = project(&CatalogQuery {
            fast_delivery_only: true,
            ..CatalogQuery::default()
        });
        assert_eq!(fast.total_matches, 8);
    }

    #[test]
    fn test_price_bounds_inclusive_and_zero_disables() {
        let expensive = project(&CatalogQuery {
            min_price: Some(dec!(100)),
            ..CatalogQuery::default()
        });
        assert_eq!(expensive.total_matches, 3);

        let cheap = project(&CatalogQuery {
            max_price: Some(dec!(30)),
            ..CatalogQuery::default()
        });
        assert_eq!(cheap.total_matches, 2);

        let exact = project(&CatalogQuery {
            min_price: Some(dec!(149)),
            max_price: Some(dec!(149)),
            ..CatalogQuery::default()
        });
        assert_eq!(exact.total_matches, 1);

        let disabled = project(&CatalogQuery {
            min_price: Some(Decimal::ZERO),
            max_price: Some(Decimal::ZERO),
            ..CatalogQuery::default()
        });
        assert_eq!(disabled.total_matches, 12);
    }

    #[test]
    fn test_rating_floor() {
        let top = project(&CatalogQuery {
            min_rating: Some(dec!(4.7)),
            ..CatalogQuery::default()
        });
        assert_eq!(top.total_matches, 4);
    }

    #[test]
    fn test_sorts_are_stable() {
        let asc = project(&CatalogQuery {
            sort: CatalogSort::PriceAsc,
            ..CatalogQuery::default()
        });
        assert_eq!(asc.products.first().unwrap().price, dec!(25));

        let desc = project(&CatalogQuery {
            sort: CatalogSort::PriceDesc,
            ..CatalogQuery::default()
        });
        assert_eq!(desc.products.first().unwrap().price, dec!(149));

        let rated = project(&CatalogQuery {
            sort: CatalogSort::RatingDesc,
            ..CatalogQuery::default()
        });
        // Two products share 4.8; stable sort keeps stored order.
        let ids: Vec<_> = rated.products.iter().take(2).map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p-2", "p-9"]);
    }

    #[test]
    fn test_page_clamped_into_range() {
        let past_end = project(&CatalogQuery {
            page: 99,
            ..CatalogQuery::default()
        });
        assert_eq!(past_end.page, 2);
        assert_eq!(past_end.products.len(), 4);

        let zero = project(&CatalogQuery {
            page: 0,
            ..CatalogQuery::default()
        });
        assert_eq!(zero.page, 1);
    }

    #[test]
    fn test_no_matches_still_has_one_page() {
        let view = project(&CatalogQuery {
            term: "no such product".to_string(),
            ..CatalogQuery::default()
        });
        assert_eq!(view.total_matches, 0);
        assert_eq!(view.page_count, 1);
        assert_eq!(view.page, 1);
        assert!(view.products.is_empty());
    }

    #[test]
    fn test_combined_filters() {
        let view = project(&CatalogQuery {
            category: Some("Electronics".to_string()),
            max_price: Some(dec!(50)),
            ..CatalogQuery::default()
        });
        assert_eq!(view.total_matches, 1);
        assert_eq!(view.products.first().unwrap().id.as_str(), "p-8");
    }

    #[test]
    fn test_sort_from_str() {
        assert_eq!("price_asc".parse::<CatalogSort>().unwrap(), CatalogSort::PriceAsc);
        assert_eq!("Rating_Desc".parse::<CatalogSort>().unwrap(), CatalogSort::RatingDesc);
        assert!("cheapest".parse::<CatalogSort>().is_err());
    }
}
