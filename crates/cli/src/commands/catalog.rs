//! Browse the product catalog.

use bazaar_store::Store;
use bazaar_storefront::{CatalogQuery, CatalogView};

pub fn run(store: &Store, query: CatalogQuery) {
    let view = CatalogView::project(&store.snapshot(), &query);
    tracing::info!(
        matches = view.total_matches,
        page = view.page,
        pages = view.page_count,
        "Catalog"
    );
    for product in &view.products {
        tracing::info!(
            id = %product.id,
            price = %product.price,
            rating = %product.rating,
            stock = product.stock_quantity,
            "{} - {}",
            product.brand,
            product.title
        );
    }
}
