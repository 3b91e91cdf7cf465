//! Product catalog with category and price filters.

use funsport_core::listing::{Page, PriceRange, paginate};
use funsport_core::{Category, Product};
use tracing::{instrument, warn};

use crate::api::{BackendError, StorefrontClient};

/// Products per catalog page.
pub const CATALOG_PAGE_SIZE: usize = 8;

/// Search parameters the catalog was opened with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub keyword: Option<String>,
    pub category: Option<String>,
}

impl CatalogQuery {
    /// Whether the catalog lists search results rather than everything.
    #[must_use]
    pub fn is_search(&self) -> bool {
        [&self.keyword, &self.category]
            .into_iter()
            .any(|v| v.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }
}

/// Client-side filters over the loaded products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Category id, name or code.
    pub category: Option<String>,
    pub price: Option<PriceRange>,
}

impl CatalogFilter {
    fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|key| product.in_category(key));
        let price_ok = self.price.is_none_or(|range| range.contains(product.price));
        category_ok && price_ok
    }
}

/// Catalog page state.
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    products: Vec<Product>,
    categories: Vec<Category>,
    filter: CatalogFilter,
    filtered: Vec<Product>,
    page: usize,
}

impl CatalogView {
    /// Load products and categories concurrently.
    ///
    /// Categories only feed the filter menu; when they fail to load the
    /// catalog still opens with an empty menu.
    ///
    /// # Errors
    ///
    /// Returns an error if the products cannot be loaded.
    #[instrument(skip(client))]
    pub async fn load(
        client: &StorefrontClient,
        query: &CatalogQuery,
    ) -> Result<Self, BackendError> {
        let products = async {
            if query.is_search() {
                client
                    .search_products(query.category.as_deref(), query.keyword.as_deref())
                    .await
            } else {
                client.get_products().await
            }
        };
        let (products, categories) = tokio::join!(products, client.categories());

        let categories = categories.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load categories for catalog");
            Vec::new()
        });

        Ok(Self::new(products?, categories))
    }

    /// Build a catalog over already loaded data, unfiltered, on page 1.
    #[must_use]
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        let filtered = products.clone();
        Self {
            products,
            categories,
            filter: CatalogFilter::default(),
            filtered,
            page: 1,
        }
    }

    /// Replace the filters and go back to page 1.
    pub fn apply_filter(&mut self, filter: CatalogFilter) {
        self.filtered = self
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        self.filter = filter;
        self.page = 1;
    }

    /// Drop every filter.
    pub fn reset_filter(&mut self) {
        self.apply_filter(CatalogFilter::default());
    }

    /// Move to `page`, clamped to the available pages.
    pub fn go_to_page(&mut self, page: usize) {
        let last = self.current_page().total_pages.max(1);
        self.page = page.clamp(1, last);
    }

    #[must_use]
    pub fn current_page(&self) -> Page<'_, Product> {
        paginate(&self.filtered, self.page, CATALOG_PAGE_SIZE)
    }

    #[must_use]
    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    /// Products left after filtering, across all pages.
    #[must_use]
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use funsport_core::{Price, Ref};

    use super::*;

    fn product(id: &str, category: &str, price: i64) -> Product {
        Product {
            id: id.into(),
            name: format!("Sản phẩm {id}"),
            price: Price::from_dong(price),
            category: Some(Ref::Id(category.to_string())),
            ..Product::default()
        }
    }

    fn catalog(count: usize) -> CatalogView {
        let products = (0..count)
            .map(|i| {
                let category = if i % 2 == 0 { "giay" } else { "ao" };
                let price = i64::try_from(i).unwrap() * 100_000;
                product(&format!("p{i}"), category, price)
            })
            .collect();
        CatalogView::new(products, Vec::new())
    }

    #[test]
    fn test_query_is_search_only_with_content() {
        assert!(!CatalogQuery::default().is_search());
        let blank = CatalogQuery {
            keyword: Some("  ".to_string()),
            category: None,
        };
        assert!(!blank.is_search());
        let search = CatalogQuery {
            keyword: None,
            category: Some("giay".to_string()),
        };
        assert!(search.is_search());
    }

    #[test]
    fn test_pages_of_eight() {
        let mut view = catalog(20);
        assert_eq!(view.current_page().items.len(), 8);
        assert_eq!(view.current_page().total_pages, 3);

        view.go_to_page(3);
        assert_eq!(view.current_page().items.len(), 4);

        view.go_to_page(99);
        assert_eq!(view.current_page().page, 3);
    }

    #[test]
    fn test_filter_resets_to_first_page() {
        let mut view = catalog(20);
        view.go_to_page(2);

        view.apply_filter(CatalogFilter {
            category: Some("giay".to_string()),
            price: Some("0-800000".parse().unwrap()),
        });

        assert_eq!(view.current_page().page, 1);
        // Even indices 0..=8 are "giay" and cost at most 800 000.
        let ids: Vec<&str> = view.filtered().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p0", "p2", "p4", "p6", "p8"]);
    }

    #[test]
    fn test_reset_filter_restores_everything() {
        let mut view = catalog(5);
        view.apply_filter(CatalogFilter {
            category: Some("ao".to_string()),
            price: None,
        });
        assert_eq!(view.filtered().len(), 2);

        view.reset_filter();
        assert_eq!(view.filtered().len(), 5);
        assert_eq!(view.filter(), &CatalogFilter::default());
    }
}
