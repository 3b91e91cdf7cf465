//! Catalog browsing against the in-process backend.
//!
//! Covers the landing page, the catalog with its filters, header search,
//! product detail and the response cache.

use funsport_core::listing::PriceRange;
use funsport_core::{Price, StockStatus, labels};
use funsport_integration_tests::FakeBackend;
use funsport_integration_tests::fixtures::{
    FOOTBALL, FOOTBALL_BOOTS, GOGGLES, RUNNING_SHIRT, RUNNING_SHOES,
};
use funsport_storefront::AppError;
use funsport_storefront::views::{
    self, CatalogFilter, CatalogQuery, CatalogView, HomeView, ProductDetailView,
};

async fn backend() -> (FakeBackend, tempfile::TempDir) {
    let backend = FakeBackend::seeded().await.expect("Failed to start backend");
    let dir = tempfile::tempdir().expect("Failed to create data dir");
    (backend, dir)
}

fn ids(products: &[&funsport_core::Product]) -> Vec<String> {
    products.iter().map(|p| p.id.to_string()).collect()
}

// ============================================================================
// Home
// ============================================================================

#[tokio::test]
async fn test_home_tabs_and_flash_sale() {
    let (backend, dir) = backend().await;
    let client = backend.storefront_client(dir.path());

    let mut home = HomeView::load(&client).await.expect("Failed to load home");
    assert_eq!(home.tab_products().len(), 5);
    assert_eq!(home.flash_sale().len(), 1);

    home.select_tab(" HOT ");
    assert_eq!(
        ids(&home.tab_products()),
        vec![RUNNING_SHIRT.to_string(), FOOTBALL.to_string()]
    );

    let [first, second, third] = home.columns();
    assert_eq!((first.len(), second.len(), third.len()), (2, 2, 1));
}

#[tokio::test]
async fn test_home_survives_flash_sale_failure() {
    let (backend, dir) = backend().await;
    backend.fail("/v1/productsell");
    let client = backend.storefront_client(dir.path());

    let home = HomeView::load(&client).await.expect("Failed to load home");
    assert_eq!(home.tab_products().len(), 5);
    assert!(home.flash_sale().is_empty());
}

#[tokio::test]
async fn test_home_fails_without_products() {
    let (backend, dir) = backend().await;
    backend.fail("/v1/product");
    let client = backend.storefront_client(dir.path());

    let err = HomeView::load(&client).await.expect_err("Products failed to load");
    assert_eq!(err.user_message(), "Lỗi máy chủ nội bộ");
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_catalog_filters_by_category_and_price() {
    let (backend, dir) = backend().await;
    let client = backend.storefront_client(dir.path());

    let mut catalog = CatalogView::load(&client, &CatalogQuery::default())
        .await
        .expect("Failed to load catalog");
    assert_eq!(catalog.filtered().len(), 5);
    assert_eq!(catalog.categories().len(), 3);

    // Embedded category matches by code, bare category id matches by id.
    catalog.apply_filter(CatalogFilter {
        category: Some("running".to_string()),
        price: None,
    });
    let filtered: Vec<&str> = catalog.filtered().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(filtered, vec![RUNNING_SHOES]);

    catalog.apply_filter(CatalogFilter {
        category: Some("c-football".to_string()),
        price: "100000-500000".parse::<PriceRange>().ok(),
    });
    let filtered: Vec<&str> = catalog.filtered().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(filtered, vec![FOOTBALL]);

    catalog.reset_filter();
    assert_eq!(catalog.filtered().len(), 5);
}

#[tokio::test]
async fn test_catalog_paginates_eight_per_page() {
    let (backend, dir) = backend().await;
    backend.with_store(|store| {
        for n in 0..10 {
            store.products.push(serde_json::json!({
                "_id": format!("p-extra-{n}"),
                "name": format!("Vợt cầu lông {n}"),
                "price": 500_000,
            }));
        }
    });
    let client = backend.storefront_client(dir.path());

    let mut catalog = CatalogView::load(&client, &CatalogQuery::default())
        .await
        .expect("Failed to load catalog");
    let page = catalog.current_page();
    assert_eq!((page.page, page.total_pages, page.items.len()), (1, 2, 8));

    catalog.go_to_page(2);
    let page = catalog.current_page();
    assert_eq!((page.page, page.items.len()), (2, 7));

    catalog.go_to_page(9);
    assert_eq!(catalog.current_page().page, 2);
}

#[tokio::test]
async fn test_catalog_opens_without_categories() {
    let (backend, dir) = backend().await;
    backend.fail("/v1/category");
    let client = backend.storefront_client(dir.path());

    let catalog = CatalogView::load(&client, &CatalogQuery::default())
        .await
        .expect("Catalog should load without categories");
    assert_eq!(catalog.filtered().len(), 5);
    assert!(catalog.categories().is_empty());
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_header_search_sends_trimmed_keyword() {
    let (backend, dir) = backend().await;
    let client = backend.storefront_client(dir.path());

    let query = views::search("  giày  ", None).expect("Keyword is long enough");
    let catalog = CatalogView::load(&client, &query)
        .await
        .expect("Failed to search");

    let found: Vec<&str> = catalog.filtered().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(found, vec![RUNNING_SHOES, FOOTBALL_BOOTS]);
    assert!(
        backend
            .requests()
            .iter()
            .any(|r| r.starts_with("GET /v1/product?keyword=gi"))
    );
}

#[tokio::test]
async fn test_short_search_never_reaches_backend() {
    let (backend, _dir) = backend().await;

    let err = views::search(" áo ", Some("c-running")).expect_err("Keyword is too short");
    assert_eq!(err.user_message(), labels::notice::SEARCH_TOO_SHORT);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_search_by_category_only() {
    let (backend, dir) = backend().await;
    let client = backend.storefront_client(dir.path());

    let products = client
        .search_products(Some("c-football"), Some("  "))
        .await
        .expect("Failed to search");
    assert_eq!(products.len(), 2);
    assert_eq!(backend.count("GET /v1/product?category=c-football"), 1);
}

// ============================================================================
// Product detail
// ============================================================================

#[tokio::test]
async fn test_product_detail_with_related() {
    let (backend, dir) = backend().await;
    let client = backend.storefront_client(dir.path());

    let detail = ProductDetailView::load(&client, RUNNING_SHOES)
        .await
        .expect("Failed to load product");
    assert_eq!(detail.product().price, Price::from_dong(1_200_000));
    assert_eq!(detail.colors(), ["Đen", "Trắng"]);
    assert_eq!(detail.sizes(), ["40", "41", "42"]);
    assert_eq!(detail.product().stock_status(), StockStatus::InStock);

    let related: Vec<&str> = detail.related().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(related, vec![RUNNING_SHIRT]);

    let request = backend
        .requests()
        .into_iter()
        .find(|r| r.starts_with("GET /v1/product/random/products"))
        .expect("Related products were requested");
    assert!(request.contains("limit=4"));
    assert!(request.contains(&format!("exclude={RUNNING_SHOES}")));
    assert!(request.contains("category=c-running"));
}

#[tokio::test]
async fn test_uncategorized_product_skips_related_request() {
    let (backend, dir) = backend().await;
    let client = backend.storefront_client(dir.path());

    let detail = ProductDetailView::load(&client, GOGGLES)
        .await
        .expect("Failed to load product");
    assert!(detail.related().is_empty());
    assert_eq!(detail.product().stock_status(), StockStatus::InStock);
    assert_eq!(backend.count("GET /v1/product/random"), 0);
}

#[tokio::test]
async fn test_related_failure_keeps_detail() {
    let (backend, dir) = backend().await;
    backend.fail("/v1/product/random/products");
    let client = backend.storefront_client(dir.path());

    let detail = ProductDetailView::load(&client, FOOTBALL)
        .await
        .expect("Detail should load without related products");
    assert!(detail.related().is_empty());
    assert_eq!(detail.product().stock_status(), StockStatus::OutOfStock);
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let (backend, dir) = backend().await;
    let client = backend.storefront_client(dir.path());

    let err = ProductDetailView::load(&client, "p-missing")
        .await
        .expect_err("Product does not exist");
    assert_eq!(AppError::from(err).user_message(), "Không tìm thấy dữ liệu");
}

// ============================================================================
// Cache, categories and news
// ============================================================================

#[tokio::test]
async fn test_product_list_and_categories_are_cached() {
    let (backend, dir) = backend().await;
    let client = backend.storefront_client(dir.path());

    for _ in 0..3 {
        client.get_products().await.expect("Failed to list products");
        client.categories().await.expect("Failed to list categories");
        client
            .get_product(RUNNING_SHIRT)
            .await
            .expect("Failed to get product");
    }
    assert_eq!(backend.count("GET /v1/product"), 2);
    assert_eq!(backend.count("GET /v1/category"), 1);

    client.invalidate_cache();
    client.get_products().await.expect("Failed to list products");
    assert_eq!(backend.count("GET /v1/product"), 3);
}

#[tokio::test]
async fn test_searches_are_not_cached() {
    let (backend, dir) = backend().await;
    let client = backend.storefront_client(dir.path());

    for _ in 0..2 {
        client
            .search_products(None, Some("bóng"))
            .await
            .expect("Failed to search");
    }
    assert_eq!(backend.count("GET /v1/product?"), 2);
}

#[tokio::test]
async fn test_category_and_news() {
    let (backend, dir) = backend().await;
    let client = backend.storefront_client(dir.path());

    let category = client
        .category("c-swimming")
        .await
        .expect("Failed to get category");
    assert_eq!(category.name, "Bơi lội");
    assert!(client.category("c-missing").await.is_err());

    let news = client.news().await.expect("Failed to get news");
    assert_eq!(news.len(), 1);
    assert_eq!(
        news.first().and_then(|n| n.summary.as_deref()),
        Some("Đăng ký trước ngày 30/6 để nhận áo đấu.")
    );

    let sale = client
        .flash_sale_product("s-running-shirt")
        .await
        .expect("Failed to get flash-sale product");
    assert_eq!(sale.price, Price::from_dong(399_000));
}
