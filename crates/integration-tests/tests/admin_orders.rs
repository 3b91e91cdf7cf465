//! Back-office order table and dashboard against the in-process backend.

use chrono::{DateTime, NaiveDate, Utc};
use funsport_admin::views::{DashboardView, OrderFilter, OrderStats, OrdersView};
use funsport_core::labels::notice;
use funsport_core::listing::DateRange;
use funsport_core::{OrderStatus, Price};
use funsport_integration_tests::{FakeBackend, UPDATED_AT};
use serde_json::Value;

async fn backend() -> FakeBackend {
    FakeBackend::seeded().await.expect("Failed to start backend")
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).expect("Valid date")
}

fn order_ids(view: &OrdersView) -> Vec<&str> {
    view.filtered().iter().map(|o| o.order_id.as_str()).collect()
}

fn stored_status(backend: &FakeBackend, order_id: &str) -> Option<String> {
    backend.with_store(|store| {
        store
            .orders
            .iter()
            .find(|o| o.get("orderId").and_then(Value::as_str) == Some(order_id))
            .and_then(|o| o.get("status"))
            .and_then(Value::as_str)
            .map(str::to_string)
    })
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn test_orders_load_with_stats() {
    let backend = backend().await;
    let view = OrdersView::load(&backend.admin_client())
        .await
        .expect("Failed to load orders");

    assert_eq!(view.orders().len(), 4);
    assert_eq!(
        view.stats(),
        OrderStats {
            total: 4,
            in_progress: 1,
            delivered: 2,
            returned: 1,
        }
    );
}

#[tokio::test]
async fn test_order_filters() {
    let backend = backend().await;
    let mut view = OrdersView::load(&backend.admin_client())
        .await
        .expect("Failed to load orders");

    view.set_filter(OrderFilter {
        search: "bình".to_string(),
        ..OrderFilter::default()
    });
    assert_eq!(order_ids(&view), vec!["DH002"]);

    view.set_filter(OrderFilter {
        search: "mizuno".to_string(),
        ..OrderFilter::default()
    });
    assert_eq!(order_ids(&view), vec!["DH003", "DH004"]);

    view.set_filter(OrderFilter {
        status: Some(OrderStatus::Delivered),
        ..OrderFilter::default()
    });
    assert_eq!(order_ids(&view), vec!["DH001", "DH003"]);

    // The end day is included up to its last minute.
    view.set_filter(OrderFilter {
        dates: DateRange {
            start: Some(day(15)),
            end: Some(day(20)),
        },
        ..OrderFilter::default()
    });
    assert_eq!(order_ids(&view), vec!["DH002", "DH003", "DH004"]);
    assert_eq!(view.stats().total, 3);

    view.reset_filter();
    assert_eq!(view.filtered().len(), 4);
}

#[tokio::test]
async fn test_toggle_order_lock() {
    let backend = backend().await;
    let client = backend.admin_client();
    let mut view = OrdersView::load(&client)
        .await
        .expect("Failed to load orders");

    let notice = view
        .toggle_lock(&client, "DH002")
        .await
        .expect("Failed to lock");
    assert_eq!(notice, notice::order_lock("DH002", true));
    assert_eq!(stored_status(&backend, "DH002").as_deref(), Some("locked"));
    assert_eq!(view.stats().in_progress, 0);

    let notice = view
        .toggle_lock(&client, "DH002")
        .await
        .expect("Failed to unlock");
    assert_eq!(notice, notice::order_lock("DH002", false));
    assert_eq!(
        stored_status(&backend, "DH002").as_deref(),
        Some("inprogress")
    );
    assert_eq!(view.stats().in_progress, 1);
}

#[tokio::test]
async fn test_update_order_status() {
    let backend = backend().await;
    let client = backend.admin_client();
    let mut view = OrdersView::load(&client)
        .await
        .expect("Failed to load orders");

    let notice = view
        .update_status(&client, "DH002", OrderStatus::Delivered)
        .await
        .expect("Failed to update status");
    assert_eq!(notice, notice::ORDER_STATUS_UPDATED);
    assert_eq!(view.stats().delivered, 3);
    assert_eq!(backend.count("PATCH /v1/orders/DH002"), 1);

    let order = view
        .orders()
        .iter()
        .find(|o| o.order_id == "DH002")
        .expect("Order is listed");
    assert_eq!(order.status, OrderStatus::Delivered);
    assert_eq!(
        order.updated_at,
        UPDATED_AT.parse::<DateTime<Utc>>().ok()
    );
}

#[tokio::test]
async fn test_unknown_orders_are_not_sent() {
    let backend = backend().await;
    let client = backend.admin_client();
    let mut view = OrdersView::load(&client)
        .await
        .expect("Failed to load orders");

    let err = view
        .toggle_lock(&client, "  ")
        .await
        .expect_err("Order number is blank");
    assert_eq!(err.user_message(), notice::ORDER_MISSING);

    let err = view
        .update_status(&client, "DH999", OrderStatus::Return)
        .await
        .expect_err("Order does not exist");
    assert_eq!(err.user_message(), notice::ORDER_NOT_FOUND);

    assert_eq!(backend.count("POST /v1/orders/toggle-lock"), 0);
    assert_eq!(backend.count("PATCH"), 0);
}

#[tokio::test]
async fn test_failed_order_mutations_keep_rows() {
    let backend = backend().await;
    let client = backend.admin_client();
    let mut view = OrdersView::load(&client)
        .await
        .expect("Failed to load orders");
    view.toggle_selected("DH001");
    backend.fail("/v1/orders/toggle-lock/DH001");
    backend.fail("/v1/orders/DH002");

    let orders = view.orders().to_vec();
    let stats = view.stats();
    let selection = view.selection().clone();

    let err = view
        .toggle_lock(&client, "DH001")
        .await
        .expect_err("Lock failed");
    assert_eq!(err.user_message(), "Lỗi máy chủ nội bộ");

    let err = view
        .update_status(&client, "DH002", OrderStatus::Delivered)
        .await
        .expect_err("Status change failed");
    assert_eq!(err.user_message(), "Lỗi máy chủ nội bộ");

    let err = view
        .delete(&client, "DH002")
        .await
        .expect_err("Delete failed");
    assert_eq!(err.user_message(), "Lỗi máy chủ nội bộ");

    assert_eq!(view.orders(), orders.as_slice());
    assert_eq!(view.stats(), stats);
    assert_eq!(*view.selection(), selection);
    assert_eq!(stored_status(&backend, "DH001").as_deref(), Some("delivered"));
}

#[tokio::test]
async fn test_delete_order() {
    let backend = backend().await;
    let client = backend.admin_client();
    let mut view = OrdersView::load(&client)
        .await
        .expect("Failed to load orders");

    view.toggle_selected("DH004");
    let notice = view
        .delete(&client, "DH004")
        .await
        .expect("Failed to delete");
    assert_eq!(notice, notice::ORDER_DELETED);
    assert_eq!(view.orders().len(), 3);
    assert!(view.selection().is_empty());
    assert_eq!(backend.with_store(|s| s.orders.len()), 3);
}

#[tokio::test]
async fn test_export_selected_orders() {
    let backend = backend().await;
    let mut view = OrdersView::load(&backend.admin_client())
        .await
        .expect("Failed to load orders");

    let err = view.export_selected_csv().expect_err("Nothing selected");
    assert_eq!(err.user_message(), notice::SELECT_ORDERS_TO_EXPORT);

    view.toggle_selected("DH001");
    view.toggle_selected("DH002");
    let csv = view.export_selected_csv().expect("Failed to export");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(csv.starts_with("ID,Sản Phẩm,Giá,Khách Hàng"));
    assert!(csv.contains("\"DH001\",\"Giày chạy bộ Nike Air\""));
    assert!(csv.contains("\"Bóng đá Động Lực\""));
    assert!(csv.contains("\"10/6/2024\""));
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn test_dashboard_with_date_window() {
    let backend = backend().await;
    let range = DateRange {
        start: Some(day(15)),
        end: Some(day(20)),
    };
    let view = DashboardView::load(&backend.admin_client(), range)
        .await
        .expect("Failed to load dashboard");

    assert_eq!(view.stats.total_revenue, Price::from_dong(3_300_000));
    assert_eq!(view.stats.total_inventory, 35);
    assert_eq!(view.revenue.total_revenue, Price::from_dong(2_100_000));
    assert_eq!(
        view.top_category().map(|c| c.category_name.as_str()),
        Some("Bóng đá")
    );

    let recent: Vec<&str> = view
        .recent_orders
        .iter()
        .map(|o| o.order_id.as_str())
        .collect();
    assert_eq!(recent, vec!["DH003", "DH004", "DH002", "DH001"]);

    assert_eq!(
        backend.count("GET /v1/orders/revenue?startDate=2024-06-15&endDate=2024-06-20"),
        1
    );
}

#[tokio::test]
async fn test_dashboard_half_open_window_is_not_sent() {
    let backend = backend().await;
    let range = DateRange {
        start: Some(day(15)),
        end: None,
    };
    let view = DashboardView::load(&backend.admin_client(), range)
        .await
        .expect("Failed to load dashboard");

    assert_eq!(view.revenue.total_revenue, Price::from_dong(3_300_000));
    assert_eq!(view.revenue.revenue_by_category.len(), 2);
    assert_eq!(backend.count("GET /v1/orders/revenue?"), 0);
    assert_eq!(backend.count("GET /v1/orders/revenue"), 1);
}

#[tokio::test]
async fn test_dashboard_fails_with_any_panel() {
    let backend = backend().await;
    backend.fail("/v1/orders/recent");

    let err = DashboardView::load(&backend.admin_client(), DateRange::default())
        .await
        .expect_err("Recent orders failed to load");
    assert_eq!(err.user_message(), "Lỗi máy chủ nội bộ");
}
