//! Integration tests for the FunSport clients.
//!
//! The clients are exercised against [`FakeBackend`], an in-process axum
//! server bound to a random local port that speaks the same REST routes as
//! the real backend and keeps its documents in memory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p funsport-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_*` - Catalog, cart, auth and checkout flows
//! - `admin_*` - Back-office pages

pub mod fixtures;

use std::collections::{HashMap, HashSet};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path as UrlPath, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use funsport_admin::{AdminClient, AdminConfig};
use funsport_storefront::{StorefrontClient, StorefrontConfig};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// Timestamp the backend stamps on updated orders.
pub const UPDATED_AT: &str = "2024-06-21T08:00:00Z";

/// Prefix of the payment page URLs the fake gateway hands out.
pub const PAY_URL_PREFIX: &str = "https://test-payment.momo.vn/v2/gateway/pay";

/// A login the backend accepts.
#[derive(Debug, Clone)]
pub struct Account {
    pub email: String,
    pub password: String,
    /// Blob returned by a successful login.
    pub session: Value,
}

/// Documents and bookkeeping behind [`FakeBackend`].
#[derive(Debug, Default)]
pub struct Store {
    pub products: Vec<Value>,
    pub flash_sale: Vec<Value>,
    pub categories: Vec<Value>,
    pub news: Vec<Value>,
    pub orders: Vec<Value>,
    pub users: Vec<Value>,
    pub accounts: Vec<Account>,
    /// Bodies of every `POST /payment`.
    pub payments: Vec<Value>,
    /// `METHOD /path?query` of every request, in arrival order.
    pub requests: Vec<String>,
    /// Paths answered with `500 Internal Server Error`.
    pub failing: HashSet<String>,
    /// Answer payment requests without a `payUrl`.
    pub withhold_pay_url: bool,
    next_id: u64,
}

impl Store {
    fn new_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-new-{}", self.next_id)
    }
}

type Shared = Arc<Mutex<Store>>;

fn lock(state: &Shared) -> MutexGuard<'_, Store> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// FakeBackend
// =============================================================================

/// A running in-process backend. The server stops when this is dropped.
pub struct FakeBackend {
    url: Url,
    state: Shared,
    server: JoinHandle<std::io::Result<()>>,
}

impl FakeBackend {
    /// Start a backend serving `store` on a random local port.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start(store: Store) -> std::io::Result<Self> {
        let state: Shared = Arc::new(Mutex::new(store));
        let app = router(state.clone());

        let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0))).await?;
        let addr = listener.local_addr()?;
        let url = Url::parse(&format!("http://{addr}")).map_err(std::io::Error::other)?;

        let server = tokio::spawn(async move { axum::serve(listener, app).await });

        Ok(Self { url, state, server })
    }

    /// Start a backend loaded with [`fixtures::store`].
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn seeded() -> std::io::Result<Self> {
        Self::start(fixtures::store()).await
    }

    #[must_use]
    pub fn url(&self) -> Url {
        self.url.clone()
    }

    /// Storefront configuration pointing here, storing data in `data_dir`.
    #[must_use]
    pub fn storefront_config(&self, data_dir: &Path) -> StorefrontConfig {
        StorefrontConfig::for_backend(self.url(), data_dir)
    }

    #[must_use]
    pub fn storefront_client(&self, data_dir: &Path) -> StorefrontClient {
        StorefrontClient::new(&self.storefront_config(data_dir))
    }

    #[must_use]
    pub fn admin_client(&self) -> AdminClient {
        AdminClient::new(&AdminConfig::for_backend(self.url()))
    }

    /// Answer every request to `path` with a server error from now on.
    pub fn fail(&self, path: &str) {
        lock(&self.state).failing.insert(path.to_string());
    }

    /// Read or change the stored documents.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        f(&mut lock(&self.state))
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        lock(&self.state).requests.clone()
    }

    /// Number of requests received whose `METHOD /path?query` starts with
    /// `prefix`.
    #[must_use]
    pub fn count(&self, prefix: &str) -> usize {
        lock(&self.state)
            .requests
            .iter()
            .filter(|r| r.starts_with(prefix))
            .count()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

// =============================================================================
// Router
// =============================================================================

fn router(state: Shared) -> Router {
    Router::new()
        // Storefront
        .route("/v1/product", get(search_products))
        .route("/v1/product/random/products", get(random_products))
        .route("/v1/product/{id}", get(get_product))
        .route("/v1/productsell", get(flash_sale))
        .route("/v1/productsell/{id}", get(flash_sale_product))
        .route("/v1/category", get(list_categories))
        .route("/v1/category/{id}", get(get_category))
        .route("/api/news", get(news))
        .route("/v1/account/login", post(login))
        .route("/v1/account/add", post(register))
        .route("/payment", post(payment))
        // Back office
        .route("/v1/stats", get(dashboard_stats))
        .route("/v1/products", get(list_products).post(create_product))
        .route("/v1/products/stats", get(product_stats))
        .route("/v1/products/bulk", post(bulk_delete_products))
        .route(
            "/v1/products/{id}",
            axum::routing::put(update_product).delete(delete_product),
        )
        .route("/v1/orders", get(list_orders).post(create_order))
        .route("/v1/orders/revenue", get(revenue))
        .route("/v1/orders/recent", get(recent_orders))
        .route("/v1/orders/bulk-delete", post(bulk_delete_orders))
        .route("/v1/orders/toggle-lock/{order_id}", post(toggle_order_lock))
        .route(
            "/v1/orders/{order_id}",
            get(get_order).patch(update_order).delete(delete_order),
        )
        .route("/v1/users", get(list_users))
        .route("/v1/users/stats", get(user_stats))
        .route("/v1/users/bulk", post(bulk_delete_users))
        .route("/v1/users/toggle-lock/{id}", post(toggle_user_lock))
        .route(
            "/v1/users/toggle-product-lock/{id}",
            post(toggle_product_lock),
        )
        .route("/v1/users/report-violation/{id}", post(report_violation))
        .route("/v1/users/{id}", get(get_user).delete(delete_user))
        .route("/v1/categories", get(list_categories).post(create_category))
        .route(
            "/v1/categories/{id}",
            axum::routing::put(update_category).delete(delete_category),
        )
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

/// Log the request, then fail it if its path was marked failing.
async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let failing = {
        let mut store = lock(&state);
        store
            .requests
            .push(format!("{} {}", request.method(), request.uri()));
        store.failing.contains(request.uri().path())
    };
    if failing {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    next.run(request).await
}

// =============================================================================
// Document helpers
// =============================================================================

fn str_field<'a>(doc: &'a Value, key: &str) -> &'a str {
    doc.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn set_field(doc: &mut Value, key: &str, value: Value) {
    if let Some(object) = doc.as_object_mut() {
        object.insert(key.to_string(), value);
    }
}

/// Overwrite `doc` with every field of `patch`.
fn merge(doc: &mut Value, patch: &Value) {
    if let Some(patch) = patch.as_object() {
        for (key, value) in patch {
            set_field(doc, key, value.clone());
        }
    }
}

/// Id of a reference that is either a bare id or an embedded document.
fn ref_id(value: Option<&Value>) -> &str {
    match value {
        Some(Value::String(id)) => id,
        Some(doc @ Value::Object(_)) => str_field(doc, "_id"),
        _ => "",
    }
}

fn find<'a>(docs: &'a [Value], key: &str, id: &str) -> Option<&'a Value> {
    docs.iter().find(|d| str_field(d, key) == id)
}

fn find_mut<'a>(docs: &'a mut [Value], key: &str, id: &str) -> Option<&'a mut Value> {
    docs.iter_mut().find(|d| str_field(d, key) == id)
}

/// Remove the documents whose `key` is listed in `body[list]`.
fn remove_listed(docs: &mut Vec<Value>, key: &str, body: &Value, list: &str) {
    let ids: Vec<&str> = body
        .get(list)
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    docs.retain(|d| !ids.contains(&str_field(d, key)));
}

fn remove_one(docs: &mut Vec<Value>, key: &str, id: &str) -> Response {
    let before = docs.len();
    docs.retain(|d| str_field(d, key) != id);
    if docs.len() == before {
        return not_found();
    }
    Json(json!({ "message": "Deleted" })).into_response()
}

fn ok(value: Value) -> Response {
    Json(value).into_response()
}

fn found(doc: Option<&Value>) -> Response {
    doc.map_or_else(not_found, |doc| ok(doc.clone()))
}

fn not_found() -> Response {
    message(StatusCode::NOT_FOUND, "Not found")
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn quantity(product: &Value) -> Option<i64> {
    product.get("quantity").and_then(Value::as_i64)
}

fn amount(doc: &Value, key: &str) -> i64 {
    doc.get(key).and_then(Value::as_i64).unwrap_or_default()
}

// =============================================================================
// Storefront handlers
// =============================================================================

async fn search_products(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let store = lock(&state);
    let keyword = params.get("keyword").map(|k| k.to_lowercase());
    let category = params.get("category");
    let products: Vec<Value> = store
        .products
        .iter()
        .filter(|p| {
            keyword
                .as_deref()
                .is_none_or(|k| str_field(p, "name").to_lowercase().contains(k))
        })
        .filter(|p| {
            category.is_none_or(|c| {
                ref_id(p.get("category")) == c
                    || p.get("category")
                        .is_some_and(|cat| str_field(cat, "code") == c)
            })
        })
        .cloned()
        .collect();
    ok(Value::Array(products))
}

async fn random_products(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let store = lock(&state);
    let limit = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(4);
    let exclude = params.get("exclude").map(String::as_str).unwrap_or_default();
    let category = params
        .get("category")
        .map(String::as_str)
        .unwrap_or_default();
    let related: Vec<Value> = store
        .products
        .iter()
        .filter(|p| str_field(p, "_id") != exclude && ref_id(p.get("category")) == category)
        .take(limit)
        .cloned()
        .collect();
    ok(Value::Array(related))
}

/// Unknown ids answer `null`, as the backend does for a missing document.
async fn get_product(State(state): State<Shared>, UrlPath(id): UrlPath<String>) -> Response {
    let store = lock(&state);
    ok(find(&store.products, "_id", &id).cloned().unwrap_or(Value::Null))
}

async fn flash_sale(State(state): State<Shared>) -> Response {
    ok(Value::Array(lock(&state).flash_sale.clone()))
}

async fn flash_sale_product(
    State(state): State<Shared>,
    UrlPath(id): UrlPath<String>,
) -> Response {
    let store = lock(&state);
    ok(find(&store.flash_sale, "_id", &id)
        .cloned()
        .unwrap_or(Value::Null))
}

async fn list_categories(State(state): State<Shared>) -> Response {
    ok(Value::Array(lock(&state).categories.clone()))
}

async fn get_category(State(state): State<Shared>, UrlPath(id): UrlPath<String>) -> Response {
    let store = lock(&state);
    ok(find(&store.categories, "_id", &id)
        .cloned()
        .unwrap_or(Value::Null))
}

async fn news(State(state): State<Shared>) -> Response {
    ok(Value::Array(lock(&state).news.clone()))
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let store = lock(&state);
    store
        .accounts
        .iter()
        .find(|a| a.email == str_field(&body, "email") && a.password == str_field(&body, "password"))
        .map_or_else(
            || message(StatusCode::UNAUTHORIZED, "Email hoặc mật khẩu không đúng"),
            |account| ok(account.session.clone()),
        )
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut store = lock(&state);
    let email = str_field(&body, "email").to_string();
    if store.accounts.iter().any(|a| a.email == email) {
        return message(StatusCode::BAD_REQUEST, "Email đã được sử dụng");
    }
    let name = format!(
        "{} {}",
        str_field(&body, "lastName"),
        str_field(&body, "firstName")
    );
    store.accounts.push(Account {
        email: email.clone(),
        password: str_field(&body, "password").to_string(),
        session: json!({ "admin": false, "name": name, "email": email }),
    });
    ok(json!({ "message": "Tạo tài khoản thành công" }))
}

async fn payment(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut store = lock(&state);
    store.payments.push(body);
    if store.withhold_pay_url {
        return ok(json!({ "resultCode": 1006 }));
    }
    let n = store.payments.len();
    ok(json!({ "payUrl": format!("{PAY_URL_PREFIX}?t={n}") }))
}

// =============================================================================
// Back-office handlers
// =============================================================================

async fn dashboard_stats(State(state): State<Shared>) -> Response {
    let store = lock(&state);
    let revenue: i64 = store
        .orders
        .iter()
        .filter(|o| str_field(o, "status") == "delivered")
        .map(|o| amount(o, "totalAmount"))
        .sum();
    let inventory: i64 = store.products.iter().filter_map(quantity).sum();
    ok(json!({
        "totalRevenue": revenue,
        "revenueGrowth": 12.5,
        "totalInventory": inventory,
        "orderGrowth": -3.0,
        "percentageSold": 40.0,
        "series": [{ "name": "Doanh thu", "data": [revenue] }],
        "categories": ["T6"],
    }))
}

async fn list_products(State(state): State<Shared>) -> Response {
    ok(Value::Array(lock(&state).products.clone()))
}

async fn product_stats(State(state): State<Shared>) -> Response {
    let store = lock(&state);
    let (mut in_stock, mut low, mut out) = (0, 0, 0);
    for product in &store.products {
        let min_stock = product.get("minStock").and_then(Value::as_i64).unwrap_or(0);
        match quantity(product) {
            Some(q) if q <= 0 => out += 1,
            Some(q) if q <= min_stock => low += 1,
            _ => in_stock += 1,
        }
    }
    ok(json!({
        "totalProducts": store.products.len(),
        "inStockProducts": in_stock,
        "lowStockProducts": low,
        "outOfStockProducts": out,
    }))
}

async fn create_product(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut store = lock(&state);
    let mut product = body;
    let id = store.new_id("p");
    set_field(&mut product, "_id", json!(id));
    store.products.push(product.clone());
    (StatusCode::CREATED, Json(product)).into_response()
}

async fn update_product(
    State(state): State<Shared>,
    UrlPath(id): UrlPath<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = lock(&state);
    let Some(product) = find_mut(&mut store.products, "_id", &id) else {
        return not_found();
    };
    merge(product, &body);
    ok(product.clone())
}

async fn delete_product(State(state): State<Shared>, UrlPath(id): UrlPath<String>) -> Response {
    remove_one(&mut lock(&state).products, "_id", &id)
}

async fn bulk_delete_products(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    remove_listed(&mut lock(&state).products, "_id", &body, "productIds");
    ok(json!({ "message": "Deleted" }))
}

async fn list_orders(State(state): State<Shared>) -> Response {
    ok(Value::Array(lock(&state).orders.clone()))
}

async fn get_order(State(state): State<Shared>, UrlPath(order_id): UrlPath<String>) -> Response {
    let store = lock(&state);
    found(find(&store.orders, "orderId", &order_id))
}

async fn create_order(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut store = lock(&state);
    let mut order = body;
    let id = store.new_id("o");
    set_field(&mut order, "_id", json!(id));
    store.orders.push(order.clone());
    (StatusCode::CREATED, Json(order)).into_response()
}

async fn update_order(
    State(state): State<Shared>,
    UrlPath(order_id): UrlPath<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = lock(&state);
    let Some(order) = find_mut(&mut store.orders, "orderId", &order_id) else {
        return not_found();
    };
    merge(order, &body);
    set_field(order, "updatedAt", json!(UPDATED_AT));
    ok(order.clone())
}

async fn delete_order(State(state): State<Shared>, UrlPath(order_id): UrlPath<String>) -> Response {
    remove_one(&mut lock(&state).orders, "orderId", &order_id)
}

async fn bulk_delete_orders(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    remove_listed(&mut lock(&state).orders, "orderId", &body, "orderIds");
    ok(json!({ "message": "Deleted" }))
}

/// Locked orders go back to `inprogress`; anything else becomes `locked`.
async fn toggle_order_lock(
    State(state): State<Shared>,
    UrlPath(order_id): UrlPath<String>,
) -> Response {
    let mut store = lock(&state);
    let Some(order) = find_mut(&mut store.orders, "orderId", &order_id) else {
        return not_found();
    };
    let next = if str_field(order, "status") == "locked" {
        "inprogress"
    } else {
        "locked"
    };
    set_field(order, "status", json!(next));
    ok(order.clone())
}

/// Delivered orders grouped by their `category`, optionally limited to the
/// `startDate..=endDate` window.
async fn revenue(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let store = lock(&state);
    let start = params.get("startDate").map(String::as_str);
    let end = params.get("endDate").map(String::as_str);

    let mut by_category: Vec<(String, i64, u64)> = Vec::new();
    let mut total = 0;
    for order in &store.orders {
        let day = str_field(order, "createdAt").get(..10).unwrap_or_default();
        let in_window = start.is_none_or(|s| day >= s) && end.is_none_or(|e| day <= e);
        if !in_window || str_field(order, "status") != "delivered" {
            continue;
        }
        let category = str_field(order, "category").to_string();
        let value = amount(order, "totalAmount");
        total += value;
        if let Some(entry) = by_category.iter_mut().find(|(name, ..)| *name == category) {
            entry.1 += value;
            entry.2 += 1;
        } else {
            by_category.push((category, value, 1));
        }
    }

    let revenue_by_category: Vec<Value> = by_category
        .into_iter()
        .map(|(name, value, orders)| {
            json!({ "categoryName": name, "totalRevenue": value, "totalOrders": orders })
        })
        .collect();
    ok(json!({ "totalRevenue": total, "revenueByCategory": revenue_by_category }))
}

/// Newest first, five at most.
async fn recent_orders(State(state): State<Shared>) -> Response {
    let store = lock(&state);
    let mut orders = store.orders.clone();
    orders.sort_by(|a, b| str_field(b, "createdAt").cmp(str_field(a, "createdAt")));
    orders.truncate(5);
    ok(Value::Array(orders))
}

async fn list_users(State(state): State<Shared>) -> Response {
    ok(Value::Array(lock(&state).users.clone()))
}

async fn get_user(State(state): State<Shared>, UrlPath(id): UrlPath<String>) -> Response {
    let store = lock(&state);
    found(find(&store.users, "_id", &id))
}

async fn user_stats(State(state): State<Shared>) -> Response {
    let store = lock(&state);
    let count = |status: &str| {
        store
            .users
            .iter()
            .filter(|u| str_field(u, "status") == status)
            .count()
    };
    ok(json!({
        "totalUsers": store.users.len(),
        "activeUsers": count("active"),
        "lockedUsers": count("locked"),
        "pendingUsers": count("pending"),
        // Never maintained; clients recount violations from the accounts.
        "totalViolations": 0,
    }))
}

async fn toggle_user_lock(
    State(state): State<Shared>,
    UrlPath(id): UrlPath<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = lock(&state);
    let Some(user) = find_mut(&mut store.users, "_id", &id) else {
        return not_found();
    };
    match body.get("lockReason").and_then(Value::as_str) {
        Some(reason) => {
            set_field(user, "status", json!("locked"));
            set_field(user, "lockReason", json!(reason));
        }
        None => {
            set_field(user, "status", json!("active"));
            set_field(user, "lockReason", Value::Null);
        }
    }
    ok(user.clone())
}

async fn toggle_product_lock(
    State(state): State<Shared>,
    UrlPath(id): UrlPath<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = lock(&state);
    let Some(user) = find_mut(&mut store.users, "_id", &id) else {
        return not_found();
    };
    let product_id = str_field(&body, "productId").to_string();
    let product = user
        .get_mut("products")
        .and_then(Value::as_array_mut)
        .and_then(|products| find_mut(products, "_id", &product_id));
    let Some(product) = product else {
        return not_found();
    };
    let next = if str_field(product, "status") == "locked" {
        "active"
    } else {
        "locked"
    };
    set_field(product, "status", json!(next));
    ok(user.clone())
}

async fn report_violation(
    State(state): State<Shared>,
    UrlPath(id): UrlPath<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = lock(&state);
    let Some(user) = find_mut(&mut store.users, "_id", &id) else {
        return not_found();
    };
    let counter = match str_field(&body, "violationType") {
        "spam" => "spamCount",
        "cancellation" => "cancellationCount",
        "ghosting" => "ghostingCount",
        _ => return message(StatusCode::BAD_REQUEST, "Loại vi phạm không hợp lệ"),
    };
    let next = amount(user, counter) + 1;
    set_field(user, counter, json!(next));
    ok(user.clone())
}

async fn delete_user(State(state): State<Shared>, UrlPath(id): UrlPath<String>) -> Response {
    remove_one(&mut lock(&state).users, "_id", &id)
}

async fn bulk_delete_users(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    remove_listed(&mut lock(&state).users, "_id", &body, "userIds");
    ok(json!({ "message": "Deleted" }))
}

async fn create_category(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut store = lock(&state);
    let mut category = body;
    let id = store.new_id("c");
    set_field(&mut category, "_id", json!(id));
    store.categories.push(category.clone());
    (StatusCode::CREATED, Json(category)).into_response()
}

async fn update_category(
    State(state): State<Shared>,
    UrlPath(id): UrlPath<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = lock(&state);
    let Some(category) = find_mut(&mut store.categories, "_id", &id) else {
        return not_found();
    };
    merge(category, &body);
    ok(category.clone())
}

async fn delete_category(State(state): State<Shared>, UrlPath(id): UrlPath<String>) -> Response {
    remove_one(&mut lock(&state).categories, "_id", &id)
}
