//! Storefront REST client implementation.
//!
//! Caches the product list, single products, flash-sale products and
//! categories using `moka`. Searches, news and every POST go straight to the
//! backend.

use std::sync::Arc;

use funsport_core::{Category, NewsArticle, PaymentRequest, PaymentResponse, Product, Session};
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, instrument};
use url::Url;

use super::BackendError;
use super::cache::{CacheKey, CacheValue};
use crate::config::StorefrontConfig;

/// Longest response body excerpt kept in errors and logs.
const BODY_EXCERPT_CHARS: usize = 500;

/// Body of `POST /v1/account/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
}

/// Body of `POST /v1/account/add`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
    #[serde(serialize_with = "expose_secret")]
    pub confirm_password: SecretString,
}

/// Response of `POST /v1/account/add`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterResponse {
    pub message: Option<String>,
}

fn expose_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the storefront REST endpoints.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl StorefrontClient {
    /// Create a new storefront client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_url.clone(),
                cache,
            }),
        }
    }

    /// Build `{base_url}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::Url(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and decode the JSON response.
    ///
    /// An empty body decodes as JSON `null`.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = request.send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let excerpt = excerpt(&body);
            tracing::warn!(status = %status, body = %excerpt, "Backend returned non-success status");
            return Err(BackendError::Status {
                status,
                body: excerpt,
            });
        }

        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| {
            tracing::error!(error = %e, body = %excerpt(body), "Failed to parse backend response");
            BackendError::Parse(e)
        })
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, BackendError> {
        self.send(self.inner.client.get(url)).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, BackendError> {
        self.send(self.inner.client.post(url).json(body)).await
    }

    /// Drop every cached response.
    pub fn invalidate_cache(&self) {
        self.inner.cache.invalidate_all();
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get every product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, BackendError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products: Vec<Product> = self.get(self.endpoint(&["v1", "product"])?).await?;

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Search products by category and keyword.
    ///
    /// Blank parameters are not sent; with neither set this is
    /// [`get_products`](Self::get_products).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        category: Option<&str>,
        keyword: Option<&str>,
    ) -> Result<Vec<Product>, BackendError> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        let keyword = keyword.map(str::trim).filter(|k| !k.is_empty());
        if category.is_none() && keyword.is_none() {
            return self.get_products().await;
        }

        let mut url = self.endpoint(&["v1", "product"])?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(category) = category {
                query.append_pair("category", category);
            }
            if let Some(keyword) = keyword {
                query.append_pair("keyword", keyword);
            }
        }

        self.get(url).await
    }

    /// Get a product by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &str) -> Result<Product, BackendError> {
        let cache_key = CacheKey::Product(id.to_string());

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Option<Product> = self.get(self.endpoint(&["v1", "product", id])?).await?;
        let product = product.ok_or_else(|| BackendError::NotFound(format!("product {id}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get up to `limit` random products from the same category as
    /// `product`, never including `product` itself.
    ///
    /// A product without a category has no related products and no request
    /// is made.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn related_products(
        &self,
        product: &Product,
        limit: u32,
    ) -> Result<Vec<Product>, BackendError> {
        let Some(category) = product.category_id() else {
            return Ok(Vec::new());
        };

        let mut url = self.endpoint(&["v1", "product", "random", "products"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("exclude", product.id.as_str())
            .append_pair("category", category);

        let related: Vec<Product> = self.get(url).await?;
        Ok(related.into_iter().filter(|p| p.id != product.id).collect())
    }

    /// Get the flash-sale products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn flash_sale_products(&self) -> Result<Vec<Product>, BackendError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::FlashSale).await
        {
            debug!("Cache hit for flash-sale products");
            return Ok(products);
        }

        let products: Vec<Product> = self.get(self.endpoint(&["v1", "productsell"])?).await?;

        self.inner
            .cache
            .insert(CacheKey::FlashSale, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a flash-sale product by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn flash_sale_product(&self, id: &str) -> Result<Product, BackendError> {
        let product: Option<Product> =
            self.get(self.endpoint(&["v1", "productsell", id])?).await?;
        product.ok_or_else(|| BackendError::NotFound(format!("flash-sale product {id}")))
    }

    // =========================================================================
    // Category and News Methods
    // =========================================================================

    /// Get every category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, BackendError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get(self.endpoint(&["v1", "category"])?).await?;

        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(categories.clone()),
            )
            .await;

        Ok(categories)
    }

    /// Get a category by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not found or the API request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn category(&self, id: &str) -> Result<Category, BackendError> {
        let category: Option<Category> = self.get(self.endpoint(&["v1", "category", id])?).await?;
        category.ok_or_else(|| BackendError::NotFound(format!("category {id}")))
    }

    /// Get the news feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn news(&self) -> Result<Vec<NewsArticle>, BackendError> {
        self.get(self.endpoint(&["api", "news"])?).await
    }

    // =========================================================================
    // Account and Payment Methods
    // =========================================================================

    /// Log in and return the session blob the backend issued.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the API request fails.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<Session, BackendError> {
        self.post(self.endpoint(&["v1", "account", "login"])?, request)
            .await
    }

    /// Create a customer account.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the registration or the API
    /// request fails.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<RegisterResponse, BackendError> {
        let response: Option<RegisterResponse> = self
            .post(self.endpoint(&["v1", "account", "add"])?, request)
            .await?;
        Ok(response.unwrap_or_default())
    }

    /// Ask the payment gateway for a payment page.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, request), fields(amount = %request.amount))]
    pub async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentResponse, BackendError> {
        let response: Option<PaymentResponse> =
            self.post(self.endpoint(&["payment"])?, request).await?;
        Ok(response.unwrap_or_default())
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> StorefrontClient {
        StorefrontClient::new(&StorefrontConfig::for_backend(
            Url::parse(base).unwrap(),
            "unused",
        ))
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let client = client("http://localhost:8000");
        let url = client.endpoint(&["v1", "product", "p 1"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/v1/product/p%201");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = client("http://api.funsport.vn/backend/");
        let url = client.endpoint(&["v1", "category"]).unwrap();
        assert_eq!(url.as_str(), "http://api.funsport.vn/backend/v1/category");
    }

    #[test]
    fn test_login_request_exposes_password_only_on_the_wire() {
        let request = LoginRequest {
            email: "an@funsport.vn".to_string(),
            password: SecretString::from("hunter22"),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["password"], "hunter22");
        assert!(!format!("{request:?}").contains("hunter22"));
    }

    #[test]
    fn test_register_request_is_camel_case() {
        let request = RegisterRequest {
            first_name: "An".to_string(),
            last_name: "Nguyễn".to_string(),
            email: "an@funsport.vn".to_string(),
            password: SecretString::from("pw"),
            confirm_password: SecretString::from("pw"),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["firstName"], "An");
        assert_eq!(json["confirmPassword"], "pw");
    }
}
