//! Hand-off to the payment gateway.

use funsport_core::{PaymentRequest, Price, Product, labels};
use tracing::{instrument, warn};

use crate::api::StorefrontClient;
use crate::error::{AppError, Result};
use crate::services::CartService;

/// Creates payment pages for the cart or a single product.
pub struct CheckoutService<'a> {
    client: &'a StorefrontClient,
    redirect_url: &'a str,
}

impl<'a> CheckoutService<'a> {
    /// `redirect_url` is where the gateway sends the customer afterwards.
    #[must_use]
    pub const fn new(client: &'a StorefrontClient, redirect_url: &'a str) -> Self {
        Self {
            client,
            redirect_url,
        }
    }

    /// Pay for the whole cart. Returns the payment page URL.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the cart total is zero, a backend
    /// error when the request fails, and [`AppError::MissingPayUrl`] when the
    /// gateway answers without a payment page.
    #[instrument(skip_all)]
    pub async fn checkout(&self, cart: &CartService) -> Result<String> {
        let total = cart.total();
        if total.is_zero() {
            return Err(AppError::validation(labels::notice::CART_EMPTY));
        }
        self.pay(total).await
    }

    /// Pay for one unit of `product`, skipping the cart. Returns the payment
    /// page URL.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the product has no positive price,
    /// otherwise the same errors as [`checkout`](Self::checkout).
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn buy_now(&self, product: &Product) -> Result<String> {
        if !product.price.is_positive() {
            return Err(AppError::validation(labels::notice::PRICELESS_PRODUCT));
        }
        self.pay(product.price).await
    }

    async fn pay(&self, amount: Price) -> Result<String> {
        let request = PaymentRequest {
            amount,
            redirect_url: self.redirect_url.to_string(),
        };
        let response = self
            .client
            .create_payment(&request)
            .await
            .inspect_err(|e| warn!(error = %e, "Payment request failed"))?;

        response
            .pay_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                warn!(amount = %amount, "Payment gateway returned no payUrl");
                AppError::MissingPayUrl
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::storage::LocalStorage;

    #[tokio::test]
    async fn test_empty_cart_is_rejected_locally() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            StorefrontConfig::for_backend("http://127.0.0.1:9".parse().unwrap(), dir.path());
        let client = StorefrontClient::new(&config);
        let cart = CartService::new(LocalStorage::open(dir.path()).unwrap());

        let err = CheckoutService::new(&client, &config.checkout_redirect_url)
            .checkout(&cart)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), labels::notice::CART_EMPTY);
    }

    #[tokio::test]
    async fn test_priceless_product_is_rejected_locally() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            StorefrontConfig::for_backend("http://127.0.0.1:9".parse().unwrap(), dir.path());
        let client = StorefrontClient::new(&config);

        let err = CheckoutService::new(&client, &config.checkout_redirect_url)
            .buy_now(&Product::default())
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), labels::notice::PRICELESS_PRODUCT);
    }
}
