//! Shopping cart mirrored to local storage.

use funsport_core::{CartItem, Price, Product};
use tokio::sync::watch;
use tracing::{instrument, warn};

use crate::storage::{CART_KEY, LocalStorage, StorageError};

/// The customer's cart.
///
/// The line list lives in memory and is written back to the `cart` storage
/// key after every change. The total unit count is published on a watch
/// channel so badges can follow it.
pub struct CartService {
    storage: LocalStorage,
    items: Vec<CartItem>,
    count: watch::Sender<u32>,
}

impl CartService {
    /// Load the saved cart. A saved cart that cannot be read or decoded is
    /// logged and replaced by an empty one.
    #[must_use]
    pub fn new(storage: LocalStorage) -> Self {
        let items = match storage.get_json::<Vec<CartItem>>(CART_KEY) {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable saved cart");
                Vec::new()
            }
        };
        let (count, _) = watch::channel(total_quantity(&items));

        Self {
            storage,
            items,
            count,
        }
    }

    /// Current cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` units of `product` in the given size and color.
    ///
    /// A quantity of 0 counts as 1. A line with the same product, size and
    /// color is incremented; otherwise a new line is appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved. The in-memory cart
    /// keeps the change.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        quantity: u32,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<(), StorageError> {
        let quantity = quantity.max(1);

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.is_line_for(product.id.as_str(), size, color))
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            let mut product = product.clone();
            product.selected_size = size.map(str::to_owned);
            product.selected_color = color.map(str::to_owned);
            self.items.push(CartItem {
                product,
                quantity,
                selected_size: size.map(str::to_owned),
                selected_color: color.map(str::to_owned),
            });
        }

        self.save()
    }

    /// Take one unit off the first line holding `product_id`, dropping the
    /// line when it reaches zero. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved.
    pub fn remove_one(&mut self, product_id: &str) -> Result<(), StorageError> {
        let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product.id == *product_id)
        else {
            return Ok(());
        };

        line.quantity = line.quantity.saturating_sub(1);
        self.items.retain(|line| line.quantity > 0);

        self.save()
    }

    /// Remove every line holding `product_id`, whatever its size or color.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved.
    pub fn remove_all(&mut self, product_id: &str) -> Result<(), StorageError> {
        self.items.retain(|line| line.product.id != *product_id);
        self.save()
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.save()
    }

    /// Σ price × quantity over every line.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn count(&self) -> u32 {
        total_quantity(&self.items)
    }

    /// Follow the unit count. The receiver sees the current count
    /// immediately and every change after that.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.count.subscribe()
    }

    fn save(&self) -> Result<(), StorageError> {
        self.count.send_replace(self.count());
        self.storage.set_json(CART_KEY, &self.items)
    }
}

fn total_quantity(items: &[CartItem]) -> u32 {
    items
        .iter()
        .fold(0_u32, |sum, line| sum.saturating_add(line.quantity))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.into(),
            name: format!("Sản phẩm {id}"),
            price: Price::from_dong(price),
            ..Product::default()
        }
    }

    fn cart() -> (tempfile::TempDir, CartService) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::open(dir.path()).unwrap();
        (dir, CartService::new(storage))
    }

    #[test]
    fn test_add_merges_same_variant() {
        let (_dir, mut cart) = cart();
        let shoe = product("p1", 500_000);

        cart.add_to_cart(&shoe, 1, Some("42"), Some("Đen")).unwrap();
        cart.add_to_cart(&shoe, 2, Some("42"), Some("Đen")).unwrap();
        cart.add_to_cart(&shoe, 1, Some("43"), Some("Đen")).unwrap();

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.count(), 4);
        assert_eq!(cart.total(), Price::from_dong(2_000_000));
    }

    #[test]
    fn test_zero_quantity_counts_as_one() {
        let (_dir, mut cart) = cart();
        cart.add_to_cart(&product("p1", 10_000), 0, None, None).unwrap();
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_remove_one_hits_first_line_by_id() {
        let (_dir, mut cart) = cart();
        let ball = product("p2", 100_000);
        cart.add_to_cart(&ball, 1, Some("4"), None).unwrap();
        cart.add_to_cart(&ball, 2, Some("5"), None).unwrap();

        cart.remove_one("p2").unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].selected_size.as_deref(), Some("5"));

        cart.remove_one("p2").unwrap();
        assert_eq!(cart.items()[0].quantity, 1);

        cart.remove_one("missing").unwrap();
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_remove_all_and_clear() {
        let (_dir, mut cart) = cart();
        cart.add_to_cart(&product("p1", 1), 1, Some("S"), None).unwrap();
        cart.add_to_cart(&product("p1", 1), 1, Some("M"), None).unwrap();
        cart.add_to_cart(&product("p2", 1), 1, None, None).unwrap();

        cart.remove_all("p1").unwrap();
        assert_eq!(cart.items().len(), 1);

        cart.clear().unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_cart_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::open(dir.path()).unwrap();

        let mut cart = CartService::new(storage.clone());
        cart.add_to_cart(&product("p9", 75_000), 2, Some("L"), Some("Xanh"))
            .unwrap();

        let reloaded = CartService::new(storage);
        assert_eq!(reloaded.items(), cart.items());
        assert_eq!(
            reloaded.items()[0].product.selected_color.as_deref(),
            Some("Xanh")
        );
    }

    #[test]
    fn test_corrupt_saved_cart_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::open(dir.path()).unwrap();
        storage.set_item(CART_KEY, "{broken").unwrap();

        let cart = CartService::new(storage);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subscribers_see_count_changes() {
        let (_dir, mut cart) = cart();
        let rx = cart.subscribe();
        assert_eq!(*rx.borrow(), 0);

        cart.add_to_cart(&product("p1", 1), 3, None, None).unwrap();
        assert_eq!(*rx.borrow(), 3);

        cart.remove_one("p1").unwrap();
        assert_eq!(*rx.borrow(), 2);
    }
}
