//! In-memory favorites list.

use funsport_core::Product;
use tokio::sync::watch;

/// Products the customer marked as favorite during this session.
///
/// Never persisted. Subscribers receive the whole list after each change.
pub struct FavoritesService {
    items: Vec<Product>,
    updates: watch::Sender<Vec<Product>>,
}

impl Default for FavoritesService {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoritesService {
    #[must_use]
    pub fn new() -> Self {
        let (updates, _) = watch::channel(Vec::new());
        Self {
            items: Vec::new(),
            updates,
        }
    }

    /// Add `product` unless a product with the same id is already there.
    /// Returns whether it was added.
    pub fn add(&mut self, product: &Product) -> bool {
        if self.is_favorite(product.id.as_str()) {
            return false;
        }
        self.items.push(product.clone());
        self.publish();
        true
    }

    /// Remove the product with `product_id`. Returns whether it was present.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p.id != *product_id);
        let removed = self.items.len() != before;
        if removed {
            self.publish();
        }
        removed
    }

    /// Add `product` if absent, remove it otherwise. Returns whether it is a
    /// favorite afterwards.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.remove(product.id.as_str()) {
            false
        } else {
            self.add(product)
        }
    }

    #[must_use]
    pub fn is_favorite(&self, product_id: &str) -> bool {
        self.items.iter().any(|p| p.id == *product_id)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn list(&self) -> &[Product] {
        &self.items
    }

    /// Follow the favorites list.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.updates.subscribe()
    }

    fn publish(&self) {
        self.updates.send_replace(self.items.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: id.into(),
            ..Product::default()
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut favorites = FavoritesService::new();
        assert!(favorites.add(&product("p1")));
        assert!(!favorites.add(&product("p1")));
        assert_eq!(favorites.count(), 1);
    }

    #[test]
    fn test_toggle_and_remove() {
        let mut favorites = FavoritesService::new();
        assert!(favorites.toggle(&product("p1")));
        assert!(favorites.is_favorite("p1"));
        assert!(!favorites.toggle(&product("p1")));
        assert!(!favorites.is_favorite("p1"));
        assert!(!favorites.remove("p1"));
    }

    #[test]
    fn test_subscribers_receive_list() {
        let mut favorites = FavoritesService::new();
        let rx = favorites.subscribe();
        favorites.add(&product("p1"));
        favorites.add(&product("p2"));
        favorites.remove("p1");

        let ids: Vec<String> = rx.borrow().iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, vec!["p2".to_string()]);
        assert_eq!(favorites.list().len(), 1);
    }
}
