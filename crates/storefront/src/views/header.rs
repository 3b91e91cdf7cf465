//! Site header: search box and badge counts.

use funsport_core::labels;

use crate::error::{AppError, Result};
use crate::services::{AuthService, CartService, FavoritesService};
use crate::views::CatalogQuery;

/// Shortest keyword the search box accepts, counted in characters after
/// trimming.
pub const MIN_KEYWORD_CHARS: usize = 3;

/// Validate the header search box and turn it into a catalog query.
///
/// # Errors
///
/// Returns a validation error when the trimmed keyword is shorter than
/// [`MIN_KEYWORD_CHARS`].
pub fn search(keyword: &str, category: Option<&str>) -> Result<CatalogQuery> {
    let keyword = keyword.trim();
    if keyword.chars().count() < MIN_KEYWORD_CHARS {
        return Err(AppError::validation(labels::notice::SEARCH_TOO_SHORT));
    }

    Ok(CatalogQuery {
        keyword: Some(keyword.to_string()),
        category: category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string),
    })
}

/// Counters shown next to the cart and favorites icons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderBadges {
    pub cart_items: u32,
    pub favorites: usize,
    pub logged_in: bool,
}

impl HeaderBadges {
    #[must_use]
    pub fn collect(
        cart: &CartService,
        favorites: &FavoritesService,
        auth: &AuthService<'_>,
    ) -> Self {
        Self {
            cart_items: cart.count(),
            favorites: favorites.count(),
            logged_in: auth.is_logged_in(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_short_keywords_are_rejected() {
        for keyword in ["", "ab", "  ab  ", "áo"] {
            let err = search(keyword, None).unwrap_err();
            assert_eq!(err.user_message(), labels::notice::SEARCH_TOO_SHORT);
        }
    }

    #[test]
    fn test_search_builds_query() {
        let query = search("  giày  ", Some(" ")).unwrap();
        assert_eq!(query.keyword.as_deref(), Some("giày"));
        assert_eq!(query.category, None);

        let query = search("bóng đá", Some("cat-1")).unwrap();
        assert_eq!(query.category.as_deref(), Some("cat-1"));
        assert!(query.is_search());
    }

    #[test]
    fn test_badges_reflect_services() {
        use crate::api::StorefrontClient;
        use crate::config::StorefrontConfig;
        use crate::storage::LocalStorage;
        use funsport_core::{Price, Product};

        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::open(dir.path()).unwrap();
        let config =
            StorefrontConfig::for_backend("http://127.0.0.1:9".parse().unwrap(), dir.path());
        let client = StorefrontClient::new(&config);

        let mut cart = CartService::new(storage.clone());
        let product = Product {
            id: "p1".into(),
            price: Price::from_dong(100_000),
            ..Product::default()
        };
        cart.add_to_cart(&product, 2, None, None).unwrap();
        let mut favorites = FavoritesService::new();
        favorites.add(&product);

        let badges = HeaderBadges::collect(&cart, &favorites, &AuthService::new(&client, &storage));
        assert_eq!(
            badges,
            HeaderBadges {
                cart_items: 2,
                favorites: 1,
                logged_in: false,
            }
        );
    }
}
