//! Product document shared by the storefront and the back office.

use serde::{Deserialize, Serialize};

use super::{Category, Document, FlexList, Ref};
use crate::types::{Price, ProductId, ProductStatus, StockStatus};

/// A product as returned by `/v1/product`, `/v1/productsell` and
/// `/v1/products`.
///
/// The storefront and back-office endpoints return slightly different
/// shapes; this type accepts both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id", skip_serializing_if = "ProductId::is_empty")]
    pub id: ProductId,
    #[serde(alias = "productName")]
    pub name: String,
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Ref<Category>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub describe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "imagerv", skip_serializing_if = "Option::is_none")]
    pub image_2: Option<String>,
    #[serde(rename = "imagervv", skip_serializing_if = "Option::is_none")]
    pub image_3: Option<String>,
    #[serde(rename = "imagervvv", skip_serializing_if = "Option::is_none")]
    pub image_4: Option<String>,
    #[serde(rename = "imagervvvv", skip_serializing_if = "Option::is_none")]
    pub image_5: Option<String>,
    #[serde(skip_serializing_if = "FlexList::is_empty")]
    pub images: FlexList,

    #[serde(rename = "color")]
    pub colors: FlexList,
    #[serde(rename = "size")]
    pub sizes: FlexList,

    /// Units in stock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// Threshold at or below which stock counts as low.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
}

impl Product {
    /// The category id, whether the category was sent as an id or embedded.
    #[must_use]
    pub fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(Ref::id)
    }

    /// The category display name when the category was embedded, otherwise
    /// the raw id.
    #[must_use]
    pub fn category_label(&self) -> Option<&str> {
        self.category.as_ref().map(|category| match category {
            Ref::Embedded(c) => c.name.as_str(),
            Ref::Id(id) => id.as_str(),
        })
    }

    /// Whether this product belongs to the category identified by `key`.
    ///
    /// `key` is compared with the category id and, when the category is
    /// embedded, with its name and code too.
    #[must_use]
    pub fn in_category(&self, key: &str) -> bool {
        match &self.category {
            None => false,
            Some(Ref::Id(id)) => id == key,
            Some(Ref::Embedded(category)) => category.is_identified_by(key),
        }
    }

    /// Every image URL of the product, main image first, without blanks.
    #[must_use]
    pub fn gallery(&self) -> Vec<&str> {
        [
            &self.image,
            &self.image_2,
            &self.image_3,
            &self.image_4,
            &self.image_5,
        ]
        .into_iter()
        .filter_map(Option::as_deref)
        .chain(self.images.iter().map(String::as_str))
        .filter(|url| !url.trim().is_empty())
        .collect()
    }

    /// The stock classification of this product.
    ///
    /// An explicit stock status stored on the document wins; otherwise the
    /// status is derived from `quantity` and `min_stock`. A product without
    /// a quantity counts as in stock.
    #[must_use]
    pub fn stock_status(&self) -> StockStatus {
        match self.status {
            Some(ProductStatus::InStock) => return StockStatus::InStock,
            Some(ProductStatus::LowStock) => return StockStatus::LowStock,
            Some(ProductStatus::OutOfStock) => return StockStatus::OutOfStock,
            _ => {}
        }

        match self.quantity {
            Some(qty) if qty <= 0 => StockStatus::OutOfStock,
            Some(qty) if qty <= self.min_stock.unwrap_or(0) => StockStatus::LowStock,
            _ => StockStatus::InStock,
        }
    }

    /// Whether an administrator locked this product.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self.status, Some(ProductStatus::Locked))
    }

    /// Price multiplied by the units in stock; zero without a quantity.
    #[must_use]
    pub fn stock_value(&self) -> Price {
        self.price * self.quantity.unwrap_or(0)
    }
}

impl Document for Product {
    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_storefront_document() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Giày chạy bộ",
            "price": 1_250_000,
            "category": "c1",
            "image": "a.jpg",
            "imagerv": "b.jpg",
            "imagervv": "",
            "color": "Đỏ, Đen",
            "size": "[\"40\",\"41\"]",
            "tab": "Sale"
        }))
        .unwrap();

        assert_eq!(product.id, "p1");
        assert_eq!(product.price, Price::from_dong(1_250_000));
        assert_eq!(product.category_id(), Some("c1"));
        assert_eq!(product.colors.as_slice(), ["Đỏ", "Đen"]);
        assert_eq!(product.sizes.as_slice(), ["40", "41"]);
        assert_eq!(product.gallery(), vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_decodes_admin_document_with_embedded_category() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p2",
            "productName": "Vợt cầu lông",
            "price": "450000",
            "category": { "_id": "c9", "name": "Cầu lông", "code": "CL" },
            "images": ["x.png"],
            "quantity": 3,
            "minStock": 5
        }))
        .unwrap();

        assert_eq!(product.name, "Vợt cầu lông");
        assert!(product.in_category("c9"));
        assert!(product.in_category("Cầu lông"));
        assert!(product.in_category("CL"));
        assert!(!product.in_category("c1"));
        assert_eq!(product.category_label(), Some("Cầu lông"));
        assert_eq!(product.stock_status(), StockStatus::LowStock);
        assert_eq!(product.stock_value(), Price::from_dong(1_350_000));
    }

    #[test]
    fn test_stock_status_derivation() {
        let mut product = Product {
            quantity: Some(0),
            min_stock: Some(5),
            ..Product::default()
        };
        assert_eq!(product.stock_status(), StockStatus::OutOfStock);

        product.quantity = Some(5);
        assert_eq!(product.stock_status(), StockStatus::LowStock);

        product.quantity = Some(6);
        assert_eq!(product.stock_status(), StockStatus::InStock);

        product.status = Some(ProductStatus::OutOfStock);
        assert_eq!(product.stock_status(), StockStatus::OutOfStock);

        product.status = Some(ProductStatus::Active);
        assert_eq!(product.stock_status(), StockStatus::InStock);
    }

    #[test]
    fn test_missing_fields_default() {
        let product: Product = serde_json::from_str("{}").unwrap();
        assert!(product.id.is_empty());
        assert_eq!(product.price, Price::ZERO);
        assert_eq!(product.stock_status(), StockStatus::InStock);
        assert!(product.gallery().is_empty());
    }
}
