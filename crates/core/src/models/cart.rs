use serde::{Deserialize, Serialize};

use super::Product;
use crate::types::Price;

/// One line of the shopping cart.
///
/// Lines are keyed by product id, selected size and selected color: the same
/// product in two sizes is two lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
}

impl CartItem {
    /// Whether this line holds `product_id` in the given size and color.
    #[must_use]
    pub fn is_line_for(&self, product_id: &str, size: Option<&str>, color: Option<&str>) -> bool {
        self.product.id == *product_id
            && self.selected_size.as_deref() == size
            && self.selected_color.as_deref() == color
    }

    /// Price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}
