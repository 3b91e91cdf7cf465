//! CSV exports of the back-office tables.
//!
//! The header row is written as is; every data field is wrapped in double
//! quotes with embedded quotes doubled. Rows are separated by `\n` with no
//! trailing newline.

use std::fmt::Write;

use funsport_core::{Category, NOT_AVAILABLE, Order, Product, User, labels};

/// Suggested file names for each export.
pub const PRODUCTS_FILE: &str = "products_export.csv";
pub const ORDERS_FILE: &str = "orders_export.csv";
pub const USERS_FILE: &str = "users_export.csv";
pub const CATEGORIES_FILE: &str = "categories.csv";

const PRODUCT_HEADERS: &str = "Tên,Số Lượng,Danh Mục,Giá,Trạng Thái,Mô Tả,Màu Sắc,Tab,Mô Tả Chi Tiết,Số Lượng Tối Thiểu";
const ORDER_HEADERS: &str = "ID,Sản Phẩm,Giá,Khách Hàng,Số Tiền,Thanh Toán,Ngày,Trạng Thái";
const USER_HEADERS: &str =
    "Tên Khách Hàng,Email,Số Điện Thoại,Địa Chỉ,Trạng Thái,Vi Phạm,Sản Phẩm";
const CATEGORY_HEADERS: &str = "Code,Name,Status";

/// Shown in the products column for a customer without products.
const NO_PRODUCTS: &str = "Không có sản phẩm";

/// Every product, with prices in đồng notation.
#[must_use]
pub fn products_csv(products: &[Product]) -> String {
    table(
        PRODUCT_HEADERS,
        products.iter().map(|p| {
            let colors = p.colors.as_slice().join(", ");
            vec![
                p.name.clone(),
                p.quantity.unwrap_or_default().to_string(),
                p.category_label().unwrap_or(NOT_AVAILABLE).to_string(),
                p.price.to_vnd_string(),
                labels::product_status(p.status.as_ref()).to_string(),
                or_na(p.desc.as_deref()),
                or_na(Some(colors.as_str())),
                or_na(p.tab.as_deref()),
                or_na(p.describe.as_deref()),
                p.min_stock.unwrap_or_default().to_string(),
            ]
        }),
    )
}

/// The given orders, with raw amounts and `d/m/yyyy` dates.
#[must_use]
pub fn orders_csv<'a>(orders: impl IntoIterator<Item = &'a Order>) -> String {
    table(
        ORDER_HEADERS,
        orders.into_iter().map(|o| {
            vec![
                o.order_id.to_string(),
                o.product_display_name().to_string(),
                o.product_price().amount().to_string(),
                o.user_display_name().to_string(),
                o.total_amount.amount().to_string(),
                o.payment.clone(),
                o.created_at
                    .map(|ts| ts.format("%-d/%-m/%Y").to_string())
                    .unwrap_or_default(),
                labels::order_status(&o.status).to_string(),
            ]
        }),
    )
}

/// Every customer with violations and listed products.
#[must_use]
pub fn users_csv(users: &[User]) -> String {
    table(
        USER_HEADERS,
        users.iter().map(|u| {
            let products = u
                .products
                .iter()
                .map(|p| {
                    let status = p.status.as_ref().map_or("", |s| s.as_str());
                    format!("{} ({status})", p.name)
                })
                .collect::<Vec<_>>()
                .join("; ");
            vec![
                u.name.clone(),
                u.email.clone(),
                or_na(u.phone.as_deref()),
                or_na(u.address.as_deref()),
                labels::user_status(&u.status).to_string(),
                labels::violation_summary(u),
                if products.is_empty() {
                    NO_PRODUCTS.to_string()
                } else {
                    products
                },
            ]
        }),
    )
}

/// The given categories.
#[must_use]
pub fn categories_csv<'a>(categories: impl IntoIterator<Item = &'a Category>) -> String {
    table(
        CATEGORY_HEADERS,
        categories.into_iter().map(|c| {
            vec![
                c.code.clone(),
                c.name.clone(),
                labels::category_status(&c.status).to_string(),
            ]
        }),
    )
}

fn table(headers: &str, rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut csv = String::from(headers);
    for row in rows {
        csv.push('\n');
        for (i, field) in row.iter().enumerate() {
            if i > 0 {
                csv.push(',');
            }
            let _ = write!(csv, "\"{}\"", field.replace('"', "\"\""));
        }
    }
    csv
}

fn or_na(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use funsport_core::{CategoryStatus, OrderStatus, Price, ProductStatus, Ref, UserStatus};

    use super::*;

    #[test]
    fn test_products_csv() {
        let product = Product {
            name: "Bóng \"Pro\"".to_string(),
            price: Price::from_dong(1_250_000),
            quantity: Some(4),
            min_stock: Some(5),
            status: Some(ProductStatus::LowStock),
            category: Some(Ref::Id("football".to_string())),
            ..Product::default()
        };

        let csv = products_csv(&[product]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(PRODUCT_HEADERS));
        assert_eq!(
            lines.next(),
            Some(
                "\"Bóng \"\"Pro\"\"\",\"4\",\"football\",\"1.250.000 ₫\",\"Sắp hết\",\"N/A\",\"N/A\",\"N/A\",\"N/A\",\"5\""
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_orders_csv_fills_missing_references() {
        let order = Order {
            order_id: "DH001".into(),
            total_amount: Price::from_dong(300_000),
            payment: "cod".to_string(),
            status: OrderStatus::Return,
            created_at: Some(Utc.with_ymd_and_hms(2024, 5, 3, 9, 0, 0).unwrap()),
            ..Order::default()
        };

        let csv = orders_csv([&order]);
        assert_eq!(
            csv.lines().nth(1),
            Some("\"DH001\",\"N/A\",\"0\",\"N/A\",\"300000\",\"cod\",\"3/5/2024\",\"Trả Hàng\"")
        );
    }

    #[test]
    fn test_users_csv() {
        let user = User {
            name: "Lan".to_string(),
            email: "lan@funsport.vn".to_string(),
            status: UserStatus::Locked,
            spam_count: 1,
            products: vec![Product {
                name: "Giày".to_string(),
                status: Some(ProductStatus::Locked),
                ..Product::default()
            }],
            ..User::default()
        };

        let csv = users_csv(&[user, User::default()]);
        let mut rows = csv.lines().skip(1);
        assert_eq!(
            rows.next(),
            Some("\"Lan\",\"lan@funsport.vn\",\"N/A\",\"N/A\",\"Bị Khóa\",\"Spam: 1\",\"Giày (locked)\"")
        );
        assert!(rows.next().unwrap().ends_with("\"Không có\",\"Không có sản phẩm\""));
    }

    #[test]
    fn test_categories_csv() {
        let category = Category {
            code: "CL".to_string(),
            name: "Cầu lông".to_string(),
            status: CategoryStatus::Inactive,
            ..Category::default()
        };
        assert_eq!(
            categories_csv([&category]),
            "Code,Name,Status\n\"CL\",\"Cầu lông\",\"Không hoạt động\""
        );
        assert_eq!(categories_csv(std::iter::empty()), CATEGORY_HEADERS);
    }
}
