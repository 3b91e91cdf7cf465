//! Vietnamese display text.
//!
//! Everything the user reads (status names, notices, error messages) comes
//! from here so the storefront, the back office and the CLI agree on wording.

use crate::models::User;
use crate::types::{CategoryStatus, OrderStatus, ProductStatus, StockStatus, UserStatus};

/// Shown when a list has nothing to show.
pub const NONE: &str = "Không có";

/// Shown when a request fails without a more specific message.
pub const GENERIC_ERROR: &str = "Có lỗi xảy ra. Vui lòng thử lại sau.";

#[must_use]
pub fn order_status(status: &OrderStatus) -> &str {
    match status {
        OrderStatus::Delivered => "Đã Giao",
        OrderStatus::InProgress => "Đang Xử Lý",
        OrderStatus::Return => "Trả Hàng",
        OrderStatus::Locked => "Bị Khóa",
        OrderStatus::Other(raw) => raw,
    }
}

#[must_use]
pub fn user_status(status: &UserStatus) -> &str {
    match status {
        UserStatus::Active => "Hoạt Động",
        UserStatus::Locked => "Bị Khóa",
        UserStatus::Pending => "Đang Chờ",
        UserStatus::Other(raw) => raw,
    }
}

#[must_use]
pub fn category_status(status: &CategoryStatus) -> &str {
    match status {
        CategoryStatus::Active => "Hoạt động",
        CategoryStatus::Inactive => "Không hoạt động",
        CategoryStatus::Other(raw) => raw,
    }
}

#[must_use]
pub const fn stock_status(status: StockStatus) -> &'static str {
    match status {
        StockStatus::InStock => "Còn hàng",
        StockStatus::LowStock => "Sắp hết",
        StockStatus::OutOfStock => "Hết hàng",
    }
}

/// Label for a stored product status. Anything that is not a stock
/// classification reads as in stock.
#[must_use]
pub const fn product_status(status: Option<&ProductStatus>) -> &'static str {
    match status {
        Some(ProductStatus::LowStock) => stock_status(StockStatus::LowStock),
        Some(ProductStatus::OutOfStock) => stock_status(StockStatus::OutOfStock),
        _ => stock_status(StockStatus::InStock),
    }
}

/// Comma separated summary of a user's violations and lock reason, or
/// [`NONE`].
#[must_use]
pub fn violation_summary(user: &User) -> String {
    let mut parts = Vec::new();
    if user.spam_count > 0 {
        parts.push(format!("Spam: {}", user.spam_count));
    }
    if user.cancellation_count > 0 {
        parts.push(format!("Hủy Đơn: {}", user.cancellation_count));
    }
    if user.ghosting_count > 0 {
        parts.push(format!("Bom Hàng: {}", user.ghosting_count));
    }
    if let Some(reason) = user.lock_reason.as_deref().filter(|r| !r.is_empty()) {
        parts.push(format!("Lý Do Khóa: {reason}"));
    }

    if parts.is_empty() {
        NONE.to_owned()
    } else {
        parts.join(", ")
    }
}

/// Message for a failed HTTP call.
///
/// `status` is `None` when the server could not be reached at all; `reason`
/// is appended for status codes without a dedicated message.
#[must_use]
pub fn http_error_message(status: Option<u16>, reason: Option<&str>) -> String {
    match status {
        None | Some(0) => {
            "Không thể kết nối đến server. Vui lòng kiểm tra server backend.".to_owned()
        }
        Some(400) => "Dữ liệu không hợp lệ".to_owned(),
        Some(401) => "Không có quyền truy cập".to_owned(),
        Some(403) => "Bị từ chối truy cập".to_owned(),
        Some(404) => "Không tìm thấy dữ liệu".to_owned(),
        Some(500) => "Lỗi máy chủ nội bộ".to_owned(),
        Some(code) => match reason {
            Some(reason) if !reason.is_empty() => format!("Lỗi {code}: {reason}"),
            _ => format!("Lỗi {code}"),
        },
    }
}

/// Success and validation notices.
pub mod notice {
    pub const CART_EMPTY: &str = "Giỏ hàng trống";
    pub const NO_PAYMENT_LINK: &str = "Không lấy được link thanh toán MoMo.";
    pub const PRICELESS_PRODUCT: &str = "Sản phẩm chưa có giá. Không thể thanh toán.";
    pub const PICK_VARIANT: &str = "Vui lòng chọn màu và kích cỡ trước khi thêm vào giỏ.";
    pub const SEARCH_TOO_SHORT: &str = "Hãy nhập ít nhất 3 ký tự";
    pub const PASSWORD_MISMATCH: &str = "Mật khẩu xác nhận không khớp!";
    pub const REGISTERED: &str = "Đăng ký thành công!";
    pub const LOGGED_IN: &str = "Đăng nhập thành công!";
    pub const LOGGED_OUT: &str = "Đã đăng xuất.";
    pub const ADMIN_REQUIRED: &str = "Bạn cần đăng nhập bằng tài khoản quản trị.";

    pub const PRODUCT_FORM_INCOMPLETE: &str = "Vui lòng điền đầy đủ thông tin sản phẩm!";
    pub const PRODUCT_ADDED: &str = "Thêm sản phẩm thành công!";
    pub const PRODUCT_UPDATED: &str = "Cập nhật sản phẩm thành công!";
    pub const PRODUCT_DELETED: &str = "Xóa sản phẩm thành công!";
    pub const SELECT_PRODUCTS: &str = "Vui lòng chọn sản phẩm để xóa.";
    pub const PRODUCTS_EXPORTED: &str = "Xuất dữ liệu sản phẩm thành công!";
    pub const STOCK_UPDATED: &str = "Cập nhật tồn kho thành công!";
    pub const STOCK_ENTRY_INVALID: &str = "Vui lòng nhập đầy đủ và hợp lệ các trường.";
    pub const STOCK_TARGET_MISSING: &str = "Vui lòng chọn sản phẩm và nhập số lượng hợp lệ.";
    pub const PRODUCT_MISSING: &str = "Sản phẩm không tồn tại.";
    pub const STOCK_PRODUCT_ADDED: &str = "Sản phẩm đã được thêm thành công!";

    pub const ORDER_MISSING: &str = "Thiếu thông tin đơn hàng";
    pub const ORDER_NOT_FOUND: &str = "Không tìm thấy đơn hàng";
    pub const ORDER_DELETED: &str = "Xóa đơn hàng thành công!";
    pub const ORDER_STATUS_UPDATED: &str = "Cập nhật trạng thái đơn hàng thành công!";
    pub const SELECT_ORDERS_TO_EXPORT: &str = "Vui lòng chọn ít nhất một đơn hàng để xuất!";
    pub const ORDERS_EXPORTED: &str = "Xuất dữ liệu đơn hàng thành công!";

    pub const USER_DELETED: &str = "Xóa khách hàng thành công!";
    pub const USER_NOT_FOUND: &str = "Không tìm thấy khách hàng";
    pub const SELECT_USERS: &str = "Vui lòng chọn khách hàng để xóa.";
    pub const USERS_EXPORTED: &str = "Xuất dữ liệu khách hàng thành công!";
    pub const NO_USER_WITH_STATUS: &str =
        "Không tìm thấy khách hàng với trạng thái này. Hiển thị tất cả khách hàng.";
    pub const VIOLATION_REPORTED: &str = "Đã ghi nhận vi phạm.";
    pub const PRODUCT_LOCK_TOGGLED: &str = "Đã cập nhật trạng thái sản phẩm của khách hàng.";

    pub const CATEGORY_FORM_INCOMPLETE: &str = "Vui lòng nhập tên và mã danh mục!";
    pub const CATEGORY_NOT_FOUND: &str = "Không tìm thấy danh mục";
    pub const CATEGORY_ADDED: &str = "Thêm danh mục thành công!";
    pub const CATEGORY_UPDATED: &str = "Cập nhật danh mục thành công!";
    pub const CATEGORY_DELETED: &str = "Xóa danh mục thành công!";
    pub const CATEGORIES_EXPORTED: &str = "Xuất dữ liệu danh mục thành công!";

    /// `Đã thêm "<name>" vào giỏ hàng!`
    #[must_use]
    pub fn added_to_cart(name: &str) -> String {
        format!("Đã thêm \"{name}\" vào giỏ hàng!")
    }

    /// Like [`added_to_cart`] but naming the chosen size and color.
    #[must_use]
    pub fn added_variant_to_cart(name: &str, size: &str, color: &str) -> String {
        format!("Đã thêm \"{name}\" (Size: {size}, Màu: {color}) vào giỏ hàng!")
    }

    /// Lock state change for an account, `locked` being the new state.
    #[must_use]
    pub fn account_lock(name: &str, locked: bool) -> String {
        format!(
            "Tài khoản {name} đã được {}!",
            if locked { "khóa" } else { "mở khóa" }
        )
    }

    /// Lock state change for an order, `locked` being the new state.
    #[must_use]
    pub fn order_lock(order_id: &str, locked: bool) -> String {
        format!(
            "Đơn hàng {order_id} đã được {}!",
            if locked { "khóa" } else { "mở khóa" }
        )
    }

    #[must_use]
    pub fn user_deleted(name: &str) -> String {
        format!("Xóa khách hàng {name} thành công!")
    }

    /// Result of narrowing the user list by a status.
    #[must_use]
    pub fn users_with_status(count: usize, status_label: &str) -> String {
        format!("Hiển thị {count} khách hàng với trạng thái: {status_label}")
    }
}
