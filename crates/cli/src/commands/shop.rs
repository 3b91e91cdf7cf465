//! Storefront commands.
//!
//! # Usage
//!
//! ```bash
//! funsport shop products --category football --price 100000-500000
//! funsport shop search "giày chạy"
//! funsport shop cart add <product-id> --size 42 --color Đen
//! funsport shop checkout
//! ```

use std::fmt::Write;

use chrono::Utc;
use clap::Subcommand;
use funsport_core::listing::{Page, PriceRange};
use funsport_core::{NOT_AVAILABLE, Product, labels};
use funsport_storefront::services::{
    AuthService, CartService, CheckoutService, FavoritesService, RegistrationForm,
};
use funsport_storefront::views::{
    self, ALL_TAB, CatalogFilter, CatalogQuery, CatalogView, Countdown, HeaderBadges, HomeView,
    ProductDetailView,
};
use funsport_storefront::{LocalStorage, StorefrontClient, StorefrontConfig};
use secrecy::SecretString;

use crate::error::Result;

/// Shown by `whoami` without a session.
const NOT_LOGGED_IN: &str = "Chưa đăng nhập.";

#[derive(Debug, Subcommand)]
pub enum ShopCommand {
    /// Browse the catalog
    Products {
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Category id, name or code
        #[arg(long)]
        category: Option<String>,
        /// Price bracket, e.g. `100000-500000`
        #[arg(long)]
        price: Option<PriceRange>,
    },
    /// Show one product with related products
    Product { id: String },
    /// Show the landing page
    Home {
        #[arg(long, default_value = ALL_TAB)]
        tab: String,
    },
    /// List categories
    Categories,
    /// List news articles
    News,
    /// Search the catalog (at least 3 characters)
    Search {
        keyword: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: Option<CartCommand>,
    },
    /// Pay for the whole cart
    Checkout,
    /// Pay for one unit of a product
    BuyNow { id: String },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Forget the session and the cart
    Logout,
    /// Show the stored session
    Whoami,
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// List cart lines
    List,
    /// Add a product in a size and color
    Add {
        id: String,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Take one unit off a product
    Remove { id: String },
    /// Drop every line of a product
    RemoveAll { id: String },
    /// Empty the cart
    Clear,
}

/// Run a storefront command and return what to print.
///
/// # Errors
///
/// Returns an error if the backend, local storage or input validation fails.
pub async fn run(command: ShopCommand, config: &StorefrontConfig) -> Result<String> {
    let client = StorefrontClient::new(config);
    let storage = LocalStorage::open(&config.data_dir)?;

    match command {
        ShopCommand::Products {
            page,
            category,
            price,
        } => {
            let mut catalog = CatalogView::load(&client, &CatalogQuery::default()).await?;
            catalog.apply_filter(CatalogFilter { category, price });
            catalog.go_to_page(page);
            Ok(render_page(&catalog.current_page()))
        }
        ShopCommand::Product { id } => {
            let detail = ProductDetailView::load(&client, &id).await?;
            Ok(render_detail(&detail))
        }
        ShopCommand::Home { tab } => {
            let mut home = HomeView::load(&client).await?;
            home.select_tab(&tab);
            Ok(render_home(&home))
        }
        ShopCommand::Categories => {
            let mut out = String::new();
            for category in client.categories().await? {
                let _ = writeln!(out, "{}  {}  {}", category.id, category.code, category.name);
            }
            Ok(out)
        }
        ShopCommand::News => {
            let mut out = String::new();
            for article in client.news().await? {
                let date = article
                    .created_at
                    .map(|ts| ts.format("%d/%m/%Y").to_string())
                    .unwrap_or_default();
                let _ = writeln!(out, "{date}  {}", article.title);
                if let Some(summary) = article.summary.as_deref() {
                    let _ = writeln!(out, "    {summary}");
                }
            }
            Ok(out)
        }
        ShopCommand::Search {
            keyword,
            category,
            page,
        } => {
            let query = views::search(&keyword, category.as_deref())?;
            let mut catalog = CatalogView::load(&client, &query).await?;
            catalog.go_to_page(page);
            Ok(render_page(&catalog.current_page()))
        }
        ShopCommand::Cart { action } => {
            let mut cart = CartService::new(storage);
            cart_command(&client, &mut cart, action.unwrap_or(CartCommand::List)).await
        }
        ShopCommand::Checkout => {
            let cart = CartService::new(storage);
            let checkout = CheckoutService::new(&client, &config.checkout_redirect_url);
            Ok(checkout.checkout(&cart).await?)
        }
        ShopCommand::BuyNow { id } => {
            let product = client.get_product(&id).await?;
            let checkout = CheckoutService::new(&client, &config.checkout_redirect_url);
            Ok(checkout.buy_now(&product).await?)
        }
        ShopCommand::Login { email, password } => {
            AuthService::new(&client, &storage)
                .login(&email, SecretString::from(password))
                .await?;
            Ok(labels::notice::LOGGED_IN.to_string())
        }
        ShopCommand::Register {
            first_name,
            last_name,
            email,
            password,
            confirm_password,
        } => {
            let form = RegistrationForm {
                first_name,
                last_name,
                email,
                password: SecretString::from(password),
                confirm_password: SecretString::from(confirm_password),
            };
            Ok(AuthService::new(&client, &storage).register(form).await?)
        }
        ShopCommand::Logout => {
            AuthService::new(&client, &storage).logout()?;
            Ok(labels::notice::LOGGED_OUT.to_string())
        }
        ShopCommand::Whoami => {
            let auth = AuthService::new(&client, &storage);
            let cart = CartService::new(storage.clone());
            let badges = HeaderBadges::collect(&cart, &FavoritesService::new(), &auth);
            let Some(session) = auth.session() else {
                return Ok(NOT_LOGGED_IN.to_string());
            };
            Ok(format!(
                "{}{}\nGiỏ hàng: {}",
                session.display_name().unwrap_or(NOT_AVAILABLE),
                if session.admin { " (admin)" } else { "" },
                badges.cart_items
            ))
        }
    }
}

async fn cart_command(
    client: &StorefrontClient,
    cart: &mut CartService,
    action: CartCommand,
) -> Result<String> {
    match action {
        CartCommand::List => Ok(render_cart(cart)),
        CartCommand::Add {
            id,
            size,
            color,
            quantity,
        } => {
            let mut detail = ProductDetailView::load(client, &id).await?;
            if let Some(size) = size.as_deref() {
                detail.select_size(size);
            }
            if let Some(color) = color.as_deref() {
                detail.select_color(color);
            }
            detail.set_quantity(quantity);
            Ok(detail.add_to_cart(cart)?)
        }
        CartCommand::Remove { id } => {
            cart.remove_one(&id)?;
            Ok(render_cart(cart))
        }
        CartCommand::RemoveAll { id } => {
            cart.remove_all(&id)?;
            Ok(render_cart(cart))
        }
        CartCommand::Clear => {
            cart.clear()?;
            Ok(render_cart(cart))
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn product_line(product: &Product) -> String {
    format!(
        "{}  {}  {}  [{}]",
        product.id,
        product.name,
        product.price,
        labels::stock_status(product.stock_status())
    )
}

fn render_page(page: &Page<'_, Product>) -> String {
    if page.is_empty() {
        return labels::NONE.to_string();
    }
    let mut out = String::new();
    for product in page.items {
        let _ = writeln!(out, "{}", product_line(product));
    }
    let _ = write!(
        out,
        "Trang {}/{} ({} sản phẩm)",
        page.page, page.total_pages, page.total_items
    );
    out
}

fn render_detail(detail: &ProductDetailView) -> String {
    let product = detail.product();
    let mut out = product_line(product);
    if let Some(desc) = product.desc.as_deref() {
        let _ = write!(out, "\n{desc}");
    }
    if !detail.colors().is_empty() {
        let _ = write!(out, "\nMàu: {}", detail.colors().join(", "));
    }
    if !detail.sizes().is_empty() {
        let _ = write!(out, "\nSize: {}", detail.sizes().join(", "));
    }
    if !detail.related().is_empty() {
        out.push_str("\nSản phẩm liên quan:");
        for related in detail.related() {
            let _ = write!(out, "\n  {}", product_line(related));
        }
    }
    out
}

fn render_home(home: &HomeView) -> String {
    let mut out = String::new();
    for product in home.tab_products() {
        let _ = writeln!(out, "{}", product_line(product));
    }
    if !home.flash_sale().is_empty() {
        let now = Utc::now();
        let countdown = Countdown::starting_at(now).remaining(now);
        let _ = writeln!(out, "Flash sale ({countdown}):");
        for product in home.flash_sale() {
            let _ = writeln!(out, "  {}", product_line(product));
        }
    }
    out.trim_end().to_string()
}

fn render_cart(cart: &CartService) -> String {
    if cart.is_empty() {
        return labels::notice::CART_EMPTY.to_string();
    }
    let mut out = String::new();
    for line in cart.items() {
        let _ = writeln!(
            out,
            "{} x{}  Size: {}  Màu: {}  {}",
            line.product.name,
            line.quantity,
            line.selected_size.as_deref().unwrap_or(NOT_AVAILABLE),
            line.selected_color.as_deref().unwrap_or(NOT_AVAILABLE),
            line.line_total()
        );
    }
    let _ = write!(out, "Tổng: {} ({} sản phẩm)", cart.total(), cart.count());
    out
}

#[cfg(test)]
mod tests {
    use funsport_core::Price;
    use funsport_core::listing::paginate;

    use super::*;

    #[test]
    fn test_render_page() {
        let products = vec![Product {
            id: "p1".into(),
            name: "Bóng đá".to_string(),
            price: Price::from_dong(350_000),
            quantity: Some(0),
            ..Product::default()
        }];
        assert_eq!(
            render_page(&paginate(&products, 1, 8)),
            "p1  Bóng đá  350.000 ₫  [Hết hàng]\nTrang 1/1 (1 sản phẩm)"
        );
        assert_eq!(render_page(&paginate(&products, 2, 8)), labels::NONE);
    }
}
