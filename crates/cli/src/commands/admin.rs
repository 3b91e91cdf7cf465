//! Back-office commands.
//!
//! Every command needs a stored session with the admin flag (log in with
//! `funsport shop login` first). Destructive commands need `--yes`.
//!
//! # Usage
//!
//! ```bash
//! funsport admin dashboard --from 2024-06-01 --to 2024-06-30
//! funsport admin products list --status lowstock
//! funsport admin orders status DH001 delivered
//! funsport admin users delete <user-id> --yes
//! funsport admin inventory adjust <product-id> remove 3
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_API_URL` - Back-office API base URL (falls back to `FUNSPORT_API_URL`)

use std::fmt::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Args, Subcommand, ValueEnum};
use funsport_admin::api::{CategoryForm, ProductForm, Violation};
use funsport_admin::export;
use funsport_admin::views::{
    CategoriesView, DashboardView, InventoryView, OrderFilter, OrdersView, ProductFilter,
    ProductsView, StockAdjustment, UsersView,
};
use funsport_admin::{AdminClient, AdminConfig};
use funsport_core::labels::{self, notice};
use funsport_core::listing::DateRange;
use funsport_core::{CategoryStatus, OrderStatus, Price};
use funsport_storefront::services::AuthService;
use funsport_storefront::{LocalStorage, StorefrontClient, StorefrontConfig};
use tracing::info;

use crate::error::{CliError, Result};

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Headline figures, recent orders and revenue
    Dashboard {
        /// First day of the revenue window (`YYYY-MM-DD`)
        #[arg(long)]
        from: Option<String>,
        /// Last day of the revenue window (`YYYY-MM-DD`)
        #[arg(long)]
        to: Option<String>,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductsCommand,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrdersCommand,
    },
    /// Manage customer accounts
    Users {
        #[command(subcommand)]
        action: UsersCommand,
    },
    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: CategoriesCommand,
    },
    /// Stock figures and adjustments
    Inventory {
        #[command(subcommand)]
        action: InventoryCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<String>,
        /// `instock`, `lowstock` or `outofstock`
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Show {
        id: String,
    },
    Add(ProductArgs),
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductArgs,
    },
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Delete several products in one request
    DeleteMany {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long)]
        yes: bool,
    },
    Export {
        #[arg(long, default_value = export::PRODUCTS_FILE)]
        out: PathBuf,
    },
}

/// Product form fields. Unset fields keep their current (or default) value.
#[derive(Debug, Args)]
pub struct ProductArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// Price in đồng
    #[arg(long)]
    price: Option<i64>,
    #[arg(long)]
    quantity: Option<i64>,
    #[arg(long)]
    min_stock: Option<i64>,
    /// Image URL, repeatable
    #[arg(long = "image")]
    images: Vec<String>,
    #[arg(long)]
    desc: Option<String>,
    /// Comma separated colors
    #[arg(long)]
    color: Option<String>,
    #[arg(long)]
    tab: Option<String>,
    #[arg(long)]
    describe: Option<String>,
}

impl ProductArgs {
    fn apply(self, form: &mut ProductForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
        if let Some(price) = self.price {
            form.price = Price::from_dong(price);
        }
        if self.quantity.is_some() {
            form.quantity = self.quantity;
        }
        if let Some(min_stock) = self.min_stock {
            form.min_stock = min_stock;
        }
        if !self.images.is_empty() {
            form.images = self.images;
        }
        form.desc = self.desc.or(form.desc.take());
        form.color = self.color.or(form.color.take());
        form.tab = self.tab.or(form.tab.take());
        form.describe = self.describe.or(form.describe.take());
    }

    fn into_form(self) -> ProductForm {
        let mut form = ProductForm::default();
        self.apply(&mut form);
        form
    }
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    List {
        /// Order number, product name or customer name
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        status: Option<OrderStatus>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Lock or unlock an order
    Lock {
        order_id: String,
    },
    /// Change the status of an order
    Status {
        order_id: String,
        status: OrderStatus,
    },
    Delete {
        order_id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Export the given orders
    Export {
        order_ids: Vec<String>,
        #[arg(long, default_value = export::ORDERS_FILE)]
        out: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List {
        /// Status substring, e.g. `lock`
        #[arg(long)]
        status: Option<String>,
    },
    Show {
        id: String,
    },
    /// Lock an active account or unlock any other
    Lock {
        id: String,
    },
    /// Record `spam`, `cancellation` or `ghosting`
    Report {
        id: String,
        violation: Violation,
    },
    /// Lock or unlock a product listed by the customer
    LockProduct {
        id: String,
        product_id: String,
    },
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    DeleteMany {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long)]
        yes: bool,
    },
    Export {
        #[arg(long, default_value = export::USERS_FILE)]
        out: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        status: Option<String>,
    },
    /// Create a category, or update it with `--id`
    Save {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "active")]
        status: CategoryStatus,
    },
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Export the categories matching the filters
    Export {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value = export::CATEGORIES_FILE)]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AdjustMode {
    Add,
    Remove,
    Set,
}

#[derive(Debug, Subcommand)]
pub enum InventoryCommand {
    /// Stock figures and the latest orders
    Summary,
    Add(ProductArgs),
    Adjust {
        product_id: String,
        mode: AdjustMode,
        units: u32,
    },
    DeleteOrder {
        order_id: String,
        #[arg(long)]
        yes: bool,
    },
}

/// Run a back-office command and return what to print.
///
/// # Errors
///
/// Returns [`CliError::AdminRequired`] without an admin session, otherwise
/// any API, validation or file error.
pub async fn run(command: AdminCommand, storefront: &StorefrontConfig) -> Result<String> {
    let storage = LocalStorage::open(&storefront.data_dir)?;
    let shop = StorefrontClient::new(storefront);
    if !AuthService::new(&shop, &storage).is_admin() {
        return Err(CliError::AdminRequired);
    }

    let config = AdminConfig::from_env()?;
    let client = AdminClient::new(&config);

    match command {
        AdminCommand::Dashboard { from, to } => {
            let range = date_range(from.as_deref(), to.as_deref())?;
            let dashboard = DashboardView::load(&client, range).await?;
            Ok(render_dashboard(&dashboard))
        }
        AdminCommand::Products { action } => products(&client, action).await,
        AdminCommand::Orders { action } => orders(&client, action).await,
        AdminCommand::Users { action } => users(&client, action).await,
        AdminCommand::Categories { action } => categories(&client, action).await,
        AdminCommand::Inventory { action } => inventory(&client, action).await,
    }
}

async fn products(client: &AdminClient, action: ProductsCommand) -> Result<String> {
    let mut view = ProductsView::load(client).await?;

    match action {
        ProductsCommand::List {
            search,
            category,
            status,
            page,
        } => {
            view.set_filter(ProductFilter {
                search,
                category,
                status,
            });
            view.go_to_page(page);
            let page = view.current_page();
            let stats = view.stats();
            let mut out = format!(
                "Tổng: {}  Còn hàng: {}  Sắp hết: {}  Hết hàng: {}\n",
                stats.total_products,
                stats.in_stock_products,
                stats.low_stock_products,
                stats.out_of_stock_products
            );
            for p in page.items {
                let _ = writeln!(
                    out,
                    "{}  {}  {}  SL: {}  [{}]",
                    p.id,
                    p.name,
                    p.price,
                    p.quantity.unwrap_or_default(),
                    labels::stock_status(p.stock_status())
                );
            }
            let _ = write!(out, "Trang {}/{}", page.page, page.total_pages.max(1));
            Ok(out)
        }
        ProductsCommand::Show { id } => Ok(view.details(&id)?),
        ProductsCommand::Add(fields) => Ok(view.add(client, &fields.into_form()).await?),
        ProductsCommand::Update { id, fields } => {
            let mut form = view
                .products()
                .iter()
                .find(|p| p.id == id.as_str())
                .map(ProductForm::from)
                .ok_or_else(|| CliError::InvalidArgument(notice::PRODUCT_MISSING.to_string()))?;
            fields.apply(&mut form);
            Ok(view.update(client, &id, &form).await?)
        }
        ProductsCommand::Delete { id, yes } => {
            confirm(yes)?;
            Ok(view.delete(client, &id).await?)
        }
        ProductsCommand::DeleteMany { ids, yes } => {
            confirm(yes)?;
            for id in &ids {
                view.toggle_selected(id);
            }
            Ok(view.delete_selected(client).await?)
        }
        ProductsCommand::Export { out } => {
            write_file(&out, &view.export_csv())?;
            Ok(exported(notice::PRODUCTS_EXPORTED, &out))
        }
    }
}

async fn orders(client: &AdminClient, action: OrdersCommand) -> Result<String> {
    let mut view = OrdersView::load(client).await?;

    match action {
        OrdersCommand::List {
            search,
            status,
            from,
            to,
        } => {
            view.set_filter(OrderFilter {
                search,
                status,
                dates: date_range(from.as_deref(), to.as_deref())?,
            });
            let stats = view.stats();
            let mut out = format!(
                "Tổng: {}  Đang xử lý: {}  Đã giao: {}  Trả hàng: {}\n",
                stats.total, stats.in_progress, stats.delivered, stats.returned
            );
            for order in view.filtered() {
                let _ = writeln!(
                    out,
                    "{}  {}  {}  {}  [{}]",
                    order.order_id,
                    order.product_display_name(),
                    order.user_display_name(),
                    order.total_amount,
                    labels::order_status(&order.status)
                );
            }
            Ok(out.trim_end().to_string())
        }
        OrdersCommand::Lock { order_id } => Ok(view.toggle_lock(client, &order_id).await?),
        OrdersCommand::Status { order_id, status } => {
            Ok(view.update_status(client, &order_id, status).await?)
        }
        OrdersCommand::Delete { order_id, yes } => {
            confirm(yes)?;
            Ok(view.delete(client, &order_id).await?)
        }
        OrdersCommand::Export { order_ids, out } => {
            for order_id in &order_ids {
                view.toggle_selected(order_id);
            }
            write_file(&out, &view.export_selected_csv()?)?;
            Ok(exported(notice::ORDERS_EXPORTED, &out))
        }
    }
}

async fn users(client: &AdminClient, action: UsersCommand) -> Result<String> {
    let mut view = UsersView::load(client).await?;

    match action {
        UsersCommand::List { status } => {
            let mut out = String::new();
            if let Some(status) = status.as_deref() {
                let _ = writeln!(out, "{}", view.filter_by_status(status));
            }
            let stats = view.stats();
            let _ = writeln!(
                out,
                "Tổng: {}  Hoạt động: {}  Bị khóa: {}  Đang chờ: {}  Vi phạm: {}",
                stats.total_users,
                stats.active_users,
                stats.locked_users,
                stats.pending_users,
                stats.total_violations
            );
            for user in view.shown() {
                let _ = writeln!(
                    out,
                    "{}  {}  {}  [{}]  {}",
                    user.id,
                    user.name,
                    user.email,
                    labels::user_status(&user.status),
                    labels::violation_summary(user)
                );
            }
            Ok(out.trim_end().to_string())
        }
        UsersCommand::Show { id } => Ok(view.details(&id)?),
        UsersCommand::Lock { id } => Ok(view.toggle_lock(client, &id).await?),
        UsersCommand::Report { id, violation } => {
            Ok(view.report_violation(client, &id, violation).await?)
        }
        UsersCommand::LockProduct { id, product_id } => {
            Ok(view.toggle_product_lock(client, &id, &product_id).await?)
        }
        UsersCommand::Delete { id, yes } => {
            confirm(yes)?;
            Ok(view.delete(client, &id).await?)
        }
        UsersCommand::DeleteMany { ids, yes } => {
            confirm(yes)?;
            for id in &ids {
                view.toggle_selected(id);
            }
            Ok(view.delete_selected(client).await?)
        }
        UsersCommand::Export { out } => {
            write_file(&out, &view.export_csv())?;
            Ok(exported(notice::USERS_EXPORTED, &out))
        }
    }
}

async fn categories(client: &AdminClient, action: CategoriesCommand) -> Result<String> {
    let mut view = CategoriesView::load(client).await?;

    match action {
        CategoriesCommand::List { search, status } => {
            view.set_search(&search);
            view.set_status(status.as_deref());
            let stats = view.stats();
            let mut out = format!(
                "Tổng: {}  Hoạt động: {}  Không hoạt động: {}\n",
                stats.total, stats.active, stats.inactive
            );
            for category in view.filtered() {
                let _ = writeln!(
                    out,
                    "{}  {}  {}  [{}]",
                    category.id,
                    category.code,
                    category.name,
                    labels::category_status(&category.status)
                );
            }
            Ok(out.trim_end().to_string())
        }
        CategoriesCommand::Save {
            id,
            code,
            name,
            status,
        } => {
            let form = CategoryForm {
                id: id.map(Into::into),
                code,
                name,
                status,
            };
            Ok(view.save(client, &form).await?)
        }
        CategoriesCommand::Delete { id, yes } => {
            confirm(yes)?;
            Ok(view.delete(client, &id).await?)
        }
        CategoriesCommand::Export {
            search,
            status,
            out,
        } => {
            view.set_search(&search);
            view.set_status(status.as_deref());
            write_file(&out, &view.export_csv())?;
            Ok(exported(notice::CATEGORIES_EXPORTED, &out))
        }
    }
}

async fn inventory(client: &AdminClient, action: InventoryCommand) -> Result<String> {
    let mut view = InventoryView::load(client).await;

    match action {
        InventoryCommand::Summary => {
            let mut out = String::new();
            for message in view.errors() {
                let _ = writeln!(out, "{message}");
            }
            let _ = writeln!(
                out,
                "Sản phẩm: {}  Giá trị tồn kho: {}  Hết hàng: {}  Đơn hôm nay: {}",
                view.total_products(),
                view.total_value(),
                view.out_of_stock(),
                view.orders_today(Local::now().date_naive())
            );
            for order in view.recent_orders() {
                let _ = writeln!(
                    out,
                    "{}  {}  {}  [{}]",
                    order.order_id,
                    order.user_display_name(),
                    order.total_amount,
                    labels::order_status(&order.status)
                );
            }
            Ok(out.trim_end().to_string())
        }
        InventoryCommand::Add(fields) => Ok(view.add_product(client, &fields.into_form()).await?),
        InventoryCommand::Adjust {
            product_id,
            mode,
            units,
        } => {
            let adjustment = match mode {
                AdjustMode::Add => StockAdjustment::Add(units),
                AdjustMode::Remove => StockAdjustment::Remove(units),
                AdjustMode::Set => StockAdjustment::Set(units),
            };
            Ok(view.adjust_stock(client, &product_id, adjustment).await?)
        }
        InventoryCommand::DeleteOrder { order_id, yes } => {
            confirm(yes)?;
            Ok(view.delete_order(client, &order_id).await?)
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn confirm(yes: bool) -> Result<()> {
    if yes { Ok(()) } else { Err(CliError::NotConfirmed) }
}

fn date_range(from: Option<&str>, to: Option<&str>) -> Result<DateRange> {
    DateRange::parse(from, to).map_err(|e| CliError::InvalidArgument(e.to_string()))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = contents.len(), "Export written");
    Ok(())
}

fn exported(message: &str, path: &Path) -> String {
    format!("{message} ({})", path.display())
}

fn render_dashboard(dashboard: &DashboardView) -> String {
    let stats = &dashboard.stats;
    let mut out = format!(
        "Doanh thu: {} ({:+.1}%)\nTồn kho: {}\nĐơn hàng: {:+.1}%\nĐã bán: {:.1}%\n",
        stats.total_revenue,
        stats.revenue_growth,
        stats.total_inventory,
        stats.order_growth,
        stats.percentage_sold
    );

    let _ = writeln!(out, "Doanh thu theo danh mục: {}", dashboard.revenue.total_revenue);
    for category in &dashboard.revenue.revenue_by_category {
        let _ = writeln!(
            out,
            "  {}  {}  ({} đơn)",
            category.category_name, category.total_revenue, category.total_orders
        );
    }
    if let Some(top) = dashboard.top_category() {
        let _ = writeln!(out, "Bán chạy nhất: {}", top.category_name);
    }

    if !dashboard.recent_orders.is_empty() {
        out.push_str("Đơn hàng gần đây:\n");
        for order in &dashboard.recent_orders {
            let _ = writeln!(
                out,
                "  {}  {}  {}",
                order.order_id,
                order.user_display_name(),
                order.total_amount
            );
        }
    }
    out.trim_end().to_string()
}
