//! Seed documents shaped like the backend's JSON.

use serde_json::{Value, json};

use crate::{Account, Store};

pub const CUSTOMER_EMAIL: &str = "an@funsport.vn";
pub const CUSTOMER_PASSWORD: &str = "matkhau123";
pub const ADMIN_EMAIL: &str = "admin@funsport.vn";
pub const ADMIN_PASSWORD: &str = "quantri123";

/// Running shoes: embedded category, colors as a comma-separated string.
pub const RUNNING_SHOES: &str = "p-running-shoes";
/// Running shirt: bare category id, low on stock.
pub const RUNNING_SHIRT: &str = "p-running-shirt";
/// Football: sold out.
pub const FOOTBALL: &str = "p-football";
pub const FOOTBALL_BOOTS: &str = "p-football-boots";
/// Goggles: no category and no recorded quantity.
pub const GOGGLES: &str = "p-goggles";

pub fn running() -> Value {
    json!({ "_id": "c-running", "code": "running", "name": "Chạy bộ", "status": "active" })
}

pub fn football() -> Value {
    json!({ "_id": "c-football", "code": "football", "name": "Bóng đá", "status": "active" })
}

pub fn swimming() -> Value {
    json!({ "_id": "c-swimming", "code": "swimming", "name": "Bơi lội", "status": "inactive" })
}

pub fn products() -> Vec<Value> {
    vec![
        json!({
            "_id": RUNNING_SHOES,
            "name": "Giày chạy bộ Nike Air",
            "price": 1_200_000,
            "category": running(),
            "color": "Đen, Trắng",
            "size": ["40", "41", "42"],
            "quantity": 12,
            "minStock": 5,
            "tab": "new",
            "image": "https://cdn.funsport.vn/p/shoes.jpg",
        }),
        json!({
            "_id": RUNNING_SHIRT,
            "name": "Áo chạy bộ Adidas",
            "price": 450_000,
            "category": "c-running",
            "color": ["Xanh"],
            "size": ["M", "L"],
            "quantity": 3,
            "minStock": 5,
            "tab": "hot",
        }),
        json!({
            "_id": FOOTBALL,
            "name": "Bóng đá Động Lực",
            "price": 350_000,
            "category": football(),
            "quantity": 0,
            "minStock": 2,
            "tab": "hot",
        }),
        json!({
            "_id": FOOTBALL_BOOTS,
            "name": "Giày đá bóng Mizuno",
            "price": 2_100_000,
            "category": "c-football",
            "color": "Cam",
            "size": "39,40,41",
            "quantity": 20,
            "minStock": 5,
            "tab": "new",
        }),
        json!({
            "_id": GOGGLES,
            "name": "Kính bơi Speedo",
            "price": 180_000,
        }),
    ]
}

pub fn flash_sale() -> Vec<Value> {
    vec![json!({
        "_id": "s-running-shirt",
        "name": "Áo chạy bộ Adidas",
        "price": 399_000,
        "category": "c-running",
        "quantity": 3,
    })]
}

pub fn users() -> Vec<Value> {
    vec![
        json!({
            "_id": "u-an",
            "name": "Nguyễn Văn An",
            "email": CUSTOMER_EMAIL,
            "status": "active",
            "orderCount": 2,
            "returnCount": 1,
            "phone": "0901234567",
            "spamCount": 0,
            "cancellationCount": 1,
            "ghostingCount": 0,
            "products": [
                { "_id": RUNNING_SHIRT, "name": "Áo chạy bộ Adidas", "price": 450_000, "status": "active" }
            ],
        }),
        json!({
            "_id": "u-binh",
            "name": "Trần Thị Bình",
            "email": "binh@funsport.vn",
            "status": "locked",
            "lockReason": "Spam",
            "spamCount": 2,
            "cancellationCount": 0,
            "ghostingCount": 0,
            "products": [],
        }),
        json!({
            "_id": "u-chau",
            "name": "Lê Minh Châu",
            "email": "chau@funsport.vn",
            "status": "pending",
            "spamCount": 0,
            "cancellationCount": 0,
            "ghostingCount": 1,
            "products": [],
        }),
    ]
}

fn user(index: usize) -> Value {
    users().get(index).cloned().unwrap_or(Value::Null)
}

fn product(id: &str) -> Value {
    products()
        .into_iter()
        .find(|p| p.get("_id").and_then(Value::as_str) == Some(id))
        .unwrap_or(Value::Null)
}

pub fn orders() -> Vec<Value> {
    vec![
        json!({
            "_id": "o-1",
            "orderId": "DH001",
            "productId": product(RUNNING_SHOES),
            "userId": user(0),
            "totalAmount": 1_200_000,
            "payment": "momo",
            "status": "delivered",
            "category": "Chạy bộ",
            "createdAt": "2024-06-10T09:00:00Z",
        }),
        json!({
            "_id": "o-2",
            "orderId": "DH002",
            "productId": FOOTBALL,
            "productName": "Bóng đá Động Lực",
            "userId": user(1),
            "totalAmount": 350_000,
            "payment": "cod",
            "status": "inprogress",
            "category": "Bóng đá",
            "createdAt": "2024-06-15T14:30:00Z",
        }),
        json!({
            "_id": "o-3",
            "orderId": "DH003",
            "productId": product(FOOTBALL_BOOTS),
            "userId": user(0),
            "totalAmount": 2_100_000,
            "payment": "momo",
            "status": "delivered",
            "category": "Bóng đá",
            "createdAt": "2024-06-20T23:45:00Z",
        }),
        json!({
            "_id": "o-4",
            "orderId": "DH004",
            "productId": product(FOOTBALL_BOOTS),
            "userId": user(2),
            "totalAmount": 2_100_000,
            "payment": "cod",
            "status": "return",
            "category": "Bóng đá",
            "createdAt": "2024-06-20T08:00:00Z",
        }),
    ]
}

pub fn news() -> Vec<Value> {
    vec![json!({
        "_id": "n-1",
        "title": "Giải chạy FunSport 2024",
        "description": "Đăng ký trước ngày 30/6 để nhận áo đấu.",
        "createdAt": "2024-06-01T08:00:00Z",
    })]
}

pub fn accounts() -> Vec<Account> {
    vec![
        Account {
            email: CUSTOMER_EMAIL.to_string(),
            password: CUSTOMER_PASSWORD.to_string(),
            session: json!({
                "admin": false,
                "token": "tok-an",
                "name": "Nguyễn Văn An",
                "email": CUSTOMER_EMAIL,
            }),
        },
        Account {
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
            session: json!({
                "admin": 1,
                "token": "tok-admin",
                "user": { "name": "Quản trị viên", "email": ADMIN_EMAIL },
            }),
        },
    ]
}

/// A store holding every fixture above.
#[must_use]
pub fn store() -> Store {
    Store {
        products: products(),
        flash_sale: flash_sale(),
        categories: vec![running(), football(), swimming()],
        news: news(),
        orders: orders(),
        users: users(),
        accounts: accounts(),
        ..Store::default()
    }
}
