//! Wire DTOs
//!
//! Database rows carry `RecordId` links; the API speaks plain string
//! ids (`table:key`). Conversions live here so handlers stay thin.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use shared::order::{OrderLine, OrderStatus};

use crate::db::models::{Cafe, Category, MenuItem, Order, User, Website, id_string};

#[derive(Debug, Serialize)]
pub struct CafeDto {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
}

impl From<Cafe> for CafeDto {
    fn from(cafe: Cafe) -> Self {
        Self {
            id: id_string(&cafe.id),
            slug: cafe.slug,
            name: cafe.name,
            tagline: cafe.tagline,
            description: cafe.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    pub sort_order: i32,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: id_string(&category.id),
            name: category.name,
            sort_order: category.sort_order,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MenuItemDto {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub is_veg: bool,
    pub category_id: Option<String>,
    pub image_url: Option<String>,
    pub is_popular: bool,
    pub is_available: bool,
}

impl From<MenuItem> for MenuItemDto {
    fn from(item: MenuItem) -> Self {
        Self {
            id: id_string(&item.id),
            name: item.name,
            price: item.price,
            description: item.description,
            is_veg: item.is_veg,
            category_id: item.category.map(|c| c.to_string()),
            image_url: item.image_url,
            is_popular: item.is_popular,
            is_available: item.is_available,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderDto {
    pub id: String,
    pub table_number: String,
    pub items: Vec<OrderLine>,
    pub total_amount: Decimal,
    pub special_instructions: Option<String>,
    pub customer_phone: Option<String>,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        Self {
            id: id_string(&order.id),
            table_number: order.table_number,
            items: order.items,
            total_amount: order.total_amount,
            special_instructions: order.special_instructions,
            customer_phone: order.customer_phone,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WebsiteDto {
    pub layout: String,
    pub blocks: Vec<Value>,
    pub updated_at: i64,
}

impl From<Website> for WebsiteDto {
    fn from(site: Website) -> Self {
        Self {
            layout: site.layout,
            blocks: site.blocks,
            updated_at: site.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub role: String,
    pub is_active: bool,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: id_string(&user.id),
            username: user.username,
            role: user.role.as_str().to_string(),
            is_active: user.is_active,
        }
    }
}
