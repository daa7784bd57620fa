//! Database models
//!
//! All rows except `cafe` itself carry a `cafe` record reference;
//! repositories scope every query by it so tenants stay isolated.

pub mod cafe;
pub mod category;
pub mod menu_item;
pub mod order;
pub mod user;
pub mod website;

pub use cafe::{Cafe, CafeCreate};
pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{Order, OrderCreate};
pub use user::{StaffRole, User};
pub use website::{Website, WebsiteUpdate};

/// Render a record id as the wire format `table:key`
pub fn id_string(id: &Option<surrealdb::RecordId>) -> String {
    id.as_ref().map(|r| r.to_string()).unwrap_or_default()
}
