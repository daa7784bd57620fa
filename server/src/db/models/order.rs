//! Order Model
//!
//! Lines are captured by value at placement time; the total is fixed
//! at creation and never recomputed from the live catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::order::{OrderLine, OrderStatus};
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub cafe: RecordId,
    /// Table label, not necessarily numeric ("5", "terrace-2")
    pub table_number: String,
    pub items: Vec<OrderLine>,
    /// Σ (line.price × line.quantity), fixed at creation
    pub total_amount: Decimal,
    #[serde(default)]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub status: OrderStatus,
    /// Epoch milliseconds
    pub created_at: i64,
    pub updated_at: i64,
}

/// Payload for order placement (the cart leaving the session).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_number: String,
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
}
