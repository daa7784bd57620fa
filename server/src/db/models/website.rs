//! Tenant website configuration model
//!
//! Blocks are stored as raw JSON values in the order the tenant
//! arranged them; the website module validates them into the typed
//! [`Block`](crate::website::Block) sum type at the load boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Website {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub cafe: RecordId,
    /// Layout variant name ("aroma" | "luxury"); unknown values fall
    /// back to aroma when parsed
    pub layout: String,
    /// Ordered block configs; sequence order is render order
    #[serde(default)]
    pub blocks: Vec<Value>,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteUpdate {
    pub layout: String,
    pub blocks: Vec<Value>,
}
