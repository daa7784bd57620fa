//! Cafe (tenant) model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// One café/business on the platform. Menu, website configuration and
/// orders of different cafés are logically isolated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cafe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// URL-safe identifier used in public routes
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Kitchen staff WhatsApp number for new-order alerts
    #[serde(default)]
    pub staff_phone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CafeCreate {
    pub slug: String,
    pub name: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub staff_phone: Option<String>,
}
