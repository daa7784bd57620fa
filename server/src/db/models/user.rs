//! Staff user and role model
//!
//! At most one role per user, so the role lives on the user row.
//! Admin implies all staff capabilities.

use serde::{Deserialize, Serialize};
use std::fmt;
use surrealdb::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Admin,
    Staff,
}

impl StaffRole {
    /// Whether this role covers the capabilities of `required`.
    pub fn covers(self, required: StaffRole) -> bool {
        match required {
            StaffRole::Staff => true,
            StaffRole::Admin => self == StaffRole::Admin,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StaffRole::Admin => "admin",
            StaffRole::Staff => "staff",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub cafe: RecordId,
    pub username: String,
    pub password_hash: String,
    pub role: StaffRole,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_implies_staff() {
        assert!(StaffRole::Admin.covers(StaffRole::Staff));
        assert!(StaffRole::Admin.covers(StaffRole::Admin));
        assert!(StaffRole::Staff.covers(StaffRole::Staff));
        assert!(!StaffRole::Staff.covers(StaffRole::Admin));
    }
}
