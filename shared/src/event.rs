//! Realtime notification envelope
//!
//! Events are refetch triggers with at-least-once delivery: a consumer
//! that receives one fetches the latest state instead of trusting the
//! payload. Duplicates are harmless. The kind distinguishes order
//! creation from status updates so the kitchen display can raise its
//! audible/visual new-order alert only for creations.

use serde::{Deserialize, Serialize};

use crate::order::OrderStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderEventKind {
    Created,
    StatusChanged,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEvent {
    pub kind: OrderEventKind,
    pub order_id: String,
    pub table_number: String,
    pub status: OrderStatus,
}

impl OrderEvent {
    pub fn created(order_id: impl Into<String>, table_number: impl Into<String>) -> Self {
        Self {
            kind: OrderEventKind::Created,
            order_id: order_id.into(),
            table_number: table_number.into(),
            status: OrderStatus::New,
        }
    }

    pub fn status_changed(
        order_id: impl Into<String>,
        table_number: impl Into<String>,
        status: OrderStatus,
    ) -> Self {
        Self {
            kind: OrderEventKind::StatusChanged,
            order_id: order_id.into(),
            table_number: table_number.into(),
            status,
        }
    }

    /// Whether the kitchen display should play its new-order alert.
    pub fn is_new_order_alert(&self) -> bool {
        self.kind == OrderEventKind::Created
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_creations_trigger_the_kitchen_alert() {
        let created = OrderEvent::created("order:1", "5");
        let updated = OrderEvent::status_changed("order:1", "5", OrderStatus::Ready);
        assert!(created.is_new_order_alert());
        assert!(!updated.is_new_order_alert());
    }

    #[test]
    fn envelope_serializes_with_snake_case_tags() {
        let event = OrderEvent::status_changed("order:1", "5", OrderStatus::Preparing);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "status_changed");
        assert_eq!(json["status"], "preparing");
    }
}
