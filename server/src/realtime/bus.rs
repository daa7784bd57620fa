//! Realtime event bus
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       EventBus                          │
//! │  topic key ──▶ broadcast::Sender<OrderEvent>            │
//! │  "cafe:x"        (kitchen/admin, collection-wide)       │
//! │  "cafe:x/table/5" (one table's tracking views)          │
//! └────────────────────────┬────────────────────────────────┘
//!                          │ subscribe(topic)
//!                          ▼
//!                  Subscription (unsubscribes on drop)
//! ```
//!
//! Delivery is at-least-once from the consumer's point of view:
//! a lagged receiver skips ahead and the consumer refetches, so a
//! missed or duplicated event only ever costs one extra fetch.

use std::sync::Arc;

use dashmap::DashMap;
use shared::event::OrderEvent;
use tokio::sync::broadcast;

/// Subscription topic.
///
/// Kitchen and admin views watch the whole café; a customer tracking
/// view watches a single table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Collection-wide channel for a café (kitchen display, admin)
    Cafe(String),
    /// Order-scoped channel keyed by table name
    Table { cafe: String, table: String },
}

impl Topic {
    fn key(&self) -> String {
        match self {
            Topic::Cafe(cafe) => cafe.clone(),
            Topic::Table { cafe, table } => format!("{cafe}/table/{table}"),
        }
    }
}

/// Topic-keyed broadcast bus for order events.
#[derive(Debug, Clone)]
pub struct EventBus {
    channels: Arc<DashMap<String, broadcast::Sender<OrderEvent>>>,
    capacity: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(DashMap::new()),
            capacity,
        }
    }

    /// Publish an event to the café channel and the affected table's
    /// channel. Topics without subscribers drop the event silently.
    pub fn publish(&self, cafe: &str, event: &OrderEvent) {
        let topics = [
            Topic::Cafe(cafe.to_string()),
            Topic::Table {
                cafe: cafe.to_string(),
                table: event.table_number.clone(),
            },
        ];
        for topic in topics {
            if let Some(tx) = self.channels.get(&topic.key()) {
                // Err means no live receivers on this topic right now
                let _ = tx.send(event.clone());
            }
        }
    }

    /// Subscribe to a topic. The returned handle unsubscribes when
    /// dropped, so a view navigating away tears its channel down.
    pub fn subscribe(&self, topic: Topic) -> Subscription {
        let key = topic.key();
        let tx = self
            .channels
            .entry(key.clone())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone();
        let rx = tx.subscribe();
        Subscription {
            key,
            rx,
            channels: Arc::clone(&self.channels),
        }
    }

    /// Number of live subscriptions on a topic (used by tests).
    pub fn subscriber_count(&self, topic: &Topic) -> usize {
        self.channels
            .get(&topic.key())
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Inbound stream of change notifications for one topic.
pub struct Subscription {
    key: String,
    rx: broadcast::Receiver<OrderEvent>,
    channels: Arc<DashMap<String, broadcast::Sender<OrderEvent>>>,
}

impl Subscription {
    /// Next event, or `None` once the bus side is gone.
    ///
    /// A lagged receiver logs and keeps going: the consumer refetches
    /// state on every event anyway, so skipped payloads are harmless.
    pub async fn recv(&mut self) -> Option<OrderEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(topic = %self.key, skipped, "subscription lagged, continuing");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // Last receiver going away removes the topic entry so the map
        // does not accumulate dead channels.
        if let Some(entry) = self.channels.get(&self.key)
            && entry.receiver_count() <= 1
        {
            drop(entry);
            self.channels
                .remove_if(&self.key, |_, tx| tx.receiver_count() <= 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::event::OrderEventKind;
    use shared::order::OrderStatus;

    #[tokio::test]
    async fn cafe_subscribers_see_creation_and_status_events() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe(Topic::Cafe("cafe:a".into()));

        bus.publish("cafe:a", &OrderEvent::created("order:1", "5"));
        bus.publish(
            "cafe:a",
            &OrderEvent::status_changed("order:1", "5", OrderStatus::Preparing),
        );

        let first = sub.recv().await.unwrap();
        assert_eq!(first.kind, OrderEventKind::Created);
        let second = sub.recv().await.unwrap();
        assert_eq!(second.status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn table_topic_only_sees_its_own_table() {
        let bus = EventBus::new();
        let mut table5 = bus.subscribe(Topic::Table {
            cafe: "cafe:a".into(),
            table: "5".into(),
        });

        bus.publish("cafe:a", &OrderEvent::created("order:1", "7"));
        bus.publish("cafe:a", &OrderEvent::created("order:2", "5"));

        let event = table5.recv().await.unwrap();
        assert_eq!(event.order_id, "order:2");
    }

    #[tokio::test]
    async fn tenants_are_isolated() {
        let bus = EventBus::new();
        let mut other = bus.subscribe(Topic::Cafe("cafe:b".into()));
        bus.publish("cafe:a", &OrderEvent::created("order:1", "5"));
        bus.publish("cafe:b", &OrderEvent::created("order:9", "2"));

        let event = other.recv().await.unwrap();
        assert_eq!(event.order_id, "order:9");
    }

    #[tokio::test]
    async fn drop_unsubscribes_and_cleans_up_the_topic() {
        let bus = EventBus::new();
        let topic = Topic::Cafe("cafe:a".into());
        let sub = bus.subscribe(topic.clone());
        assert_eq!(bus.subscriber_count(&topic), 1);

        drop(sub);
        assert_eq!(bus.subscriber_count(&topic), 0);
    }
}
