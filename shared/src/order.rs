//! Order status state machine and query filters
//!
//! The kitchen "advance" action walks a fixed successor table:
//!
//! ```text
//! new ──▶ preparing ──▶ ready ──▶ served
//! ```
//!
//! The progression is strictly linear and forward-only. `served` is
//! terminal: it has no successor and advancing is a no-op there. The
//! admin status selector uses the explicit-set operation instead, which
//! accepts any of the four statuses (including backward moves).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status, persisted as a lowercase string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    New,
    Preparing,
    Ready,
    Served,
}

impl OrderStatus {
    /// Fixed successor table used by the kitchen "advance" action.
    ///
    /// Returns `None` at the terminal state `served`.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::New => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Served),
            OrderStatus::Served => None,
        }
    }

    /// An order is active until it has been served.
    pub fn is_active(self) -> bool {
        !matches!(self, OrderStatus::Served)
    }

    /// Statuses covered by the "active" list shorthand.
    pub const ACTIVE: [OrderStatus; 3] = [
        OrderStatus::New,
        OrderStatus::Preparing,
        OrderStatus::Ready,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
        }
    }

    /// Human label shown on kitchen cards and toasts.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::New => "New Order",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Served => "Served",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(OrderStatus::New),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "served" => Ok(OrderStatus::Served),
            other => Err(format!("unknown order status '{other}'")),
        }
    }
}

/// One line of an order, captured by value at placement time.
///
/// Later menu edits must not alter historical orders, so the name and
/// unit price are snapshots, not references into the live catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Menu item id the snapshot was taken from
    pub item_id: String,
    pub name: String,
    pub quantity: u32,
    /// Unit price at the time of placement
    pub price: Decimal,
}

impl OrderLine {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Time window for order list queries, computed against `created_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    Today,
    Week,
    Month,
    #[default]
    All,
}

impl TimeWindow {
    /// Lower bound in epoch milliseconds, given the current time.
    ///
    /// `Today` starts at UTC midnight of the supplied instant; the
    /// rolling windows subtract whole days.
    pub fn since_ms(self, now: chrono::DateTime<chrono::Utc>) -> Option<i64> {
        use chrono::Duration;
        match self {
            TimeWindow::Today => {
                let midnight = now
                    .date_naive()
                    .and_hms_opt(0, 0, 0)
                    .unwrap_or(now.naive_utc())
                    .and_utc();
                Some(midnight.timestamp_millis())
            }
            TimeWindow::Week => Some((now - Duration::days(7)).timestamp_millis()),
            TimeWindow::Month => Some((now - Duration::days(30)).timestamp_millis()),
            TimeWindow::All => None,
        }
    }
}

/// Filter for the staff/kitchen order list.
///
/// `active` takes precedence over `status` when both are set: it is the
/// kitchen display's default view (everything not yet served).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFilter {
    #[serde(default)]
    pub window: TimeWindow,
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn successor_table_is_exactly_the_linear_flow() {
        assert_eq!(OrderStatus::New.next(), Some(OrderStatus::Preparing));
        assert_eq!(OrderStatus::Preparing.next(), Some(OrderStatus::Ready));
        assert_eq!(OrderStatus::Ready.next(), Some(OrderStatus::Served));
        assert_eq!(OrderStatus::Served.next(), None);
    }

    #[test]
    fn served_is_not_active() {
        assert!(OrderStatus::New.is_active());
        assert!(OrderStatus::Preparing.is_active());
        assert!(OrderStatus::Ready.is_active());
        assert!(!OrderStatus::Served.is_active());
        assert!(!OrderStatus::ACTIVE.contains(&OrderStatus::Served));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            OrderStatus::New,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Served,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("cancelled".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn line_subtotal_uses_decimal_arithmetic() {
        let line = OrderLine {
            item_id: "menu_item:a".into(),
            name: "Masala Fries".into(),
            quantity: 3,
            price: Decimal::new(1099, 2),
        };
        assert_eq!(line.subtotal(), Decimal::new(3297, 2));
    }

    #[test]
    fn window_bounds() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 13, 30, 0).unwrap();
        assert_eq!(
            TimeWindow::Today.since_ms(now),
            Some(Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap().timestamp_millis())
        );
        assert_eq!(
            TimeWindow::Week.since_ms(now),
            Some(Utc.with_ymd_and_hms(2025, 6, 8, 13, 30, 0).unwrap().timestamp_millis())
        );
        assert_eq!(TimeWindow::All.since_ms(now), None);
    }
}
