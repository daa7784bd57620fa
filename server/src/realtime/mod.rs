//! Realtime propagation
//!
//! One write on any device updates every open view of the same café:
//! order creation and status changes fan out over topic channels and
//! are delivered to browsers through the WebSocket routes in
//! [`crate::api::events`].

pub mod bus;

pub use bus::{EventBus, Subscription, Topic};
