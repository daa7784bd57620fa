//! Order lifecycle
//!
//! Placement, the new → preparing → ready → served state machine, and
//! the staff-facing list filters.

pub mod service;

pub use service::OrderService;
