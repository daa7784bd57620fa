//! Shared types for the brewtab platform
//!
//! These types are used by both the server and its clients (kitchen
//! display, admin panel, customer web app):
//!
//! - **订单状态机** (`order`): order status, successor table, filters
//! - **购物车** (`cart`): session-local cart with derived totals
//! - **实时事件** (`event`): realtime notification envelope
//! - **消息链接** (`whatsapp`): wa.me deep-link builders

pub mod cart;
pub mod event;
pub mod order;
pub mod whatsapp;

pub use cart::{Cart, CartLine};
pub use event::{OrderEvent, OrderEventKind};
pub use order::{OrderFilter, OrderLine, OrderStatus, TimeWindow};
