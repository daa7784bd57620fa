//! Utility modules: errors, logging, validation

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResponse, ok, ok_with_message};

/// Result type used by API handlers and services
pub type AppResult<T> = Result<T, AppError>;

/// Current time in epoch milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
