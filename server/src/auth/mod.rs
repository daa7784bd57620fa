//! Authentication and authorization
//!
//! JWT sessions for staff users plus role gating:
//! - [`JwtService`] - token service
//! - [`CurrentUser`] - resolved viewer identity
//! - [`require_staff`] / [`require_admin`] - router gates

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_staff};
pub use password::{hash_password, verify_password};
