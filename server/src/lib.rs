//! brewtab server - multi-tenant café ordering backend
//!
//! Serves each café's block-based landing page and menu, takes orders
//! placed from table QR codes, runs the kitchen order lifecycle, and
//! pushes realtime updates to every open view.
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/       # config, shared state, server lifecycle
//! ├── auth/       # JWT sessions, Argon2, role gates
//! ├── db/         # embedded SurrealDB models and repositories
//! ├── orders/     # order placement and the status state machine
//! ├── realtime/   # topic-keyed order event bus
//! ├── website/    # page block configs and the HTML renderer
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod realtime;
pub mod utils;
pub mod website;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::OrderService;
pub use realtime::{EventBus, Topic};
pub use utils::{AppError, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured events on the "security" target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Prepare the process environment: dotenv, working directory, logs.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    std::fs::create_dir_all(config.log_dir())?;
    init_logger_with_file(None, Some(&config.log_dir()));

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __                    __        __
   / /_  ________ _      / /_____ _/ /_
  / __ \/ ___/ _ \ | /| / / __/ __ `/ __ \
 / /_/ / /  /  __/ |/ |/ / /_/ /_/ / /_/ /
/_.___/_/   \___/|__/|__/\__/\__,_/_.___/
    "#
    );
}
