use std::sync::Arc;

use crate::auth::{JwtService, hash_password};
use crate::core::Config;
use crate::db::DbService;
use crate::db::models::{CafeCreate, StaffRole, User};
use crate::db::repository::{
    CafeRepository, CategoryRepository, MenuItemRepository, OrderRepository, UserRepository,
    WebsiteRepository,
};
use crate::realtime::EventBus;
use crate::utils::AppError;

/// Shared server state.
///
/// One instance per process, cloned into every handler. All fields are
/// cheap to clone (Arc-backed handles).
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database
    pub db: DbService,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
    /// Realtime order-event bus
    pub events: EventBus,
}

impl ServerState {
    /// Initialize state for a running server: open the on-disk
    /// database and seed a first tenant when the store is empty.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;

        let db = DbService::new(&config.db_path()).await?;
        let state = Self::with_db(config.clone(), db);
        state.seed_if_empty().await?;
        Ok(state)
    }

    /// State backed by an in-memory database. Used by tests.
    pub async fn in_memory() -> Result<Self, AppError> {
        let config = Config::with_overrides("/tmp/brewtab-test", 0);
        let db = DbService::memory().await?;
        Ok(Self::with_db(config, db))
    }

    fn with_db(config: Config, db: DbService) -> Self {
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        Self {
            config,
            db,
            jwt_service,
            events: EventBus::new(),
        }
    }

    // ── Repository accessors ────────────────────────────────────────

    pub fn cafes(&self) -> CafeRepository {
        CafeRepository::new(self.db.db.clone())
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.db.db.clone())
    }

    pub fn menu_items(&self) -> MenuItemRepository {
        MenuItemRepository::new(self.db.db.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.db.db.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.db.db.clone())
    }

    pub fn websites(&self) -> WebsiteRepository {
        WebsiteRepository::new(self.db.db.clone())
    }

    // ── Bootstrap ───────────────────────────────────────────────────

    /// First-run seed: without at least one café and one admin nobody
    /// can sign in, so an empty store gets a tenant from the
    /// BOOTSTRAP_* variables (skipped entirely once a café exists).
    async fn seed_if_empty(&self) -> Result<(), AppError> {
        let slug = std::env::var("BOOTSTRAP_CAFE_SLUG").unwrap_or_else(|_| "demo-cafe".into());
        if self.cafes().find_by_slug(&slug).await?.is_some() {
            return Ok(());
        }

        let admin_password = match std::env::var("BOOTSTRAP_ADMIN_PASSWORD") {
            Ok(p) => p,
            Err(_) if self.config.is_production() => {
                tracing::warn!("No BOOTSTRAP_ADMIN_PASSWORD set; skipping first-run seed");
                return Ok(());
            }
            Err(_) => "admin".into(),
        };

        let cafe = self
            .cafes()
            .create(CafeCreate {
                slug: slug.clone(),
                name: std::env::var("BOOTSTRAP_CAFE_NAME")
                    .unwrap_or_else(|_| "Demo Cafe".into()),
                tagline: None,
                description: None,
                staff_phone: std::env::var("BOOTSTRAP_STAFF_PHONE").ok(),
            })
            .await?;

        let cafe_id = cafe
            .id
            .ok_or_else(|| AppError::internal("Seeded cafe has no id"))?;

        self.users()
            .create(User {
                id: None,
                cafe: cafe_id,
                username: std::env::var("BOOTSTRAP_ADMIN_USERNAME")
                    .unwrap_or_else(|_| "admin".into()),
                password_hash: hash_password(&admin_password)?,
                role: StaffRole::Admin,
                is_active: true,
            })
            .await?;

        tracing::info!(slug = %slug, "Seeded first-run cafe and admin user");
        Ok(())
    }
}
