//! Cafe Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Cafe, CafeCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "cafe";

#[derive(Clone)]
pub struct CafeRepository {
    base: BaseRepository,
}

impl CafeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Look up an active café by its public slug.
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Cafe>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cafe WHERE slug = $slug AND is_active = true LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let cafes: Vec<Cafe> = result.take(0)?;
        Ok(cafes.into_iter().next())
    }

    /// Look up a café by record id (staff/admin paths, where the id
    /// comes from a verified token).
    pub async fn find_by_id(&self, id: &surrealdb::RecordId) -> RepoResult<Option<Cafe>> {
        let cafe: Option<Cafe> = self.base.db().select(id.clone()).await?;
        Ok(cafe.filter(|c| c.is_active))
    }

    /// Register a new café tenant.
    pub async fn create(&self, data: CafeCreate) -> RepoResult<Cafe> {
        if self.find_by_slug(&data.slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Cafe '{}' already exists",
                data.slug
            )));
        }

        let cafe = Cafe {
            id: None,
            slug: data.slug,
            name: data.name,
            tagline: data.tagline,
            description: data.description,
            staff_phone: data.staff_phone,
            is_active: true,
        };

        let created: Option<Cafe> = self.base.db().create(TABLE).content(cafe).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create cafe".to_string()))
    }
}
