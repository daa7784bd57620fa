//! Website Configuration Repository
//!
//! One configuration row per café; saving replaces the whole layout
//! and block list (last write wins, no merge).

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Website, WebsiteUpdate};
use crate::utils::now_ms;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "website";

#[derive(Clone)]
pub struct WebsiteRepository {
    base: BaseRepository,
}

impl WebsiteRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// The café's page configuration, or None when not yet authored.
    pub async fn find_by_cafe(&self, cafe: &RecordId) -> RepoResult<Option<Website>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM website WHERE cafe = $cafe LIMIT 1")
            .bind(("cafe", cafe.clone()))
            .await?;
        let sites: Vec<Website> = result.take(0)?;
        Ok(sites.into_iter().next())
    }

    pub async fn upsert(&self, cafe: &RecordId, data: WebsiteUpdate) -> RepoResult<Website> {
        let site = Website {
            id: None,
            cafe: cafe.clone(),
            layout: data.layout,
            blocks: data.blocks,
            updated_at: now_ms(),
        };

        match self.find_by_cafe(cafe).await? {
            Some(existing) => {
                let id = existing
                    .id
                    .ok_or_else(|| RepoError::Database("website row without id".to_string()))?;
                self.base
                    .db()
                    .query("UPDATE $id SET layout = $layout, blocks = $blocks, updated_at = $now")
                    .bind(("id", id))
                    .bind(("layout", site.layout))
                    .bind(("blocks", site.blocks))
                    .bind(("now", site.updated_at))
                    .await?;
                self.find_by_cafe(cafe)
                    .await?
                    .ok_or_else(|| RepoError::Database("Failed to update website".to_string()))
            }
            None => {
                let created: Option<Website> =
                    self.base.db().create(TABLE).content(site).await?;
                created.ok_or_else(|| RepoError::Database("Failed to create website".to_string()))
            }
        }
    }
}
