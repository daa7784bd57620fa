//! Category Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active categories of a café ordered by sort_order
    pub async fn find_all(&self, cafe: &RecordId) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category WHERE cafe = $cafe AND is_active = true ORDER BY sort_order")
            .bind(("cafe", cafe.clone()))
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, cafe: &RecordId, id: &str) -> RepoResult<Option<Category>> {
        let rid = parse_record_id(TABLE, id);
        let category: Option<Category> = self.base.db().select(rid).await?;
        // Never leak another tenant's row through a guessed id
        Ok(category.filter(|c| &c.cafe == cafe))
    }

    async fn find_by_name(&self, cafe: &RecordId, name: &str) -> RepoResult<Option<Category>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE cafe = $cafe AND name = $name LIMIT 1")
            .bind(("cafe", cafe.clone()))
            .bind(("name", name_owned))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    pub async fn create(&self, cafe: &RecordId, data: CategoryCreate) -> RepoResult<Category> {
        if self.find_by_name(cafe, &data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Category '{}' already exists",
                data.name
            )));
        }

        let category = Category {
            id: None,
            cafe: cafe.clone(),
            name: data.name,
            sort_order: data.sort_order.unwrap_or(0),
            is_active: true,
        };

        let created: Option<Category> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    pub async fn update(
        &self,
        cafe: &RecordId,
        id: &str,
        data: CategoryUpdate,
    ) -> RepoResult<Category> {
        let existing = self
            .find_by_id(cafe, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))?;

        if let Some(ref new_name) = data.name
            && new_name != &existing.name
            && self.find_by_name(cafe, new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Category '{new_name}' already exists"
            )));
        }

        #[derive(Serialize)]
        struct CategoryUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            sort_order: Option<i32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
        }

        let rid = parse_record_id(TABLE, id);
        self.base
            .db()
            .query("UPDATE $id MERGE $data")
            .bind(("id", rid))
            .bind((
                "data",
                CategoryUpdateDb {
                    name: data.name,
                    sort_order: data.sort_order,
                    is_active: data.is_active,
                },
            ))
            .await?;

        self.find_by_id(cafe, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
    }

    pub async fn delete(&self, cafe: &RecordId, id: &str) -> RepoResult<bool> {
        let existing = self.find_by_id(cafe, id).await?;
        if existing.is_none() {
            return Ok(false);
        }

        // Refuse to orphan items still pointing at this category
        let rid = parse_record_id(TABLE, id);
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM menu_item WHERE category = $cat AND is_available = true GROUP ALL")
            .bind(("cat", rid.clone()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;

        if count.unwrap_or(0) > 0 {
            return Err(RepoError::Validation(
                "Cannot delete category with available menu items".to_string(),
            ));
        }

        self.base
            .db()
            .query("DELETE $id")
            .bind(("id", rid))
            .await?;
        Ok(true)
    }
}
