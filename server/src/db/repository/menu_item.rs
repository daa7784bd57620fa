//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Customer-facing catalog: available items only, category-sorted.
    pub async fn find_available(&self, cafe: &RecordId) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE cafe = $cafe AND is_available = true ORDER BY category, name")
            .bind(("cafe", cafe.clone()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Admin view: every item of the café, including unavailable ones.
    pub async fn find_all(&self, cafe: &RecordId) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE cafe = $cafe ORDER BY category, name")
            .bind(("cafe", cafe.clone()))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, cafe: &RecordId, id: &str) -> RepoResult<Option<MenuItem>> {
        let rid = parse_record_id(TABLE, id);
        let item: Option<MenuItem> = self.base.db().select(rid).await?;
        Ok(item.filter(|i| &i.cafe == cafe))
    }

    pub async fn create(&self, cafe: &RecordId, data: MenuItemCreate) -> RepoResult<MenuItem> {
        if data.price < Decimal::ZERO {
            return Err(RepoError::Validation(
                "price must not be negative".to_string(),
            ));
        }

        let item = MenuItem {
            id: None,
            cafe: cafe.clone(),
            name: data.name,
            price: data.price,
            description: data.description,
            is_veg: data.is_veg,
            category: data
                .category_id
                .as_deref()
                .map(|id| parse_record_id("category", id)),
            image_url: data.image_url,
            is_popular: data.is_popular,
            is_available: data.is_available.unwrap_or(true),
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    pub async fn update(
        &self,
        cafe: &RecordId,
        id: &str,
        data: MenuItemUpdate,
    ) -> RepoResult<MenuItem> {
        self.find_by_id(cafe, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))?;

        if let Some(price) = data.price
            && price < Decimal::ZERO
        {
            return Err(RepoError::Validation(
                "price must not be negative".to_string(),
            ));
        }

        #[derive(Serialize)]
        struct MenuItemUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            price: Option<Decimal>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_veg: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            category: Option<RecordId>,
            #[serde(skip_serializing_if = "Option::is_none")]
            image_url: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_popular: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_available: Option<bool>,
        }

        let rid = parse_record_id(TABLE, id);
        self.base
            .db()
            .query("UPDATE $id MERGE $data")
            .bind(("id", rid))
            .bind((
                "data",
                MenuItemUpdateDb {
                    name: data.name,
                    price: data.price,
                    description: data.description,
                    is_veg: data.is_veg,
                    category: data
                        .category_id
                        .as_deref()
                        .map(|id| parse_record_id("category", id)),
                    image_url: data.image_url,
                    is_popular: data.is_popular,
                    is_available: data.is_available,
                },
            ))
            .await?;

        self.find_by_id(cafe, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
    }

    pub async fn delete(&self, cafe: &RecordId, id: &str) -> RepoResult<bool> {
        if self.find_by_id(cafe, id).await?.is_none() {
            return Ok(false);
        }
        let rid = parse_record_id(TABLE, id);
        self.base
            .db()
            .query("DELETE $id")
            .bind(("id", rid))
            .await?;
        Ok(true)
    }
}
