//! Staff User Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{StaffRole, User};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_username(
        &self,
        cafe: &RecordId,
        username: &str,
    ) -> RepoResult<Option<User>> {
        let username_owned = username.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE cafe = $cafe AND username = $username AND is_active = true LIMIT 1")
            .bind(("cafe", cafe.clone()))
            .bind(("username", username_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    pub async fn find_by_id(&self, cafe: &RecordId, id: &str) -> RepoResult<Option<User>> {
        let rid = parse_record_id(TABLE, id);
        let user: Option<User> = self.base.db().select(rid).await?;
        Ok(user.filter(|u| &u.cafe == cafe))
    }

    pub async fn list(&self, cafe: &RecordId) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE cafe = $cafe AND is_active = true ORDER BY username")
            .bind(("cafe", cafe.clone()))
            .await?
            .take(0)?;
        Ok(users)
    }

    pub async fn create(&self, user: User) -> RepoResult<User> {
        if self
            .find_by_username(&user.cafe, &user.username)
            .await?
            .is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "User '{}' already exists",
                user.username
            )));
        }
        let created: Option<User> = self.base.db().create(TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Replace the user's single role row (admin | staff).
    pub async fn set_role(&self, cafe: &RecordId, id: &str, role: StaffRole) -> RepoResult<User> {
        self.find_by_id(cafe, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))?;

        let rid = parse_record_id(TABLE, id);
        self.base
            .db()
            .query("UPDATE $id SET role = $role")
            .bind(("id", rid))
            .bind(("role", role.as_str()))
            .await?;

        self.find_by_id(cafe, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
    }
}
