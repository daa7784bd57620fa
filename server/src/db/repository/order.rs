//! Order Repository
//!
//! Status updates are last-write-wins by design: there is no version
//! or etag check, and two staff sessions racing on the same order
//! resolve to whichever write lands later.

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::Order;
use crate::utils::now_ms;
use shared::order::{OrderFilter, OrderStatus};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

// "order" clashes with the ORDER BY keyword in raw queries
const TABLE: &str = "orders";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_by_id(&self, cafe: &RecordId, id: &str) -> RepoResult<Option<Order>> {
        let rid = parse_record_id(TABLE, id);
        let order: Option<Order> = self.base.db().select(rid).await?;
        Ok(order.filter(|o| &o.cafe == cafe))
    }

    /// List a café's orders, most recent first, honoring the filter.
    ///
    /// `active` takes precedence over an exact status; the time window
    /// compares against `created_at`.
    pub async fn list(&self, cafe: &RecordId, filter: &OrderFilter) -> RepoResult<Vec<Order>> {
        let mut sql = String::from("SELECT * FROM orders WHERE cafe = $cafe");
        if filter.active {
            let statuses = OrderStatus::ACTIVE
                .iter()
                .map(|s| format!("'{s}'"))
                .collect::<Vec<_>>()
                .join(", ");
            sql.push_str(&format!(" AND status IN [{statuses}]"));
        } else if filter.status.is_some() {
            sql.push_str(" AND status = $status");
        }
        let since = filter.window.since_ms(chrono::Utc::now());
        if since.is_some() {
            sql.push_str(" AND created_at >= $since");
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = self.base.db().query(sql).bind(("cafe", cafe.clone()));
        if !filter.active
            && let Some(status) = filter.status
        {
            query = query.bind(("status", status.as_str()));
        }
        if let Some(since_ms) = since {
            query = query.bind(("since", since_ms));
        }

        let orders: Vec<Order> = query.await?.take(0)?;
        Ok(orders)
    }

    /// Orders placed from one table, most recent first. Backs the
    /// customer tracking view.
    pub async fn list_for_table(
        &self,
        cafe: &RecordId,
        table_number: &str,
    ) -> RepoResult<Vec<Order>> {
        let table_owned = table_number.to_string();
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE cafe = $cafe AND table_number = $table ORDER BY created_at DESC")
            .bind(("cafe", cafe.clone()))
            .bind(("table", table_owned))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Overwrite the status and bump `updated_at`.
    pub async fn set_status(
        &self,
        cafe: &RecordId,
        id: &str,
        status: OrderStatus,
    ) -> RepoResult<Order> {
        self.find_by_id(cafe, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;

        let rid = parse_record_id(TABLE, id);
        self.base
            .db()
            .query("UPDATE $id SET status = $status, updated_at = $now")
            .bind(("id", rid))
            .bind(("status", status.as_str()))
            .bind(("now", now_ms()))
            .await?;

        self.find_by_id(cafe, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }
}
