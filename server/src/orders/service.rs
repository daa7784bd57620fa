//! Order lifecycle service
//!
//! Placement and the kitchen state machine. Every successful write
//! publishes an [`OrderEvent`] so open views refetch.

use shared::event::OrderEvent;
use shared::order::{OrderFilter, OrderStatus};
use surrealdb::RecordId;

use crate::db::models::{Order, OrderCreate};
use crate::db::repository::OrderRepository;
use crate::realtime::EventBus;
use crate::utils::{AppError, AppResult, now_ms, validation};

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    events: EventBus,
}

impl OrderService {
    pub fn new(repo: OrderRepository, events: EventBus) -> Self {
        Self { repo, events }
    }

    /// Place an order from a submitted cart.
    ///
    /// Lines are copied by value and the total is fixed here; later
    /// menu edits never change what this order charges.
    pub async fn create(&self, cafe: &RecordId, data: OrderCreate) -> AppResult<Order> {
        let table_number = data.table_number.trim().to_string();
        validation::validate_required_text(
            &table_number,
            "table_number",
            validation::MAX_SHORT_TEXT_LEN,
        )?;
        if data.items.is_empty() {
            return Err(AppError::validation("Order must contain at least one item"));
        }
        for line in &data.items {
            if line.quantity == 0 {
                return Err(AppError::validation(format!(
                    "Item '{}' has zero quantity",
                    line.name
                )));
            }
            if line.price.is_sign_negative() {
                return Err(AppError::validation(format!(
                    "Item '{}' has a negative price",
                    line.name
                )));
            }
        }
        validation::validate_optional_text(
            &data.special_instructions,
            "special_instructions",
            validation::MAX_NOTE_LEN,
        )?;

        let total_amount = data.items.iter().map(|l| l.subtotal()).sum();
        let now = now_ms();
        let order = self
            .repo
            .create(Order {
                id: None,
                cafe: cafe.clone(),
                table_number,
                items: data.items,
                total_amount,
                special_instructions: data
                    .special_instructions
                    .filter(|s| !s.trim().is_empty()),
                customer_phone: data.customer_phone.filter(|s| !s.trim().is_empty()),
                status: OrderStatus::New,
                created_at: now,
                updated_at: now,
            })
            .await?;

        self.events.publish(
            &cafe.to_string(),
            &OrderEvent::created(order_id_str(&order), &order.table_number),
        );
        tracing::info!(
            order = %order_id_str(&order),
            table = %order.table_number,
            total = %order.total_amount,
            "Order placed"
        );
        Ok(order)
    }

    /// Move an order one step along new → preparing → ready → served.
    ///
    /// Served is terminal: advancing a served order returns it
    /// unchanged and publishes nothing.
    pub async fn advance(&self, cafe: &RecordId, id: &str) -> AppResult<Order> {
        let order = self
            .repo
            .find_by_id(cafe, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;

        let Some(next) = order.status.next() else {
            return Ok(order);
        };
        self.transition(cafe, id, next).await
    }

    /// Set an explicit status, including backwards moves (a mistaken
    /// tap in the kitchen gets corrected, not blocked). Writing the
    /// current status is a no-op and publishes nothing.
    pub async fn set_status(
        &self,
        cafe: &RecordId,
        id: &str,
        status: OrderStatus,
    ) -> AppResult<Order> {
        let order = self
            .repo
            .find_by_id(cafe, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;

        if order.status == status {
            return Ok(order);
        }
        self.transition(cafe, id, status).await
    }

    async fn transition(
        &self,
        cafe: &RecordId,
        id: &str,
        status: OrderStatus,
    ) -> AppResult<Order> {
        let order = self.repo.set_status(cafe, id, status).await?;
        self.events.publish(
            &cafe.to_string(),
            &OrderEvent::status_changed(order_id_str(&order), &order.table_number, status),
        );
        tracing::info!(order = %order_id_str(&order), status = %status, "Order status changed");
        Ok(order)
    }

    pub async fn get(&self, cafe: &RecordId, id: &str) -> AppResult<Order> {
        self.repo
            .find_by_id(cafe, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))
    }

    pub async fn list(&self, cafe: &RecordId, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        Ok(self.repo.list(cafe, filter).await?)
    }

    /// Orders for one table, for the customer tracking view.
    pub async fn track(&self, cafe: &RecordId, table_number: &str) -> AppResult<Vec<Order>> {
        Ok(self.repo.list_for_table(cafe, table_number).await?)
    }
}

fn order_id_str(order: &Order) -> String {
    order
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{Cafe, CafeCreate};
    use crate::db::repository::CafeRepository;
    use rust_decimal::Decimal;
    use shared::order::{OrderLine, TimeWindow};

    async fn setup() -> (OrderService, RecordId, EventBus, DbService) {
        let db = DbService::memory().await.unwrap();
        let cafe = CafeRepository::new(db.db.clone())
            .create(CafeCreate {
                slug: "test-cafe".into(),
                name: "Test Cafe".into(),
                tagline: None,
                description: None,
                staff_phone: None,
            })
            .await
            .unwrap();
        let events = EventBus::new();
        let service = OrderService::new(OrderRepository::new(db.db.clone()), events.clone());
        (service, cafe_id(&cafe), events, db)
    }

    fn cafe_id(cafe: &Cafe) -> RecordId {
        cafe.id.clone().unwrap()
    }

    fn sample_lines() -> Vec<OrderLine> {
        vec![
            OrderLine {
                item_id: "menu_item:espresso".into(),
                name: "Espresso".into(),
                quantity: 2,
                price: Decimal::new(99, 0),
            },
            OrderLine {
                item_id: "menu_item:croissant".into(),
                name: "Croissant".into(),
                quantity: 1,
                price: Decimal::new(149, 0),
            },
        ]
    }

    fn create_payload(table: &str) -> OrderCreate {
        OrderCreate {
            table_number: table.into(),
            items: sample_lines(),
            special_instructions: None,
            customer_phone: None,
        }
    }

    #[tokio::test]
    async fn placement_fixes_the_total_and_starts_new() {
        let (service, cafe, _, _) = setup().await;
        let order = service.create(&cafe, create_payload("5")).await.unwrap();
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.total_amount, Decimal::new(347, 0));
        assert_eq!(order.created_at, order.updated_at);
    }

    #[tokio::test]
    async fn empty_cart_and_blank_table_are_rejected() {
        let (service, cafe, _, _) = setup().await;

        let mut no_items = create_payload("5");
        no_items.items.clear();
        assert!(matches!(
            service.create(&cafe, no_items).await,
            Err(AppError::Validation(_))
        ));

        assert!(matches!(
            service.create(&cafe, create_payload("   ")).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn advance_walks_the_full_lifecycle_and_stops_at_served() {
        let (service, cafe, _, _) = setup().await;
        let order = service.create(&cafe, create_payload("5")).await.unwrap();
        let id = order.id.unwrap().to_string();

        let order = service.advance(&cafe, &id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
        let order = service.advance(&cafe, &id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Ready);
        let order = service.advance(&cafe, &id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Served);

        // terminal: advancing again stays served
        let order = service.advance(&cafe, &id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Served);
    }

    #[tokio::test]
    async fn set_status_allows_backward_moves() {
        let (service, cafe, _, _) = setup().await;
        let order = service.create(&cafe, create_payload("5")).await.unwrap();
        let id = order.id.unwrap().to_string();

        service
            .set_status(&cafe, &id, OrderStatus::Ready)
            .await
            .unwrap();
        let order = service
            .set_status(&cafe, &id, OrderStatus::Preparing)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn events_fire_on_create_and_transition_but_not_noops() {
        let (service, cafe, events, _) = setup().await;
        let mut sub = events.subscribe(crate::realtime::Topic::Cafe(cafe.to_string()));

        let order = service.create(&cafe, create_payload("5")).await.unwrap();
        let id = order.id.unwrap().to_string();
        let created = sub.recv().await.unwrap();
        assert!(created.is_new_order_alert());

        service.advance(&cafe, &id).await.unwrap();
        let changed = sub.recv().await.unwrap();
        assert_eq!(changed.status, OrderStatus::Preparing);

        // no-op set_status publishes nothing; next event is the real move
        service
            .set_status(&cafe, &id, OrderStatus::Preparing)
            .await
            .unwrap();
        service.advance(&cafe, &id).await.unwrap();
        let next = sub.recv().await.unwrap();
        assert_eq!(next.status, OrderStatus::Ready);
    }

    #[tokio::test]
    async fn active_filter_takes_precedence_and_served_drops_out() {
        let (service, cafe, _, _) = setup().await;
        let a = service.create(&cafe, create_payload("1")).await.unwrap();
        let _b = service.create(&cafe, create_payload("2")).await.unwrap();
        let a_id = a.id.unwrap().to_string();
        service
            .set_status(&cafe, &a_id, OrderStatus::Served)
            .await
            .unwrap();

        let active = service
            .list(
                &cafe,
                &OrderFilter {
                    window: TimeWindow::All,
                    status: Some(OrderStatus::Served),
                    active: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].table_number, "2");

        let served = service
            .list(
                &cafe,
                &OrderFilter {
                    window: TimeWindow::All,
                    status: Some(OrderStatus::Served),
                    active: false,
                },
            )
            .await
            .unwrap();
        assert_eq!(served.len(), 1);
        assert_eq!(served[0].table_number, "1");
    }

    #[tokio::test]
    async fn window_filter_drops_backdated_orders() {
        let (service, cafe, _, db) = setup().await;
        let old = service.create(&cafe, create_payload("1")).await.unwrap();
        service.create(&cafe, create_payload("2")).await.unwrap();

        // push one order back 40 days, past every rolling window
        let backdated = now_ms() - 40 * 24 * 60 * 60 * 1000;
        db.db
            .query("UPDATE $id SET created_at = $t, updated_at = $t")
            .bind(("id", old.id.clone().unwrap()))
            .bind(("t", backdated))
            .await
            .unwrap();

        for window in [TimeWindow::Today, TimeWindow::Week, TimeWindow::Month] {
            let listed = service
                .list(
                    &cafe,
                    &OrderFilter {
                        window,
                        status: None,
                        active: false,
                    },
                )
                .await
                .unwrap();
            assert_eq!(listed.len(), 1, "window {window:?}");
            assert_eq!(listed[0].table_number, "2");
        }

        let all = service.list(&cafe, &OrderFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn tracking_is_scoped_to_one_table() {
        let (service, cafe, _, _) = setup().await;
        service.create(&cafe, create_payload("5")).await.unwrap();
        service.create(&cafe, create_payload("7")).await.unwrap();
        service.create(&cafe, create_payload("5")).await.unwrap();

        let tracked = service.track(&cafe, "5").await.unwrap();
        assert_eq!(tracked.len(), 2);
        assert!(tracked.iter().all(|o| o.table_number == "5"));
    }

    #[tokio::test]
    async fn totals_survive_later_menu_price_edits() {
        use crate::db::models::{MenuItemCreate, MenuItemUpdate};
        use crate::db::repository::MenuItemRepository;

        let (service, cafe, _, db) = setup().await;
        let menu = MenuItemRepository::new(db.db.clone());
        let item = menu
            .create(
                &cafe,
                MenuItemCreate {
                    name: "Cold Coffee".into(),
                    price: Decimal::new(99, 0),
                    description: None,
                    is_veg: true,
                    category_id: None,
                    image_url: None,
                    is_popular: false,
                    is_available: None,
                },
            )
            .await
            .unwrap();
        let item_id = item.id.clone().unwrap().to_string();

        let order = service
            .create(
                &cafe,
                OrderCreate {
                    table_number: "5".into(),
                    items: vec![OrderLine {
                        item_id: item_id.clone(),
                        name: item.name.clone(),
                        quantity: 2,
                        price: item.price,
                    }],
                    special_instructions: None,
                    customer_phone: None,
                },
            )
            .await
            .unwrap();
        let order_id = order.id.clone().unwrap().to_string();
        assert_eq!(order.total_amount, Decimal::new(198, 0));

        menu.update(
            &cafe,
            &item_id,
            MenuItemUpdate {
                name: None,
                price: Some(Decimal::new(149, 0)),
                description: None,
                is_veg: None,
                category_id: None,
                image_url: None,
                is_popular: None,
                is_available: None,
            },
        )
        .await
        .unwrap();

        let order = service.get(&cafe, &order_id).await.unwrap();
        assert_eq!(order.total_amount, Decimal::new(198, 0));
        assert_eq!(order.items[0].price, Decimal::new(99, 0));
    }

    #[tokio::test]
    async fn orders_do_not_leak_across_cafes() {
        let (service, cafe, _, _) = setup().await;
        let other = RecordId::from_table_key("cafe", "other");
        let order = service.create(&cafe, create_payload("5")).await.unwrap();
        let id = order.id.unwrap().to_string();

        assert!(matches!(
            service.get(&other, &id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.advance(&other, &id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
