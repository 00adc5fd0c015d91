//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{Timestamp, civil::Date};
use justeat::{checkout, order_numbers, status::OrderStatus};
use mockall::automock;
use rand::Rng;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::SqliteCartEntriesRepository,
        catalog::SqliteCatalogRepository,
        orders::{
            errors::OrdersServiceError,
            models::{DaySummary, Order},
            repositories::{SqliteOrderItemsRepository, SqliteOrdersRepository},
        },
    },
    notify::{Notifier, OrderEvent},
};

#[derive(Clone)]
pub struct SqliteOrdersService {
    db: Db,
    orders_repository: SqliteOrdersRepository,
    items_repository: SqliteOrderItemsRepository,
    entries_repository: SqliteCartEntriesRepository,
    catalog_repository: SqliteCatalogRepository,
    notifier: Arc<dyn Notifier>,
}

impl SqliteOrdersService {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            orders_repository: SqliteOrdersRepository::new(),
            items_repository: SqliteOrderItemsRepository::new(),
            entries_repository: SqliteCartEntriesRepository::new(),
            catalog_repository: SqliteCatalogRepository::new(),
            notifier,
        }
    }

    /// Deliver an event to the notifier; failures are logged, never raised.
    async fn emit(&self, event: OrderEvent) {
        if let Err(error) = self.notifier.notify(event).await {
            tracing::warn!(%error, "order notification failed");
        }
    }
}

#[async_trait]
impl OrdersService for SqliteOrdersService {
    async fn place_order(&self, customer: Uuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let lines = self.entries_repository.cart_lines(&mut tx, customer).await?;

        let drafts = checkout::partition(
            lines
                .iter()
                .map(|line| checkout::CartLine {
                    menu_item: line.menu_item,
                    restaurant: line.restaurant,
                    unit_price: line.unit_price,
                    quantity: line.quantity,
                })
                .collect(),
        )?;

        let placed_at = Timestamp::now();
        let mut orders = Vec::with_capacity(drafts.len());

        for draft in drafts {
            let suffix = rand::thread_rng().gen_range(0..1000);
            let order_number = order_numbers::order_number(placed_at, customer, suffix);

            let mut order = self
                .orders_repository
                .create_order(
                    &mut tx,
                    Uuid::now_v7(),
                    &order_number,
                    customer,
                    draft.restaurant,
                    draft.total,
                    placed_at,
                )
                .await?;

            for line in &draft.lines {
                let item = self
                    .items_repository
                    .create_order_item(
                        &mut tx,
                        Uuid::now_v7(),
                        order.uuid,
                        line.menu_item,
                        line.quantity,
                        line.unit_price,
                    )
                    .await?;

                order.items.push(item);
            }

            orders.push(order);
        }

        self.entries_repository.clear(&mut tx, customer).await?;

        tx.commit().await?;

        for order in &orders {
            self.emit(OrderEvent::OrderPlaced {
                order: order.uuid,
                order_number: order.order_number.clone(),
                customer,
            })
            .await;
        }

        tracing::info!(customer = %customer, orders = orders.len(), "order placed");

        Ok(orders)
    }

    async fn get_order(&self, actor: Uuid, uuid: Uuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut order = self.orders_repository.get_order(&mut tx, uuid).await?;
        let restaurant = self
            .catalog_repository
            .get_restaurant(&mut tx, order.restaurant)
            .await?;

        if actor != order.customer && actor != restaurant.owner {
            return Err(OrdersServiceError::Unauthorized);
        }

        let items = self.items_repository.get_order_items(&mut tx, uuid).await?;

        tx.commit().await?;

        order.items = items;

        Ok(order)
    }

    async fn list_customer_orders(&self, customer: Uuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self
            .orders_repository
            .list_customer_orders(&mut tx, customer)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_restaurant_orders(
        &self,
        actor: Uuid,
        restaurant: Uuid,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .catalog_repository
            .get_restaurant(&mut tx, restaurant)
            .await?;

        if record.owner != actor {
            return Err(OrdersServiceError::Unauthorized);
        }

        let orders = self
            .orders_repository
            .list_restaurant_orders(&mut tx, restaurant)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        actor: Uuid,
        uuid: Uuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut order = self.orders_repository.get_order(&mut tx, uuid).await?;
        let restaurant = self
            .catalog_repository
            .get_restaurant(&mut tx, order.restaurant)
            .await?;

        if restaurant.owner != actor {
            return Err(OrdersServiceError::Unauthorized);
        }

        if !order.status.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: order.status,
                to: status,
            });
        }

        let now = Timestamp::now();

        self.orders_repository
            .update_status(&mut tx, uuid, status, now)
            .await?;

        let items = self.items_repository.get_order_items(&mut tx, uuid).await?;

        tx.commit().await?;

        order.status = status;
        order.updated_at = now;
        order.items = items;

        self.emit(OrderEvent::StatusChanged {
            order: order.uuid,
            order_number: order.order_number.clone(),
            customer: order.customer,
            status,
        })
        .await;

        tracing::info!(order = %order.order_number, status = %status, "order status updated");

        Ok(order)
    }

    async fn daily_summary(
        &self,
        actor: Uuid,
        restaurant: Uuid,
        date: Date,
    ) -> Result<DaySummary, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .catalog_repository
            .get_restaurant(&mut tx, restaurant)
            .await?;

        if record.owner != actor {
            return Err(OrdersServiceError::Unauthorized);
        }

        let summary = self
            .orders_repository
            .daily_summary(&mut tx, restaurant, date)
            .await?;

        tx.commit().await?;

        Ok(summary)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Convert the customer's cart into one pending order per restaurant,
    /// atomically, and clear the cart. Line prices are frozen copies of the
    /// catalog prices read in the same transaction.
    async fn place_order(&self, customer: Uuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieve one order with its lines. Visible to the ordering customer
    /// and the restaurant owner.
    async fn get_order(&self, actor: Uuid, uuid: Uuid) -> Result<Order, OrdersServiceError>;

    /// The customer's orders, newest first (without lines).
    async fn list_customer_orders(&self, customer: Uuid)
    -> Result<Vec<Order>, OrdersServiceError>;

    /// A restaurant's orders, newest first (without lines). Owner only.
    async fn list_restaurant_orders(
        &self,
        actor: Uuid,
        restaurant: Uuid,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// Advance an order along the status workflow. Owner only; the forward
    /// progression is enforced, with cancel allowed from any non-terminal
    /// state. The customer is notified best-effort after the update commits.
    async fn update_status(
        &self,
        actor: Uuid,
        uuid: Uuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Order count and revenue for one UTC calendar day. Owner only.
    async fn daily_summary(
        &self,
        actor: Uuid,
        restaurant: Uuid,
        date: Date,
    ) -> Result<DaySummary, OrdersServiceError>;
}
