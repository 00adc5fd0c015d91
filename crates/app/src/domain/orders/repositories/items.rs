//! Order Items Repository

use justeat::prices::Price;
use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};
use uuid::Uuid;

use crate::domain::{
    orders::models::OrderItem,
    sql::{price_to_i64, try_get_price, try_get_quantity},
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteOrderItemsRepository;

impl SqliteOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
        order: Uuid,
        menu_item: Uuid,
        quantity: u32,
        price: Price,
    ) -> Result<OrderItem, sqlx::Error> {
        query_as::<Sqlite, OrderItem>(CREATE_ORDER_ITEM_SQL)
            .bind(uuid)
            .bind(order)
            .bind(menu_item)
            .bind(i64::from(quantity))
            .bind(price_to_i64(price)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: Uuid,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Sqlite, OrderItem>(GET_ORDER_ITEMS_SQL)
            .bind(order)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for OrderItem {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            order: row.try_get("order_uuid")?,
            menu_item: row.try_get("menu_item_uuid")?,
            quantity: try_get_quantity(row, "quantity")?,
            price: try_get_price(row, "price")?,
        })
    }
}
