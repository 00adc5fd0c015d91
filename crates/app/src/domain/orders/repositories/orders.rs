//! Orders Repository

use jiff::{Timestamp, civil::Date};
use justeat::{prices::Price, status::OrderStatus};
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};
use uuid::Uuid;

use crate::domain::{
    orders::models::{DaySummary, Order},
    sql::{price_to_i64, try_get_price, try_get_timestamp},
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LIST_CUSTOMER_ORDERS_SQL: &str = include_str!("../sql/list_customer_orders.sql");
const LIST_RESTAURANT_ORDERS_SQL: &str = include_str!("../sql/list_restaurant_orders.sql");
const UPDATE_STATUS_SQL: &str = include_str!("../sql/update_status.sql");
const DAILY_SUMMARY_SQL: &str = include_str!("../sql/daily_summary.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteOrdersRepository;

impl SqliteOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
        order_number: &str,
        customer: Uuid,
        restaurant: Uuid,
        total: Price,
        now: Timestamp,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Sqlite, Order>(CREATE_ORDER_SQL)
            .bind(uuid)
            .bind(order_number)
            .bind(price_to_i64(total)?)
            .bind(customer)
            .bind(restaurant)
            .bind(now.to_string())
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Sqlite, Order>(GET_ORDER_SQL)
            .bind(uuid)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_customer_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: Uuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Sqlite, Order>(LIST_CUSTOMER_ORDERS_SQL)
            .bind(customer)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_restaurant_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: Uuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Sqlite, Order>(LIST_RESTAURANT_ORDERS_SQL)
            .bind(restaurant)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
        status: OrderStatus,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_STATUS_SQL)
            .bind(status.as_str())
            .bind(now.to_string())
            .bind(uuid)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn daily_summary(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: Uuid,
        date: Date,
    ) -> Result<DaySummary, sqlx::Error> {
        let row = query(DAILY_SUMMARY_SQL)
            .bind(restaurant)
            .bind(date.to_string())
            .fetch_one(&mut **tx)
            .await?;

        let orders: i64 = row.try_get("orders")?;

        Ok(DaySummary {
            orders: u64::try_from(orders).map_err(|e| sqlx::Error::ColumnDecode {
                index: "orders".to_string(),
                source: Box::new(e),
            })?,
            revenue: try_get_price(&row, "revenue")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for Order {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            order_number: row.try_get("order_number")?,
            status,
            total_amount: try_get_price(row, "total_amount")?,
            customer: row.try_get("customer_uuid")?,
            restaurant: row.try_get("restaurant_uuid")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
            items: Vec::new(),
        })
    }
}
