//! Cart Entries Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};
use uuid::Uuid;

use crate::domain::sql::{try_get_price, try_get_quantity, try_get_timestamp};

use super::models::{CartEntry, CartLine};

const UPSERT_ENTRY_SQL: &str = include_str!("sql/upsert_entry.sql");
const GET_ENTRY_SQL: &str = include_str!("sql/get_entry.sql");
const SET_QUANTITY_SQL: &str = include_str!("sql/set_quantity.sql");
const DELETE_ENTRY_SQL: &str = include_str!("sql/delete_entry.sql");
const CART_LINES_SQL: &str = include_str!("sql/cart_lines.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartEntriesRepository;

impl SqliteCartEntriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an entry, or bump the quantity of the existing (user, item)
    /// entry in one statement.
    pub(crate) async fn upsert_entry(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
        user: Uuid,
        menu_item: Uuid,
        quantity: u32,
        now: Timestamp,
    ) -> Result<CartEntry, sqlx::Error> {
        query_as::<Sqlite, CartEntry>(UPSERT_ENTRY_SQL)
            .bind(uuid)
            .bind(user)
            .bind(menu_item)
            .bind(i64::from(quantity))
            .bind(now.to_string())
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_entry(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
    ) -> Result<CartEntry, sqlx::Error> {
        query_as::<Sqlite, CartEntry>(GET_ENTRY_SQL)
            .bind(uuid)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_quantity(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
        quantity: u32,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_QUANTITY_SQL)
            .bind(i64::from(quantity))
            .bind(now.to_string())
            .bind(uuid)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_entry(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ENTRY_SQL)
            .bind(uuid)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Load the user's entries joined with their menu items, in one
    /// consistent snapshot.
    pub(crate) async fn cart_lines(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: Uuid,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Sqlite, CartLine>(CART_LINES_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn clear(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(user)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartEntry {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user: row.try_get("user_uuid")?,
            menu_item: row.try_get("menu_item_uuid")?,
            quantity: try_get_quantity(row, "quantity")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartLine {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            entry: row.try_get("entry_uuid")?,
            menu_item: row.try_get("menu_item_uuid")?,
            item_name: row.try_get("item_name")?,
            restaurant: row.try_get("restaurant_uuid")?,
            unit_price: try_get_price(row, "unit_price")?,
            quantity: try_get_quantity(row, "quantity")?,
        })
    }
}
