//! Catalog Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow};
use uuid::Uuid;

use crate::domain::sql::{price_to_i64, try_get_price, try_get_timestamp};

use super::models::{MenuItem, MenuItemUpdate, NewMenuItem, NewRestaurant, Restaurant};

const CREATE_RESTAURANT_SQL: &str = include_str!("sql/create_restaurant.sql");
const GET_RESTAURANT_SQL: &str = include_str!("sql/get_restaurant.sql");
const LIST_RESTAURANTS_SQL: &str = include_str!("sql/list_restaurants.sql");
const DELETE_RESTAURANT_SQL: &str = include_str!("sql/delete_restaurant.sql");
const DELETE_RESTAURANT_MENU_SQL: &str = include_str!("sql/delete_restaurant_menu.sql");
const COUNT_RESTAURANT_ORDERS_SQL: &str = include_str!("sql/count_restaurant_orders.sql");
const COUNT_RESTAURANT_CART_REFERENCES_SQL: &str =
    include_str!("sql/count_restaurant_cart_references.sql");
const CREATE_MENU_ITEM_SQL: &str = include_str!("sql/create_menu_item.sql");
const GET_MENU_ITEM_SQL: &str = include_str!("sql/get_menu_item.sql");
const LIST_MENU_SQL: &str = include_str!("sql/list_menu.sql");
const LIST_DEALS_OF_THE_DAY_SQL: &str = include_str!("sql/list_deals_of_the_day.sql");
const UPDATE_MENU_ITEM_SQL: &str = include_str!("sql/update_menu_item.sql");
const DELETE_MENU_ITEM_SQL: &str = include_str!("sql/delete_menu_item.sql");
const COUNT_ORDER_REFERENCES_SQL: &str = include_str!("sql/count_order_references.sql");
const COUNT_CART_REFERENCES_SQL: &str = include_str!("sql/count_cart_references.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCatalogRepository;

impl SqliteCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_restaurant(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
        owner: Uuid,
        restaurant: &NewRestaurant,
        now: Timestamp,
    ) -> Result<Restaurant, sqlx::Error> {
        query_as::<Sqlite, Restaurant>(CREATE_RESTAURANT_SQL)
            .bind(uuid)
            .bind(owner)
            .bind(&restaurant.name)
            .bind(&restaurant.description)
            .bind(&restaurant.cuisine_type)
            .bind(&restaurant.address)
            .bind(&restaurant.phone)
            .bind(now.to_string())
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_restaurant(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
    ) -> Result<Restaurant, sqlx::Error> {
        query_as::<Sqlite, Restaurant>(GET_RESTAURANT_SQL)
            .bind(uuid)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_restaurants(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<Restaurant>, sqlx::Error> {
        query_as::<Sqlite, Restaurant>(LIST_RESTAURANTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_restaurant(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_RESTAURANT_SQL)
            .bind(uuid)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_restaurant_menu(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_RESTAURANT_MENU_SQL)
            .bind(restaurant)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_restaurant_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: Uuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Sqlite, i64>(COUNT_RESTAURANT_ORDERS_SQL)
            .bind(restaurant)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_restaurant_cart_references(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: Uuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Sqlite, i64>(COUNT_RESTAURANT_CART_REFERENCES_SQL)
            .bind(restaurant)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_menu_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
        item: &NewMenuItem,
        now: Timestamp,
    ) -> Result<MenuItem, sqlx::Error> {
        query_as::<Sqlite, MenuItem>(CREATE_MENU_ITEM_SQL)
            .bind(uuid)
            .bind(item.restaurant)
            .bind(&item.name)
            .bind(&item.description)
            .bind(price_to_i64(item.price)?)
            .bind(&item.category)
            .bind(now.to_string())
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_menu_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
    ) -> Result<MenuItem, sqlx::Error> {
        query_as::<Sqlite, MenuItem>(GET_MENU_ITEM_SQL)
            .bind(uuid)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_menu(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: Uuid,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        query_as::<Sqlite, MenuItem>(LIST_MENU_SQL)
            .bind(restaurant)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_deals_of_the_day(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        query_as::<Sqlite, MenuItem>(LIST_DEALS_OF_THE_DAY_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_menu_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
        update: &MenuItemUpdate,
        now: Timestamp,
    ) -> Result<MenuItem, sqlx::Error> {
        query_as::<Sqlite, MenuItem>(UPDATE_MENU_ITEM_SQL)
            .bind(&update.name)
            .bind(&update.description)
            .bind(price_to_i64(update.price)?)
            .bind(&update.category)
            .bind(update.is_available)
            .bind(update.is_special)
            .bind(update.is_deal_of_day)
            .bind(now.to_string())
            .bind(uuid)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_menu_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_MENU_ITEM_SQL)
            .bind(uuid)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_order_references(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        menu_item: Uuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Sqlite, i64>(COUNT_ORDER_REFERENCES_SQL)
            .bind(menu_item)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_cart_references(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        menu_item: Uuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Sqlite, i64>(COUNT_CART_REFERENCES_SQL)
            .bind(menu_item)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for Restaurant {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            owner: row.try_get("owner_uuid")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            cuisine_type: row.try_get("cuisine_type")?,
            address: row.try_get("address")?,
            phone: row.try_get("phone")?,
            is_active: row.try_get("is_active")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for MenuItem {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            restaurant: row.try_get("restaurant_uuid")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: try_get_price(row, "price")?,
            category: row.try_get("category")?,
            is_available: row.try_get("is_available")?,
            is_special: row.try_get("is_special")?,
            is_deal_of_day: row.try_get("is_deal_of_day")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
