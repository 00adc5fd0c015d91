//! Reviews Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};
use uuid::Uuid;

use crate::domain::sql::try_get_timestamp;

use super::models::Review;

const CREATE_REVIEW_SQL: &str = include_str!("sql/create_review.sql");
const LIST_RESTAURANT_REVIEWS_SQL: &str = include_str!("sql/list_restaurant_reviews.sql");
const LIST_MENU_ITEM_REVIEWS_SQL: &str = include_str!("sql/list_menu_item_reviews.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteReviewsRepository;

impl SqliteReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: Uuid,
        user: Uuid,
        restaurant: Uuid,
        menu_item: Option<Uuid>,
        rating: u8,
        comment: Option<&str>,
        now: Timestamp,
    ) -> Result<Review, sqlx::Error> {
        query_as::<Sqlite, Review>(CREATE_REVIEW_SQL)
            .bind(uuid)
            .bind(user)
            .bind(restaurant)
            .bind(menu_item)
            .bind(i64::from(rating))
            .bind(comment)
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_restaurant_reviews(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: Uuid,
    ) -> Result<Vec<Review>, sqlx::Error> {
        query_as::<Sqlite, Review>(LIST_RESTAURANT_REVIEWS_SQL)
            .bind(restaurant)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_menu_item_reviews(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        menu_item: Uuid,
    ) -> Result<Vec<Review>, sqlx::Error> {
        query_as::<Sqlite, Review>(LIST_MENU_ITEM_REVIEWS_SQL)
            .bind(menu_item)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for Review {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let rating: i64 = row.try_get("rating")?;
        let rating = u8::try_from(rating).map_err(|e| sqlx::Error::ColumnDecode {
            index: "rating".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user: row.try_get("user_uuid")?,
            restaurant: row.try_get("restaurant_uuid")?,
            menu_item: row.try_get("menu_item_uuid")?,
            rating,
            comment: row.try_get("comment")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
