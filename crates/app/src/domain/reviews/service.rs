//! Reviews service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        catalog::SqliteCatalogRepository,
        reviews::{
            errors::ReviewsServiceError,
            models::{NewReview, Review},
            repository::SqliteReviewsRepository,
        },
    },
};

const MIN_RATING: u8 = 1;
const MAX_RATING: u8 = 5;

#[derive(Debug, Clone)]
pub struct SqliteReviewsService {
    db: Db,
    repository: SqliteReviewsRepository,
    catalog_repository: SqliteCatalogRepository,
}

impl SqliteReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteReviewsRepository::new(),
            catalog_repository: SqliteCatalogRepository::new(),
        }
    }
}

fn validate_rating(rating: u8) -> Result<(), ReviewsServiceError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(ReviewsServiceError::InvalidRating)
    }
}

#[async_trait]
impl ReviewsService for SqliteReviewsService {
    async fn add_restaurant_review(
        &self,
        user: Uuid,
        restaurant: Uuid,
        review: NewReview,
    ) -> Result<Review, ReviewsServiceError> {
        validate_rating(review.rating)?;

        let mut tx = self.db.begin_transaction().await?;

        self.catalog_repository.get_restaurant(&mut tx, restaurant).await?;

        let created = self
            .repository
            .create_review(
                &mut tx,
                Uuid::now_v7(),
                user,
                restaurant,
                None,
                review.rating,
                review.comment.as_deref(),
                Timestamp::now(),
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn add_menu_item_review(
        &self,
        user: Uuid,
        menu_item: Uuid,
        review: NewReview,
    ) -> Result<Review, ReviewsServiceError> {
        validate_rating(review.rating)?;

        let mut tx = self.db.begin_transaction().await?;

        let item = self.catalog_repository.get_menu_item(&mut tx, menu_item).await?;

        let created = self
            .repository
            .create_review(
                &mut tx,
                Uuid::now_v7(),
                user,
                item.restaurant,
                Some(menu_item),
                review.rating,
                review.comment.as_deref(),
                Timestamp::now(),
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_restaurant_reviews(
        &self,
        restaurant: Uuid,
    ) -> Result<Vec<Review>, ReviewsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.catalog_repository.get_restaurant(&mut tx, restaurant).await?;

        let reviews = self
            .repository
            .list_restaurant_reviews(&mut tx, restaurant)
            .await?;

        tx.commit().await?;

        Ok(reviews)
    }

    async fn list_menu_item_reviews(
        &self,
        menu_item: Uuid,
    ) -> Result<Vec<Review>, ReviewsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.catalog_repository.get_menu_item(&mut tx, menu_item).await?;

        let reviews = self
            .repository
            .list_menu_item_reviews(&mut tx, menu_item)
            .await?;

        tx.commit().await?;

        Ok(reviews)
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Record a rating and optional comment against a restaurant.
    async fn add_restaurant_review(
        &self,
        user: Uuid,
        restaurant: Uuid,
        review: NewReview,
    ) -> Result<Review, ReviewsServiceError>;

    /// Record a rating and optional comment against a menu item; the owning
    /// restaurant is recorded alongside for aggregation.
    async fn add_menu_item_review(
        &self,
        user: Uuid,
        menu_item: Uuid,
        review: NewReview,
    ) -> Result<Review, ReviewsServiceError>;

    /// A restaurant's reviews, newest first, including its menu items'.
    async fn list_restaurant_reviews(
        &self,
        restaurant: Uuid,
    ) -> Result<Vec<Review>, ReviewsServiceError>;

    /// One menu item's reviews, newest first.
    async fn list_menu_item_reviews(
        &self,
        menu_item: Uuid,
    ) -> Result<Vec<Review>, ReviewsServiceError>;
}
