//! Catalog service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{MenuItem, MenuItemUpdate, NewMenuItem, NewRestaurant, Restaurant},
        repository::SqliteCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCatalogService {
    db: Db,
    repository: SqliteCatalogRepository,
}

impl SqliteCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for SqliteCatalogService {
    async fn create_restaurant(
        &self,
        owner: Uuid,
        restaurant: NewRestaurant,
    ) -> Result<Restaurant, CatalogServiceError> {
        if restaurant.name.trim().is_empty() {
            return Err(CatalogServiceError::InvalidName);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_restaurant(&mut tx, Uuid::now_v7(), owner, &restaurant, Timestamp::now())
            .await?;

        tx.commit().await?;

        tracing::info!(restaurant = %created.uuid, "restaurant created");

        Ok(created)
    }

    async fn get_restaurant(&self, uuid: Uuid) -> Result<Restaurant, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let restaurant = self.repository.get_restaurant(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(restaurant)
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let restaurants = self.repository.list_restaurants(&mut tx).await?;

        tx.commit().await?;

        Ok(restaurants)
    }

    async fn delete_restaurant(&self, actor: Uuid, uuid: Uuid) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let restaurant = self.repository.get_restaurant(&mut tx, uuid).await?;

        if restaurant.owner != actor {
            return Err(CatalogServiceError::Unauthorized);
        }

        if self.repository.count_restaurant_orders(&mut tx, uuid).await? > 0 {
            return Err(CatalogServiceError::InUse);
        }

        if self
            .repository
            .count_restaurant_cart_references(&mut tx, uuid)
            .await?
            > 0
        {
            return Err(CatalogServiceError::InUse);
        }

        self.repository.delete_restaurant_menu(&mut tx, uuid).await?;
        self.repository.delete_restaurant(&mut tx, uuid).await?;

        tx.commit().await?;

        tracing::info!(restaurant = %uuid, "restaurant deleted");

        Ok(())
    }

    async fn create_menu_item(
        &self,
        actor: Uuid,
        item: NewMenuItem,
    ) -> Result<MenuItem, CatalogServiceError> {
        if item.name.trim().is_empty() {
            return Err(CatalogServiceError::InvalidName);
        }

        if item.price.is_zero() {
            return Err(CatalogServiceError::InvalidPrice);
        }

        let mut tx = self.db.begin_transaction().await?;

        let restaurant = self.repository.get_restaurant(&mut tx, item.restaurant).await?;

        if restaurant.owner != actor {
            return Err(CatalogServiceError::Unauthorized);
        }

        let created = self
            .repository
            .create_menu_item(&mut tx, Uuid::now_v7(), &item, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_menu_item(&self, uuid: Uuid) -> Result<MenuItem, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let item = self.repository.get_menu_item(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn menu(&self, restaurant: Uuid) -> Result<Vec<MenuItem>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository.get_restaurant(&mut tx, restaurant).await?;

        let items = self.repository.list_menu(&mut tx, restaurant).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn list_deals_of_the_day(&self) -> Result<Vec<MenuItem>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let items = self.repository.list_deals_of_the_day(&mut tx).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn update_menu_item(
        &self,
        actor: Uuid,
        uuid: Uuid,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, CatalogServiceError> {
        if update.name.trim().is_empty() {
            return Err(CatalogServiceError::InvalidName);
        }

        if update.price.is_zero() {
            return Err(CatalogServiceError::InvalidPrice);
        }

        let mut tx = self.db.begin_transaction().await?;

        let item = self.repository.get_menu_item(&mut tx, uuid).await?;
        let restaurant = self.repository.get_restaurant(&mut tx, item.restaurant).await?;

        if restaurant.owner != actor {
            return Err(CatalogServiceError::Unauthorized);
        }

        let updated = self
            .repository
            .update_menu_item(&mut tx, uuid, &update, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_menu_item(&self, actor: Uuid, uuid: Uuid) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let item = self.repository.get_menu_item(&mut tx, uuid).await?;
        let restaurant = self.repository.get_restaurant(&mut tx, item.restaurant).await?;

        if restaurant.owner != actor {
            return Err(CatalogServiceError::Unauthorized);
        }

        if self.repository.count_order_references(&mut tx, uuid).await? > 0 {
            return Err(CatalogServiceError::InUse);
        }

        if self.repository.count_cart_references(&mut tx, uuid).await? > 0 {
            return Err(CatalogServiceError::InUse);
        }

        self.repository.delete_menu_item(&mut tx, uuid).await?;

        tx.commit().await?;

        tracing::info!(menu_item = %uuid, "menu item deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Register a restaurant for the given owner.
    async fn create_restaurant(
        &self,
        owner: Uuid,
        restaurant: NewRestaurant,
    ) -> Result<Restaurant, CatalogServiceError>;

    /// Retrieve a single restaurant.
    async fn get_restaurant(&self, uuid: Uuid) -> Result<Restaurant, CatalogServiceError>;

    /// List active restaurants.
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, CatalogServiceError>;

    /// Delete a restaurant and its menu. Refused while orders or cart
    /// entries reference it.
    async fn delete_restaurant(&self, actor: Uuid, uuid: Uuid) -> Result<(), CatalogServiceError>;

    /// Add a menu item to a restaurant owned by `actor`.
    async fn create_menu_item(
        &self,
        actor: Uuid,
        item: NewMenuItem,
    ) -> Result<MenuItem, CatalogServiceError>;

    /// Retrieve a single menu item.
    async fn get_menu_item(&self, uuid: Uuid) -> Result<MenuItem, CatalogServiceError>;

    /// List a restaurant's available menu items.
    async fn menu(&self, restaurant: Uuid) -> Result<Vec<MenuItem>, CatalogServiceError>;

    /// List available deal-of-the-day items across active restaurants.
    async fn list_deals_of_the_day(&self) -> Result<Vec<MenuItem>, CatalogServiceError>;

    /// Replace a menu item's editable fields. Existing order items keep the
    /// price they were created with.
    async fn update_menu_item(
        &self,
        actor: Uuid,
        uuid: Uuid,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, CatalogServiceError>;

    /// Delete a menu item. Refused while order items or cart entries
    /// reference it.
    async fn delete_menu_item(&self, actor: Uuid, uuid: Uuid) -> Result<(), CatalogServiceError>;
}
