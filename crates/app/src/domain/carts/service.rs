//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartEntry, CartLine},
            repository::SqliteCartEntriesRepository,
        },
        catalog::SqliteCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCartsService {
    db: Db,
    entries_repository: SqliteCartEntriesRepository,
    catalog_repository: SqliteCatalogRepository,
}

impl SqliteCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            entries_repository: SqliteCartEntriesRepository::new(),
            catalog_repository: SqliteCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for SqliteCartsService {
    async fn add_item(
        &self,
        user: Uuid,
        menu_item: Uuid,
        quantity: u32,
    ) -> Result<CartEntry, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let item = self.catalog_repository.get_menu_item(&mut tx, menu_item).await?;
        let restaurant = self
            .catalog_repository
            .get_restaurant(&mut tx, item.restaurant)
            .await?;

        if !item.is_available || !restaurant.is_active {
            return Err(CartsServiceError::ItemUnavailable);
        }

        let entry = self
            .entries_repository
            .upsert_entry(
                &mut tx,
                Uuid::now_v7(),
                user,
                menu_item,
                quantity,
                Timestamp::now(),
            )
            .await?;

        tx.commit().await?;

        Ok(entry)
    }

    async fn get_cart(&self, user: Uuid) -> Result<Vec<CartLine>, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let lines = self.entries_repository.cart_lines(&mut tx, user).await?;

        tx.commit().await?;

        Ok(lines)
    }

    async fn update_quantity(
        &self,
        user: Uuid,
        entry: Uuid,
        quantity: u32,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let existing = self.entries_repository.get_entry(&mut tx, entry).await?;

        if existing.user != user {
            return Err(CartsServiceError::Unauthorized);
        }

        // An update to zero is a removal, not an error.
        if quantity == 0 {
            self.entries_repository.delete_entry(&mut tx, entry).await?;
        } else {
            self.entries_repository
                .set_quantity(&mut tx, entry, quantity, Timestamp::now())
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn remove(&self, user: Uuid, entry: Uuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let existing = self.entries_repository.get_entry(&mut tx, entry).await?;

        if existing.user != user {
            return Err(CartsServiceError::Unauthorized);
        }

        self.entries_repository.delete_entry(&mut tx, entry).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn clear(&self, user: Uuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.entries_repository.clear(&mut tx, user).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add a menu item to the user's cart. Re-adding an item already in the
    /// cart increments the existing entry's quantity.
    async fn add_item(
        &self,
        user: Uuid,
        menu_item: Uuid,
        quantity: u32,
    ) -> Result<CartEntry, CartsServiceError>;

    /// The user's cart entries resolved against the catalog.
    async fn get_cart(&self, user: Uuid) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Set an entry's quantity directly; zero removes the entry.
    async fn update_quantity(
        &self,
        user: Uuid,
        entry: Uuid,
        quantity: u32,
    ) -> Result<(), CartsServiceError>;

    /// Remove one entry from the user's cart.
    async fn remove(&self, user: Uuid, entry: Uuid) -> Result<(), CartsServiceError>;

    /// Remove every entry in the user's cart.
    async fn clear(&self, user: Uuid) -> Result<(), CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers};

    use super::*;

    #[tokio::test]
    async fn adding_same_item_twice_merges_into_one_entry() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = Uuid::now_v7();
        let customer = Uuid::now_v7();

        let restaurant = helpers::create_restaurant(&ctx, owner).await?;
        let item = helpers::create_menu_item(&ctx, owner, restaurant.uuid, 1000).await?;

        let first = helpers::add_to_cart(&ctx, customer, item.uuid, 2).await?;
        let second = helpers::add_to_cart(&ctx, customer, item.uuid, 3).await?;

        assert_eq!(first.uuid, second.uuid, "re-adding must reuse the entry");
        assert_eq!(second.quantity, 5);

        let cart = ctx.carts.get_cart(customer).await?;

        assert_eq!(cart.len(), 1);
        assert!(cart.iter().all(|l| l.quantity == 5));

        Ok(())
    }

    #[tokio::test]
    async fn adding_unknown_item_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.add_item(Uuid::now_v7(), Uuid::now_v7(), 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn adding_unavailable_item_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = Uuid::now_v7();

        let restaurant = helpers::create_restaurant(&ctx, owner).await?;
        let item = helpers::create_menu_item(&ctx, owner, restaurant.uuid, 1000).await?;

        helpers::set_item_availability(&ctx, item.uuid, false).await?;

        let result = ctx.carts.add_item(Uuid::now_v7(), item.uuid, 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::ItemUnavailable)),
            "expected ItemUnavailable, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn adding_item_from_inactive_restaurant_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = Uuid::now_v7();

        let restaurant = helpers::create_restaurant(&ctx, owner).await?;
        let item = helpers::create_menu_item(&ctx, owner, restaurant.uuid, 1000).await?;

        helpers::set_restaurant_active(&ctx, restaurant.uuid, false).await?;

        let result = ctx.carts.add_item(Uuid::now_v7(), item.uuid, 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::ItemUnavailable)),
            "expected ItemUnavailable, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn adding_zero_quantity_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = Uuid::now_v7();

        let restaurant = helpers::create_restaurant(&ctx, owner).await?;
        let item = helpers::create_menu_item(&ctx, owner, restaurant.uuid, 1000).await?;

        let result = ctx.carts.add_item(Uuid::now_v7(), item.uuid, 0).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_sets_the_value_directly() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = Uuid::now_v7();
        let customer = Uuid::now_v7();

        let restaurant = helpers::create_restaurant(&ctx, owner).await?;
        let item = helpers::create_menu_item(&ctx, owner, restaurant.uuid, 1000).await?;
        let entry = helpers::add_to_cart(&ctx, customer, item.uuid, 2).await?;

        ctx.carts.update_quantity(customer, entry.uuid, 7).await?;

        let cart = ctx.carts.get_cart(customer).await?;

        assert!(cart.iter().all(|l| l.quantity == 7), "quantity must be set, not added");

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_to_zero_removes_the_entry() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = Uuid::now_v7();
        let customer = Uuid::now_v7();

        let restaurant = helpers::create_restaurant(&ctx, owner).await?;
        let item = helpers::create_menu_item(&ctx, owner, restaurant.uuid, 1000).await?;
        let entry = helpers::add_to_cart(&ctx, customer, item.uuid, 2).await?;

        ctx.carts.update_quantity(customer, entry.uuid, 0).await?;

        let cart = ctx.carts.get_cart(customer).await?;

        assert!(cart.is_empty(), "entry must be gone after a zero update");

        Ok(())
    }

    #[tokio::test]
    async fn updating_someone_elses_entry_is_unauthorized() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = Uuid::now_v7();
        let customer = Uuid::now_v7();

        let restaurant = helpers::create_restaurant(&ctx, owner).await?;
        let item = helpers::create_menu_item(&ctx, owner, restaurant.uuid, 1000).await?;
        let entry = helpers::add_to_cart(&ctx, customer, item.uuid, 2).await?;

        let result = ctx.carts.update_quantity(Uuid::now_v7(), entry.uuid, 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn updating_unknown_entry_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .update_quantity(Uuid::now_v7(), Uuid::now_v7(), 1)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn removing_someone_elses_entry_is_unauthorized() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = Uuid::now_v7();
        let customer = Uuid::now_v7();

        let restaurant = helpers::create_restaurant(&ctx, owner).await?;
        let item = helpers::create_menu_item(&ctx, owner, restaurant.uuid, 1000).await?;
        let entry = helpers::add_to_cart(&ctx, customer, item.uuid, 2).await?;

        let result = ctx.carts.remove(Uuid::now_v7(), entry.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_deletes_the_entry() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = Uuid::now_v7();
        let customer = Uuid::now_v7();

        let restaurant = helpers::create_restaurant(&ctx, owner).await?;
        let item = helpers::create_menu_item(&ctx, owner, restaurant.uuid, 1000).await?;
        let entry = helpers::add_to_cart(&ctx, customer, item.uuid, 2).await?;

        ctx.carts.remove(customer, entry.uuid).await?;

        assert!(ctx.carts.get_cart(customer).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn clear_empties_the_whole_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = Uuid::now_v7();
        let customer = Uuid::now_v7();

        let restaurant = helpers::create_restaurant(&ctx, owner).await?;
        let first = helpers::create_menu_item(&ctx, owner, restaurant.uuid, 1000).await?;
        let second = helpers::create_menu_item(&ctx, owner, restaurant.uuid, 500).await?;

        helpers::add_to_cart(&ctx, customer, first.uuid, 1).await?;
        helpers::add_to_cart(&ctx, customer, second.uuid, 2).await?;

        ctx.carts.clear(customer).await?;

        assert!(ctx.carts.get_cart(customer).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn cart_lines_carry_the_live_catalog_price() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = Uuid::now_v7();
        let customer = Uuid::now_v7();

        let restaurant = helpers::create_restaurant(&ctx, owner).await?;
        let item = helpers::create_menu_item(&ctx, owner, restaurant.uuid, 1000).await?;

        helpers::add_to_cart(&ctx, customer, item.uuid, 3).await?;

        let cart = ctx.carts.get_cart(customer).await?;

        assert_eq!(cart.len(), 1);
        assert!(
            cart.iter().all(|l| l.unit_price.minor() == 1000
                && l.restaurant == restaurant.uuid
                && l.menu_item == item.uuid),
            "line must reflect the catalog row"
        );

        Ok(())
    }
}
