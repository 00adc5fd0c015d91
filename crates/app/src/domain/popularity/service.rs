//! Popularity service.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::civil::Date;
use justeat::popularity::DailyDemand;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        catalog::SqliteCatalogRepository,
        popularity::{
            errors::PopularityServiceError, models::MenuItemView,
            repository::SqlitePopularityRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct SqlitePopularityService {
    db: Db,
    repository: SqlitePopularityRepository,
    catalog_repository: SqliteCatalogRepository,
}

impl SqlitePopularityService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqlitePopularityRepository::new(),
            catalog_repository: SqliteCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl PopularityService for SqlitePopularityService {
    async fn is_mostly_ordered(
        &self,
        menu_item: Uuid,
        date: Date,
    ) -> Result<bool, PopularityServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.catalog_repository.get_menu_item(&mut tx, menu_item).await?;

        let demand = self.repository.daily_demand(&mut tx, menu_item, date).await?;

        tx.commit().await?;

        Ok(demand.is_mostly_ordered())
    }

    async fn menu_with_popularity(
        &self,
        restaurant: Uuid,
        date: Date,
    ) -> Result<Vec<MenuItemView>, PopularityServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.catalog_repository.get_restaurant(&mut tx, restaurant).await?;

        let items = self.catalog_repository.list_menu(&mut tx, restaurant).await?;
        let demand = self
            .repository
            .menu_daily_demand(&mut tx, restaurant, date)
            .await?;

        tx.commit().await?;

        let demand: HashMap<Uuid, DailyDemand> = demand.into_iter().collect();

        Ok(items
            .into_iter()
            .map(|item| MenuItemView {
                mostly_ordered: demand
                    .get(&item.uuid)
                    .copied()
                    .unwrap_or_default()
                    .is_mostly_ordered(),
                item,
            })
            .collect())
    }
}

#[automock]
#[async_trait]
pub trait PopularityService: Send + Sync {
    /// Whether the item is "mostly ordered" on the given UTC calendar day:
    /// total ordered quantity above the threshold, or any single order line
    /// above it on its own. Recomputed from order history on every call.
    async fn is_mostly_ordered(
        &self,
        menu_item: Uuid,
        date: Date,
    ) -> Result<bool, PopularityServiceError>;

    /// A restaurant's available menu with the per-item popularity flag
    /// attached as a read-time view.
    async fn menu_with_popularity(
        &self,
        restaurant: Uuid,
        date: Date,
    ) -> Result<Vec<MenuItemView>, PopularityServiceError>;
}
