//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, SqliteCartsService},
        catalog::{CatalogService, SqliteCatalogService},
        orders::{OrdersService, SqliteOrdersService},
        popularity::{PopularityService, SqlitePopularityService},
        reviews::{ReviewsService, SqliteReviewsService},
    },
    notify::Notifier,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// The service handles handed to the (out-of-scope) web layer.
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub popularity: Arc<dyn PopularityService>,
    pub reviews: Arc<dyn ReviewsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating the database fails.
    pub async fn from_database_url(
        url: &str,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url).await.map_err(AppInitError::Database)?;

        database::migrate(&pool).await.map_err(AppInitError::Migrate)?;

        let db = Db::new(pool);

        Ok(Self {
            catalog: Arc::new(SqliteCatalogService::new(db.clone())),
            carts: Arc::new(SqliteCartsService::new(db.clone())),
            orders: Arc::new(SqliteOrdersService::new(db.clone(), notifier)),
            popularity: Arc::new(SqlitePopularityService::new(db.clone())),
            reviews: Arc::new(SqliteReviewsService::new(db)),
        })
    }
}
