//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    database::Db,
    domain::{
        carts::SqliteCartsService, catalog::SqliteCatalogService, orders::SqliteOrdersService,
        popularity::SqlitePopularityService, reviews::SqliteReviewsService,
    },
    notify::{LogNotifier, Notifier},
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub catalog: SqliteCatalogService,
    pub carts: SqliteCartsService,
    pub orders: SqliteOrdersService,
    pub popularity: SqlitePopularityService,
    pub reviews: SqliteReviewsService,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_notifier(Arc::new(LogNotifier)).await
    }

    /// Build a context around a specific notifier — used by tests that
    /// assert on emitted order events.
    pub async fn with_notifier(notifier: Arc<dyn Notifier>) -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            catalog: SqliteCatalogService::new(db.clone()),
            carts: SqliteCartsService::new(db.clone()),
            orders: SqliteOrdersService::new(db.clone(), notifier),
            popularity: SqlitePopularityService::new(db.clone()),
            reviews: SqliteReviewsService::new(db),
            db: test_db,
        }
    }
}
