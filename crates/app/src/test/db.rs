//! Database test utilities

use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::database::MIGRATOR;

/// An isolated in-memory database with migrations applied.
///
/// ## Isolation model
///
/// Every test gets its own private in-memory database, so there is no
/// cross-test state and no cleanup to run. The pool is pinned to a single
/// connection: an in-memory SQLite database lives and dies with its
/// connection, so one long-lived connection keeps it visible to every query
/// in the test.
#[derive(Debug, Clone)]
pub struct TestDb {
    pool: SqlitePool,
}

impl TestDb {
    pub async fn new() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("Failed to parse connection options")
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
            .expect("Failed to open in-memory database");

        MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations on test database");

        Self { pool }
    }

    /// Returns the connection pool for this test database.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_starts_migrated() {
        let test_db = TestDb::new().await;

        let result: i32 = sqlx::query_scalar("SELECT COUNT(*) FROM restaurants")
            .fetch_one(test_db.pool())
            .await
            .expect("Failed to query the restaurants table");

        assert_eq!(result, 0);
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let test_db = TestDb::new().await;

        let result = sqlx::query(
            "INSERT INTO menu_items (uuid, restaurant_uuid, name, price, category, created_at, updated_at)
             VALUES (?, ?, 'Orphan', 100, 'Snacks', '2025-01-01T00:00:00Z', '2025-01-01T00:00:00Z')",
        )
        .bind(uuid::Uuid::now_v7())
        .bind(uuid::Uuid::now_v7())
        .execute(test_db.pool())
        .await;

        assert!(result.is_err(), "orphan menu item must be rejected");
    }
}
