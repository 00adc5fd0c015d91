//! Popularity Repository

use jiff::civil::Date;
use justeat::popularity::DailyDemand;
use sqlx::{Row, Sqlite, Transaction, query, sqlite::SqliteRow};
use uuid::Uuid;

const DAILY_DEMAND_SQL: &str = include_str!("sql/daily_demand.sql");
const MENU_DAILY_DEMAND_SQL: &str = include_str!("sql/menu_daily_demand.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqlitePopularityRepository;

impl SqlitePopularityRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Aggregate one menu item's demand for the given UTC calendar day.
    pub(crate) async fn daily_demand(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        menu_item: Uuid,
        date: Date,
    ) -> Result<DailyDemand, sqlx::Error> {
        let row = query(DAILY_DEMAND_SQL)
            .bind(menu_item)
            .bind(date.to_string())
            .fetch_one(&mut **tx)
            .await?;

        demand_from_row(&row)
    }

    /// Aggregate per-item demand across a restaurant's orders for one day.
    pub(crate) async fn menu_daily_demand(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: Uuid,
        date: Date,
    ) -> Result<Vec<(Uuid, DailyDemand)>, sqlx::Error> {
        let rows = query(MENU_DAILY_DEMAND_SQL)
            .bind(restaurant)
            .bind(date.to_string())
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| Ok((row.try_get("menu_item_uuid")?, demand_from_row(row)?)))
            .collect()
    }
}

fn demand_from_row(row: &SqliteRow) -> sqlx::Result<DailyDemand> {
    let total: i64 = row.try_get("total_quantity")?;
    let max_line: i64 = row.try_get("max_line_quantity")?;

    Ok(DailyDemand {
        total_quantity: u64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total_quantity".to_string(),
            source: Box::new(e),
        })?,
        max_line_quantity: u32::try_from(max_line).map_err(|e| sqlx::Error::ColumnDecode {
            index: "max_line_quantity".to_string(),
            source: Box::new(e),
        })?,
    })
}
