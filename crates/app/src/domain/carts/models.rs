//! Cart models

use jiff::Timestamp;
use justeat::prices::Price;
use uuid::Uuid;

/// CartEntry Model
///
/// At most one entry exists per (user, menu item) pair; re-adding an item
/// increments the existing entry instead of duplicating it.
#[derive(Debug, Clone)]
pub struct CartEntry {
    pub uuid: Uuid,
    pub user: Uuid,
    pub menu_item: Uuid,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart entry joined with its menu item.
///
/// This is the snapshot both the cart view and the placement engine read:
/// the unit price here is the live catalog price at load time.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub entry: Uuid,
    pub menu_item: Uuid,
    pub item_name: String,
    pub restaurant: Uuid,
    pub unit_price: Price,
    pub quantity: u32,
}
