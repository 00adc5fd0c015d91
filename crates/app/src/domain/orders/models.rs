//! Order models

use jiff::Timestamp;
use justeat::{prices::Price, status::OrderStatus};
use uuid::Uuid;

/// Order Model
///
/// One restaurant-scoped checkout record. `total_amount` is fixed at
/// creation from the frozen line prices and never recomputed.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: Uuid,
    pub order_number: String,
    pub status: OrderStatus,
    pub total_amount: Price,
    pub customer: Uuid,
    pub restaurant: Uuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub items: Vec<OrderItem>,
}

/// OrderItem Model
///
/// `price` is the unit price copied from the menu item at placement time,
/// decoupled from any later catalog edits.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub uuid: Uuid,
    pub order: Uuid,
    pub menu_item: Uuid,
    pub quantity: u32,
    pub price: Price,
}

/// One restaurant's orders and revenue for a single UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    pub orders: u64,
    pub revenue: Price,
}
