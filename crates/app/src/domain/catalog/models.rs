//! Catalog models

use jiff::Timestamp;
use justeat::prices::Price;
use uuid::Uuid;

/// Restaurant Model
#[derive(Debug, Clone)]
pub struct Restaurant {
    pub uuid: Uuid,
    pub owner: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub cuisine_type: String,
    pub address: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Restaurant Model
#[derive(Debug, Clone)]
pub struct NewRestaurant {
    pub name: String,
    pub description: Option<String>,
    pub cuisine_type: String,
    pub address: String,
    pub phone: Option<String>,
}

/// MenuItem Model
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub uuid: Uuid,
    pub restaurant: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub category: String,
    pub is_available: bool,
    pub is_special: bool,
    pub is_deal_of_day: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New MenuItem Model
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub restaurant: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub category: String,
}

/// Full-replace update for a menu item, mirroring the owner's edit form.
#[derive(Debug, Clone)]
pub struct MenuItemUpdate {
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub category: String,
    pub is_available: bool,
    pub is_special: bool,
    pub is_deal_of_day: bool,
}
