//! Test Helpers

use jiff::Timestamp;
use justeat::prices::Price;
use testresult::TestResult;
use uuid::Uuid;

use crate::{
    domain::{
        carts::{CartsService, CartsServiceError, models::CartEntry},
        catalog::{
            CatalogService, CatalogServiceError,
            models::{MenuItem, MenuItemUpdate, NewMenuItem, NewRestaurant, Restaurant},
        },
        orders::{OrdersService, models::Order},
    },
    test::TestContext,
};

pub(crate) async fn create_restaurant(
    ctx: &TestContext,
    owner: Uuid,
) -> Result<Restaurant, CatalogServiceError> {
    ctx.catalog
        .create_restaurant(
            owner,
            NewRestaurant {
                name: "Test Kitchen".to_string(),
                description: None,
                cuisine_type: "Italian".to_string(),
                address: "1 High Street".to_string(),
                phone: None,
            },
        )
        .await
}

pub(crate) async fn create_menu_item(
    ctx: &TestContext,
    owner: Uuid,
    restaurant: Uuid,
    price_minor: u64,
) -> Result<MenuItem, CatalogServiceError> {
    ctx.catalog
        .create_menu_item(
            owner,
            NewMenuItem {
                restaurant,
                name: "Margherita".to_string(),
                description: None,
                price: Price::from_minor(price_minor),
                category: "Mains".to_string(),
            },
        )
        .await
}

pub(crate) async fn add_to_cart(
    ctx: &TestContext,
    user: Uuid,
    menu_item: Uuid,
    quantity: u32,
) -> Result<CartEntry, CartsServiceError> {
    ctx.carts.add_item(user, menu_item, quantity).await
}

/// Change a menu item's price through the owner's edit flow.
pub(crate) async fn set_item_price(
    ctx: &TestContext,
    owner: Uuid,
    menu_item: Uuid,
    price_minor: u64,
) -> Result<MenuItem, CatalogServiceError> {
    let item = ctx.catalog.get_menu_item(menu_item).await?;

    ctx.catalog
        .update_menu_item(
            owner,
            menu_item,
            MenuItemUpdate {
                name: item.name,
                description: item.description,
                price: Price::from_minor(price_minor),
                category: item.category,
                is_available: item.is_available,
                is_special: item.is_special,
                is_deal_of_day: item.is_deal_of_day,
            },
        )
        .await
}

/// Flip an item's availability directly in storage.
pub(crate) async fn set_item_availability(
    ctx: &TestContext,
    menu_item: Uuid,
    available: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE menu_items SET is_available = ? WHERE uuid = ?")
        .bind(available)
        .bind(menu_item)
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}

/// Flip a restaurant's active flag directly in storage.
pub(crate) async fn set_restaurant_active(
    ctx: &TestContext,
    restaurant: Uuid,
    active: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE restaurants SET is_active = ? WHERE uuid = ?")
        .bind(active)
        .bind(restaurant)
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}

/// Insert a menu item directly, bypassing service validation — used to
/// provoke storage-level failures during placement.
pub(crate) async fn insert_menu_item_with_price(
    ctx: &TestContext,
    restaurant: Uuid,
    price: i64,
) -> Result<Uuid, sqlx::Error> {
    let uuid = Uuid::now_v7();
    let now = Timestamp::now().to_string();

    sqlx::query(
        "INSERT INTO menu_items (uuid, restaurant_uuid, name, price, category, created_at, updated_at)
         VALUES (?, ?, 'Loss Leader', ?, 'Specials', ?, ?)",
    )
    .bind(uuid)
    .bind(restaurant)
    .bind(price)
    .bind(&now)
    .bind(&now)
    .execute(ctx.db.pool())
    .await?;

    Ok(uuid)
}

/// Rewrite an order's creation time — used by day-boundary tests.
pub(crate) async fn backdate_order(
    ctx: &TestContext,
    order: Uuid,
    created_at: Timestamp,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE orders SET created_at = ? WHERE uuid = ?")
        .bind(created_at.to_string())
        .bind(order)
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}

/// One restaurant, one item at 10.00, quantity 2 — placed and returned.
pub(crate) async fn place_single_order(
    ctx: &TestContext,
    owner: Uuid,
    customer: Uuid,
) -> TestResult<Order> {
    let restaurant = create_restaurant(ctx, owner).await?;
    let item = create_menu_item(ctx, owner, restaurant.uuid, 1000).await?;

    add_to_cart(ctx, customer, item.uuid, 2).await?;

    let orders = ctx.orders.place_order(customer).await?;

    let Some(order) = orders.into_iter().next() else {
        panic!("placement produced no orders");
    };

    Ok(order)
}
