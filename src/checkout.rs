//! Checkout partitioning

use std::collections::BTreeMap;

use thiserror::Error;
use uuid::Uuid;

use crate::prices::{Price, PriceOverflow};

/// Errors produced while partitioning a cart into orders.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The cart had no entries.
    #[error("cart is empty")]
    EmptyCart,

    /// A line or order total exceeded the representable range.
    #[error("order total overflowed")]
    TotalOverflow(#[from] PriceOverflow),
}

/// One cart entry resolved against the catalog at checkout time.
#[derive(Debug, Clone)]
pub struct CartLine {
    /// The menu item being purchased.
    pub menu_item: Uuid,
    /// The restaurant that owns the menu item.
    pub restaurant: Uuid,
    /// The live unit price read in the checkout snapshot.
    pub unit_price: Price,
    /// Units requested.
    pub quantity: u32,
}

/// A single line within a draft, carrying the frozen price copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftLine {
    /// The menu item being purchased.
    pub menu_item: Uuid,
    /// The price frozen at checkout time, decoupled from later catalog edits.
    pub unit_price: Price,
    /// Units requested.
    pub quantity: u32,
}

/// One restaurant-scoped order ready to be persisted.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    /// The restaurant every line in this draft belongs to.
    pub restaurant: Uuid,
    /// Checked sum of `unit_price × quantity` over the lines.
    pub total: Price,
    /// The order lines.
    pub lines: Vec<DraftLine>,
}

/// Partitions resolved cart lines into one order draft per restaurant.
///
/// Drafts come back sorted by restaurant id so the persistence order is
/// deterministic.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] when `lines` is empty, and
/// [`CheckoutError::TotalOverflow`] when any line or order total cannot be
/// represented.
pub fn partition(lines: Vec<CartLine>) -> Result<Vec<OrderDraft>, CheckoutError> {
    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut by_restaurant: BTreeMap<Uuid, Vec<CartLine>> = BTreeMap::new();

    for line in lines {
        by_restaurant.entry(line.restaurant).or_default().push(line);
    }

    let mut drafts = Vec::with_capacity(by_restaurant.len());

    for (restaurant, lines) in by_restaurant {
        let mut total = Price::default();
        let mut draft_lines = Vec::with_capacity(lines.len());

        for line in lines {
            total = total.checked_add(line.unit_price.times(line.quantity)?)?;

            draft_lines.push(DraftLine {
                menu_item: line.menu_item,
                unit_price: line.unit_price,
                quantity: line.quantity,
            });
        }

        drafts.push(OrderDraft {
            restaurant,
            total,
            lines: draft_lines,
        });
    }

    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(restaurant: Uuid, unit_price: u64, quantity: u32) -> CartLine {
        CartLine {
            menu_item: Uuid::now_v7(),
            restaurant,
            unit_price: Price::from_minor(unit_price),
            quantity,
        }
    }

    #[test]
    fn empty_cart_errors() {
        let result = partition(Vec::new());

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[test]
    fn single_restaurant_yields_single_draft() -> testresult::TestResult {
        let restaurant = Uuid::now_v7();

        let drafts = partition(vec![line(restaurant, 1000, 2), line(restaurant, 250, 1)])?;

        assert_eq!(drafts.len(), 1);

        let Some(draft) = drafts.first() else {
            panic!("missing draft");
        };

        assert_eq!(draft.restaurant, restaurant);
        assert_eq!(draft.total, Price::from_minor(2250));
        assert_eq!(draft.lines.len(), 2);

        Ok(())
    }

    #[test]
    fn drafts_are_sorted_by_restaurant() -> testresult::TestResult {
        let first = Uuid::now_v7();
        let second = Uuid::now_v7();

        let drafts = partition(vec![line(second, 100, 1), line(first, 100, 1)])?;

        let restaurants: Vec<Uuid> = drafts.iter().map(|d| d.restaurant).collect();

        assert_eq!(restaurants, vec![first.min(second), first.max(second)]);

        Ok(())
    }

    #[test]
    fn line_overflow_errors() {
        let result = partition(vec![line(Uuid::now_v7(), u64::MAX, 2)]);

        assert!(matches!(result, Err(CheckoutError::TotalOverflow(_))));
    }

    #[test]
    fn total_overflow_across_lines_errors() {
        let restaurant = Uuid::now_v7();

        let result = partition(vec![
            line(restaurant, u64::MAX, 1),
            line(restaurant, 1, 1),
        ]);

        assert!(matches!(result, Err(CheckoutError::TotalOverflow(_))));
    }
}
