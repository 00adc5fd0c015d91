//! Popularity models

use crate::domain::catalog::models::MenuItem;

/// A menu item together with its derived same-day popularity flag.
///
/// The flag is computed per read and never written back to the catalog row.
#[derive(Debug, Clone)]
pub struct MenuItemView {
    pub item: MenuItem,
    pub mostly_ordered: bool,
}
