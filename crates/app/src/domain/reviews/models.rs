//! Review models

use jiff::Timestamp;
use uuid::Uuid;

/// Review Model
///
/// Append-only: reviews are never edited or deleted once written. A menu
/// item review also records the owning restaurant for aggregation.
#[derive(Debug, Clone)]
pub struct Review {
    pub uuid: Uuid,
    pub user: Uuid,
    pub restaurant: Uuid,
    pub menu_item: Option<Uuid>,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

/// New Review Model
#[derive(Debug, Clone)]
pub struct NewReview {
    pub rating: u8,
    pub comment: Option<String>,
}
