//! Daily popularity policy

/// Strict quantity threshold shared by both "mostly ordered" conditions.
pub const MOSTLY_ORDERED_THRESHOLD: u32 = 10;

/// Aggregated demand for one menu item on one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyDemand {
    /// Sum of quantities across every order line for the day.
    pub total_quantity: u64,
    /// Largest single order-line quantity for the day.
    pub max_line_quantity: u32,
}

impl DailyDemand {
    /// Whether the item counts as "mostly ordered" for the day.
    ///
    /// Either condition is sufficient: aggregate demand above the threshold,
    /// or one single order line above it on its own. Both comparisons are
    /// strict, so a day summing to exactly the threshold does not qualify.
    #[must_use]
    pub fn is_mostly_ordered(self) -> bool {
        self.total_quantity > u64::from(MOSTLY_ORDERED_THRESHOLD)
            || self.max_line_quantity > MOSTLY_ORDERED_THRESHOLD
    }
}
