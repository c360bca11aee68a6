//! Monthly State

use rust_decimal::Decimal;
use serde::Deserialize;

/// Externally supplied starting values, reapplied on every month rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SeedState {
    /// Discount budget available at the start of each month
    #[serde(rename = "monthlyDiscount")]
    pub monthly_discount: Decimal,

    /// Starting value of the rule counter
    pub counter: i32,

    /// Month the run starts in; anything outside 1-12 means "no month yet"
    #[serde(rename = "currentMonth")]
    pub current_month: i32,
}

impl SeedState {
    /// Create a new seed.
    pub fn new(monthly_discount: Decimal, counter: i32, current_month: i32) -> Self {
        Self {
            monthly_discount,
            counter,
            current_month,
        }
    }

    /// Seed month, or `None` for the sentinel.
    pub fn month(&self) -> Option<i8> {
        i8::try_from(self.current_month)
            .ok()
            .filter(|month| (1..=12).contains(month))
    }
}

/// Running per-month state shared by all rules during one run.
///
/// The budget never goes below zero: [`MonthlyState::spend`] clamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyState {
    budget: Decimal,
    counter: i32,
    month: Option<i8>,
}

impl MonthlyState {
    /// Start from the seed values.
    pub fn from_seed(seed: &SeedState) -> Self {
        Self {
            budget: seed.monthly_discount.max(Decimal::ZERO),
            counter: seed.counter,
            month: seed.month(),
        }
    }

    /// Remaining discount budget for the current month.
    pub fn budget(&self) -> Decimal {
        self.budget
    }

    /// Current value of the rule counter.
    pub fn counter(&self) -> i32 {
        self.counter
    }

    /// Month the state currently tracks.
    pub fn month(&self) -> Option<i8> {
        self.month
    }

    /// Increment the rule counter and return its new value.
    pub fn increment_counter(&mut self) -> i32 {
        self.counter = self.counter.wrapping_add(1);
        self.counter
    }

    /// Take `amount` out of the budget, stopping at zero.
    pub fn spend(&mut self, amount: Decimal) {
        self.budget = (self.budget - amount).max(Decimal::ZERO);
    }

    /// Reset budget and counter to the seed if `month` differs from the tracked one.
    ///
    /// Returns whether a rollover happened.
    pub(crate) fn roll_over(&mut self, month: i8, seed: &SeedState) -> bool {
        if self.month == Some(month) {
            return false;
        }

        self.month = Some(month);
        self.budget = seed.monthly_discount.max(Decimal::ZERO);
        self.counter = seed.counter;

        true
    }
}
