//! Periodic Waiver Rule
//!
//! Every N-th eligible shipment within a month ships for free, at most once
//! per month.

use std::num::NonZeroU32;

use rust_decimal::Decimal;

use crate::{
    lines::OutputLine, prices::PriceQuote, rules::DiscountRule, shipments::Shipment,
    state::MonthlyState,
};

/// Waives the full price of every N-th shipment of one size and provider,
/// once per calendar month.
///
/// The rule counts eligible shipments with the shared counter in
/// [`MonthlyState`], but tracks the month and whether the waiver was already
/// granted on its own, so it resets independently of the engine.
#[derive(Debug, Clone)]
pub struct PeriodicWaiverRule {
    size: String,
    provider: String,
    every: NonZeroU32,
    last_processed_month: Option<i8>,
    granted_this_month: bool,
}

impl PeriodicWaiverRule {
    /// Create a rule waiving every third eligible shipment.
    pub fn new(size: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            size: size.into(),
            provider: provider.into(),
            every: NonZeroU32::MIN.saturating_add(2),
            last_processed_month: None,
            granted_this_month: false,
        }
    }

    /// Change the waiver period.
    #[must_use]
    pub fn every(mut self, every: NonZeroU32) -> Self {
        self.every = every;
        self
    }

    /// Whether the waiver was already granted in the month last seen.
    pub fn granted_this_month(&self) -> bool {
        self.granted_this_month
    }

    fn is_eligible(&self, shipment: &Shipment<'_>) -> bool {
        shipment.size == self.size && shipment.provider == self.provider
    }
}

impl DiscountRule for PeriodicWaiverRule {
    fn name(&self) -> &str {
        "periodic waiver"
    }

    fn apply<'a>(
        &mut self,
        shipment: &Shipment<'a>,
        quote: PriceQuote,
        state: &mut MonthlyState,
    ) -> Option<OutputLine<'a>> {
        if !self.is_eligible(shipment) {
            return None;
        }

        let month = shipment.month();

        if self.last_processed_month != Some(month) {
            self.granted_this_month = false;
            self.last_processed_month = Some(month);
        }

        let count = state.increment_counter();

        let due = i64::from(count).rem_euclid(i64::from(self.every.get())) == 0;

        if due && !self.granted_this_month {
            self.granted_this_month = true;
            state.spend(quote.providers_price);

            return Some(OutputLine::discounted(
                *shipment,
                Decimal::ZERO,
                quote.providers_price,
            ));
        }

        Some(OutputLine::full_price(*shipment, quote.providers_price))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{Date, date};
    use rust_decimal_macros::dec;

    use crate::state::SeedState;

    use super::*;

    fn quote(providers_price: Decimal) -> PriceQuote {
        PriceQuote {
            providers_price,
            lowest_price: dec!(4.00),
        }
    }

    fn state(counter: i32) -> MonthlyState {
        MonthlyState::from_seed(&SeedState::new(dec!(10.00), counter, -1))
    }

    fn apply_on(
        rule: &mut PeriodicWaiverRule,
        state: &mut MonthlyState,
        date: Date,
        price: Decimal,
    ) -> Option<String> {
        rule.apply(&Shipment::new(date, "L", "LP"), quote(price), state)
            .map(|line| line.to_string())
    }

    #[test]
    fn waives_third_shipment() {
        let mut rule = PeriodicWaiverRule::new("L", "LP");
        let mut state = state(2);

        let line = apply_on(&mut rule, &mut state, date(2023, 2, 14), dec!(6.90));

        assert_eq!(line.as_deref(), Some("2023-02-14 L LP 0.00 6.90"));
        assert!(rule.granted_this_month());
    }

    #[test]
    fn first_shipment_pays_full_price() {
        let mut rule = PeriodicWaiverRule::new("L", "LP");
        let mut state = state(0);

        let line = apply_on(&mut rule, &mut state, date(2023, 2, 14), dec!(6.90));

        assert_eq!(line.as_deref(), Some("2023-02-14 L LP 6.90 -"));
        assert_eq!(state.counter(), 1);
    }

    #[test]
    fn waives_once_per_month_and_again_next_month() {
        let mut rule = PeriodicWaiverRule::new("L", "LP");
        let mut state = state(0);

        let dates = [
            date(2023, 2, 17),
            date(2023, 2, 18),
            date(2023, 2, 19),
            date(2023, 2, 20),
            date(2023, 2, 21),
            date(2023, 2, 22),
        ];

        let lines: Vec<Option<String>> = dates
            .into_iter()
            .map(|day| apply_on(&mut rule, &mut state, day, dec!(6.90)))
            .collect();

        assert_eq!(
            lines,
            [
                Some("2023-02-17 L LP 6.90 -".to_string()),
                Some("2023-02-18 L LP 6.90 -".to_string()),
                Some("2023-02-19 L LP 0.00 6.90".to_string()),
                Some("2023-02-20 L LP 6.90 -".to_string()),
                Some("2023-02-21 L LP 6.90 -".to_string()),
                Some("2023-02-22 L LP 6.90 -".to_string()),
            ]
        );

        // The engine resets the shared counter on a new month; the rule resets
        // its own granted flag when it sees the new month.
        let mut state = self::state(0);
        let march: Vec<Option<String>> = [date(2023, 3, 1), date(2023, 3, 12), date(2023, 3, 13)]
            .into_iter()
            .map(|day| apply_on(&mut rule, &mut state, day, dec!(6.90)))
            .collect();

        assert_eq!(
            march.last().cloned().flatten().as_deref(),
            Some("2023-03-13 L LP 0.00 6.90")
        );
    }

    #[test]
    fn own_month_tracking_resets_without_engine() {
        let mut rule = PeriodicWaiverRule::new("L", "LP");
        let mut state = state(2);

        let february = apply_on(&mut rule, &mut state, date(2023, 2, 17), dec!(6.90));
        assert_eq!(february.as_deref(), Some("2023-02-17 L LP 0.00 6.90"));

        // Counter keeps running (3 -> 6) with no engine-level reset in between.
        for day in [1, 2] {
            apply_on(&mut rule, &mut state, date(2023, 3, day), dec!(6.90));
        }
        let march = apply_on(&mut rule, &mut state, date(2023, 3, 3), dec!(6.90));

        assert_eq!(march.as_deref(), Some("2023-03-03 L LP 0.00 6.90"));
    }

    #[test]
    fn waiver_reduces_budget() {
        let mut rule = PeriodicWaiverRule::new("L", "LP");
        let mut state = state(2);

        apply_on(&mut rule, &mut state, date(2023, 2, 17), dec!(6.90));

        assert_eq!(state.budget(), dec!(3.10));
    }

    #[test]
    fn waiver_clamps_budget_at_zero() {
        let mut rule = PeriodicWaiverRule::new("L", "LP");
        let mut state = MonthlyState::from_seed(&SeedState::new(dec!(5.00), 2, -1));

        let line = apply_on(&mut rule, &mut state, date(2023, 2, 17), dec!(6.90));

        assert_eq!(line.as_deref(), Some("2023-02-17 L LP 0.00 6.90"));
        assert_eq!(state.budget(), Decimal::ZERO);
    }

    #[test]
    fn rounds_three_decimal_price() {
        let mut rule = PeriodicWaiverRule::new("L", "LP");
        let mut state = state(0);

        let line = apply_on(&mut rule, &mut state, date(2023, 2, 14), dec!(6.995));

        assert_eq!(line.as_deref(), Some("2023-02-14 L LP 7.00 -"));
    }

    #[test]
    fn rounds_three_decimal_waiver() {
        let mut rule = PeriodicWaiverRule::new("L", "LP");
        let mut state = state(2);

        let line = apply_on(&mut rule, &mut state, date(2023, 2, 14), dec!(6.995));

        assert_eq!(line.as_deref(), Some("2023-02-14 L LP 0.00 7.00"));
    }

    #[test]
    fn custom_period() {
        let mut rule = PeriodicWaiverRule::new("L", "LP").every(NonZeroU32::MIN.saturating_add(1));
        let mut state = state(0);

        let first = apply_on(&mut rule, &mut state, date(2023, 2, 1), dec!(6.90));
        let second = apply_on(&mut rule, &mut state, date(2023, 2, 2), dec!(6.90));

        assert_eq!(first.as_deref(), Some("2023-02-01 L LP 6.90 -"));
        assert_eq!(second.as_deref(), Some("2023-02-02 L LP 0.00 6.90"));
    }

    #[test]
    fn ineligible_shipments_have_no_opinion() {
        let mut rule = PeriodicWaiverRule::new("L", "LP");
        let mut state = state(2);

        let wrong_provider = rule.apply(
            &Shipment::new(date(2023, 2, 14), "L", "MR"),
            quote(dec!(4.00)),
            &mut state,
        );
        let wrong_size = rule.apply(
            &Shipment::new(date(2023, 2, 14), "S", "LP"),
            quote(dec!(1.50)),
            &mut state,
        );

        assert_eq!(wrong_provider, None);
        assert_eq!(wrong_size, None);
        assert_eq!(state.counter(), 2);
    }

    #[test]
    fn negative_seed_counter_counts_up_through_zero() {
        let mut rule = PeriodicWaiverRule::new("L", "LP");
        let mut state = state(-4);

        let first = apply_on(&mut rule, &mut state, date(2023, 2, 1), dec!(6.90));
        let second = apply_on(&mut rule, &mut state, date(2023, 2, 2), dec!(6.90));

        assert_eq!(first.as_deref(), Some("2023-02-01 L LP 0.00 6.90"));
        assert_eq!(second.as_deref(), Some("2023-02-02 L LP 6.90 -"));
        assert_eq!(state.counter(), -2);
    }
}
