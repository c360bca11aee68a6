//! Cheapest Provider Rule

use rust_decimal::Decimal;
use tracing::warn;

use crate::{
    lines::OutputLine, prices::PriceQuote, rules::DiscountRule, shipments::Shipment,
    state::MonthlyState,
};

/// Brings every shipment of one size down to the cheapest provider's price,
/// as far as the remaining monthly budget allows.
#[derive(Debug, Clone)]
pub struct CheapestProviderRule {
    size: String,
}

impl CheapestProviderRule {
    /// Create a rule for the given package size.
    pub fn new(size: impl Into<String>) -> Self {
        Self { size: size.into() }
    }
}

impl DiscountRule for CheapestProviderRule {
    fn name(&self) -> &str {
        "cheapest provider"
    }

    fn apply<'a>(
        &mut self,
        shipment: &Shipment<'a>,
        quote: PriceQuote,
        state: &mut MonthlyState,
    ) -> Option<OutputLine<'a>> {
        if shipment.size != self.size {
            return None;
        }

        let gap = quote.providers_price - quote.lowest_price;

        if gap < Decimal::ZERO {
            warn!(
                provider = shipment.provider,
                size = shipment.size,
                price = %quote.providers_price,
                lowest = %quote.lowest_price,
                "provider price is below the lowest price for its size; no discount applied"
            );
        }

        let applied = gap.min(state.budget()).max(Decimal::ZERO);

        if applied.is_zero() {
            return Some(OutputLine::full_price(*shipment, quote.providers_price));
        }

        state.spend(applied);

        Some(OutputLine::discounted(
            *shipment,
            quote.providers_price - applied,
            applied,
        ))
    }
}
