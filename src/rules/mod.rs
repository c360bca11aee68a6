//! Discount Rules
//!
//! Rules are evaluated in configured order for every well-formed shipment.
//! The first rule returning a line wins; `None` means the rule has no opinion
//! and the next one is tried.

use std::{fmt, num::NonZeroU32};

use serde::Deserialize;

use crate::{lines::OutputLine, prices::PriceQuote, shipments::Shipment, state::MonthlyState};

pub mod cheapest_provider;
pub mod periodic_waiver;

pub use cheapest_provider::CheapestProviderRule;
pub use periodic_waiver::PeriodicWaiverRule;

/// A single discount policy.
pub trait DiscountRule: fmt::Debug {
    /// Short human readable name, used in diagnostics.
    fn name(&self) -> &str;

    /// Evaluate the rule for one shipment.
    ///
    /// Returns `None` when the shipment is not eligible. An eligible shipment
    /// always produces a line, discounted or not, and may update `state`.
    fn apply<'a>(
        &mut self,
        shipment: &Shipment<'a>,
        quote: PriceQuote,
        state: &mut MonthlyState,
    ) -> Option<OutputLine<'a>>;
}

/// Boxed rule object as held by the engine.
pub type Rule<'r> = Box<dyn DiscountRule + 'r>;

/// Box any rule implementation.
pub fn rule<'r, R>(rule: R) -> Rule<'r>
where
    R: DiscountRule + 'r,
{
    Box::new(rule)
}

/// The rule set used when configuration does not name one: a monthly free
/// `L` package from `LP`, then the cheapest-provider match for `S`.
pub fn default_rules() -> Vec<Rule<'static>> {
    RuleConfig::defaults()
        .into_iter()
        .map(RuleConfig::into_rule)
        .collect()
}

/// Rule definition as read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Every `every`-th eligible shipment in a month ships free, once per month.
    PeriodicWaiver {
        /// Package size the rule applies to
        size: String,

        /// Provider the rule applies to
        provider: String,

        /// Period of the waiver
        #[serde(default = "default_period")]
        every: NonZeroU32,
    },

    /// Match the cheapest provider's price, limited by the monthly budget.
    CheapestProvider {
        /// Package size the rule applies to
        size: String,
    },
}

fn default_period() -> NonZeroU32 {
    NonZeroU32::MIN.saturating_add(2)
}

impl RuleConfig {
    /// The default ordered rule definitions.
    pub fn defaults() -> Vec<Self> {
        vec![
            RuleConfig::PeriodicWaiver {
                size: "L".to_string(),
                provider: "LP".to_string(),
                every: default_period(),
            },
            RuleConfig::CheapestProvider {
                size: "S".to_string(),
            },
        ]
    }

    /// Build the rule this definition describes.
    pub fn into_rule(self) -> Rule<'static> {
        match self {
            RuleConfig::PeriodicWaiver {
                size,
                provider,
                every,
            } => rule(PeriodicWaiverRule::new(size, provider).every(every)),
            RuleConfig::CheapestProvider { size } => rule(CheapestProviderRule::new(size)),
        }
    }
}
