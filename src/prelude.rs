//! Shipment discounts prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    app::{RunError, run},
    config::{ConfigError, ConfigFormat, Configuration},
    engine::{DiscountEngine, process},
    io::{FileSink, FileSource, LineSink, LineSource, LinesError},
    lines::{OutputLine, round_currency},
    prices::{PriceEntry, PriceQuote, PriceTable},
    rules::{
        CheapestProviderRule, DiscountRule, PeriodicWaiverRule, Rule, RuleConfig, default_rules,
        rule,
    },
    shipments::Shipment,
    state::{MonthlyState, SeedState},
};
