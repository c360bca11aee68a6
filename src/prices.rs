//! Prices

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Price charged by a provider for one package size.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PriceEntry {
    /// Provider code, e.g. `LP`
    pub provider: String,

    /// Package size code, e.g. `S`
    pub size: String,

    /// Price in currency units
    #[serde(rename = "priceValue")]
    pub price_value: Decimal,
}

impl PriceEntry {
    /// Create a new price entry.
    pub fn new(provider: impl Into<String>, size: impl Into<String>, price_value: Decimal) -> Self {
        Self {
            provider: provider.into(),
            size: size.into(),
            price_value,
        }
    }
}

/// The two price lookups needed to evaluate rules for one shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceQuote {
    /// Price of the shipment's own provider and size
    pub providers_price: Decimal,

    /// Lowest price any provider charges for the shipment's size
    pub lowest_price: Decimal,
}

/// Lookup table from `(provider, size)` to price.
///
/// Unknown pairs and unknown sizes price at zero rather than failing.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    by_provider: FxHashMap<String, FxHashMap<String, Decimal>>,
    lowest_by_size: FxHashMap<String, Decimal>,
}

impl PriceTable {
    /// Build a price table, indexing entries by provider and size.
    ///
    /// When a `(provider, size)` pair appears more than once the first entry wins.
    pub fn new(entries: impl IntoIterator<Item = PriceEntry>) -> Self {
        let mut by_provider: FxHashMap<String, FxHashMap<String, Decimal>> = FxHashMap::default();
        let mut lowest_by_size: FxHashMap<String, Decimal> = FxHashMap::default();

        for entry in entries {
            lowest_by_size
                .entry(entry.size.clone())
                .and_modify(|lowest| *lowest = (*lowest).min(entry.price_value))
                .or_insert(entry.price_value);

            by_provider
                .entry(entry.provider)
                .or_default()
                .entry(entry.size)
                .or_insert(entry.price_value);
        }

        Self {
            by_provider,
            lowest_by_size,
        }
    }

    /// Price for a provider and size, or zero if the pair is unknown.
    pub fn price_for(&self, provider: &str, size: &str) -> Decimal {
        self.by_provider
            .get(provider)
            .and_then(|sizes| sizes.get(size))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Lowest price across all providers for a size, or zero if the size is unknown.
    pub fn min_price_for(&self, size: &str) -> Decimal {
        self.lowest_by_size
            .get(size)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Both lookups for one shipment.
    pub fn quote(&self, provider: &str, size: &str) -> PriceQuote {
        PriceQuote {
            providers_price: self.price_for(provider, size),
            lowest_price: self.min_price_for(size),
        }
    }

    /// Number of distinct `(provider, size)` pairs priced.
    pub fn priced_pairs(&self) -> usize {
        self.by_provider.values().map(FxHashMap::len).sum()
    }
}
