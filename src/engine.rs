//! Discount Engine
//!
//! Runs an ordered rule set over shipment lines, one line at a time. Lines
//! must be processed strictly in order: budget, counter and month carry over
//! from one line to the next.

use tracing::debug;

use crate::{
    lines::OutputLine,
    prices::PriceTable,
    rules::Rule,
    shipments::Shipment,
    state::{MonthlyState, SeedState},
};

/// Applies discount rules to shipments against a running monthly state.
#[derive(Debug)]
pub struct DiscountEngine<'p, 'r> {
    prices: &'p PriceTable,
    seed: SeedState,
    rules: Vec<Rule<'r>>,
    state: MonthlyState,
}

impl<'p, 'r> DiscountEngine<'p, 'r> {
    /// Create an engine starting from `seed`, evaluating `rules` in order.
    pub fn new(prices: &'p PriceTable, seed: SeedState, rules: Vec<Rule<'r>>) -> Self {
        Self {
            prices,
            seed,
            rules,
            state: MonthlyState::from_seed(&seed),
        }
    }

    /// Current monthly state.
    pub fn state(&self) -> &MonthlyState {
        &self.state
    }

    /// Process one raw input line.
    ///
    /// Malformed lines come back as [`OutputLine::Ignored`] and leave all
    /// state untouched.
    pub fn process_line<'a>(&mut self, line: &'a str) -> OutputLine<'a> {
        let Some(shipment) = Shipment::parse(line) else {
            debug!(line, "ignoring malformed line");

            return OutputLine::ignored(line);
        };

        if self.state.roll_over(shipment.month(), &self.seed) {
            debug!(month = shipment.month(), "new month, monthly state reset");
        }

        let quote = self.prices.quote(shipment.provider, shipment.size);

        for rule in &mut self.rules {
            if let Some(output) = rule.apply(&shipment, quote, &mut self.state) {
                debug!(rule = rule.name(), %output, "rule fired");

                return output;
            }
        }

        let output = OutputLine::full_price(shipment, quote.providers_price);

        debug!(%output, "no rule applied, full price charged");

        output
    }

    /// Process every line in order, producing exactly one output line per input line.
    pub fn process<'a, I>(&mut self, lines: I) -> Vec<OutputLine<'a>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .map(|line| self.process_line(line))
            .collect()
    }
}

/// Process a batch of lines with a fresh engine.
pub fn process<'a, I>(
    prices: &PriceTable,
    seed: SeedState,
    rules: Vec<Rule<'_>>,
    lines: I,
) -> Vec<OutputLine<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    DiscountEngine::new(prices, seed, rules).process(lines)
}
