//! Output Lines
//!
//! Canonical rendering: `YYYY-MM-DD SIZE PROVIDER PRICE DISCOUNT`, where both
//! amounts carry two decimals and a missing discount renders as `-`.
//! Malformed input renders as the original line followed by ` Ignored`.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::shipments::Shipment;

/// Round an amount to two decimal places, midpoint away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One line of output, produced for every line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLine<'a> {
    /// A well-formed shipment with its final price.
    Charged {
        /// The shipment being charged
        shipment: Shipment<'a>,

        /// Final price, already rounded
        price: Decimal,

        /// Discount granted, already rounded; `None` renders as `-`
        discount: Option<Decimal>,
    },

    /// A malformed input line, kept verbatim.
    Ignored(&'a str),
}

impl<'a> OutputLine<'a> {
    /// Charge the full price with no discount.
    pub fn full_price(shipment: Shipment<'a>, price: Decimal) -> Self {
        OutputLine::Charged {
            shipment,
            price: round_currency(price),
            discount: None,
        }
    }

    /// Charge a discounted price.
    pub fn discounted(shipment: Shipment<'a>, price: Decimal, discount: Decimal) -> Self {
        OutputLine::Charged {
            shipment,
            price: round_currency(price),
            discount: Some(round_currency(discount)),
        }
    }

    /// Mark a raw line as ignored.
    pub fn ignored(line: &'a str) -> Self {
        OutputLine::Ignored(line)
    }

    /// Whether this line carries a discount.
    pub fn is_discounted(&self) -> bool {
        matches!(
            self,
            OutputLine::Charged {
                discount: Some(_),
                ..
            }
        )
    }
}

impl fmt::Display for OutputLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputLine::Charged {
                shipment,
                price,
                discount,
            } => {
                write!(
                    f,
                    "{} {} {} {price:.2} ",
                    shipment.date.strftime("%Y-%m-%d"),
                    shipment.size,
                    shipment.provider,
                )?;

                match discount {
                    Some(discount) => write!(f, "{discount:.2}"),
                    None => f.write_str("-"),
                }
            }
            OutputLine::Ignored(line) => write!(f, "{line} Ignored"),
        }
    }
}
