//! Shipments
//!
//! One delivery record per input line: `YYYY-MM-DD SIZE PROVIDER`.

use jiff::civil::Date;
use smallvec::SmallVec;

/// A well-formed shipment record, borrowing its tags from the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shipment<'a> {
    /// Date the package was shipped
    pub date: Date,

    /// Package size code
    pub size: &'a str,

    /// Provider code
    pub provider: &'a str,
}

impl<'a> Shipment<'a> {
    /// Create a new shipment.
    pub fn new(date: Date, size: &'a str, provider: &'a str) -> Self {
        Self {
            date,
            size,
            provider,
        }
    }

    /// Parse a raw input line.
    ///
    /// Returns `None` unless the line holds exactly three whitespace separated
    /// tokens and the first one is a valid ISO calendar date.
    pub fn parse(line: &'a str) -> Option<Self> {
        let tokens: SmallVec<[&'a str; 3]> = line.split_whitespace().collect();

        let [date, size, provider] = *tokens.as_slice() else {
            return None;
        };

        Some(Self::new(parse_date(date)?, size, provider))
    }

    /// Calendar month, 1 through 12.
    pub fn month(&self) -> i8 {
        self.date.month()
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// Signed or expanded years, compact dates and trailing times are rejected.
fn parse_date(token: &str) -> Option<Date> {
    let bytes = token.as_bytes();

    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        });

    if !well_shaped {
        return None;
    }

    Date::strptime("%Y-%m-%d", token).ok()
}
