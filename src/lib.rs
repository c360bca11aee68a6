//! Shipment Discounts
//!
//! Applies monthly discount rules to shipment records, one record per line.
//!
//! Each line is `YYYY-MM-DD SIZE PROVIDER`. The [`engine::DiscountEngine`]
//! looks up the provider's price, runs the configured [`rules`] in order
//! until one fires, and renders `YYYY-MM-DD SIZE PROVIDER PRICE DISCOUNT`.
//! Malformed lines are passed through with an ` Ignored` marker.

pub mod app;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod io;
pub mod lines;
pub mod prelude;
pub mod prices;
pub mod rules;
pub mod shipments;
pub mod state;
