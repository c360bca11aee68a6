//! Application
//!
//! Read all input, process it, then write all output. Nothing is written
//! unless every earlier step succeeded.

use std::time::Instant;

use humanize_duration::{Truncate, prelude::DurationExt};
use thiserror::Error;
use tracing::info;

use crate::{
    config::{ConfigError, Configuration},
    engine::DiscountEngine,
    io::{LineSink, LineSource, LinesError},
    rules::Rule,
};

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input or output failed
    #[error(transparent)]
    Lines(#[from] LinesError),
}

/// Process every line from `source` and hand the result to `sink`.
///
/// Returns the rendered output lines.
///
/// # Errors
///
/// Returns an error if reading or writing lines fails.
pub fn run<S, W>(
    config: &Configuration,
    rules: Vec<Rule<'_>>,
    source: &S,
    sink: &W,
) -> Result<Vec<String>, RunError>
where
    S: LineSource + ?Sized,
    W: LineSink + ?Sized,
{
    let started = Instant::now();

    let input = source.read_lines()?;
    let prices = config.price_table();

    info!(
        lines = input.len(),
        prices = prices.priced_pairs(),
        rules = rules.len(),
        "processing shipments"
    );

    let mut engine = DiscountEngine::new(&prices, config.initial_data, rules);

    let output: Vec<String> = engine
        .process(input.iter().map(String::as_str))
        .iter()
        .map(ToString::to_string)
        .collect();

    sink.write_lines(&output)?;

    info!(
        lines = output.len(),
        elapsed = %started.elapsed().human(Truncate::Nano),
        "shipments processed"
    );

    Ok(output)
}
