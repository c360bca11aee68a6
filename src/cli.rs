//! Command Line Interface

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::{
    app::{self, RunError},
    config::Configuration,
    diagnostics::DiagnosticsConfig,
    io::{FileSink, FileSource},
};

/// Applies monthly shipment discounts to a file of delivery records.
#[derive(Debug, Parser)]
#[command(name = "shipment-discounts", version, about, long_about = None)]
pub struct Cli {
    /// Input file name, resolved against the configured input directory
    #[arg(default_value = "input.txt")]
    pub input: PathBuf,

    /// Configuration file (JSON or YAML)
    #[arg(
        short,
        long,
        env = "SHIPMENT_CONFIG",
        default_value = "appsettings.json"
    )]
    pub config: PathBuf,

    /// Output file; defaults to `output.txt` in the configured result directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File receiving informational log lines
    #[arg(long, env = "SHIPMENT_INFO_LOG", default_value = "logInfo.txt")]
    pub info_log: PathBuf,

    /// File receiving error log lines
    #[arg(long, env = "SHIPMENT_ERROR_LOG", default_value = "logError.txt")]
    pub error_log: PathBuf,

    /// Console log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Diagnostics settings for this invocation.
    pub fn diagnostics(&self) -> DiagnosticsConfig {
        DiagnosticsConfig {
            info_log: self.info_log.clone(),
            error_log: self.error_log.clone(),
            console_level: Some(self.log_level.clone()),
        }
    }

    /// Load configuration, then process the input file into the output file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input or output fails.
    pub fn run(&self) -> Result<Vec<String>, RunError> {
        let config = Configuration::from_path(&self.config)?;

        let source = FileSource::new(config.input_path(&self.input));
        let sink = FileSink::new(
            self.output
                .clone()
                .unwrap_or_else(|| config.output_path()),
        );

        info!(
            config = %self.config.display(),
            input = %source.path().display(),
            output = %sink.path().display(),
            "running discount calculation"
        );

        app::run(&config, config.build_rules(), &source, &sink)
    }
}
