//! Configuration
//!
//! Loads the price table, seed state, directories and rule order from a JSON
//! (`.json`) or YAML (`.yml`, `.yaml`) file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    prices::{PriceEntry, PriceTable},
    rules::{Rule, RuleConfig},
    state::SeedState,
};

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        /// Path that could not be read
        path: PathBuf,

        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// File extension not recognised as JSON or YAML
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Configuration {
    /// Seed values for the monthly state
    #[serde(rename = "InitialData")]
    pub initial_data: SeedState,

    /// Price table entries
    #[serde(rename = "Prices")]
    pub prices: Vec<PriceEntry>,

    /// Directory input file names are resolved against
    #[serde(rename = "InputDirectory", default = "current_directory")]
    pub input_directory: PathBuf,

    /// Directory the output file is written to
    #[serde(rename = "ResultDirectory", default = "current_directory")]
    pub result_directory: PathBuf,

    /// Rules in evaluation order; empty means the default rule set
    #[serde(rename = "Rules", default)]
    pub rules: Vec<RuleConfig>,
}

fn current_directory() -> PathBuf {
    PathBuf::from(".")
}

/// Supported configuration encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON
    Json,

    /// YAML
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(ConfigFormat::Json),
            Some("yml" | "yaml") => Ok(ConfigFormat::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl Configuration {
    /// Load configuration from a file, picking the decoder by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension, or does not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_str_as(&contents, format)
    }

    /// Parse configuration text in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse.
    pub fn from_str_as(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let configuration = match format {
            ConfigFormat::Json => serde_json::from_str(contents)?,
            ConfigFormat::Yaml => serde_norway::from_str(contents)?,
        };

        Ok(configuration)
    }

    /// Build the price table.
    pub fn price_table(&self) -> PriceTable {
        PriceTable::new(self.prices.clone())
    }

    /// Build the configured rules, or the default set when none are configured.
    pub fn build_rules(&self) -> Vec<Rule<'static>> {
        let configs = if self.rules.is_empty() {
            RuleConfig::defaults()
        } else {
            self.rules.clone()
        };

        configs.into_iter().map(RuleConfig::into_rule).collect()
    }

    /// Full path of an input file.
    pub fn input_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.input_directory.join(file_name)
    }

    /// Full path of the output file.
    pub fn output_path(&self) -> PathBuf {
        self.result_directory.join("output.txt")
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    const JSON: &str = r#"{
        "InitialData": { "monthlyDiscount": 10.00, "counter": 0, "currentMonth": -1 },
        "Prices": [
            { "provider": "LP", "size": "S", "priceValue": 1.50 },
            { "provider": "MR", "size": "S", "priceValue": 2.00 }
        ],
        "InputDirectory": "InputFiles",
        "ResultDirectory": "ResultFiles"
    }"#;

    #[test]
    fn parses_appsettings_json() -> TestResult {
        let config = Configuration::from_str_as(JSON, ConfigFormat::Json)?;

        assert_eq!(config.initial_data, SeedState::new(dec!(10), 0, -1));
        assert_eq!(config.prices.len(), 2);
        assert_eq!(config.input_path("input.txt"), PathBuf::from("InputFiles/input.txt"));
        assert_eq!(config.output_path(), PathBuf::from("ResultFiles/output.txt"));
        assert!(config.rules.is_empty());

        Ok(())
    }

    #[test]
    fn missing_directories_default_to_current() -> TestResult {
        let config = Configuration::from_str_as(
            r#"{"InitialData": {"monthlyDiscount": 5, "counter": 0, "currentMonth": 1}, "Prices": []}"#,
            ConfigFormat::Json,
        )?;

        assert_eq!(config.output_path(), PathBuf::from("./output.txt"));

        Ok(())
    }

    #[test]
    fn default_rules_when_none_configured() -> TestResult {
        let config = Configuration::from_str_as(JSON, ConfigFormat::Json)?;
        let rules = config.build_rules();
        let names: Vec<&str> = rules.iter().map(|rule| rule.name()).collect();

        assert_eq!(names, ["periodic waiver", "cheapest provider"]);

        Ok(())
    }

    #[test]
    fn configured_rules_keep_their_order() -> TestResult {
        let yaml = r"
InitialData:
  monthlyDiscount: 10
  counter: 0
  currentMonth: -1
Prices:
  - { provider: LP, size: S, priceValue: 1.50 }
Rules:
  - type: cheapest_provider
    size: S
  - type: periodic_waiver
    size: M
    provider: MR
    every: 2
";
        let config = Configuration::from_str_as(yaml, ConfigFormat::Yaml)?;
        let rules = config.build_rules();
        let names: Vec<&str> = rules.iter().map(|rule| rule.name()).collect();

        assert_eq!(names, ["cheapest provider", "periodic waiver"]);

        Ok(())
    }

    #[test]
    fn detects_format_from_extension() -> TestResult {
        assert_eq!(ConfigFormat::from_path(Path::new("appsettings.json"))?, ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("settings.YAML"))?, ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("settings.yml"))?, ConfigFormat::Yaml);

        assert!(matches!(
            ConfigFormat::from_path(Path::new("settings.toml")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            ConfigFormat::from_path(Path::new("settings")),
            Err(ConfigError::UnsupportedFormat(_))
        ));

        Ok(())
    }

    #[test]
    fn invalid_json_is_an_error() {
        let result = Configuration::from_str_as("{ not json", ConfigFormat::Json);

        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Configuration::from_path("does/not/exist.json");

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
