//! Diagnostics
//!
//! Informational events are appended to one log file and errors to another,
//! each line stamped with local time. An optional console layer on stderr
//! follows `RUST_LOG`.

use std::{
    fmt,
    fs::{File, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use jiff::Zoned;
use thiserror::Error;
use tracing::{Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::filter_fn,
    fmt::{
        self as subscriber_fmt,
        format::{DefaultFields, Format, Full, Writer},
        time::FormatTime,
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Errors raised while setting up diagnostics.
#[derive(Debug, Error)]
pub enum DiagnosticsError {
    /// A log file could not be opened for appending
    #[error("failed to open log file {path}: {source}")]
    Open {
        /// Log file path
        path: PathBuf,

        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to install the global subscriber
    #[error("failed to initialise tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Where diagnostics go.
#[derive(Debug, Clone)]
pub struct DiagnosticsConfig {
    /// File receiving info and warning events
    pub info_log: PathBuf,

    /// File receiving error events
    pub error_log: PathBuf,

    /// Console filter directive, e.g. `warn` or `shipment_discounts=debug`
    pub console_level: Option<String>,
}

/// `YYYY-MM-DD HH:MM:SS.mmm` in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = Zoned::now();

        write!(
            w,
            "{}.{:03}",
            now.strftime("%Y-%m-%d %H:%M:%S"),
            now.millisecond()
        )
    }
}

fn open_append(path: &Path) -> Result<File, DiagnosticsError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| DiagnosticsError::Open {
            path: path.to_path_buf(),
            source,
        })
}

type FileLayer<S> = subscriber_fmt::Layer<S, DefaultFields, Format<Full, LocalTimestamp>, Mutex<File>>;

fn file_layer<S>(file: File) -> FileLayer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    subscriber_fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_level(false)
        .with_target(false)
        .with_timer(LocalTimestamp)
}

/// Info and error file layers on top of a registry.
pub fn file_subscriber(
    info: File,
    error: File,
) -> impl Subscriber + for<'span> LookupSpan<'span> + Send + Sync {
    tracing_subscriber::registry()
        .with(
            file_layer(info)
                .with_filter(filter_fn(|meta| matches!(*meta.level(), Level::INFO | Level::WARN))),
        )
        .with(file_layer(error).with_filter(filter_fn(|meta| *meta.level() == Level::ERROR)))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if a log file cannot be opened or a global subscriber is
/// already installed.
pub fn init(config: &DiagnosticsConfig) -> Result<(), DiagnosticsError> {
    let info = open_append(&config.info_log)?;
    let error = open_append(&config.error_log)?;

    let console = config.console_level.as_ref().map(|level| {
        subscriber_fmt::layer()
            .with_writer(io::stderr)
            .with_target(true)
            .with_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
            )
    });

    file_subscriber(info, error).with(console).try_init()?;

    Ok(())
}
