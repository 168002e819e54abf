//! Runtime configuration shared by the synscan binaries.
//!
//! [`Config`] is a [`clap::Args`] group, so a binary flattens it into its own
//! parser and picks up `--log-filter`, `--log-format`, and `--tab-width`
//! together with their `SYNSCAN_*` environment fallbacks. Precedence is the
//! usual clap order: command line, then environment, then defaults.

mod defaults;
mod logging;

use clap::Args;
use serde::{Deserialize, Serialize};
use synscan::{MAX_TAB_WIDTH, ScanError, ScanOptions, Scanner};
use thiserror::Error;

pub use defaults::{
    DEFAULT_LOG_FILTER, default_log_filter, default_log_filter_string, default_log_format,
    default_tab_width,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Environment variable overriding the log filter.
pub const LOG_FILTER_ENV: &str = "SYNSCAN_LOG_FILTER";

/// Environment variable overriding the log format.
pub const LOG_FORMAT_ENV: &str = "SYNSCAN_LOG_FORMAT";

/// Environment variable overriding the tab width.
pub const TAB_WIDTH_ENV: &str = "SYNSCAN_TAB_WIDTH";

/// Errors raised while validating configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The tab width is not a number.
    #[error("tab width must be a positive integer, got {value:?}")]
    MalformedTabWidth {
        /// The rejected text.
        value: String,
    },

    /// The tab width is outside the range the scanner accepts.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Effective configuration for a binary run.
#[derive(Debug, Clone, PartialEq, Eq, Args, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter directive, e.g. `synscan=debug`.
    #[arg(
        long = "log-filter",
        env = LOG_FILTER_ENV,
        value_name = "FILTER",
        default_value = DEFAULT_LOG_FILTER
    )]
    pub log_filter: String,

    /// Log output format.
    #[arg(
        long = "log-format",
        env = LOG_FORMAT_ENV,
        value_name = "FORMAT",
        default_value_t = LogFormat::default(),
        value_parser = parse_log_format
    )]
    pub log_format: LogFormat,

    /// Columns a tab advances to when measuring Python indentation.
    #[arg(
        long = "tab-width",
        env = TAB_WIDTH_ENV,
        value_name = "COLUMNS",
        default_value_t = synscan::DEFAULT_TAB_WIDTH,
        value_parser = parse_tab_width
    )]
    pub tab_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            tab_width: default_tab_width(),
        }
    }
}

impl Config {
    /// Returns the configured log filter.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the configured log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the scan options this configuration selects.
    #[must_use]
    pub const fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            tab_width: self.tab_width,
        }
    }

    /// Builds a scanner using the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Scan`] when the tab width is out of range,
    /// which can only happen for values that bypassed argument parsing.
    pub fn scanner(&self) -> Result<Scanner, ConfigError> {
        Ok(Scanner::with_options(self.scan_options())?)
    }
}

fn parse_log_format(value: &str) -> Result<LogFormat, LogFormatParseError> {
    value.trim().parse()
}

fn parse_tab_width(value: &str) -> Result<usize, ConfigError> {
    let width = value
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::MalformedTabWidth {
            value: value.to_owned(),
        })?;
    if width == 0 || width > MAX_TAB_WIDTH {
        return Err(ScanError::invalid_tab_width(width, MAX_TAB_WIDTH).into());
    }
    Ok(width)
}
