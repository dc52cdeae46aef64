//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DB_PATH, DEFAULT_HISTORY_LIMIT, DEFAULT_ORIGIN, DEFAULT_USER_AGENT, VENDOR_CALL_TIMEOUT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Engine and CLI configuration.
///
/// Doubles as the clap argument definition for the binary and the
/// configuration struct consumed by the library; construct it
/// programmatically for library usage.
///
/// # Examples
///
/// ```no_run
/// use offer_mix::Config;
///
/// let config = Config {
///     mix_id: 7,
///     fingerprint: Some("fp-3f9a".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "offer_mix",
    about = "Aggregates offers from a mix's vendor integrations and records the execution audit trail"
)]
pub struct Config {
    /// Mix to aggregate offers for
    #[arg(long, default_value_t = 1)]
    pub mix_id: i64,

    /// Visitor fingerprint identifying the stored profile
    #[arg(long, required_unless_present = "history")]
    pub fingerprint: Option<String>,

    /// Origin label recorded on the execution log
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Database path (SQLite file)
    #[arg(long, default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Per-vendor-call timeout in seconds
    #[arg(long, default_value_t = VENDOR_CALL_TIMEOUT.as_secs())]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value for vendor calls
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Webhook URL for best-effort failure alerts (disabled when absent)
    #[arg(long)]
    pub alert_webhook: Option<String>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Print recent execution history instead of running an aggregation
    #[arg(long)]
    pub history: bool,

    /// Number of runs shown by --history
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mix_id: 1,
            fingerprint: None,
            origin: DEFAULT_ORIGIN.to_string(),
            db_path: PathBuf::from(DB_PATH),
            timeout_seconds: VENDOR_CALL_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            alert_webhook: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            history: false,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}
