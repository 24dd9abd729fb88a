//! CLI argument definitions for `Streakboard`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use logger::Level;
use streakboard::config::ConfigOverrides;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to
/// lowercase strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Today's outcome as passed on the command line
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutcomeArg {
    /// The goal was achieved today
    Done,
    /// The goal was missed today
    Missed,
}

impl OutcomeArg {
    /// Whether this outcome counts as a success
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Done)
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `url`, `table`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show the dashboard: streaks, monthly success rate, and calendar.
    ///
    /// Loads the record snapshot from the configured store and prints the
    /// computed statistics. Prompts to register today's outcome when it has
    /// not been recorded yet.
    Status,
    /// Register today's outcome.
    ///
    /// Writes (or overwrites) today's record in the store, then reloads and
    /// prints the refreshed statistics.
    Log {
        /// Today's outcome
        #[arg(value_enum, value_name = "OUTCOME")]
        outcome: OutcomeArg,
    },
    /// Generate a monthly streak report.
    ///
    /// Renders the month's calendar and statistics to a file.
    Report {
        /// Output file path (optional; defaults to the reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "markdown")]
        format: String,

        /// Month to report as YYYY-MM (defaults to the current month)
        #[arg(long, value_name = "MONTH")]
        month: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "streakboard",
    about = "Streakboard command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config store url
    #[arg(long = "config-store-url", value_name = "URL")]
    pub config_store_url: Option<String>,

    /// Override config store url (short form)
    #[arg(long = "store-url", value_name = "URL")]
    pub store_url: Option<String>,

    /// Override config store key
    #[arg(long = "config-store-key", value_name = "KEY")]
    pub config_store_key: Option<String>,

    /// Override config store key (short form)
    #[arg(long = "store-key", value_name = "KEY")]
    pub store_key: Option<String>,

    /// Override config record table name
    #[arg(long = "table", value_name = "TABLE")]
    pub table: Option<String>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--store-url`) take precedence over long-form
    /// flags (e.g., `--config-store-url`) when both are provided.
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None`
    /// means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            store_url: self
                .store_url
                .clone()
                .or_else(|| self.config_store_url.clone()),
            store_key: self
                .store_key
                .clone()
                .or_else(|| self.config_store_key.clone()),
            store_table: self.table.clone(),
            reports_dir: self
                .reports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .or_else(|| {
                    self.config_reports_dir
                        .as_ref()
                        .map(|p| p.to_string_lossy().to_string())
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            config_store_url: None,
            store_url: None,
            config_store_key: None,
            store_key: None,
            table: None,
            config_reports_dir: None,
            reports_dir: None,
            command: Command::Config { subcommand: None },
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_outcome_arg_success_mapping() {
        assert!(OutcomeArg::Done.is_success());
        assert!(!OutcomeArg::Missed.is_success());
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare_cli().to_config_overrides();

        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.store_url.is_none());
        assert!(overrides.store_key.is_none());
        assert!(overrides.store_table.is_none());
        assert!(overrides.reports_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli {
            config_level: Some(LogLevelArg::Debug),
            config_log_file: Some(PathBuf::from("/tmp/test.log")),
            config_verbose: Some(true),
            store_url: Some("https://db.example.com".to_string()),
            store_key: Some("anon-key".to_string()),
            table: Some("habit_days".to_string()),
            reports_dir: Some(PathBuf::from("/reports")),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(
            overrides.store_url,
            Some("https://db.example.com".to_string())
        );
        assert_eq!(overrides.store_key, Some("anon-key".to_string()));
        assert_eq!(overrides.store_table, Some("habit_days".to_string()));
        assert_eq!(overrides.reports_dir, Some("/reports".to_string()));
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let cli = Cli {
            config_store_url: Some("https://long.example.com".to_string()),
            store_url: Some("https://short.example.com".to_string()),
            config_store_key: Some("long-key".to_string()),
            store_key: Some("short-key".to_string()),
            config_reports_dir: Some(PathBuf::from("/long/reports")),
            reports_dir: Some(PathBuf::from("/short/reports")),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(
            overrides.store_url,
            Some("https://short.example.com".to_string())
        );
        assert_eq!(overrides.store_key, Some("short-key".to_string()));
        assert_eq!(overrides.reports_dir, Some("/short/reports".to_string()));
    }

    #[test]
    fn test_long_form_when_short_form_absent() {
        let cli = Cli {
            config_store_url: Some("https://long.example.com".to_string()),
            config_store_key: Some("long-key".to_string()),
            config_reports_dir: Some(PathBuf::from("/long/reports")),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(
            overrides.store_url,
            Some("https://long.example.com".to_string())
        );
        assert_eq!(overrides.store_key, Some("long-key".to_string()));
        assert_eq!(overrides.reports_dir, Some("/long/reports".to_string()));
    }
}
