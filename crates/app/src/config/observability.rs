//! Logging flags

use clap::Args;

/// How log lines are rendered on stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// One short line per event, for terminals.
    Compact,

    /// One JSON object per event, for log shippers.
    Json,
}

/// Logging flags, accepted before or after the subcommand.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Filter directives, e.g. `info` or `vouchers_app=debug,reqwest=warn`
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log line format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}
