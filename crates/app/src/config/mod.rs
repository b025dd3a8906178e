//! CLI configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod api;
mod observability;

pub use api::SaleorArgs;
pub use observability::{LogFormat, LoggingConfig};

#[derive(Debug, Parser)]
#[command(name = "vouchers-app", about = "Voucher CLI", long_about = None)]
pub struct Cli {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a voucher and attach its channel listings
    Create(CreateVoucherArgs),
}

#[derive(Debug, Args)]
pub struct CreateVoucherArgs {
    /// Voucher form file (.yml, .yaml or .json)
    #[arg(long)]
    pub form: PathBuf,

    #[command(flatten)]
    pub saleor: SaleorArgs,
}

impl Cli {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use crate::saleor::SaleorConfig;

    use super::*;

    #[test]
    fn create_command_parses_api_settings() -> TestResult {
        let cli = Cli::try_parse_from([
            "vouchers-app",
            "create",
            "--form",
            "fixtures/forms/summer-sale.yml",
            "--api-url",
            "https://shop.example.com/graphql/",
            "--token",
            "secret",
            "--timeout-seconds",
            "5",
            "--log-format",
            "json",
        ])?;

        let Commands::Create(args) = cli.command;

        assert_eq!(args.form, PathBuf::from("fixtures/forms/summer-sale.yml"));
        assert!(matches!(cli.logging.log_format, LogFormat::Json), "expected json logs");

        let config = SaleorConfig::from(args.saleor);

        assert_eq!(config.api_url, "https://shop.example.com/graphql/");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));

        Ok(())
    }

    #[test]
    fn create_command_requires_a_form() {
        let result = Cli::try_parse_from([
            "vouchers-app",
            "create",
            "--api-url",
            "https://shop.example.com/graphql/",
        ]);

        assert!(result.is_err(), "missing --form should be rejected");
    }
}
