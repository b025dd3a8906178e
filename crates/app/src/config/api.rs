//! API connection flags

use std::time::Duration;

use clap::Args;

use crate::saleor::SaleorConfig;

/// Saleor API settings.
#[derive(Debug, Args)]
pub struct SaleorArgs {
    /// GraphQL endpoint URL
    #[arg(long, env = "SALEOR_API_URL")]
    pub api_url: String,

    /// Bearer token for the API
    #[arg(long, env = "SALEOR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "SALEOR_TIMEOUT_SECONDS", default_value_t = 30_u64)]
    pub timeout_seconds: u64,
}

impl From<SaleorArgs> for SaleorConfig {
    fn from(args: SaleorArgs) -> Self {
        Self {
            api_url: args.api_url,
            token: args.token,
            timeout: Duration::from_secs(args.timeout_seconds),
        }
    }
}
