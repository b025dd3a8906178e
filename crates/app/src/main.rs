//! Vouchers Application CLI

use std::{process, sync::Arc};

use tracing::error;

use vouchers::form::VoucherForm;
use vouchers_app::{
    config::{Cli, Commands, CreateVoucherArgs},
    domain::vouchers::{AggregateResult, create_handler},
    logging,
    saleor::SaleorClient,
};

#[tokio::main]
pub async fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = logging::init_subscriber(&cli.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    match run(cli.command).await {
        Ok(AggregateResult::Created { .. }) => {}
        Ok(AggregateResult::Failed { .. }) => process::exit(1),
        Err(message) => {
            error!("{message}");
            eprintln!("{message}");
            process::exit(1);
        }
    }
}

async fn run(command: Commands) -> Result<AggregateResult, String> {
    match command {
        Commands::Create(args) => create_voucher(args).await,
    }
}

async fn create_voucher(args: CreateVoucherArgs) -> Result<AggregateResult, String> {
    let form = VoucherForm::from_path(&args.form)
        .map_err(|error| format!("failed to load voucher form: {error}"))?;

    let client = Arc::new(
        SaleorClient::new(args.saleor.into())
            .map_err(|error| format!("failed to build API client: {error}"))?,
    );

    let handler = create_handler(client.clone(), client, has_required_fields);

    let result = handler
        .handle(&form)
        .await
        .map_err(|error| format!("failed to create voucher: {error}"))?;

    let output = serde_json::to_string_pretty(&result)
        .map_err(|error| format!("failed to encode result: {error}"))?;

    println!("{output}");

    Ok(result)
}

/// A voucher needs a name and at least one channel to be usable.
fn has_required_fields(form: &VoucherForm) -> bool {
    !form.name.trim().is_empty() && !form.channel_listings.is_empty()
}
