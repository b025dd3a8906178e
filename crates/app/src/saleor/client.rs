//! Saleor GraphQL client for voucher mutations.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{Span, debug};

use vouchers::{
    mutations::{
        ChannelListingUpdateResponse, CreatedVoucher, MutationError, VoucherCreateResponse,
    },
    payloads::{VoucherChannelListingUpdate, VoucherInput},
};

use crate::{
    domain::vouchers::{CreateVoucher, UpdateChannelListings},
    saleor::{
        errors::GatewayError,
        mutations::{VOUCHER_CHANNEL_LISTING_UPDATE, VOUCHER_CREATE},
    },
};

/// Configuration for connecting to a Saleor GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct SaleorConfig {
    /// GraphQL endpoint, e.g. `"https://shop.example.com/graphql/"`.
    pub api_url: String,

    /// Staff or app token sent as a bearer token.
    pub token: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// HTTP client for the voucher mutations.
#[derive(Debug, Clone)]
pub struct SaleorClient {
    config: SaleorConfig,
    http: Client,
}

impl SaleorClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: SaleorConfig) -> Result<Self, GatewayError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    async fn execute<V, D>(
        &self,
        operation_name: &'static str,
        query: &'static str,
        variables: &V,
    ) -> Result<Option<D>, GatewayError>
    where
        V: Serialize + Sync,
        D: DeserializeOwned,
    {
        let body = serde_json::json!({
            "operationName": operation_name,
            "query": query,
            "variables": variables,
        });

        let mut request = self.http.post(&self.config.api_url).json(&body);

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GatewayError::UnexpectedResponse(format!(
                "{operation_name} request failed with status {status}: {text}"
            )));
        }

        let parsed: GraphQlResponse<D> = response.json().await?;

        parsed.into_data()
    }
}

#[async_trait]
impl CreateVoucher for SaleorClient {
    #[tracing::instrument(
        name = "saleor.client.voucher_create",
        skip(self, input),
        fields(
            code_count = input.add_codes.len(),
            error_count = tracing::field::Empty
        ),
        err
    )]
    async fn create_voucher(
        &self,
        input: VoucherInput,
    ) -> Result<VoucherCreateResponse, GatewayError> {
        let data: Option<VoucherCreateData> = self
            .execute(
                "VoucherCreate",
                VOUCHER_CREATE,
                &serde_json::json!({ "input": input }),
            )
            .await?;

        let response = VoucherCreateData::into_response(data);

        Span::current().record(
            "error_count",
            tracing::field::display(response.errors.len()),
        );

        debug!(voucher_id = ?response.voucher_id(), "voucherCreate completed");

        Ok(response)
    }
}

#[async_trait]
impl UpdateChannelListings for SaleorClient {
    #[tracing::instrument(
        name = "saleor.client.voucher_channel_listing_update",
        skip(self, update),
        fields(
            voucher_id = %update.id,
            channel_count = update.input.add_channels.len(),
            error_count = tracing::field::Empty
        ),
        err
    )]
    async fn update_channel_listings(
        &self,
        update: VoucherChannelListingUpdate,
    ) -> Result<ChannelListingUpdateResponse, GatewayError> {
        let data: Option<VoucherChannelListingUpdateData> = self
            .execute(
                "VoucherChannelListingUpdate",
                VOUCHER_CHANNEL_LISTING_UPDATE,
                &update,
            )
            .await?;

        let response = VoucherChannelListingUpdateData::into_response(data);

        Span::current().record(
            "error_count",
            tracing::field::display(response.errors.len()),
        );

        Ok(response)
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<D> {
    data: Option<D>,

    #[serde(default)]
    errors: Vec<GraphQlError>,
}

impl<D> GraphQlResponse<D> {
    /// Top-level errors fail the request. A null `data` is passed on as `None`.
    fn into_data(self) -> Result<Option<D>, GatewayError> {
        if !self.errors.is_empty() {
            return Err(GatewayError::GraphQl(
                self.errors.into_iter().map(|error| error.message).collect(),
            ));
        }

        Ok(self.data)
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VoucherCreateData {
    voucher_create: Option<VoucherCreatePayload>,
}

#[derive(Debug, Deserialize)]
struct VoucherCreatePayload {
    #[serde(default)]
    errors: Vec<MutationError>,

    #[serde(default)]
    voucher: Option<CreatedVoucher>,
}

impl VoucherCreateData {
    /// A null payload carries no errors and no voucher.
    fn into_response(data: Option<Self>) -> VoucherCreateResponse {
        let Some(payload) = data.and_then(|data| data.voucher_create) else {
            return VoucherCreateResponse::default();
        };

        VoucherCreateResponse {
            data: Some(vouchers::mutations::VoucherCreateData {
                voucher: payload.voucher,
            }),
            errors: payload.errors,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VoucherChannelListingUpdateData {
    voucher_channel_listing_update: Option<VoucherChannelListingUpdatePayload>,
}

#[derive(Debug, Deserialize)]
struct VoucherChannelListingUpdatePayload {
    #[serde(default)]
    errors: Vec<MutationError>,
}

impl VoucherChannelListingUpdateData {
    fn into_response(data: Option<Self>) -> ChannelListingUpdateResponse {
        data.and_then(|data| data.voucher_channel_listing_update)
            .map_or_else(ChannelListingUpdateResponse::default, |payload| {
                ChannelListingUpdateResponse {
                    errors: payload.errors,
                }
            })
    }
}
