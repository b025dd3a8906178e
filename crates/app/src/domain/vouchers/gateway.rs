//! Remote voucher operations

use async_trait::async_trait;
use mockall::automock;

use vouchers::{
    mutations::{ChannelListingUpdateResponse, VoucherCreateResponse},
    payloads::{VoucherChannelListingUpdate, VoucherInput},
};

use crate::saleor::GatewayError;

/// Runs the `voucherCreate` mutation.
#[automock]
#[async_trait]
pub trait CreateVoucher: Send + Sync {
    /// Creates a voucher from the given input.
    ///
    /// Field errors come back inside the response; `Err` means the call
    /// itself failed.
    async fn create_voucher(
        &self,
        input: VoucherInput,
    ) -> Result<VoucherCreateResponse, GatewayError>;
}

/// Runs the `voucherChannelListingUpdate` mutation.
#[automock]
#[async_trait]
pub trait UpdateChannelListings: Send + Sync {
    /// Attaches channel listings to an existing voucher.
    async fn update_channel_listings(
        &self,
        update: VoucherChannelListingUpdate,
    ) -> Result<ChannelListingUpdateResponse, GatewayError>;
}
