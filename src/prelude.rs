//! Vouchers prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    datetime::join_date_time,
    form::{
        ChannelListing, CountryRef, DiscountType, EntityRef, FormError, RequirementsPicker,
        VoucherCode, VoucherForm, VoucherType,
    },
    mutations::{
        ChannelListingUpdateResponse, CreatedVoucher, MutationError, MutationResult,
        VoucherCreateData, VoucherCreateResponse, extract_errors,
    },
    payloads::{
        DiscountValueType, VoucherChannelListingAddInput, VoucherChannelListingInput,
        VoucherChannelListingUpdate, VoucherInput,
    },
};
