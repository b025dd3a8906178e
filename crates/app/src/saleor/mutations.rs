//! GraphQL documents.

pub(crate) const VOUCHER_CREATE: &str = "\
mutation VoucherCreate($input: VoucherInput!) {
  voucherCreate(input: $input) {
    errors {
      field
      code
      message
    }
    voucher {
      id
    }
  }
}";

pub(crate) const VOUCHER_CHANNEL_LISTING_UPDATE: &str = "\
mutation VoucherChannelListingUpdate($id: ID!, $input: VoucherChannelListingInput!) {
  voucherChannelListingUpdate(id: $id, input: $input) {
    errors {
      field
      code
      message
    }
  }
}";
