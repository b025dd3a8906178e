//! Mutation Payloads
//!
//! Maps a [`VoucherForm`] onto the inputs of the two voucher mutations: the
//! `voucherCreate` input, and the channel listing update applied once the
//! voucher exists.

use jiff::civil::DateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    datetime::join_date_time,
    form::{ChannelListing, DiscountType, RequirementsPicker, VoucherForm, VoucherType},
};

/// Discount value type sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountValueType {
    /// Percentage discount
    Percentage,

    /// Fixed amount discount
    Fixed,
}

impl From<Option<DiscountType>> for DiscountValueType {
    fn from(discount_type: Option<DiscountType>) -> Self {
        match discount_type {
            Some(DiscountType::ValuePercentage) => Self::Percentage,
            Some(DiscountType::ValueFixed) => Self::Fixed,
            // Shipping, unknown and unset tags all fall back to percentage.
            Some(DiscountType::Shipping | DiscountType::Other) | None => Self::Percentage,
        }
    }
}

/// `voucherCreate` input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherInput {
    /// Voucher name
    pub name: String,

    /// Limit to one use per customer
    pub apply_once_per_customer: bool,

    /// Apply only once per order
    pub apply_once_per_order: bool,

    /// Restrict to staff members
    pub only_for_staff: bool,

    /// Codes to attach, most recently entered first
    pub add_codes: Vec<String>,

    /// Discount value type
    pub discount_value_type: DiscountValueType,

    /// End of the validity window
    pub end_date: Option<DateTime>,

    /// Minimum number of checkout items; NaN when the raw input did not parse
    pub min_checkout_items_quantity: f64,

    /// Start of the validity window
    pub start_date: Option<DateTime>,

    /// Voucher type
    #[serde(rename = "type")]
    pub voucher_type: VoucherType,

    /// Total usage limit
    pub usage_limit: Option<u32>,

    /// Each code can be used once
    pub single_use: bool,

    /// Product ids
    pub products: Vec<String>,

    /// Collection ids
    pub collections: Vec<String>,

    /// Category ids
    pub categories: Vec<String>,

    /// Country codes
    pub countries: Vec<String>,
}

impl From<&VoucherForm> for VoucherInput {
    fn from(form: &VoucherForm) -> Self {
        Self {
            name: form.name.clone(),
            apply_once_per_customer: form.apply_once_per_customer,
            apply_once_per_order: form.apply_once_per_order,
            only_for_staff: form.only_for_staff,
            add_codes: form.codes.iter().rev().map(|c| c.code.clone()).collect(),
            discount_value_type: form.discount_type.into(),
            end_date: if form.has_end_date {
                join_date_time(form.end_date, form.end_time)
            } else {
                None
            },
            min_checkout_items_quantity: min_checkout_items_quantity(form),
            start_date: join_date_time(form.start_date, form.start_time),
            voucher_type: if form.discount_type == Some(DiscountType::Shipping) {
                VoucherType::Shipping
            } else {
                form.voucher_type
            },
            usage_limit: form.has_usage_limit.then_some(form.usage_limit),
            single_use: form.single_use,
            products: form.products.iter().map(|p| p.id.clone()).collect(),
            collections: form.collections.iter().map(|c| c.id.clone()).collect(),
            categories: form.categories.iter().map(|c| c.id.clone()).collect(),
            countries: form.countries.iter().map(|c| c.code.clone()).collect(),
        }
    }
}

/// Minimum item quantity for the create input.
///
/// Only read under [`RequirementsPicker::Item`]. Unparsable input is not
/// rejected here and comes through as NaN.
fn min_checkout_items_quantity(form: &VoucherForm) -> f64 {
    if form.requirements_picker != RequirementsPicker::Item {
        return 0.0;
    }

    parse_leading_float(&form.min_checkout_items_quantity)
}

/// Reads the longest decimal number at the start of `input`, ignoring
/// leading whitespace and whatever follows it.
///
/// `"5 items"` gives 5 and `"1,000"` gives 1. `Infinity` is the only
/// spelled-out value accepted; anything without a numeric prefix is NaN.
fn parse_leading_float(input: &str) -> f64 {
    let input = input.trim_start();
    let bytes = input.as_bytes();

    let negative = bytes.first() == Some(&b'-');
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if input.get(end..).is_some_and(|rest| rest.starts_with("Infinity")) {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let integer_digits = count_digits(bytes, end);
    end += integer_digits;

    let mut fraction_digits = 0;

    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(bytes, end + 1);

        if fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }

    if integer_digits + fraction_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent_digits = count_digits(bytes, end + 1 + sign);

        if exponent_digits > 0 {
            end += 1 + sign + exponent_digits;
        }
    }

    input
        .get(..end)
        .and_then(|number| number.parse().ok())
        .unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8], start: usize) -> usize {
    bytes
        .iter()
        .skip(start)
        .take_while(|byte| byte.is_ascii_digit())
        .count()
}

/// A channel to attach to the voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherChannelListingAddInput {
    /// Channel identifier
    pub channel_id: String,

    /// Discount value in this channel
    pub discount_value: Decimal,

    /// Minimum order value, `None` when the voucher has no requirement
    pub min_amount_spent: Option<Decimal>,
}

/// Channel listing changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherChannelListingInput {
    /// Channels to add or update
    pub add_channels: Vec<VoucherChannelListingAddInput>,

    /// Channel ids to detach
    pub remove_channels: Vec<String>,
}

/// `voucherChannelListingUpdate` variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoucherChannelListingUpdate {
    /// Voucher identifier
    pub id: String,

    /// Listing changes
    pub input: VoucherChannelListingInput,
}

impl VoucherChannelListingUpdate {
    /// Build the listing update for voucher `id`.
    ///
    /// Every listing on the form is added; listings in `previous` that the
    /// form no longer carries are removed.
    pub fn new(id: impl Into<String>, form: &VoucherForm, previous: &[ChannelListing]) -> Self {
        let add_channels = form
            .channel_listings
            .iter()
            .map(|channel| VoucherChannelListingAddInput {
                channel_id: channel.id.clone(),
                discount_value: if form.discount_type == Some(DiscountType::Shipping) {
                    Decimal::ONE_HUNDRED
                } else {
                    channel.discount_value
                },
                min_amount_spent: match form.requirements_picker {
                    RequirementsPicker::NoRequirement => None,
                    RequirementsPicker::Item => Some(Decimal::ZERO),
                    RequirementsPicker::Order => Some(channel.min_spent),
                },
            })
            .collect();

        let remove_channels = previous
            .iter()
            .filter(|prev| !form.channel_listings.iter().any(|c| c.id == prev.id))
            .map(|prev| prev.id.clone())
            .collect();

        Self {
            id: id.into(),
            input: VoucherChannelListingInput {
                add_channels,
                remove_channels,
            },
        }
    }
}
