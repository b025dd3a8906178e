//! Voucher Form

use std::{fs, path::Path};

use jiff::civil::{Date, Time};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Form Loading Errors
#[derive(Debug, Error)]
pub enum FormError {
    /// IO error reading the form file
    #[error("Failed to read form file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is neither YAML nor JSON
    #[error("Unsupported form format: {0}")]
    UnsupportedFormat(String),
}

/// Discount type selected on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// Percentage off the order, product or shipping
    ValuePercentage,

    /// Fixed amount off
    ValueFixed,

    /// Free shipping
    Shipping,

    /// Any tag this crate does not know about
    #[serde(other)]
    Other,
}

/// What the voucher applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoucherType {
    /// The whole order
    #[default]
    EntireOrder,

    /// Selected products, collections or categories
    SpecificProduct,

    /// Shipping costs
    Shipping,
}

/// Which minimum requirement gates the voucher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementsPicker {
    /// Minimum order value, configured per channel
    #[serde(rename = "ORDER")]
    Order,

    /// Minimum quantity of items
    #[serde(rename = "ITEM")]
    Item,

    /// No minimum requirement
    #[default]
    #[serde(rename = "NONE")]
    NoRequirement,
}

/// A single voucher code entered on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherCode {
    /// Code as typed by the user
    pub code: String,
}

/// Reference to a product, collection or category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Remote identifier
    pub id: String,
}

/// Reference to a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRef {
    /// ISO 3166-1 alpha-2 code
    pub code: String,
}

/// Per-channel pricing and limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelListing {
    /// Channel identifier
    pub id: String,

    /// Channel display name
    #[serde(default)]
    pub name: String,

    /// Channel currency code
    #[serde(default)]
    pub currency: String,

    /// Discount value in this channel
    #[serde(default)]
    pub discount_value: Decimal,

    /// Minimum order value in this channel
    #[serde(default)]
    pub min_spent: Decimal,
}

/// Voucher create form data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "independent form checkboxes."
)]
pub struct VoucherForm {
    /// Voucher name
    pub name: String,

    /// Limit to one use per customer
    pub apply_once_per_customer: bool,

    /// Apply only once per order
    pub apply_once_per_order: bool,

    /// Restrict to staff members
    pub only_for_staff: bool,

    /// Each code can be used once
    pub single_use: bool,

    /// Whether `end_date`/`end_time` are set
    pub has_end_date: bool,

    /// Whether `usage_limit` is set
    pub has_usage_limit: bool,

    /// Codes in the order they were entered
    pub codes: Vec<VoucherCode>,

    /// Discount type tag; unset when the user never picked one
    pub discount_type: Option<DiscountType>,

    /// Voucher type
    #[serde(rename = "type")]
    pub voucher_type: VoucherType,

    /// Start date
    pub start_date: Option<Date>,

    /// Start time
    pub start_time: Option<Time>,

    /// End date
    pub end_date: Option<Date>,

    /// End time
    pub end_time: Option<Time>,

    /// Minimum requirement mode
    pub requirements_picker: RequirementsPicker,

    /// Raw minimum quantity input, used under [`RequirementsPicker::Item`]
    pub min_checkout_items_quantity: String,

    /// Total usage limit
    pub usage_limit: u32,

    /// Assigned products
    pub products: Vec<EntityRef>,

    /// Assigned collections
    pub collections: Vec<EntityRef>,

    /// Assigned categories
    pub categories: Vec<EntityRef>,

    /// Countries the voucher is limited to
    pub countries: Vec<CountryRef>,

    /// Per-channel configuration
    pub channel_listings: Vec<ChannelListing>,
}

impl VoucherForm {
    /// Parse a form from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid form.
    pub fn from_yaml_str(input: &str) -> Result<Self, FormError> {
        Ok(serde_norway::from_str(input)?)
    }

    /// Parse a form from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid form.
    pub fn from_json_str(input: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a form from a `.yml`, `.yaml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown extension,
    /// or does not contain a valid form.
    pub fn from_path(path: &Path) -> Result<Self, FormError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yml" | "yaml") => Self::from_yaml_str(&fs::read_to_string(path)?),
            Some("json") => Self::from_json_str(&fs::read_to_string(path)?),
            _ => Err(FormError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
