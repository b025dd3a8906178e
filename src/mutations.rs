//! Mutation Results
//!
//! Shapes returned by the voucher mutations, and [`extract_errors`] which
//! flattens their field errors into displayable messages.

use serde::{Deserialize, Serialize};

/// A field-level error reported by a mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationError {
    /// Input field the error refers to
    #[serde(default)]
    pub field: Option<String>,

    /// Machine readable error code
    #[serde(default)]
    pub code: Option<String>,

    /// Human readable message
    #[serde(default)]
    pub message: Option<String>,
}

impl MutationError {
    /// Error carrying only a message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Text shown to the user for this error.
    pub fn to_message(&self) -> String {
        match (&self.message, &self.code, &self.field) {
            (Some(message), _, _) => message.clone(),
            (None, Some(code), _) => code.clone(),
            (None, None, Some(field)) => format!("{field}: invalid value"),
            (None, None, None) => "Unknown error".to_string(),
        }
    }
}

/// Result of any mutation reporting field errors.
pub trait MutationResult {
    /// Field errors, in the order the API reported them.
    fn mutation_errors(&self) -> &[MutationError];
}

/// Flatten the field errors of a mutation result into messages.
///
/// An absent result yields no messages; callers decide what absence means.
pub fn extract_errors<R: MutationResult>(result: Option<&R>) -> Vec<String> {
    result
        .map(|result| {
            result
                .mutation_errors()
                .iter()
                .map(MutationError::to_message)
                .collect()
        })
        .unwrap_or_default()
}

/// Voucher returned by `voucherCreate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedVoucher {
    /// Voucher identifier
    pub id: String,
}

/// Data section of a `voucherCreate` result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherCreateData {
    /// Created voucher, absent when creation failed
    #[serde(default)]
    pub voucher: Option<CreatedVoucher>,
}

/// `voucherCreate` result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherCreateResponse {
    /// Result data
    #[serde(default)]
    pub data: Option<VoucherCreateData>,

    /// Field errors
    #[serde(default)]
    pub errors: Vec<MutationError>,
}

impl VoucherCreateResponse {
    /// Successful result for voucher `id`.
    pub fn created(id: impl Into<String>) -> Self {
        Self {
            data: Some(VoucherCreateData {
                voucher: Some(CreatedVoucher { id: id.into() }),
            }),
            errors: Vec::new(),
        }
    }

    /// Failed result carrying `errors`.
    pub fn failed(errors: Vec<MutationError>) -> Self {
        Self { data: None, errors }
    }

    /// Identifier of the created voucher, if one was returned and is non-empty.
    pub fn voucher_id(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.voucher.as_ref())
            .map(|voucher| voucher.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

impl MutationResult for VoucherCreateResponse {
    fn mutation_errors(&self) -> &[MutationError] {
        &self.errors
    }
}

/// `voucherChannelListingUpdate` result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelListingUpdateResponse {
    /// Field errors
    #[serde(default)]
    pub errors: Vec<MutationError>,
}

impl MutationResult for ChannelListingUpdateResponse {
    fn mutation_errors(&self) -> &[MutationError] {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_result_has_no_errors() {
        assert!(extract_errors::<VoucherCreateResponse>(None).is_empty());
    }

    #[test]
    fn messages_keep_reported_order() {
        let response = ChannelListingUpdateResponse {
            errors: vec![
                MutationError::with_message("bad price"),
                MutationError::with_message("unknown channel"),
            ],
        };

        assert_eq!(
            extract_errors(Some(&response)),
            vec!["bad price".to_string(), "unknown channel".to_string()]
        );
    }

    #[test]
    fn message_falls_back_to_code_then_field() {
        let errors = [
            MutationError {
                code: Some("REQUIRED".to_string()),
                field: Some("name".to_string()),
                message: None,
            },
            MutationError {
                field: Some("endDate".to_string()),
                ..MutationError::default()
            },
            MutationError::default(),
        ];

        let messages: Vec<String> = errors.iter().map(MutationError::to_message).collect();

        assert_eq!(
            messages,
            vec![
                "REQUIRED".to_string(),
                "endDate: invalid value".to_string(),
                "Unknown error".to_string(),
            ]
        );
    }

    #[test]
    fn empty_voucher_id_is_treated_as_missing() {
        assert_eq!(VoucherCreateResponse::created("").voucher_id(), None);
        assert_eq!(VoucherCreateResponse::created("V1").voucher_id(), Some("V1"));
    }
}
