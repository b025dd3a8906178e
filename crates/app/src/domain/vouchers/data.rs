//! Voucher Create Results

use serde::{Deserialize, Serialize};

/// Outcome of a voucher create submission.
///
/// Serialises as `{"id": ...}` or `{"errors": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AggregateResult {
    /// The voucher exists and its channel listings were saved.
    Created { id: String },

    /// A step failed. The voucher may still exist if only its channel update did.
    Failed { errors: Vec<String> },
}

impl AggregateResult {
    /// The created voucher id, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Created { id } => Some(id.as_str()),
            Self::Failed { .. } => None,
        }
    }

    /// Error messages; empty on success.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Created { .. } => &[],
            Self::Failed { errors } => errors,
        }
    }
}
