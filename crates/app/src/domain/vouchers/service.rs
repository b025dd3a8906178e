//! Voucher Create Handler

use std::{fmt, sync::Arc};

use tracing::{Span, info, warn};

use vouchers::{
    form::VoucherForm,
    mutations::extract_errors,
    payloads::{VoucherChannelListingUpdate, VoucherInput},
};

use crate::{
    domain::vouchers::{AggregateResult, CreateVoucher, UpdateChannelListings},
    saleor::GatewayError,
};

const INVALID_DATA: &str = "Invalid data";
const MISSING_VOUCHER: &str = "Could not update channels";

/// Pre-flight check run before any remote call.
pub type FormValidator = Arc<dyn Fn(&VoucherForm) -> bool + Send + Sync>;

/// Build a [`VoucherCreateHandler`] from its two remote operations and a
/// validator.
pub fn create_handler<F>(
    create: Arc<dyn CreateVoucher>,
    update: Arc<dyn UpdateChannelListings>,
    validate: F,
) -> VoucherCreateHandler
where
    F: Fn(&VoucherForm) -> bool + Send + Sync + 'static,
{
    VoucherCreateHandler {
        create,
        update,
        validate: Arc::new(validate),
    }
}

/// Managed failures, one per step that can stop the submission.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CreateFailure {
    Invalid,
    CreateFields(Vec<String>),
    MissingVoucher,
    UpdateFields {
        voucher_id: String,
        errors: Vec<String>,
    },
}

impl CreateFailure {
    fn log(&self) {
        match self {
            Self::Invalid => info!(kind = "validation", "voucher form rejected"),
            Self::CreateFields(errors) => {
                info!(kind = "create_field", error_count = errors.len(), "voucher create rejected");
            }
            Self::MissingVoucher => {
                warn!(kind = "consistency", "voucher create reported no errors but returned no voucher");
            }
            Self::UpdateFields { voucher_id, errors } => {
                warn!(
                    kind = "update_field",
                    %voucher_id,
                    error_count = errors.len(),
                    "channel listing update rejected; created voucher is left in place"
                );
            }
        }
    }

    fn into_errors(self) -> Vec<String> {
        match self {
            Self::Invalid => vec![INVALID_DATA.to_string()],
            Self::MissingVoucher => vec![MISSING_VOUCHER.to_string()],
            Self::CreateFields(errors) | Self::UpdateFields { errors, .. } => errors,
        }
    }
}

type Step<T> = Result<T, CreateFailure>;

/// Creates a voucher, then attaches its channel listings.
///
/// Each step runs only when the previous one succeeded, and every remote call
/// is attempted once. When the listing update fails the voucher created by
/// the first call stays in place, and the caller only sees the update errors.
///
/// Failures of the remote calls themselves are not translated: they are
/// returned as the outer `Err` of [`VoucherCreateHandler::handle`].
#[derive(Clone)]
pub struct VoucherCreateHandler {
    create: Arc<dyn CreateVoucher>,
    update: Arc<dyn UpdateChannelListings>,
    validate: FormValidator,
}

impl fmt::Debug for VoucherCreateHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoucherCreateHandler").finish_non_exhaustive()
    }
}

impl VoucherCreateHandler {
    /// Submit a voucher create form.
    ///
    /// # Errors
    ///
    /// Returns an error when either remote call fails outright. Field errors,
    /// validation failures and a missing voucher are reported through
    /// [`AggregateResult::Failed`] instead.
    #[tracing::instrument(
        name = "vouchers.handler.create",
        skip(self, form),
        fields(
            voucher_name = %form.name,
            code_count = form.codes.len(),
            channel_count = form.channel_listings.len(),
            voucher_id = tracing::field::Empty
        ),
        err
    )]
    pub async fn handle(&self, form: &VoucherForm) -> Result<AggregateResult, GatewayError> {
        let step = self.validate(form);

        let step = match step {
            Ok(()) => self.create_voucher(form).await?,
            Err(failure) => Err(failure),
        };

        let step = match step {
            Ok(voucher_id) => self.update_channels(voucher_id, form).await?,
            Err(failure) => Err(failure),
        };

        Ok(match step {
            Ok(id) => {
                info!(voucher_id = %id, "created voucher");

                AggregateResult::Created { id }
            }
            Err(failure) => {
                failure.log();

                AggregateResult::Failed {
                    errors: failure.into_errors(),
                }
            }
        })
    }

    fn validate(&self, form: &VoucherForm) -> Step<()> {
        if (self.validate)(form) {
            Ok(())
        } else {
            Err(CreateFailure::Invalid)
        }
    }

    async fn create_voucher(&self, form: &VoucherForm) -> Result<Step<String>, GatewayError> {
        let response = self.create.create_voucher(VoucherInput::from(form)).await?;

        let errors = extract_errors(Some(&response));

        if !errors.is_empty() {
            return Ok(Err(CreateFailure::CreateFields(errors)));
        }

        let Some(voucher_id) = response.voucher_id() else {
            return Ok(Err(CreateFailure::MissingVoucher));
        };

        Span::current().record("voucher_id", tracing::field::display(voucher_id));

        Ok(Ok(voucher_id.to_string()))
    }

    async fn update_channels(
        &self,
        voucher_id: String,
        form: &VoucherForm,
    ) -> Result<Step<String>, GatewayError> {
        // Creating a voucher starts from no listings, so nothing is removed.
        let update =
            VoucherChannelListingUpdate::new(voucher_id.clone(), form, &form.channel_listings);

        let response = self.update.update_channel_listings(update).await?;

        let errors = extract_errors(Some(&response));

        if errors.is_empty() {
            Ok(Ok(voucher_id))
        } else {
            Ok(Err(CreateFailure::UpdateFields { voucher_id, errors }))
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use vouchers::{
        form::{ChannelListing, DiscountType, VoucherCode},
        mutations::{ChannelListingUpdateResponse, MutationError, VoucherCreateResponse},
    };

    use crate::domain::vouchers::{MockCreateVoucher, MockUpdateChannelListings};

    use super::*;

    fn make_form() -> VoucherForm {
        VoucherForm {
            name: "Spring Sale".to_string(),
            codes: ["A", "B", "C"]
                .into_iter()
                .map(|code| VoucherCode {
                    code: code.to_string(),
                })
                .collect(),
            discount_type: Some(DiscountType::ValueFixed),
            channel_listings: vec![ChannelListing {
                id: "Q2hhbm5lbDox".to_string(),
                name: "Default".to_string(),
                currency: "USD".to_string(),
                discount_value: Decimal::from(10),
                min_spent: Decimal::ZERO,
            }],
            ..VoucherForm::default()
        }
    }

    fn make_handler(
        create: MockCreateVoucher,
        update: MockUpdateChannelListings,
        valid: bool,
    ) -> VoucherCreateHandler {
        create_handler(Arc::new(create), Arc::new(update), move |_| valid)
    }

    fn update_ok() -> Result<ChannelListingUpdateResponse, GatewayError> {
        Ok(ChannelListingUpdateResponse::default())
    }

    #[tokio::test]
    async fn invalid_form_makes_no_remote_calls() -> TestResult {
        let mut create = MockCreateVoucher::new();
        let mut update = MockUpdateChannelListings::new();

        create.expect_create_voucher().never();
        update.expect_update_channel_listings().never();

        let result = make_handler(create, update, false)
            .handle(&make_form())
            .await?;

        assert_eq!(
            result,
            AggregateResult::Failed {
                errors: vec!["Invalid data".to_string()]
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_errors_skip_channel_update() -> TestResult {
        let mut create = MockCreateVoucher::new();
        let mut update = MockUpdateChannelListings::new();

        create.expect_create_voucher().once().return_once(|_| {
            Ok(VoucherCreateResponse::failed(vec![MutationError {
                field: Some("name".to_string()),
                code: Some("REQUIRED".to_string()),
                message: Some("name required".to_string()),
            }]))
        });

        update.expect_update_channel_listings().never();

        let result = make_handler(create, update, true)
            .handle(&make_form())
            .await?;

        assert_eq!(
            result,
            AggregateResult::Failed {
                errors: vec!["name required".to_string()]
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn created_and_listed_voucher_returns_id() -> TestResult {
        let mut create = MockCreateVoucher::new();
        let mut update = MockUpdateChannelListings::new();

        create
            .expect_create_voucher()
            .once()
            .withf(|input| input.add_codes == ["C", "B", "A"] && input.name == "Spring Sale")
            .return_once(|_| Ok(VoucherCreateResponse::created("V1")));

        update
            .expect_update_channel_listings()
            .once()
            .withf(|update| {
                update.id == "V1"
                    && update.input.add_channels.len() == 1
                    && update.input.remove_channels.is_empty()
            })
            .return_once(|_| update_ok());

        let result = make_handler(create, update, true)
            .handle(&make_form())
            .await?;

        assert_eq!(
            result,
            AggregateResult::Created {
                id: "V1".to_string()
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn channel_update_errors_are_returned_without_id() -> TestResult {
        let mut create = MockCreateVoucher::new();
        let mut update = MockUpdateChannelListings::new();

        create
            .expect_create_voucher()
            .once()
            .return_once(|_| Ok(VoucherCreateResponse::created("V1")));

        update
            .expect_update_channel_listings()
            .once()
            .return_once(|_| {
                Ok(ChannelListingUpdateResponse {
                    errors: vec![MutationError::with_message("bad price")],
                })
            });

        let result = make_handler(create, update, true)
            .handle(&make_form())
            .await?;

        assert_eq!(
            result,
            AggregateResult::Failed {
                errors: vec!["bad price".to_string()]
            }
        );
        assert_eq!(result.id(), None);

        Ok(())
    }

    #[tokio::test]
    async fn missing_voucher_reports_channel_failure() -> TestResult {
        let mut create = MockCreateVoucher::new();
        let mut update = MockUpdateChannelListings::new();

        create
            .expect_create_voucher()
            .once()
            .return_once(|_| Ok(VoucherCreateResponse::default()));

        update.expect_update_channel_listings().never();

        let result = make_handler(create, update, true)
            .handle(&make_form())
            .await?;

        assert_eq!(
            result,
            AggregateResult::Failed {
                errors: vec!["Could not update channels".to_string()]
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn empty_voucher_id_reports_channel_failure() -> TestResult {
        let mut create = MockCreateVoucher::new();
        let mut update = MockUpdateChannelListings::new();

        create
            .expect_create_voucher()
            .once()
            .return_once(|_| Ok(VoucherCreateResponse::created("")));

        update.expect_update_channel_listings().never();

        let result = make_handler(create, update, true)
            .handle(&make_form())
            .await?;

        assert_eq!(result.errors(), ["Could not update channels".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn create_transport_failure_propagates() {
        let mut create = MockCreateVoucher::new();
        let mut update = MockUpdateChannelListings::new();

        create.expect_create_voucher().once().return_once(|_| {
            Err(GatewayError::UnexpectedResponse(
                "connection reset".to_string(),
            ))
        });

        update.expect_update_channel_listings().never();

        let result = make_handler(create, update, true)
            .handle(&make_form())
            .await;

        assert!(
            matches!(result, Err(GatewayError::UnexpectedResponse(_))),
            "expected UnexpectedResponse, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_transport_failure_propagates() {
        let mut create = MockCreateVoucher::new();
        let mut update = MockUpdateChannelListings::new();

        create
            .expect_create_voucher()
            .once()
            .return_once(|_| Ok(VoucherCreateResponse::created("V1")));

        update
            .expect_update_channel_listings()
            .once()
            .return_once(|_| Err(GatewayError::GraphQl(vec!["timeout".to_string()])));

        let result = make_handler(create, update, true)
            .handle(&make_form())
            .await;

        assert!(
            matches!(result, Err(GatewayError::GraphQl(_))),
            "expected GraphQl, got {result:?}"
        );
    }

    #[tokio::test]
    async fn validator_sees_the_submitted_form() -> TestResult {
        let mut create = MockCreateVoucher::new();
        let mut update = MockUpdateChannelListings::new();

        create.expect_create_voucher().never();
        update.expect_update_channel_listings().never();

        let handler = create_handler(Arc::new(create), Arc::new(update), |form| {
            !form.name.is_empty()
        });

        let result = handler.handle(&VoucherForm::default()).await?;

        assert_eq!(result.errors(), ["Invalid data".to_string()]);

        Ok(())
    }

    #[test]
    fn handler_can_be_shared_across_tasks() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}

        assert_send_sync::<VoucherCreateHandler>();
    }
}
