use std::future::Future;

use landing_models::contact::{ContactSubmission, SubmissionMetadata};
use thiserror::Error;

pub mod notification;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validates a contact form submission and, if it is valid, logs it and
    /// forwards it to the configured webhook.
    ///
    /// Delivery to the webhook happens in the background and never causes
    /// this method to fail.
    fn submit(
        &self,
        submission: ContactSubmission,
        metadata: SubmissionMetadata,
    ) -> impl Future<Output = Result<(), ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    /// The submission failed one or more checks. The errors are ordered by
    /// field: name, email, company, description.
    #[error("The submission is invalid.")]
    Invalid(Vec<ContactValidationError>),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A failed check of a single field. The display representation is the
/// message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("Jméno je povinné")]
    NameRequired,
    #[error("Email je povinný")]
    EmailRequired,
    #[error("Email není validní")]
    EmailInvalid,
    #[error("Společnost je povinná")]
    CompanyRequired,
    #[error("Popis je povinný")]
    DescriptionRequired,
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        submission: ContactSubmission,
        metadata: SubmissionMetadata,
        result: Result<(), ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(
                mockall::predicate::eq(submission),
                mockall::predicate::eq(metadata),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
