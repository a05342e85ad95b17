use landing_core_contact_contracts::{
    notification::ContactNotificationService, ContactFeatureService, ContactSubmitError,
    ContactValidationError,
};
use landing_models::{
    contact::{ContactSubmission, SubmissionMetadata},
    validation::{is_not_empty, is_valid_email},
};

pub mod notification;
pub mod webhook;

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Notification> {
    notification: Notification,
}

impl<Notification> ContactFeatureServiceImpl<Notification> {
    pub fn new(notification: Notification) -> Self {
        Self { notification }
    }
}

impl<Notification> ContactFeatureService for ContactFeatureServiceImpl<Notification>
where
    Notification: ContactNotificationService,
{
    async fn submit(
        &self,
        submission: ContactSubmission,
        metadata: SubmissionMetadata,
    ) -> Result<(), ContactSubmitError> {
        let errors = validate(&submission);
        if !errors.is_empty() {
            return Err(ContactSubmitError::Invalid(errors));
        }

        self.notification.notify(&submission, &metadata);

        Ok(())
    }
}

/// Checks every field of `submission`, in order, and collects all problems.
///
/// The format of the email address is only checked if one was provided.
pub fn validate(submission: &ContactSubmission) -> Vec<ContactValidationError> {
    let mut errors = Vec::new();

    if !is_not_empty(Some(submission.name.as_str())) {
        errors.push(ContactValidationError::NameRequired);
    }

    if !is_not_empty(Some(submission.email.as_str())) {
        errors.push(ContactValidationError::EmailRequired);
    } else if !is_valid_email(&submission.email) {
        errors.push(ContactValidationError::EmailInvalid);
    }

    if !is_not_empty(Some(submission.company.as_str())) {
        errors.push(ContactValidationError::CompanyRequired);
    }

    if !is_not_empty(Some(submission.description.as_str())) {
        errors.push(ContactValidationError::DescriptionRequired);
    }

    errors
}
