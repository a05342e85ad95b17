use landing_models::contact::{ContactSubmission, SubmissionMetadata};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactNotificationService: Send + Sync + 'static {
    /// Logs the submission and queues a webhook notification for it.
    ///
    /// Problems with the notification are logged and never reported back to
    /// the caller.
    fn notify(&self, submission: &ContactSubmission, metadata: &SubmissionMetadata);
}

#[cfg(feature = "mock")]
impl MockContactNotificationService {
    pub fn with_notify(
        mut self,
        submission: ContactSubmission,
        metadata: SubmissionMetadata,
    ) -> Self {
        self.expect_notify()
            .once()
            .with(
                mockall::predicate::eq(submission),
                mockall::predicate::eq(metadata),
            )
            .return_const(());
        self
    }
}
