/// A single message submitted through the website's contact form.
///
/// Fields are taken verbatim from the request, missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub company: String,
    pub description: String,
}

/// Information about the client that sent a [`ContactSubmission`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionMetadata {
    pub user_agent: Option<String>,
    pub client_ip: Option<String>,
}
