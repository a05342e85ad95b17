use landing_models::contact::ContactSubmission;
use serde::{ser::SerializeStruct, Serialize, Serializer};

/// Fields of the website's contact form. Fields which are missing from the
/// request are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
}

impl ApiContactForm {
    /// Collects the known fields from `(name, value)` pairs. The first
    /// occurrence of a field wins, unknown fields are skipped.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut form = Self::default();
        for (name, value) in pairs {
            if let Some(slot) = form.unset_field_mut(&name) {
                *slot = Some(value);
            }
        }
        form
    }

    /// Returns the slot of the field `name` if it is a known field which has
    /// not been set yet.
    pub fn unset_field_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        let slot = match name {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "company" => &mut self.company,
            "description" => &mut self.description,
            _ => return None,
        };
        slot.is_none().then_some(slot)
    }
}

impl From<ApiContactForm> for ContactSubmission {
    fn from(value: ApiContactForm) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            email: value.email.unwrap_or_default(),
            company: value.company.unwrap_or_default(),
            description: value.description.unwrap_or_default(),
        }
    }
}

/// Response body of a contact form submission.
///
/// Serialized as `{"success": true, "message": ...}` or
/// `{"success": false, "errors": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiSubmissionResponse {
    Success { message: String },
    Failure { errors: Vec<String> },
}

impl Serialize for ApiSubmissionResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ApiSubmissionResponse", 2)?;
        match self {
            Self::Success { message } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("message", message)?;
            }
            Self::Failure { errors } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("errors", errors)?;
            }
        }
        state.end()
    }
}
