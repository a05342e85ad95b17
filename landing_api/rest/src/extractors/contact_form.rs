use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form,
};

use crate::{models::contact::ApiContactForm, routes::internal_server_error};

const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Contact form fields read from either an `application/x-www-form-urlencoded`
/// or a `multipart/form-data` body.
pub struct ContactForm(pub ApiContactForm);

#[derive(Debug)]
pub struct ContactFormRejection(pub anyhow::Error);

impl IntoResponse for ContactFormRejection {
    fn into_response(self) -> Response {
        internal_server_error(self.0)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for ContactForm {
    type Rejection = ContactFormRejection;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.get(..MULTIPART_FORM_DATA.len()))
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(MULTIPART_FORM_DATA));

        if is_multipart {
            let multipart = Multipart::from_request(request, state)
                .await
                .map_err(|err| ContactFormRejection(err.into()))?;
            read_multipart(multipart)
                .await
                .map(Self)
                .map_err(ContactFormRejection)
        } else {
            Form::<Vec<(String, String)>>::from_request(request, state)
                .await
                .map(|Form(pairs)| Self(ApiContactForm::from_pairs(pairs)))
                .map_err(|err| ContactFormRejection(err.into()))
        }
    }
}

/// Collects the known fields of a multipart body. The first occurrence of a
/// field wins, unknown fields are skipped.
async fn read_multipart(mut multipart: Multipart) -> anyhow::Result<ApiContactForm> {
    let mut form = ApiContactForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(slot) = field.name().and_then(|name| form.unset_field_mut(name)) else {
            continue;
        };
        *slot = Some(field.text().await?);
    }

    Ok(form)
}
