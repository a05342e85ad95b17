use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use landing_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use landing_logging::log_error;
use landing_models::contact::SubmissionMetadata;

use super::{failure, generic_failure};
use crate::{
    extractors::{
        client_ip::ClientIp,
        contact_form::{ContactForm, ContactFormRejection},
        user_agent::UserAgent,
    },
    models::contact::ApiSubmissionResponse,
};

pub const CONTACT_ROUTE: &str = "/api/contact";

pub const SUCCESS_MESSAGE: &str =
    "Formulář jsme úspěšně obdrželi! Do 24 hodin se vám ozveme na váš email.";

const UNKNOWN: &str = "Unknown";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(CONTACT_ROUTE, routing::post(submit))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    UserAgent(user_agent): UserAgent,
    ClientIp(client_ip): ClientIp,
    form: Result<ContactForm, ContactFormRejection>,
) -> Response {
    let ContactForm(form) = match form {
        Ok(form) => form,
        Err(ContactFormRejection(err)) => return processing_error(err),
    };

    let metadata = SubmissionMetadata {
        user_agent: Some(user_agent.unwrap_or_else(|| UNKNOWN.into())),
        client_ip: Some(client_ip.unwrap_or_else(|| UNKNOWN.into())),
    };

    match service.submit(form.into(), metadata).await {
        Ok(()) => Json(ApiSubmissionResponse::Success {
            message: SUCCESS_MESSAGE.into(),
        })
        .into_response(),
        Err(ContactSubmitError::Invalid(errors)) => failure(
            StatusCode::BAD_REQUEST,
            errors.iter().map(ToString::to_string).collect(),
        ),
        Err(ContactSubmitError::Other(err)) => processing_error(err),
    }
}

fn processing_error(err: anyhow::Error) -> Response {
    log_error("Error processing contact form", &err);
    generic_failure()
}
