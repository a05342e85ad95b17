use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use landing_logging::log_error;

use crate::models::contact::ApiSubmissionResponse;

pub mod contact;

pub const GENERIC_FAILURE_MESSAGE: &str = "Došlo k chybě při zpracování formuláře";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    log_error("Internal server error", &err);
    generic_failure()
}

/// 500 response without any details about the cause.
fn generic_failure() -> Response {
    failure(
        StatusCode::INTERNAL_SERVER_ERROR,
        vec![GENERIC_FAILURE_MESSAGE.into()],
    )
}

fn failure(code: StatusCode, errors: Vec<String>) -> Response {
    (code, Json(ApiSubmissionResponse::Failure { errors })).into_response()
}
