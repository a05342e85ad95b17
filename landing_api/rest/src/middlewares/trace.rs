use std::time::Duration;

use axum::{
    extract::Request,
    http::header::USER_AGENT,
    middleware::{from_fn, Next},
    response::Response,
    Router,
};
use landing_logging::{log_api_request, ApiRequest};
use tracing::{debug, Span};

use super::request_id::RequestId;
use crate::extractors::client_ip::ClientIp;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(from_fn(access_log)).layer(
        tower_http::trace::TraceLayer::new_for_http()
            .make_span_with(make_span)
            .on_request(on_request)
            .on_response(on_response)
            .on_body_chunk(())
            .on_eos(())
            .on_failure(()),
    )
}

fn make_span(request: &Request) -> Span {
    let version = request.version();
    let method = request.method();
    let route = request.uri();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(ToString::to_string);

    tracing::debug_span!("http-request", ?version, %method, %route, request_id = request_id.as_deref())
}

fn on_request(_request: &Request, _span: &Span) {
    debug!("started processing request")
}

fn on_response(response: &Response, latency: Duration, _span: &Span) {
    let status = response.status();
    debug!(?latency, %status, "finished processing request")
}

async fn access_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
    let ClientIp(client_ip) = ClientIp::from_headers(request.headers());

    let response = next.run(request).await;

    log_api_request(&ApiRequest {
        method: method.as_str(),
        path: &path,
        user_agent: user_agent.as_deref(),
        client_ip: client_ip.as_deref(),
        status_code: Some(response.status().as_u16()),
    });

    response
}
