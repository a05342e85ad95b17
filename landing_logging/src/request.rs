use tracing::info;

/// Summary of a handled HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiRequest<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub user_agent: Option<&'a str>,
    pub client_ip: Option<&'a str>,
    pub status_code: Option<u16>,
}

/// Logs a single info line describing a handled request.
///
/// Absent values are omitted from the logged fields.
pub fn log_api_request(request: &ApiRequest<'_>) {
    info!(
        method = request.method,
        path = request.path,
        user_agent = request.user_agent,
        client_ip = request.client_ip,
        status_code = request.status_code,
        "API Request: {} {}",
        request.method,
        request.path
    );
}
