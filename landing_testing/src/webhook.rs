//! Stand-in for a Discord webhook that records every payload it receives

use std::{
    net::{IpAddr, SocketAddr},
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header::USER_AGENT, HeaderMap, StatusCode},
    routing, Json, Router,
};
use tokio::{net::TcpListener, sync::watch, task::JoinHandle};
use tracing::info;
use url::Url;

pub const WEBHOOK_ROUTE: &str = "/api/webhooks/testing";

#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedWebhook {
    pub payload: serde_json::Value,
    pub user_agent: Option<String>,
}

#[derive(Debug)]
struct WebhookState {
    status: StatusCode,
    received: Mutex<Vec<ReceivedWebhook>>,
    count: watch::Sender<usize>,
}

/// Webhook testing server running in the background of the current tokio
/// runtime.
#[derive(Debug)]
pub struct WebhookServer {
    addr: SocketAddr,
    state: Arc<WebhookState>,
    handle: JoinHandle<()>,
}

impl WebhookServer {
    /// Binds to `host:port` (use port `0` for a random free port) and responds
    /// to every webhook execution with `status`.
    pub async fn start(host: IpAddr, port: u16, status: StatusCode) -> anyhow::Result<Self> {
        let state = Arc::new(WebhookState::new(status));
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        let addr = listener.local_addr()?;

        let router = router(Arc::clone(&state));
        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, router).await {
                tracing::error!("Webhook testing server failed: {err}");
            }
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn url(&self) -> Url {
        format!("http://{}{WEBHOOK_ROUTE}", self.addr)
            .parse()
            .expect("socket address is a valid url authority")
    }

    /// Returns all webhook executions received so far.
    pub fn received(&self) -> Vec<ReceivedWebhook> {
        self.state.received.lock().unwrap().clone()
    }

    /// Waits until at least `count` webhook executions have been received and
    /// returns them. Fails after `timeout`.
    pub async fn wait_for(
        &self,
        count: usize,
        timeout: Duration,
    ) -> anyhow::Result<Vec<ReceivedWebhook>> {
        let mut receiver = self.state.count.subscribe();
        tokio::time::timeout(timeout, receiver.wait_for(|&received| received >= count))
            .await
            .with_context(|| format!("Timed out waiting for {count} webhook executions"))??;
        Ok(self.received())
    }

    /// Shuts the server down and closes the listening socket.
    pub async fn stop(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }
}

impl WebhookState {
    fn new(status: StatusCode) -> Self {
        Self {
            status,
            received: Mutex::default(),
            count: watch::Sender::new(0),
        }
    }
}

/// Runs a webhook testing server until the process is terminated.
pub async fn start_server(host: IpAddr, port: u16, status: StatusCode) -> anyhow::Result<()> {
    info!("Starting webhook testing server on {host}:{port}");
    info!("Webhook url: http://{host}:{port}{WEBHOOK_ROUTE}");
    info!("Responding with status {status}");

    let router = router(Arc::new(WebhookState::new(status)));
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")
}

fn router(state: Arc<WebhookState>) -> Router<()> {
    Router::new()
        .route(WEBHOOK_ROUTE, routing::post(execute))
        .with_state(state)
}

async fn execute(
    state: State<Arc<WebhookState>>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> StatusCode {
    info!("Received webhook execution:\n{payload:#}");

    let user_agent = headers
        .get(USER_AGENT)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    state.received.lock().unwrap().push(ReceivedWebhook {
        payload,
        user_agent,
    });
    state.count.send_modify(|count| *count += 1);

    state.status
}
