use std::{net::Ipv4Addr, time::Duration};

use landing::environment::Environment;
use landing_config::{load_with_override, DEFAULT_CONFIG_PATH};
use landing_testing::webhook::WebhookServer;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

const FORM: [(&str, &str); 4] = [
    ("name", "Jan Novák"),
    ("email", "jan@example.cz"),
    ("company", "Firma s.r.o."),
    ("description", "Potřebujeme nový web.\nCo nejdřív."),
];

/// Starts the api in the background and returns the url of the contact
/// endpoint.
async fn start(webhook_url: Option<Url>) -> Url {
    let overrides = webhook_url
        .map(|url| format!("[contact]\nwebhook_url = \"{url}\""))
        .into_iter()
        .collect::<Vec<_>>();
    let overrides = overrides.iter().map(String::as_str).collect::<Vec<_>>();
    let config = load_with_override(&[DEFAULT_CONFIG_PATH], &overrides).unwrap();

    let Environment {
        server,
        webhook_worker,
    } = Environment::new(&config).unwrap();
    assert_eq!(webhook_worker.is_some(), config.contact.webhook_url.is_some());
    if let Some(worker) = webhook_worker {
        worker.spawn();
    }

    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server.serve_on(listener, std::future::pending()));

    format!("http://{addr}/api/contact").parse().unwrap()
}

async fn submit(url: Url, form: &[(&str, &str)]) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(url)
        .header("User-Agent", "integration-test")
        .header("X-Forwarded-For", "198.51.100.23")
        .form(form)
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn submission_is_forwarded_to_webhook() {
    // Arrange
    let webhook = WebhookServer::start(Ipv4Addr::LOCALHOST.into(), 0, StatusCode::NO_CONTENT)
        .await
        .unwrap();
    let url = start(Some(webhook.url())).await;

    // Act
    let (status, body) = submit(url, &FORM).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let received = webhook.wait_for(1, Duration::from_secs(5)).await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].payload["content"], Value::Null);
    assert_eq!(received[0].payload["attachments"], json!([]));
    let embed = &received[0].payload["embeds"][0];
    assert_eq!(embed["title"], "Nový sumbission!");
    assert_eq!(embed["color"], 8449920);
    assert_eq!(embed["description"], "Potřebujeme nový web.\nCo nejdřív.");
    assert_eq!(
        embed["fields"],
        json!([
            {"name": "👤 Jméno", "value": "Jan Novák"},
            {"name": "📨 Email", "value": "jan@example.cz"},
            {"name": "🏢 Společnost", "value": "Firma s.r.o."},
            {"name": "🖥️  User Agent", "value": "integration-test"},
            {"name": "🌐 Client IP", "value": "198.51.100.23"},
        ])
    );

    webhook.stop().await;
}

#[tokio::test]
async fn webhook_failure_does_not_fail_submission() {
    // Arrange
    let webhook = WebhookServer::start(
        Ipv4Addr::LOCALHOST.into(),
        0,
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .await
    .unwrap();
    let url = start(Some(webhook.url())).await;

    // Act
    let (status, body) = submit(url, &FORM).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    webhook.wait_for(1, Duration::from_secs(5)).await.unwrap();

    webhook.stop().await;
}

#[tokio::test]
async fn without_webhook() {
    // Arrange
    let url = start(None).await;

    // Act
    let (status, body) = submit(url, &FORM).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Formulář jsme úspěšně obdrželi! Do 24 hodin se vám ozveme na váš email.",
        })
    );
}

#[tokio::test]
async fn invalid_submission_is_not_forwarded() {
    // Arrange
    let webhook = WebhookServer::start(Ipv4Addr::LOCALHOST.into(), 0, StatusCode::NO_CONTENT)
        .await
        .unwrap();
    let url = start(Some(webhook.url())).await;

    // Act
    let (status, body) = submit(
        url,
        &[
            ("name", "  "),
            ("email", "jan@example"),
            ("company", "Firma"),
            ("description", "Ahoj"),
        ],
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"success": false, "errors": ["Jméno je povinné", "Email není validní"]})
    );
    assert!(webhook.received().is_empty());

    webhook.stop().await;
}
