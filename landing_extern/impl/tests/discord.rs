use std::{net::Ipv4Addr, time::Duration};

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use landing_extern_contracts::discord::{
    DiscordApiService, DiscordEmbed, DiscordEmbedField, DiscordWebhookPayload,
};
use landing_extern_impl::discord::{DiscordApiServiceConfig, DiscordApiServiceImpl};
use landing_testing::webhook::WebhookServer;

#[tokio::test]
async fn success() {
    let server = start_server(StatusCode::NO_CONTENT).await;
    let sut = make_sut();

    sut.execute_webhook(&server.url(), &payload()).await.unwrap();

    let received = server.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].payload, serde_json::to_value(payload()).unwrap());
    assert!(received[0]
        .user_agent
        .as_deref()
        .unwrap()
        .starts_with("Landing Backend"));
}

#[tokio::test]
async fn success_with_body() {
    let server = start_server(StatusCode::OK).await;
    let sut = make_sut();

    sut.execute_webhook(&server.url(), &payload()).await.unwrap();

    assert_eq!(server.received().len(), 1);
}

#[tokio::test]
async fn error_status() {
    let server = start_server(StatusCode::INTERNAL_SERVER_ERROR).await;
    let sut = make_sut();

    let err = sut
        .execute_webhook(&server.url(), &payload())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Discord webhook failed with status 500");
    assert_eq!(server.received().len(), 1);
}

#[tokio::test]
async fn unreachable() {
    let server = start_server(StatusCode::NO_CONTENT).await;
    let url = server.url();
    server.stop().await;
    let sut = make_sut();

    let err = sut.execute_webhook(&url, &payload()).await.unwrap_err();

    assert_eq!(err.to_string(), "Discord webhook request failed");
}

async fn start_server(status: StatusCode) -> WebhookServer {
    WebhookServer::start(Ipv4Addr::LOCALHOST.into(), 0, status)
        .await
        .unwrap()
}

fn make_sut() -> DiscordApiServiceImpl {
    DiscordApiServiceImpl::new(&DiscordApiServiceConfig {
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn payload() -> DiscordWebhookPayload {
    DiscordWebhookPayload {
        content: None,
        embeds: vec![DiscordEmbed {
            title: "Nový sumbission!".into(),
            description: "Hello World!".into(),
            color: 8449920,
            fields: vec![DiscordEmbedField {
                name: "👤 Jméno".into(),
                value: "Max Mustermann".into(),
            }],
            timestamp: Utc.with_ymd_and_hms(2024, 7, 13, 9, 41, 7).unwrap(),
        }],
        attachments: Vec::new(),
    }
}
