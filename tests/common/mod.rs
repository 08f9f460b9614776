//! Test helpers for integration tests.
//!
//! In-process HTTP servers standing in for the feed and the Telegram Bot API.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use feedrelay::config::{Config, RelayConfig};
use feedrelay::DeliveryPolicy;

/// Bot token used by the Telegram stand-in.
pub const BOT_TOKEN: &str = "it-token";

/// Serve a router on an ephemeral local port.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Build an RSS 2.0 document from `(guid, title)` pairs.
pub fn rss(items: &[(&str, &str)]) -> String {
    let mut body = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Sports</title><link>https://example.com</link><description>Sports</description>"#,
    );
    for (guid, title) in items {
        body.push_str(&format!(
            "<item><guid>{guid}</guid><title>{title}</title><link>https://example.com/{guid}</link><description>About {title}</description></item>"
        ));
    }
    body.push_str("</channel></rss>");
    body
}

/// Feed endpoint whose document can be swapped between runs.
pub struct FeedServer {
    pub url: String,
    body: Arc<Mutex<String>>,
}

impl FeedServer {
    pub async fn start(document: String) -> Self {
        let body = Arc::new(Mutex::new(document));
        let router = Router::new()
            .route(
                "/rss.xml",
                get(|State(body): State<Arc<Mutex<String>>>| async move {
                    let document = body.lock().unwrap().clone();
                    ([(CONTENT_TYPE, "application/rss+xml")], document)
                }),
            )
            .with_state(body.clone());
        let addr = spawn(router).await;

        Self {
            url: format!("http://{}/rss.xml", addr),
            body,
        }
    }

    pub fn set_document(&self, document: String) {
        *self.body.lock().unwrap() = document;
    }
}

#[derive(Clone, Default)]
struct MockState {
    messages: Arc<Mutex<Vec<Value>>>,
    reject_marker: Arc<Mutex<Option<String>>>,
}

/// Telegram Bot API stand-in recording every `sendMessage` body.
pub struct TelegramMock {
    pub api_base: String,
    state: MockState,
}

impl TelegramMock {
    pub async fn start() -> Self {
        let state = MockState::default();
        let router = Router::new()
            .route(&format!("/bot{}/sendMessage", BOT_TOKEN), post(send_message))
            .with_state(state.clone());
        let addr = spawn(router).await;

        Self {
            api_base: format!("http://{}", addr),
            state,
        }
    }

    /// Reject messages whose text contains `marker`.
    pub fn reject_containing(&self, marker: &str) {
        *self.state.reject_marker.lock().unwrap() = Some(marker.to_string());
    }

    /// Accept every message again.
    pub fn accept_all(&self) {
        *self.state.reject_marker.lock().unwrap() = None;
    }

    /// Texts of accepted messages, in arrival order.
    pub fn texts(&self) -> Vec<String> {
        self.state
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter_map(|m| m["text"].as_str().map(str::to_string))
            .collect()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.state.messages.lock().unwrap().clone()
    }
}

async fn send_message(State(state): State<MockState>, Json(body): Json<Value>) -> impl IntoResponse {
    let text = body["text"].as_str().unwrap_or_default().to_string();
    let rejected = state
        .reject_marker
        .lock()
        .unwrap()
        .as_ref()
        .is_some_and(|marker| text.contains(marker.as_str()));

    if rejected {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"ok": false, "error_code": 400, "description": "Bad Request: message is too long"})),
        );
    }

    state.messages.lock().unwrap().push(body);
    (StatusCode::OK, Json(json!({"ok": true, "result": {"message_id": 1}})))
}

/// Configuration pointing at the stand-in servers.
pub fn test_config(feed: &FeedServer, telegram: &TelegramMock, policy: DeliveryPolicy) -> Config {
    let mut config = Config::default();
    config.feed.url = feed.url.clone();
    config.telegram.api_key = BOT_TOKEN.to_string();
    config.telegram.chat_id = "@sports".to_string();
    config.telegram.api_base = telegram.api_base.clone();
    config.relay = RelayConfig {
        send_delay_ms: 0,
        delivery_policy: policy,
        ..RelayConfig::default()
    };
    config
}
