//! Telegram Bot API notifier.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::{NotifyError, Notifier};
use crate::config::TelegramConfig;
use crate::error::{RelayError, Result};

/// Sends messages to a single chat through `sendMessage`.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
    parse_mode: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    /// Create a notifier from the Telegram configuration.
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RelayError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: config.api_key.clone(),
            chat_id: config.chat_id.clone(),
            parse_mode: config.parse_mode.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> std::result::Result<(), NotifyError> {
        let mut body = json!({
            "chat_id": self.chat_id,
            "text": text,
        });
        if !self.parse_mode.is_empty() {
            body["parse_mode"] = json!(self.parse_mode);
        }

        // The request URL embeds the bot token
        let resp = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Http(e.without_url()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| NotifyError::Http(e.without_url()))?;

        if !status.is_success() {
            let reason = serde_json::from_str::<ApiResponse>(&text)
                .ok()
                .and_then(|r| r.description)
                .unwrap_or(text);
            return Err(NotifyError::Api(format!("{}: {}", status, reason)));
        }

        let parsed: ApiResponse = serde_json::from_str(&text)
            .map_err(|e| NotifyError::Api(format!("unexpected response: {}", e)))?;
        if !parsed.ok {
            return Err(NotifyError::Api(
                parsed
                    .description
                    .unwrap_or_else(|| "request not accepted".to_string()),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Vec<Value>>>;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn config(api_base: &str) -> TelegramConfig {
        TelegramConfig {
            api_key: "test-token".to_string(),
            chat_id: "@sports".to_string(),
            api_base: api_base.to_string(),
            ..TelegramConfig::default()
        }
    }

    #[tokio::test]
    async fn test_send_message() {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route(
                "/bottest-token/sendMessage",
                post(
                    |State(captured): State<Captured>, Json(body): Json<Value>| async move {
                        captured.lock().unwrap().push(body);
                        Json(json!({"ok": true, "result": {}}))
                    },
                ),
            )
            .with_state(captured.clone());
        let base = serve(router).await;

        let notifier = TelegramNotifier::new(&config(&base)).unwrap();
        notifier.send("*Title*\nSummary").await.unwrap();

        let bodies = captured.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["chat_id"], "@sports");
        assert_eq!(bodies[0]["text"], "*Title*\nSummary");
        assert_eq!(bodies[0]["parse_mode"], "Markdown");
    }

    #[tokio::test]
    async fn test_send_rejected_status() {
        let router = Router::new().route(
            "/bottest-token/sendMessage",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"ok": false, "description": "Bad Request: chat not found"})),
                )
            }),
        );
        let base = serve(router).await;

        let notifier = TelegramNotifier::new(&config(&base)).unwrap();
        let err = notifier.send("hello").await.unwrap_err();
        assert!(matches!(err, NotifyError::Api(_)));
        assert!(err.to_string().contains("chat not found"));
    }

    #[tokio::test]
    async fn test_send_not_ok_body() {
        let router = Router::new().route(
            "/bottest-token/sendMessage",
            post(|| async { Json(json!({"ok": false, "description": "Flood control"})) }),
        );
        let base = serve(router).await;

        let notifier = TelegramNotifier::new(&config(&base)).unwrap();
        let err = notifier.send("hello").await.unwrap_err();
        assert!(err.to_string().contains("Flood control"));
    }

    #[tokio::test]
    async fn test_send_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let notifier = TelegramNotifier::new(&config(&format!("http://{}", addr))).unwrap();
        let err = notifier.send("hello").await.unwrap_err();
        assert!(matches!(err, NotifyError::Http(_)));
        assert!(!err.to_string().contains("test-token"));
    }
}
