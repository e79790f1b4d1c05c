// Telegram notifier - Bot API sendMessage over HTTP GET
use crate::application::notifier::Notifier;
use crate::infrastructure::api_error::{ApiError, check_status};
use crate::infrastructure::config::TelegramSettings;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<serde_json::Value>,
}

impl TelegramNotifier {
    pub fn new(client: reqwest::Client, settings: &TelegramSettings) -> Self {
        Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            bot_token: settings.bot_token.clone(),
            chat_id: settings.chat_id.clone(),
        }
    }

    fn build_url(&self, message: &str) -> String {
        format!(
            "{}/bot{}/sendMessage?chat_id={}&text={}",
            self.api_base,
            self.bot_token,
            urlencoding::encode(&self.chat_id),
            urlencoding::encode(message)
        )
    }

    async fn send_message(&self, message: &str) -> Result<SendMessageResponse, ApiError> {
        let response = self.client.get(self.build_url(message)).send().await?;
        let response = check_status(response).await?;
        let body = response.json::<SendMessageResponse>().await?;
        if !body.ok {
            return Err(ApiError::Rejected(
                body.description.unwrap_or_else(|| "ok=false".to_string()),
            ));
        }
        Ok(body)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> anyhow::Result<()> {
        let body = self
            .send_message(message)
            .await
            .context("Failed to send Telegram alert")?;
        tracing::info!(
            "Telegram alert sent: {}",
            body.result.map(|r| r.to_string()).unwrap_or_default()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_support::serve_stub;
    use axum::{Json, Router, extract::Query, routing::get};
    use std::collections::HashMap;

    fn settings(api_base: String) -> TelegramSettings {
        TelegramSettings {
            api_base,
            bot_token: "123abc".to_string(),
            chat_id: "7605".to_string(),
        }
    }

    #[test]
    fn test_build_url_encodes_message() {
        let notifier = TelegramNotifier::new(
            reqwest::Client::new(),
            &settings("https://api.telegram.org/".to_string()),
        );
        assert_eq!(
            notifier.build_url("Current height: 2.50 meters."),
            "https://api.telegram.org/bot123abc/sendMessage?chat_id=7605&text=Current%20height%3A%202.50%20meters."
        );
    }

    #[tokio::test]
    async fn test_send_hits_send_message() {
        let router = Router::new().route(
            "/bot123abc/sendMessage",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                Json(serde_json::json!({
                    "ok": q.get("chat_id").map(String::as_str) == Some("7605"),
                    "result": { "text": q.get("text") },
                }))
            }),
        );
        let base = serve_stub(router).await;
        let notifier = TelegramNotifier::new(reqwest::Client::new(), &settings(base));

        notifier.send("Alert: 2.50 meters").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejection_is_an_error() {
        let router = Router::new().route(
            "/bot123abc/sendMessage",
            get(|| async {
                Json(serde_json::json!({ "ok": false, "description": "chat not found" }))
            }),
        );
        let base = serve_stub(router).await;
        let notifier = TelegramNotifier::new(reqwest::Client::new(), &settings(base));

        let err = notifier.send_message("hi").await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref d) if d == "chat not found"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let notifier = TelegramNotifier::new(
            reqwest::Client::new(),
            &settings("http://127.0.0.1:1".to_string()),
        );
        let err = notifier.send_message("hi").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn test_failure_report_omits_bot_token() {
        let notifier = TelegramNotifier::new(
            reqwest::Client::new(),
            &TelegramSettings {
                api_base: "http://127.0.0.1:1".to_string(),
                bot_token: "SECRET-TOKEN-123".to_string(),
                chat_id: "1".to_string(),
            },
        );
        let err = notifier.send("x").await.unwrap_err();
        let report = format!("{:#}", err);

        assert!(!report.contains("SECRET-TOKEN-123"), "token in {}", report);
        assert_eq!(report.matches("request failed").count(), 1);
    }
}
