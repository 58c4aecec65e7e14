use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "https://api.resend.com";

// ── Outbound Email ───────────────────────────────────────────

/// A file attached to an outbound email. `content` is base64.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Attachment {
    pub filename: String,
    pub content: String,
}

impl Attachment {
    /// Base64-encodes `text` as the attachment body.
    pub fn from_text(filename: impl Into<String>, text: &str) -> Self {
        Self {
            filename: filename.into(),
            content: STANDARD.encode(text.as_bytes()),
        }
    }
}

/// Request body of `POST /emails`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Error)]
pub enum MailError {
    /// The provider answered with a non-2xx status.
    #[error("email provider returned {status}")]
    Provider { status: u16, details: Value },

    #[error("email request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected provider response: {0}")]
    InvalidResponse(String),
}

/// Sends one email and returns the provider's message id.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<String, MailError>;
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

// ── Resend Client ────────────────────────────────────────────

/// Thin client for the Resend transactional email API.
///
/// Each call makes exactly one request; failures are returned to the caller
/// and never retried.
#[derive(Clone)]
pub struct ResendClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ResendClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("ServiceNetwork/1.0")
            .build()
            .context("failed to build email HTTP client")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Mailer for ResendClient {
    async fn send(&self, email: &OutboundEmail) -> Result<String, MailError> {
        let url = format!("{}/emails", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let details = serde_json::from_str(&text).unwrap_or(Value::String(text));
            warn!(
                status = %status,
                subject = %email.subject,
                details = %details,
                "email provider rejected message"
            );
            return Err(MailError::Provider {
                status: status.as_u16(),
                details,
            });
        }

        let body: SendResponse = resp
            .json()
            .await
            .map_err(|e| MailError::InvalidResponse(e.to_string()))?;

        info!(
            message_id = %body.id,
            subject = %email.subject,
            attachments = email.attachments.len(),
            "email sent"
        );
        Ok(body.id)
    }
}

// ── Tests ─────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn email() -> OutboundEmail {
        OutboundEmail {
            from: "Service Network <onboarding@resend.dev>".into(),
            to: vec!["dev@example.com".into()],
            subject: "Developer Guide: KYC".into(),
            html: "<p>hi</p>".into(),
            attachments: vec![Attachment::from_text("guide.html", "<h1>Guide</h1>")],
        }
    }

    #[test]
    fn test_attachment_is_base64() {
        let att = Attachment::from_text("a.json", "{}");
        assert_eq!(att.content, "e30=");
    }

    #[test]
    fn test_empty_attachments_are_omitted() {
        let mut e = email();
        e.attachments.clear();
        let value = serde_json::to_value(&e).unwrap();
        assert!(value.get("attachments").is_none());
        assert_eq!(value["to"], json!(["dev@example.com"]));
    }

    #[tokio::test]
    async fn test_send_returns_message_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer re_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "msg_123" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ResendClient::new("re_test", mock_server.uri()).unwrap();
        let id = client.send(&email()).await.unwrap();
        assert_eq!(id, "msg_123");
    }

    #[tokio::test]
    async fn test_provider_error_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "statusCode": 422,
                "name": "validation_error",
                "message": "Invalid `from` field."
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ResendClient::new("re_test", mock_server.uri()).unwrap();
        match client.send(&email()).await {
            Err(MailError::Provider { status, details }) => {
                assert_eq!(status, 422);
                assert_eq!(details["name"], "validation_error");
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }
}
