use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use service_network::api::{self, AppState};
use service_network::config::Config;
use service_network::notification::resend::{MailError, Mailer, OutboundEmail};

/// Mailer that records every email instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutboundEmail>>,
    pub fail_with: Option<Value>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<String, MailError> {
        if let Some(details) = &self.fail_with {
            return Err(MailError::Provider {
                status: 422,
                details: details.clone(),
            });
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());
        Ok(format!("msg_{}", sent.len()))
    }
}

pub fn app_with(mailer: Option<Arc<RecordingMailer>>) -> Router {
    let mailer = mailer.map(|m| m as Arc<dyn Mailer>);
    api::app(Arc::new(AppState::with_mailer(Config::default(), mailer)))
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

pub fn developer_packet_body() -> Value {
    json!({
        "to": "dev@example.com",
        "serviceName": "Customer Onboarding",
        "serviceId": "svc_customer_onboarding",
        "packetType": "developer",
        "developerGuideHtml": "<html><body>Guide</body></html>",
        "requestBodyJson": "{\"email\":\"user@example.com\"}",
        "webhookPayloadJson": "{}",
        "emailPayloadJson": "{}",
        "successExampleJson": "{}",
        "failureExampleJson": "{}"
    })
}
