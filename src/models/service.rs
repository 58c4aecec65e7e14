use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named bundle of selected workflows plus the destinations that receive
/// its results.
///
/// Generation borrows a `Service` immutably, so every packet is rendered from
/// a consistent snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub workflow_names: Vec<String>,
    pub estimated_cost_per_run: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub webhook_connections: Vec<WebhookConnection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email_destinations: Vec<EmailDestination>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub token_connections: Vec<TokenConnection>,
}

impl Service {
    /// First configured webhook URL, if any.
    pub fn primary_webhook_url(&self) -> Option<&str> {
        self.webhook_connections.first().map(|w| w.url.as_str())
    }

    /// First configured email address, if any.
    pub fn primary_email(&self) -> Option<&str> {
        self.email_destinations.first().map(|e| e.email.as_str())
    }

    /// The webhook connection registered for `url`.
    pub fn webhook_for(&self, url: &str) -> Option<&WebhookConnection> {
        self.webhook_connections.iter().find(|w| w.url == url)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookConnection {
    pub id: String,
    pub url: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_service: Option<TokenService>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailDestination {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A reusable token service that is not bound to a single webhook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenConnection {
    pub id: String,
    pub name: String,
    pub token_service: TokenService,
    pub created_at: DateTime<Utc>,
}

/// Authentication attached to outbound webhook deliveries.
///
/// Serialized as `{"type": "oauth", "oauthConfig": {..}}` or
/// `{"type": "custom", "customConfig": {..}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TokenService {
    #[serde(rename_all = "camelCase")]
    Oauth { oauth_config: OAuthConfig },
    #[serde(rename_all = "camelCase")]
    Custom { custom_config: CustomTokenConfig },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomTokenConfig {
    pub header_name: String,
    pub header_value: String,
}
