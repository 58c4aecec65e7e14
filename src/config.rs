use serde::Deserialize;

use crate::notification::resend::DEFAULT_API_URL;

pub const DEFAULT_FROM_EMAIL: &str = "Service Network <onboarding@resend.dev>";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Resend API key. Sending endpoints answer 500 while this is unset.
    pub resend_api_key: Option<String>,
    /// Sender address. Set via RESEND_FROM_EMAIL.
    pub resend_from_email: String,
    /// Base URL of the Resend API. Overridable for local testing.
    pub resend_api_url: String,
    /// Origin allowed by CORS, in addition to localhost.
    pub dashboard_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            resend_api_key: None,
            resend_from_email: DEFAULT_FROM_EMAIL.to_string(),
            resend_api_url: DEFAULT_API_URL.to_string(),
            dashboard_origin: "http://localhost:3000".to_string(),
        }
    }
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let resend_api_key = std::env::var("RESEND_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    if resend_api_key.is_none() {
        tracing::warn!("RESEND_API_KEY is not set; email sending endpoints will return 500");
    }

    let defaults = Config::default();
    Ok(Config {
        port: std::env::var("SVCNET_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port),
        resend_api_key,
        resend_from_email: std::env::var("RESEND_FROM_EMAIL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.resend_from_email),
        resend_api_url: std::env::var("RESEND_API_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.resend_api_url),
        dashboard_origin: std::env::var("DASHBOARD_ORIGIN").unwrap_or(defaults.dashboard_origin),
    })
}
