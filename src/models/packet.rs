use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One validation rule for a field the process endpoint accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldRule {
    pub field: String,
    pub description: String,
    pub required: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
}

impl FieldRule {
    pub fn new(field: &str, description: &str, required: bool, ty: &str, examples: &[&str]) -> Self {
        Self {
            field: field.to_string(),
            description: description.to_string(),
            required,
            r#type: Some(ty.to_string()),
            examples: Some(examples.iter().map(|e| e.to_string()).collect()),
        }
    }
}

/// Everything a new customer receives once a service is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WelcomePacket {
    pub service_id: String,
    pub service_name: String,
    pub generated_at: DateTime<Utc>,
    pub developer_guide: String,
    pub ops_welcome_guide: String,
    pub quick_start_checklist: String,
    pub request_body_example: String,
    pub webhook_payload_example: String,
    pub email_payload_example: String,
    pub success_example: String,
    pub failure_example: String,
    pub field_rules: Vec<FieldRule>,
}

/// Documents shown before a service is created.
///
/// Field names match the `/api/send-preview-packet` request body so a packet
/// can be posted as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreviewPacket {
    pub developer_guide_html: String,
    pub ops_welcome_guide_html: String,
    pub quick_start_checklist_html: String,
    pub request_body_json: String,
    pub webhook_payload_json: String,
    pub email_payload_json: String,
    pub success_example_json: String,
    pub failure_example_json: String,
}

/// Which half of a packet is emailed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacketType {
    Developer,
    Ops,
}

impl PacketType {
    pub fn as_str(self) -> &'static str {
        match self {
            PacketType::Developer => "developer",
            PacketType::Ops => "ops",
        }
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PacketType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "developer" => Ok(PacketType::Developer),
            "ops" => Ok(PacketType::Ops),
            other => Err(format!("invalid packet type: {}", other)),
        }
    }
}

impl WelcomePacket {
    /// `(filename, content)` for every document in the packet.
    pub fn files(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("developer-guide.html", self.developer_guide.as_str()),
            ("welcome-guide.html", self.ops_welcome_guide.as_str()),
            ("quick-start-checklist.html", self.quick_start_checklist.as_str()),
            ("request-body.json", self.request_body_example.as_str()),
            ("webhook-payload.json", self.webhook_payload_example.as_str()),
            ("email-payload.json", self.email_payload_example.as_str()),
            ("success-example.json", self.success_example.as_str()),
            ("failure-example.json", self.failure_example.as_str()),
        ]
    }
}

impl PreviewPacket {
    /// `(filename, content)` for every document in the packet.
    pub fn files(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("developer-guide.html", self.developer_guide_html.as_str()),
            ("welcome-guide.html", self.ops_welcome_guide_html.as_str()),
            ("quick-start-checklist.html", self.quick_start_checklist_html.as_str()),
            ("request-body.json", self.request_body_json.as_str()),
            ("webhook-payload.json", self.webhook_payload_json.as_str()),
            ("email-payload.json", self.email_payload_json.as_str()),
            ("success-example.json", self.success_example_json.as_str()),
            ("failure-example.json", self.failure_example_json.as_str()),
        ]
    }
}
