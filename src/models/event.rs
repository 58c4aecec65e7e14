use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Completed,
    Failed,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Completed => "completed",
            EventStatus::Failed => "failed",
        }
    }
}

/// Where an event's result was delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "address", rename_all = "lowercase")]
pub enum EventDestination {
    Webhook(String),
    Email(String),
}

/// One entry in a service's mock event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEvent {
    pub id: String,
    pub service_id: String,
    pub record_id: String,
    pub request_id: String,
    pub status: EventStatus,
    pub destination: EventDestination,
    pub timestamp: DateTime<Utc>,
    pub reasons: Vec<String>,
}
