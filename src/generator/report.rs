use chrono::Duration;
use serde_json::json;

use super::templates;
use super::GenerationContext;
use crate::models::event::{EventDestination, EventStatus, ServiceEvent};
use crate::models::service::Service;

const EVENT_SPACING_MINUTES: i64 = 15;

/// Mock event log for a service: one event per configured destination,
/// newest first, alternating completed and failed outcomes.
///
/// A service with no destinations gets a single completed email event to
/// a demo address.
pub fn mock_events(service: &Service, ctx: &mut GenerationContext) -> Vec<ServiceEvent> {
    let mut destinations: Vec<EventDestination> = service
        .webhook_connections
        .iter()
        .map(|w| EventDestination::Webhook(w.url.clone()))
        .chain(
            service
                .email_destinations
                .iter()
                .map(|e| EventDestination::Email(e.email.clone())),
        )
        .collect();
    if destinations.is_empty() {
        destinations.push(EventDestination::Email("demo@example.com".to_string()));
    }

    destinations
        .into_iter()
        .enumerate()
        .map(|(i, destination)| {
            let status = if i % 2 == 0 {
                EventStatus::Completed
            } else {
                EventStatus::Failed
            };
            let reasons = match status {
                EventStatus::Completed => service
                    .workflow_names
                    .iter()
                    .map(|name| format!("{} completed successfully", name))
                    .collect(),
                EventStatus::Failed => vec![
                    "Invalid email format".to_string(),
                    "Invalid phone number format".to_string(),
                ],
            };
            ServiceEvent {
                id: ctx.id("evt"),
                service_id: service.id.clone(),
                record_id: ctx.id("rec"),
                request_id: ctx.id("req"),
                status,
                destination,
                timestamp: ctx.now() - Duration::minutes(EVENT_SPACING_MINUTES * i as i64),
                reasons,
            }
        })
        .collect()
}

/// Self-contained HTML report for one event.
pub fn render_service_report(service: &Service, event: &ServiceEvent) -> String {
    let (destination_kind, destination) = match &event.destination {
        EventDestination::Webhook(url) => ("Webhook", url.as_str()),
        EventDestination::Email(addr) => ("Email", addr.as_str()),
    };

    let data = json!({
        "title": format!("{} Report", service.name),
        "banner": null,
        "service_name": service.name,
        "record_id": event.record_id,
        "request_id": event.request_id,
        "status": event.status.as_str(),
        "completed": event.status == EventStatus::Completed,
        "processed_at": event.timestamp.to_rfc3339(),
        "destination_kind": destination_kind,
        "destination": destination,
        "workflows": service.workflow_names,
        "reasons": event.reasons,
    });

    templates::render(templates::SERVICE_REPORT, &data)
}
