use axum::{
    extract::{rejection::JsonRejection, Path},
    response::Html,
    Json,
};
use serde::Deserialize;

use crate::catalog;
use crate::errors::AppError;
use crate::generator::{
    derive_field_rules, generate_preview_packet, generate_welcome_packet, mock_events,
    render_service_report, GenerationContext,
};
use crate::models::event::ServiceEvent;
use crate::models::packet::{FieldRule, PreviewPacket, WelcomePacket};
use crate::models::service::Service;
use crate::models::workflow::Workflow;

// ── Request DTOs ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePacketRequest {
    pub service: Service,
    pub email_address: String,
    pub webhook_url: Option<String>,
}

impl GeneratePacketRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.email_address.trim().is_empty() {
            return Err(AppError::Validation("Missing emailAddress".to_string()));
        }
        if let Some(url) = &self.webhook_url {
            let parsed = url::Url::parse(url)
                .map_err(|_| AppError::Validation(format!("Invalid webhookUrl: {}", url)))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(AppError::Validation(format!("Invalid webhookUrl: {}", url)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRulesRequest {
    pub workflow_names: Vec<String>,
}

// ── Handlers ─────────────────────────────────────────────────

/// GET /api/workflows: the workflow catalog
pub async fn list_workflows() -> Json<Vec<Workflow>> {
    Json(catalog::workflows())
}

/// GET /api/services: demo services
pub async fn list_services() -> Json<Vec<Service>> {
    Json(catalog::mock_services())
}

fn find_service(id: &str) -> Result<Service, AppError> {
    catalog::find_service(id).ok_or_else(|| AppError::NotFound(format!("Service '{}'", id)))
}

/// GET /api/services/:id/events: mock event log for one service
pub async fn list_service_events(
    Path(id): Path<String>,
) -> Result<Json<Vec<ServiceEvent>>, AppError> {
    let service = find_service(&id)?;
    Ok(Json(mock_events(&service, &mut GenerationContext::system())))
}

/// GET /api/services/:id/report: HTML report for the newest event
pub async fn latest_service_report(Path(id): Path<String>) -> Result<Html<String>, AppError> {
    let service = find_service(&id)?;
    let events = mock_events(&service, &mut GenerationContext::system());
    let latest = events
        .first()
        .ok_or_else(|| AppError::NotFound(format!("Events for service '{}'", id)))?;
    Ok(Html(render_service_report(&service, latest)))
}

/// POST /api/packets/preview: documents for a service that is not created yet
pub async fn preview_packet(
    payload: Result<Json<GeneratePacketRequest>, JsonRejection>,
) -> Result<Json<PreviewPacket>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidJson(e.body_text()))?;
    req.validate()?;
    let packet = generate_preview_packet(
        &req.service,
        &req.email_address,
        req.webhook_url.as_deref(),
        &mut GenerationContext::system(),
    );
    Ok(Json(packet))
}

/// POST /api/packets/welcome: onboarding packet for a created service
pub async fn welcome_packet(
    payload: Result<Json<GeneratePacketRequest>, JsonRejection>,
) -> Result<Json<WelcomePacket>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidJson(e.body_text()))?;
    req.validate()?;
    let packet = generate_welcome_packet(
        &req.service,
        &req.email_address,
        req.webhook_url.as_deref(),
        &mut GenerationContext::system(),
    );
    Ok(Json(packet))
}

/// POST /api/field-rules: field rules for a workflow selection
pub async fn field_rules(
    payload: Result<Json<FieldRulesRequest>, JsonRejection>,
) -> Result<Json<Vec<FieldRule>>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidJson(e.body_text()))?;
    Ok(Json(derive_field_rules(&req.workflow_names)))
}
