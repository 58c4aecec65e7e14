use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use super::AppState;
use crate::errors::AppError;
use crate::notification::compose::{
    compose_preview_email, compose_report_email, SendPreviewPacketRequest,
    SendServiceReportRequest,
};
use crate::notification::resend::{Mailer, OutboundEmail};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    pub success: bool,
    pub message_id: String,
}

async fn deliver(state: &AppState, email: &OutboundEmail) -> Result<Json<SendResponse>, AppError> {
    let mailer: &Arc<dyn Mailer> = state.mailer.as_ref().ok_or(AppError::NotConfigured)?;
    let message_id = mailer.send(email).await?;
    Ok(Json(SendResponse {
        success: true,
        message_id,
    }))
}

/// POST /api/send-preview-packet: email the developer or ops half of a packet
pub async fn send_preview_packet(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SendPreviewPacketRequest>, JsonRejection>,
) -> Result<Json<SendResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidJson(e.body_text()))?;
    let email = compose_preview_email(&req, &state.config.resend_from_email)?;

    tracing::info!(
        service_id = req.service_id.as_deref().unwrap_or(""),
        packet_type = req.packet_type.as_deref().unwrap_or(""),
        attachments = email.attachments.len(),
        "sending preview packet"
    );
    deliver(&state, &email).await
}

/// POST /api/send-service-report: email one service report
pub async fn send_service_report(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SendServiceReportRequest>, JsonRejection>,
) -> Result<Json<SendResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidJson(e.body_text()))?;
    let email = compose_report_email(
        &req,
        &state.config.resend_from_email,
        chrono::Utc::now().timestamp_millis(),
    )?;

    tracing::info!(
        service_id = req.service_id.as_deref().unwrap_or(""),
        record_id = req.record_id.as_deref().unwrap_or(""),
        attachments = email.attachments.len(),
        "sending service report"
    );
    deliver(&state, &email).await
}
