//! Turns send requests into provider emails, validating required fields.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::resend::{Attachment, OutboundEmail};
use crate::errors::AppError;
use crate::generator::templates;
use crate::models::packet::{PacketType, PreviewPacket};

// ── Request DTOs ─────────────────────────────────────────────

/// Body of `POST /api/send-preview-packet`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPreviewPacketRequest {
    pub to: Option<String>,
    pub service_name: Option<String>,
    pub service_id: Option<String>,
    pub packet_type: Option<String>,
    pub developer_guide_html: Option<String>,
    pub ops_welcome_guide_html: Option<String>,
    pub quick_start_checklist_html: Option<String>,
    pub request_body_json: Option<String>,
    pub webhook_payload_json: Option<String>,
    pub email_payload_json: Option<String>,
    pub success_example_json: Option<String>,
    pub failure_example_json: Option<String>,
}

impl SendPreviewPacketRequest {
    /// The request a client would post for `packet`.
    pub fn from_packet(
        to: &str,
        service_name: &str,
        service_id: &str,
        packet_type: PacketType,
        packet: &PreviewPacket,
    ) -> Self {
        Self {
            to: Some(to.to_string()),
            service_name: Some(service_name.to_string()),
            service_id: Some(service_id.to_string()),
            packet_type: Some(packet_type.as_str().to_string()),
            developer_guide_html: Some(packet.developer_guide_html.clone()),
            ops_welcome_guide_html: Some(packet.ops_welcome_guide_html.clone()),
            quick_start_checklist_html: Some(packet.quick_start_checklist_html.clone()),
            request_body_json: Some(packet.request_body_json.clone()),
            webhook_payload_json: Some(packet.webhook_payload_json.clone()),
            email_payload_json: Some(packet.email_payload_json.clone()),
            success_example_json: Some(packet.success_example_json.clone()),
            failure_example_json: Some(packet.failure_example_json.clone()),
        }
    }
}

/// Body of `POST /api/send-service-report`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendServiceReportRequest {
    pub to: Option<String>,
    pub service_name: Option<String>,
    pub service_id: Option<String>,
    pub report_html: Option<String>,
    pub record_id: Option<String>,
}

/// Empty strings count as missing.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// ── Composition ──────────────────────────────────────────────

/// Validates a preview-packet request and builds the email carrying it.
///
/// Developer packets attach the guide and five JSON examples; missing JSON
/// parts are sent as `{}`. Ops packets attach the welcome guide and checklist.
pub fn compose_preview_email(
    req: &SendPreviewPacketRequest,
    from: &str,
) -> Result<OutboundEmail, AppError> {
    let (Some(to), Some(service_name), Some(packet_type)) = (
        present(&req.to),
        present(&req.service_name),
        present(&req.packet_type),
    ) else {
        return Err(AppError::Validation(
            "Missing required fields: to, serviceName, packetType".to_string(),
        ));
    };

    let packet_type: PacketType = packet_type.parse().map_err(|_| {
        AppError::Validation(format!(
            "Invalid packetType '{}'. Must be 'developer' or 'ops'",
            packet_type
        ))
    })?;

    let (subject, html, attachments) = match packet_type {
        PacketType::Developer => {
            let guide = present(&req.developer_guide_html)
                .ok_or_else(|| AppError::Validation("Missing developer guide content".to_string()))?;
            let json_part = |v: &Option<String>| present(v).unwrap_or("{}").to_string();
            let attachments = vec![
                Attachment::from_text("developer-guide.html", guide),
                Attachment::from_text("request-body.json", &json_part(&req.request_body_json)),
                Attachment::from_text("webhook-payload.json", &json_part(&req.webhook_payload_json)),
                Attachment::from_text("email-payload.json", &json_part(&req.email_payload_json)),
                Attachment::from_text("success-example.json", &json_part(&req.success_example_json)),
                Attachment::from_text("failure-example.json", &json_part(&req.failure_example_json)),
            ];
            let html = templates::render(
                templates::DEVELOPER_PACKET_EMAIL,
                &json!({ "service_name": service_name }),
            );
            (format!("Developer Guide: {}", service_name), html, attachments)
        }
        PacketType::Ops => {
            let (Some(welcome), Some(checklist)) = (
                present(&req.ops_welcome_guide_html),
                present(&req.quick_start_checklist_html),
            ) else {
                return Err(AppError::Validation("Missing ops guide content".to_string()));
            };
            let attachments = vec![
                Attachment::from_text("welcome-guide.html", welcome),
                Attachment::from_text("quick-start-checklist.html", checklist),
            ];
            let html = templates::render(
                templates::OPS_PACKET_EMAIL,
                &json!({ "service_name": service_name }),
            );
            (format!("Welcome Guide: {}", service_name), html, attachments)
        }
    };

    Ok(OutboundEmail {
        from: from.to_string(),
        to: vec![to.to_string()],
        subject,
        html,
        attachments,
    })
}

/// Validates a service-report request and builds the email carrying it.
///
/// The report is attached as `report-{serviceId}-{epoch_millis}.html` only
/// when `reportHtml` is present.
pub fn compose_report_email(
    req: &SendServiceReportRequest,
    from: &str,
    epoch_millis: i64,
) -> Result<OutboundEmail, AppError> {
    let (Some(to), Some(service_name), Some(service_id)) = (
        present(&req.to),
        present(&req.service_name),
        present(&req.service_id),
    ) else {
        return Err(AppError::Validation(
            "Missing required fields: to, serviceName, serviceId".to_string(),
        ));
    };

    let attachments = present(&req.report_html)
        .map(|html| {
            vec![Attachment::from_text(
                format!("report-{}-{}.html", service_id, epoch_millis),
                html,
            )]
        })
        .unwrap_or_default();

    let html = templates::render(
        templates::REPORT_EMAIL,
        &json!({
            "service_name": service_name,
            "service_id": service_id,
            "record_id": present(&req.record_id),
            "has_attachment": !attachments.is_empty(),
        }),
    );

    Ok(OutboundEmail {
        from: from.to_string(),
        to: vec![to.to_string()],
        subject: format!("Service Report: {}", service_name),
        html,
        attachments,
    })
}
