use serde_json::{json, Value};

use super::payload::{example_results, generate_email_payload, generate_webhook_payload};
use super::request::generate_request_body;
use super::templates;
use super::GenerationContext;
use crate::models::service::Service;

/// A complete successful run: request, synchronous response, and the
/// webhook and email deliveries that follow, all sharing one record id.
pub fn generate_success_example(
    service: &Service,
    email_address: &str,
    webhook_url: &str,
    ctx: &mut GenerationContext,
) -> Value {
    let record_id = ctx.id("rec");
    let request_id = ctx.id("req");

    let mut request = generate_request_body(&service.workflow_names);
    request.insert("recordId".into(), json!(record_id));

    let mut webhook = generate_webhook_payload(service, webhook_url, ctx);
    webhook["recordId"] = json!(record_id);
    webhook["requestId"] = json!(request_id);
    webhook["status"] = json!("completed");

    let mut email = generate_email_payload(service, email_address, ctx);
    email["metadata"]["recordId"] = json!(record_id);
    email["metadata"]["requestId"] = json!(request_id);
    email["metadata"]["status"] = json!("completed");

    json!({
        "description": format!(
            "A successful run of {}: every workflow completed and results were delivered.",
            service.name
        ),
        "request": request,
        "response": {
            "status": "completed",
            "requestId": request_id,
            "recordId": record_id,
            "processedAt": ctx.timestamp(),
            "results": example_results(&service.workflow_names),
        },
        "webhookPayload": webhook,
        "emailPayload": email,
    })
}

/// A run rejected by input validation, with the matching error webhook,
/// error notification email, and remediation steps.
pub fn generate_failure_example(
    service: &Service,
    email_address: &str,
    webhook_url: &str,
    ctx: &mut GenerationContext,
) -> Value {
    let record_id = ctx.id("rec");
    let request_id = ctx.id("req");

    let error = json!({
        "code": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": [
            {
                "field": "email",
                "message": "Invalid email format",
                "value": "invalid-email-format",
            },
            {
                "field": "phone",
                "message": "Phone number must be in E.164 format (e.g. +1234567890)",
                "value": "123",
            },
        ],
    });

    let mut webhook = generate_webhook_payload(service, webhook_url, ctx);
    webhook["recordId"] = json!(record_id);
    webhook["requestId"] = json!(request_id);
    webhook["status"] = json!("failed");
    webhook["results"] = Value::Null;
    webhook["error"] = error.clone();
    webhook["reasons"] = json!(["Invalid email format", "Invalid phone number format"]);

    let mut email = generate_email_payload(service, email_address, ctx);
    email["subject"] = json!(format!("Action Required: {} request failed", service.name));
    email["body"] = json!({
        "text": format!(
            "Your {} request could not be processed.\n\nRecord ID: {}\nError: VALIDATION_ERROR - Request validation failed\n\n- email: Invalid email format\n- phone: Phone number must be in E.164 format\n\nCorrect the highlighted fields and submit the request again.",
            service.name, record_id
        ),
        "html": templates::render(
            templates::RUN_FAILURE_EMAIL,
            &json!({ "service_name": service.name, "record_id": record_id }),
        ),
    });
    email["attachments"] = json!([]);
    email["metadata"]["recordId"] = json!(record_id);
    email["metadata"]["requestId"] = json!(request_id);
    email["metadata"]["status"] = json!("failed");

    json!({
        "description": format!(
            "A failed run of {}: the request was rejected because required fields were malformed.",
            service.name
        ),
        "request": {
            "recordId": record_id,
            "email": "invalid-email-format",
            "phone": "123",
        },
        "response": {
            "status": "failed",
            "requestId": request_id,
            "recordId": record_id,
            "processedAt": ctx.timestamp(),
            "error": error,
            "results": null,
        },
        "webhookPayload": webhook,
        "emailPayload": email,
        "howToFix": [
            "Check that the email address contains an @ and a valid domain (e.g. user@example.com)",
            "Send phone numbers in E.164 format, including the country code (e.g. +1234567890)",
            "Compare your request against the field rules in the developer guide",
            "Resubmit the corrected request with the same recordId so results stay linked",
        ],
    })
}
