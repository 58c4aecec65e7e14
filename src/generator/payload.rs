use serde_json::{json, Map, Value};

use super::templates;
use super::GenerationContext;
use crate::models::service::{Service, TokenService, WebhookConnection};
use crate::models::workflow::WorkflowCategory;

/// Placeholder carried by the email payload attachment. The real report is
/// rendered separately and sent through the report endpoint.
pub const ATTACHMENT_PLACEHOLDER: &str = "<html>...</html>";

fn example_result(category: WorkflowCategory) -> Option<Value> {
    let value = match category {
        WorkflowCategory::EmailCheck => json!({
            "email": "user@example.com",
            "valid": true,
            "deliverable": true,
            "disposable": false,
            "score": 0.95
        }),
        WorkflowCategory::PhoneCheck => json!({
            "phone": "+1234567890",
            "valid": true,
            "carrier": "Verizon Wireless",
            "lineType": "mobile",
            "countryCode": "US"
        }),
        WorkflowCategory::IdCheck => json!({
            "verified": true,
            "documentType": "passport",
            "idNumber": "A12345678",
            "expirationDate": "2030-12-31",
            "confidence": 0.98
        }),
        WorkflowCategory::Ocr => json!({
            "extractedText": "JOHN DOE\nPASSPORT NO: A12345678\nEXP: 2030-12-31",
            "documentType": "passport",
            "confidence": 0.96,
            "fields": {
                "fullName": "John Doe",
                "documentNumber": "A12345678",
                "expirationDate": "2030-12-31"
            }
        }),
        WorkflowCategory::Payment => json!({
            "transactionId": "txn_1234567890",
            "amount": 9999,
            "currency": "USD",
            "status": "succeeded",
            "paymentMethod": "card"
        }),
        WorkflowCategory::Refund | WorkflowCategory::Validation | WorkflowCategory::Storage => {
            return None
        }
    };
    Some(value)
}

/// Per-category verification results for `workflow_names`, keyed by
/// [`WorkflowCategory::result_key`].
pub fn example_results<S: AsRef<str>>(workflow_names: &[S]) -> Map<String, Value> {
    let mut results = Map::new();
    for name in workflow_names {
        for category in WorkflowCategory::classify(name.as_ref()) {
            if let (Some(key), Some(value)) = (category.result_key(), example_result(category)) {
                results.insert(key.to_string(), value);
            }
        }
    }
    results
}

/// Distinct category tags for the service's workflows.
fn category_tags(workflow_names: &[String]) -> Vec<Value> {
    let mut tags: Vec<Value> = Vec::new();
    for name in workflow_names {
        for category in WorkflowCategory::classify(name) {
            let tag = json!(category);
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }
    tags
}

/// Example body of the webhook delivered to `webhook_url` after one run of
/// `service`.
pub fn generate_webhook_payload(
    service: &Service,
    webhook_url: &str,
    ctx: &mut GenerationContext,
) -> Value {
    tracing::debug!(
        service_id = %service.id,
        webhook_url,
        workflows = service.workflow_names.len(),
        "generating webhook payload"
    );

    let reasons: Vec<String> = service
        .workflow_names
        .iter()
        .map(|name| format!("{} completed successfully", name))
        .collect();

    json!({
        "serviceId": service.id,
        "serviceName": service.name,
        "recordId": ctx.id("rec"),
        "requestId": ctx.id("req"),
        "timestamp": ctx.timestamp(),
        "status": "completed",
        "workflows": service.workflow_names,
        "results": example_results(&service.workflow_names),
        "tags": category_tags(&service.workflow_names),
        "reasons": reasons,
    })
}

/// Example notification email sent to `email_address` after one run of
/// `service`.
pub fn generate_email_payload(
    service: &Service,
    email_address: &str,
    ctx: &mut GenerationContext,
) -> Value {
    let record_id = ctx.id("rec");
    let workflows = service.workflow_names.join(", ");

    let text = format!(
        "Your {} request has completed successfully.\n\nRecord ID: {}\nWorkflows: {}\n\nThe full report is attached.",
        service.name, record_id, workflows
    );
    let html = templates::render(
        templates::RUN_SUMMARY_EMAIL,
        &json!({
            "service_name": service.name,
            "record_id": record_id,
            "workflows": workflows,
        }),
    );

    json!({
        "to": email_address,
        "subject": format!("Service Report: {}", service.name),
        "body": {
            "text": text,
            "html": html,
        },
        "attachments": [{
            "filename": format!("report-{}.html", service.id),
            "contentType": "text/html",
            "content": ATTACHMENT_PLACEHOLDER,
            "description": "Detailed report for this run",
        }],
        "metadata": {
            "serviceId": service.id,
            "serviceName": service.name,
            "recordId": record_id,
            "timestamp": ctx.timestamp(),
            "workflows": service.workflow_names,
        },
    })
}

/// Shortens a secret to its first and last four characters.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}…{}", head, tail)
    } else {
        "****".to_string()
    }
}

/// Headers a delivery to `connection` would carry, given its token service.
pub fn webhook_auth_headers(connection: &WebhookConnection) -> Map<String, Value> {
    let mut headers = Map::new();
    headers.insert("Content-Type".into(), json!("application/json"));
    match &connection.token_service {
        Some(TokenService::Oauth { .. }) => {
            headers.insert("Authorization".into(), json!("Bearer <access_token>"));
        }
        Some(TokenService::Custom { custom_config }) => {
            headers.insert(
                custom_config.header_name.clone(),
                json!(mask(&custom_config.header_value)),
            );
        }
        None => {}
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::service::{CustomTokenConfig, OAuthConfig};
    use chrono::{TimeZone, Utc};

    fn service(names: &[&str]) -> Service {
        Service {
            id: "svc_test".into(),
            name: "Onboarding".into(),
            workflow_names: names.iter().map(|n| n.to_string()).collect(),
            estimated_cost_per_run: 0.25,
            webhook_connections: vec![],
            email_destinations: vec![],
            token_connections: vec![],
        }
    }

    fn ctx() -> GenerationContext {
        GenerationContext::fixed(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(), 42)
    }

    #[test]
    fn test_reasons_match_workflows() {
        let svc = service(&["Email Verification", "Sentiment Analysis", "Payment Processing"]);
        let payload = generate_webhook_payload(&svc, "https://hooks.example.com/in", &mut ctx());
        let reasons = payload["reasons"].as_array().unwrap();
        assert_eq!(reasons.len(), svc.workflow_names.len());
        for (reason, name) in reasons.iter().zip(&svc.workflow_names) {
            assert_eq!(reason.as_str().unwrap(), format!("{} completed successfully", name));
        }
    }

    #[test]
    fn test_webhook_envelope() {
        let svc = service(&["Email Verification", "Refund Processing"]);
        let payload = generate_webhook_payload(&svc, "https://hooks.example.com/in", &mut ctx());
        assert_eq!(payload["status"], "completed");
        assert_eq!(payload["serviceId"], "svc_test");
        assert_eq!(payload["timestamp"], "2024-03-01T12:00:00.000Z");
        assert!(payload["recordId"].as_str().unwrap().starts_with("rec_"));
        assert!(payload["requestId"].as_str().unwrap().starts_with("req_"));
        let results = payload["results"].as_object().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results["emailVerification"]["valid"], true);
        assert_eq!(payload["tags"], json!(["email_check", "refund"]));
    }

    #[test]
    fn test_email_payload_shape() {
        let svc = service(&["Phone Verification"]);
        let payload = generate_email_payload(&svc, "ops@example.com", &mut ctx());
        assert_eq!(payload["to"], "ops@example.com");
        assert_eq!(payload["subject"], "Service Report: Onboarding");
        assert_eq!(payload["attachments"][0]["content"], ATTACHMENT_PLACEHOLDER);
        assert_eq!(payload["attachments"][0]["filename"], "report-svc_test.html");
        assert_eq!(payload["metadata"]["workflows"], json!(["Phone Verification"]));
    }

    #[test]
    fn test_auth_headers_per_token_service() {
        let mut conn = WebhookConnection {
            id: "wh_1".into(),
            url: "https://hooks.example.com/in".into(),
            name: "Primary".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            token_service: None,
        };
        assert_eq!(webhook_auth_headers(&conn).len(), 1);

        conn.token_service = Some(TokenService::Oauth {
            oauth_config: OAuthConfig {
                client_id: "id".into(),
                client_secret: "secret".into(),
                token_url: "https://auth.example.com/token".into(),
                scope: None,
            },
        });
        assert_eq!(webhook_auth_headers(&conn)["Authorization"], "Bearer <access_token>");

        conn.token_service = Some(TokenService::Custom {
            custom_config: CustomTokenConfig {
                header_name: "X-Api-Key".into(),
                header_value: "sk_live_abcdefgh1234".into(),
            },
        });
        assert_eq!(webhook_auth_headers(&conn)["X-Api-Key"], "sk_l…1234");
    }
}
