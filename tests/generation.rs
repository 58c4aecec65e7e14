//! Properties of the document/payload generation engine, exercised through
//! the public API against the demo catalog.

use chrono::{TimeZone, Utc};
use serde_json::{Map, Value};

use service_network::catalog;
use service_network::generator::{
    derive_field_rules, generate_email_payload, generate_failure_example,
    generate_preview_packet, generate_request_body, generate_success_example,
    generate_webhook_payload, generate_welcome_packet, GenerationContext,
};

fn pinned() -> GenerationContext {
    GenerationContext::fixed(Utc.with_ymd_and_hms(2024, 4, 10, 15, 45, 30).unwrap(), 2024)
}

fn all_workflow_names() -> Vec<String> {
    catalog::workflows().into_iter().map(|w| w.name).collect()
}

#[test]
fn test_record_id_rule_first_for_every_demo_service() {
    for service in catalog::mock_services() {
        let rules = derive_field_rules(&service.workflow_names);
        assert_eq!(rules[0].field, "recordId", "service {}", service.id);
        assert!(!rules[0].required);
    }
}

#[test]
fn test_full_catalog_field_rules_in_category_order() {
    let rules = derive_field_rules(&all_workflow_names());
    let fields: Vec<&str> = rules.iter().map(|r| r.field.as_str()).collect();
    assert_eq!(
        fields,
        vec![
            "recordId",
            "email",
            "phone",
            "idNumber",
            "idType",
            "document",
            "documentType",
            "amount",
            "currency",
            "paymentMethod",
            "refundId",
            "refundAmount",
            "data",
            "storageKey",
        ]
    );
}

#[test]
fn test_request_body_contains_example_email_for_any_email_workflow() {
    for names in [
        vec!["Email Verification"],
        vec!["Payment Processing", "Bulk Email Check"],
        vec!["Email"],
    ] {
        let body = generate_request_body(&names);
        assert_eq!(body["email"], "user@example.com", "names: {:?}", names);
    }
}

#[test]
fn test_request_body_json_round_trip() {
    let body = generate_request_body(&all_workflow_names());
    let text = serde_json::to_string(&body).unwrap();
    let parsed: Map<String, Value> = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, body);
}

#[test]
fn test_webhook_reasons_one_per_workflow() {
    for service in catalog::mock_services() {
        let url = service.primary_webhook_url().unwrap_or("https://example.com/hook").to_string();
        let payload = generate_webhook_payload(&service, &url, &mut pinned());
        let reasons = payload["reasons"].as_array().unwrap();
        assert_eq!(reasons.len(), service.workflow_names.len());
        for (reason, name) in reasons.iter().zip(&service.workflow_names) {
            assert_eq!(reason, &Value::String(format!("{} completed successfully", name)));
        }
    }
}

#[test]
fn test_email_payload_keeps_placeholder_attachment() {
    let service = catalog::find_service("svc_document_intake").unwrap();
    let payload = generate_email_payload(&service, "records@acme.example.com", &mut pinned());
    assert_eq!(payload["attachments"][0]["content"], "<html>...</html>");
    assert_eq!(payload["attachments"][0]["contentType"], "text/html");
}

#[test]
fn test_failure_example_always_validation_error() {
    for service in catalog::mock_services() {
        let example = generate_failure_example(&service, "a@example.com", "https://example.com/hook", &mut pinned());
        assert_eq!(example["response"]["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(example["response"]["results"], Value::Null);
    }
}

#[test]
fn test_success_example_completed() {
    let service = catalog::find_service("svc_customer_onboarding").unwrap();
    let example = generate_success_example(&service, "a@example.com", "https://example.com/hook", &mut pinned());
    assert_eq!(example["response"]["status"], "completed");
    assert_eq!(example["webhookPayload"]["status"], "completed");
}

#[test]
fn test_welcome_packet_identical_with_pinned_context() {
    let service = catalog::find_service("svc_customer_onboarding").unwrap();
    let first = generate_welcome_packet(&service, "dev@acme.example.com", None, &mut pinned());
    let second = generate_welcome_packet(&service, "dev@acme.example.com", None, &mut pinned());
    assert_eq!(first.developer_guide, second.developer_guide);
    assert_eq!(first.ops_welcome_guide, second.ops_welcome_guide);
    assert_eq!(first.quick_start_checklist, second.quick_start_checklist);
    assert_eq!(first.webhook_payload_example, second.webhook_payload_example);
    assert_eq!(first.success_example, second.success_example);
    assert_eq!(first.failure_example, second.failure_example);
}

#[test]
fn test_welcome_packets_differ_only_in_ids_without_pinning() {
    let service = catalog::find_service("svc_payments").unwrap();
    let a = generate_welcome_packet(&service, "dev@acme.example.com", None, &mut GenerationContext::system());
    let b = generate_welcome_packet(&service, "dev@acme.example.com", None, &mut GenerationContext::system());
    // the request body example and checklist embed no ids or timestamps
    assert_eq!(a.request_body_example, b.request_body_example);
    assert_eq!(a.quick_start_checklist, b.quick_start_checklist);
    assert_eq!(a.field_rules, b.field_rules);
}

#[test]
fn test_developer_guide_shows_webhook_auth_headers() {
    let service = catalog::find_service("svc_payments").unwrap();
    let packet = generate_preview_packet(&service, "dev@acme.example.com", None, &mut pinned());
    assert!(packet.developer_guide_html.contains("https://ledger.acme.example.com/events"));
    assert!(packet.developer_guide_html.contains("X-Finance-Key"));
    // the secret itself never appears
    assert!(!packet.developer_guide_html.contains("fin_demo_0123456789"));
}
