//! HTML guides and packet assembly.

use serde_json::{json, Map, Value};

use super::examples::{generate_failure_example, generate_success_example};
use super::fields::derive_field_rules;
use super::payload::{generate_email_payload, generate_webhook_payload, webhook_auth_headers};
use super::request::generate_request_body;
use super::templates::{self, pretty};
use super::GenerationContext;
use crate::models::packet::{FieldRule, PreviewPacket, WelcomePacket};
use crate::models::service::Service;
use crate::models::workflow::WorkflowCategory;

pub const API_BASE_URL: &str = "https://api.example.com/v1";
/// Used in examples when the service has no webhook configured.
pub const PLACEHOLDER_WEBHOOK_URL: &str = "https://your-app.example.com/webhooks/service-network";
pub const TRIAL_CREDIT_USD: f64 = 10.0;

const PREVIEW_BANNER: &str =
    "Preview: these documents are generated before the service is created. Ids and timestamps are examples.";

/// Fixed onboarding steps. The first two are done by the time a packet exists.
const CHECKLIST: [(&str, &str); 6] = [
    ("Create your service", "Pick the workflows your service runs and give it a name."),
    ("Configure destinations", "Choose the webhook URL or email address that receives results."),
    ("Share the developer guide", "Send the developer guide to the engineers integrating the API."),
    ("Send a test request", "Submit one request with test data using the example request body."),
    ("Confirm results arrive", "Check that the result shows up at your webhook or in your inbox."),
    ("Go live", "Switch your integration to real customer data."),
];
const COMPLETED_STEPS: usize = 2;

pub fn process_endpoint(service_id: &str) -> String {
    format!("{}/services/{}/process", API_BASE_URL, service_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Welcome,
    Preview,
}

impl Mode {
    fn banner(self) -> Option<&'static str> {
        match self {
            Mode::Welcome => None,
            Mode::Preview => Some(PREVIEW_BANNER),
        }
    }
}

/// Everything the documents are rendered from.
struct Parts {
    field_rules: Vec<FieldRule>,
    request_body: Value,
    webhook_payload: Value,
    email_payload: Value,
    success_example: Value,
    failure_example: Value,
    webhook_url: String,
}

fn build_parts(
    service: &Service,
    email_address: &str,
    webhook_url: Option<&str>,
    ctx: &mut GenerationContext,
) -> Parts {
    let webhook_url = webhook_url
        .or_else(|| service.primary_webhook_url())
        .unwrap_or(PLACEHOLDER_WEBHOOK_URL)
        .to_string();

    Parts {
        field_rules: derive_field_rules(&service.workflow_names),
        request_body: Value::Object(generate_request_body(&service.workflow_names)),
        webhook_payload: generate_webhook_payload(service, &webhook_url, ctx),
        email_payload: generate_email_payload(service, email_address, ctx),
        success_example: generate_success_example(service, email_address, &webhook_url, ctx),
        failure_example: generate_failure_example(service, email_address, &webhook_url, ctx),
        webhook_url,
    }
}

/// Builds the full onboarding packet for a newly created service.
pub fn generate_welcome_packet(
    service: &Service,
    email_address: &str,
    webhook_url: Option<&str>,
    ctx: &mut GenerationContext,
) -> WelcomePacket {
    tracing::debug!(service_id = %service.id, "generating welcome packet");
    let parts = build_parts(service, email_address, webhook_url, ctx);

    WelcomePacket {
        service_id: service.id.clone(),
        service_name: service.name.clone(),
        generated_at: ctx.now(),
        developer_guide: developer_guide(service, email_address, &parts, Mode::Welcome),
        ops_welcome_guide: ops_welcome_guide(service, email_address, &parts, Mode::Welcome),
        quick_start_checklist: quick_start_checklist(service, Mode::Welcome),
        request_body_example: pretty(&parts.request_body),
        webhook_payload_example: pretty(&parts.webhook_payload),
        email_payload_example: pretty(&parts.email_payload),
        success_example: pretty(&parts.success_example),
        failure_example: pretty(&parts.failure_example),
        field_rules: parts.field_rules,
    }
}

/// Builds the packet shown before a service is created.
pub fn generate_preview_packet(
    service: &Service,
    email_address: &str,
    webhook_url: Option<&str>,
    ctx: &mut GenerationContext,
) -> PreviewPacket {
    tracing::debug!(service_id = %service.id, "generating preview packet");
    let parts = build_parts(service, email_address, webhook_url, ctx);

    PreviewPacket {
        developer_guide_html: developer_guide(service, email_address, &parts, Mode::Preview),
        ops_welcome_guide_html: ops_welcome_guide(service, email_address, &parts, Mode::Preview),
        quick_start_checklist_html: quick_start_checklist(service, Mode::Preview),
        request_body_json: pretty(&parts.request_body),
        webhook_payload_json: pretty(&parts.webhook_payload),
        email_payload_json: pretty(&parts.email_payload),
        success_example_json: pretty(&parts.success_example),
        failure_example_json: pretty(&parts.failure_example),
    }
}

fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn trial_runs(cost_per_run: f64) -> Option<u64> {
    if cost_per_run > 0.0 {
        Some((TRIAL_CREDIT_USD / cost_per_run).floor() as u64)
    } else {
        None
    }
}

/// Template fields shared by every guide.
fn base_context(service: &Service, title: String, mode: Mode) -> Map<String, Value> {
    let runs = trial_runs(service.estimated_cost_per_run);
    let mut data = Map::new();
    data.insert("title".into(), Value::from(title));
    data.insert("banner".into(), mode.banner().map(Value::from).unwrap_or(Value::Null));
    data.insert("service_id".into(), Value::from(service.id.as_str()));
    data.insert("service_name".into(), Value::from(service.name.as_str()));
    data.insert("cost_per_run".into(), Value::from(format_usd(service.estimated_cost_per_run)));
    data.insert("trial_credit".into(), Value::from(format_usd(TRIAL_CREDIT_USD)));
    data.insert("has_trial_runs".into(), Value::from(runs.is_some()));
    data.insert("trial_runs".into(), runs.map(Value::from).unwrap_or(Value::Null));
    data
}

fn developer_guide(service: &Service, email_address: &str, parts: &Parts, mode: Mode) -> String {
    let headers = match service.webhook_for(&parts.webhook_url) {
        Some(connection) => Value::Object(webhook_auth_headers(connection)),
        None => json!({ "Content-Type": "application/json" }),
    };

    let mut data = base_context(service, format!("{} Developer Guide", service.name), mode);
    data.extend([
        ("workflows".to_string(), json!(service.workflow_names)),
        ("webhook_url".to_string(), json!(parts.webhook_url)),
        ("email_address".to_string(), json!(email_address)),
        ("endpoint".to_string(), json!(process_endpoint(&service.id))),
        ("request_body".to_string(), parts.request_body.clone()),
        ("field_rules".to_string(), json!(parts.field_rules)),
        ("headers".to_string(), headers),
        ("webhook_payload".to_string(), parts.webhook_payload.clone()),
        ("email_payload".to_string(), parts.email_payload.clone()),
        ("success_response".to_string(), parts.success_example["response"].clone()),
        ("failure_response".to_string(), parts.failure_example["response"].clone()),
    ]);

    templates::render(templates::DEVELOPER_GUIDE, &data)
}

/// One plain-language line per workflow.
fn plain_checks(service: &Service) -> Vec<Value> {
    service
        .workflow_names
        .iter()
        .map(|name| {
            let categories = WorkflowCategory::classify(name);
            let what = if categories.is_empty() {
                format!("runs the {} step", name)
            } else {
                categories
                    .iter()
                    .map(|c| c.plain_description())
                    .collect::<Vec<_>>()
                    .join(" and ")
            };
            json!({ "name": name, "what": what })
        })
        .collect()
}

fn ops_welcome_guide(service: &Service, email_address: &str, parts: &Parts, mode: Mode) -> String {
    let mut data = base_context(service, format!("Welcome to {}", service.name), mode);
    data.extend([
        ("checks".to_string(), Value::Array(plain_checks(service))),
        ("workflow_count".to_string(), json!(service.workflow_names.len())),
        ("webhook_url".to_string(), json!(parts.webhook_url)),
        ("email_address".to_string(), json!(email_address)),
    ]);

    templates::render(templates::OPS_WELCOME_GUIDE, &data)
}

fn quick_start_checklist(service: &Service, mode: Mode) -> String {
    let steps: Vec<Value> = CHECKLIST
        .iter()
        .enumerate()
        .map(|(i, (title, detail))| {
            json!({
                "number": i + 1,
                "title": title,
                "detail": detail,
                "completed": i < COMPLETED_STEPS,
            })
        })
        .collect();

    let mut data = base_context(service, format!("{} Quick-Start Checklist", service.name), mode);
    data.extend([
        ("steps".to_string(), Value::Array(steps)),
        ("completed_count".to_string(), json!(COMPLETED_STEPS)),
        ("total_count".to_string(), json!(CHECKLIST.len())),
    ]);

    templates::render(templates::QUICK_START_CHECKLIST, &data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn service() -> Service {
        Service {
            id: "svc_123".into(),
            name: "Acme <KYC>".into(),
            workflow_names: vec![
                "Email Verification".into(),
                "Phone Verification".into(),
                "Payment Processing".into(),
            ],
            estimated_cost_per_run: 0.5,
            webhook_connections: vec![],
            email_destinations: vec![],
            token_connections: vec![],
        }
    }

    fn ctx() -> GenerationContext {
        GenerationContext::fixed(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(), 99)
    }

    #[test]
    fn test_developer_guide_sections() {
        let packet = generate_welcome_packet(&service(), "dev@example.com", None, &mut ctx());
        let guide = &packet.developer_guide;
        assert!(guide.contains("https://api.example.com/v1/services/svc_123/process"));
        assert!(guide.contains("Acme &lt;KYC&gt; Developer Guide"));
        assert!(guide.contains("<th>Field</th>"));
        assert!(guide.contains("recordId"));
        assert!(guide.contains(PLACEHOLDER_WEBHOOK_URL));
        assert!(guide.contains("Trial credits"));
        assert!(guide.contains("about 20 test runs"));
        assert!(!guide.contains("class=\"banner\""));
    }

    #[test]
    fn test_field_rule_table_rows() {
        let packet = generate_welcome_packet(&service(), "dev@example.com", None, &mut ctx());
        let guide = &packet.developer_guide;
        assert!(guide.contains(
            "<tr><td><code class=\"inline\">recordId</code></td><td>string</td><td><span class=\"badge optional\">optional</span></td>"
        ));
        assert!(guide.contains("<tr><td><code class=\"inline\">email</code></td>"));
        assert!(guide.contains("<span class=\"badge required\">required</span>"));
        // JSON blocks are escaped inside <pre>
        assert!(guide.contains("&quot;recordId&quot;: &quot;rec_12345&quot;"));
    }

    #[test]
    fn test_checklist_first_two_completed() {
        let packet = generate_welcome_packet(&service(), "dev@example.com", None, &mut ctx());
        let checklist = &packet.quick_start_checklist;
        assert_eq!(checklist.matches("<li class=\"completed\">").count(), 2);
        assert_eq!(checklist.matches("<li class=\"pending\">").count(), 4);
        assert!(checklist.contains("2 of 6 steps complete"));
    }

    #[test]
    fn test_ops_guide_uses_plain_language() {
        let packet = generate_welcome_packet(&service(), "ops@example.com", Some("https://hooks.acme.test/in"), &mut ctx());
        let guide = &packet.ops_welcome_guide;
        assert!(guide.contains("checks that an email address is real"));
        assert!(guide.contains("https://hooks.acme.test/in"));
        assert!(guide.contains("Action Required"));
        assert!(!guide.contains("VALIDATION_ERROR"));
    }

    #[test]
    fn test_preview_packet_has_banner_and_json() {
        let packet = generate_preview_packet(&service(), "dev@example.com", None, &mut ctx());
        assert!(packet.developer_guide_html.contains("class=\"banner\""));
        assert!(packet.ops_welcome_guide_html.contains("class=\"banner\""));
        assert!(packet.quick_start_checklist_html.contains("class=\"banner\""));
        let body: Value = serde_json::from_str(&packet.request_body_json).unwrap();
        assert_eq!(body["email"], "user@example.com");
        let failure: Value = serde_json::from_str(&packet.failure_example_json).unwrap();
        assert_eq!(failure["response"]["error"]["code"], "VALIDATION_ERROR");
    }

    #[test]
    fn test_welcome_packet_is_reproducible_with_fixed_context() {
        let a = generate_welcome_packet(&service(), "dev@example.com", None, &mut ctx());
        let b = generate_welcome_packet(&service(), "dev@example.com", None, &mut ctx());
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_cost_skips_run_estimate() {
        let mut svc = service();
        svc.estimated_cost_per_run = 0.0;
        let packet = generate_welcome_packet(&svc, "dev@example.com", None, &mut ctx());
        assert!(!packet.developer_guide.contains("test runs"));
    }
}
