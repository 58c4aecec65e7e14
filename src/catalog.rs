//! Mock workflow catalog and demo services.
//!
//! Nothing here is persisted; every call rebuilds the same fixed data.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::service::{
    CustomTokenConfig, EmailDestination, OAuthConfig, Service, TokenConnection, TokenService,
    WebhookConnection,
};
use crate::models::workflow::Workflow;

fn at(epoch_secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(epoch_secs, 0).single().unwrap_or_default()
}

pub fn workflows() -> Vec<Workflow> {
    vec![
        Workflow::new(
            "wf_email",
            "Email Verification",
            "Confirms an email address exists, is deliverable and is not disposable.",
            0.05,
        ),
        Workflow::new(
            "wf_phone",
            "Phone Verification",
            "Validates a phone number and looks up its carrier and line type.",
            0.08,
        ),
        Workflow::new(
            "wf_id",
            "ID Check",
            "Verifies a government-issued identity document.",
            0.50,
        ),
        Workflow::new(
            "wf_ocr",
            "Document OCR",
            "Extracts text and structured fields from an uploaded document.",
            0.25,
        ),
        Workflow::new(
            "wf_payment",
            "Payment Processing",
            "Charges a card, bank account or wallet.",
            0.30,
        ),
        Workflow::new(
            "wf_refund",
            "Refund Processing",
            "Refunds all or part of an earlier payment.",
            0.15,
        ),
        Workflow::new(
            "wf_validation",
            "Data Validation",
            "Checks submitted data against custom rules.",
            0.02,
        ),
        Workflow::new(
            "wf_storage",
            "Secure Storage",
            "Stores submitted documents encrypted at rest.",
            0.01,
        ),
    ]
}

/// Sum of catalog costs for `workflow_names`. Names outside the catalog cost nothing.
pub fn estimate_cost<S: AsRef<str>>(workflow_names: &[S]) -> f64 {
    let catalog = workflows();
    let total: f64 = workflow_names
        .iter()
        .filter_map(|name| catalog.iter().find(|w| w.name == name.as_ref()))
        .map(|w| w.cost_per_run)
        .sum();
    (total * 100.0).round() / 100.0
}

fn service(id: &str, name: &str, workflow_names: &[&str]) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        workflow_names: workflow_names.iter().map(|n| n.to_string()).collect(),
        estimated_cost_per_run: estimate_cost(workflow_names),
        webhook_connections: Vec::new(),
        email_destinations: Vec::new(),
        token_connections: Vec::new(),
    }
}

pub fn mock_services() -> Vec<Service> {
    let mut onboarding = service(
        "svc_customer_onboarding",
        "Customer Onboarding",
        &["Email Verification", "Phone Verification", "ID Check"],
    );
    onboarding.webhook_connections.push(WebhookConnection {
        id: "wh_onboarding".into(),
        url: "https://hooks.acme.example.com/onboarding".into(),
        name: "Acme CRM".into(),
        created_at: at(1_704_067_200),
        token_service: Some(TokenService::Oauth {
            oauth_config: OAuthConfig {
                client_id: "acme-crm".into(),
                client_secret: "demo-client-secret".into(),
                token_url: "https://auth.acme.example.com/oauth/token".into(),
                scope: Some("webhooks:write".into()),
            },
        }),
    });
    onboarding.email_destinations.push(EmailDestination {
        id: "em_onboarding".into(),
        email: "onboarding@acme.example.com".into(),
        name: "Onboarding team".into(),
        created_at: at(1_704_067_200),
    });

    let mut payments = service(
        "svc_payments",
        "Payments & Refunds",
        &["Payment Processing", "Refund Processing", "Data Validation"],
    );
    let finance_token = TokenService::Custom {
        custom_config: CustomTokenConfig {
            header_name: "X-Finance-Key".into(),
            header_value: "fin_demo_0123456789".into(),
        },
    };
    payments.webhook_connections.push(WebhookConnection {
        id: "wh_payments".into(),
        url: "https://ledger.acme.example.com/events".into(),
        name: "Ledger".into(),
        created_at: at(1_706_745_600),
        token_service: Some(finance_token.clone()),
    });
    payments.token_connections.push(TokenConnection {
        id: "tok_finance".into(),
        name: "Finance API key".into(),
        token_service: finance_token,
        created_at: at(1_706_745_600),
    });

    let mut documents = service(
        "svc_document_intake",
        "Document Intake",
        &["Document OCR", "Secure Storage"],
    );
    documents.email_destinations.push(EmailDestination {
        id: "em_documents".into(),
        email: "records@acme.example.com".into(),
        name: "Records".into(),
        created_at: at(1_709_251_200),
    });

    vec![onboarding, payments, documents]
}

pub fn find_service(id: &str) -> Option<Service> {
    mock_services().into_iter().find(|s| s.id == id)
}
