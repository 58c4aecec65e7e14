use serde_json::{json, Map, Value};

use crate::models::workflow::WorkflowCategory;

/// Example `(field, value)` pairs a category writes into a request body.
fn example_values(category: WorkflowCategory) -> Vec<(&'static str, Value)> {
    match category {
        WorkflowCategory::EmailCheck => vec![("email", json!("user@example.com"))],
        WorkflowCategory::PhoneCheck => vec![("phone", json!("+1234567890"))],
        WorkflowCategory::IdCheck => vec![
            ("idNumber", json!("A12345678")),
            ("idType", json!("passport")),
        ],
        WorkflowCategory::Ocr => vec![
            ("document", json!("base64_encoded_document_data")),
            ("documentType", json!("passport")),
        ],
        WorkflowCategory::Payment => vec![
            ("amount", json!(9999)),
            ("currency", json!("USD")),
            ("paymentMethod", json!("card")),
        ],
        WorkflowCategory::Refund => vec![
            ("refundId", json!("ref_12345")),
            ("refundAmount", json!(5000)),
        ],
        WorkflowCategory::Validation => vec![("data", json!({ "key": "value" }))],
        WorkflowCategory::Storage => vec![("storageKey", json!("documents/user_12345"))],
    }
}

/// Builds an example process request for `workflow_names`.
///
/// Keys keep insertion order. When two workflows write the same field the
/// later one wins, but the field keeps its first position.
pub fn generate_request_body<S: AsRef<str>>(workflow_names: &[S]) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("recordId".to_string(), json!("rec_12345"));
    for name in workflow_names {
        for category in WorkflowCategory::classify(name.as_ref()) {
            for (field, value) in example_values(category) {
                body.insert(field.to_string(), value);
            }
        }
    }
    body
}
