use crate::models::packet::FieldRule;
use crate::models::workflow::WorkflowCategory;

/// The optional tracking id every process request accepts.
fn record_id_rule() -> FieldRule {
    FieldRule::new(
        "recordId",
        "Optional unique identifier for tracking this record in your system",
        false,
        "string",
        &["rec_12345", "user_abc_789"],
    )
}

/// Rules contributed by one category, in output order.
pub fn rules_for(category: WorkflowCategory) -> Vec<FieldRule> {
    match category {
        WorkflowCategory::EmailCheck => vec![FieldRule::new(
            "email",
            "Email address to verify. Must be a valid email format.",
            true,
            "email",
            &["user@example.com", "john.doe@company.com"],
        )],
        WorkflowCategory::PhoneCheck => vec![FieldRule::new(
            "phone",
            "Phone number in E.164 format, including the country code.",
            true,
            "phone",
            &["+1234567890", "+442071234567"],
        )],
        WorkflowCategory::IdCheck => vec![
            FieldRule::new(
                "idNumber",
                "Government-issued ID number as printed on the document.",
                true,
                "string",
                &["A12345678", "D1234567"],
            ),
            FieldRule::new(
                "idType",
                "Type of ID document being verified.",
                true,
                "enum",
                &["passport", "drivers_license", "national_id"],
            ),
        ],
        WorkflowCategory::Ocr => vec![
            FieldRule::new(
                "document",
                "Base64-encoded image or PDF of the document to read.",
                true,
                "base64",
                &["base64_encoded_document_data"],
            ),
            FieldRule::new(
                "documentType",
                "Type of document being processed.",
                true,
                "enum",
                &["passport", "drivers_license", "invoice", "receipt"],
            ),
        ],
        WorkflowCategory::Payment => vec![
            FieldRule::new(
                "amount",
                "Amount to charge in the smallest currency unit (e.g. cents).",
                true,
                "integer",
                &["9999", "500"],
            ),
            FieldRule::new(
                "currency",
                "Three-letter ISO 4217 currency code.",
                true,
                "string",
                &["USD", "EUR", "GBP"],
            ),
            FieldRule::new(
                "paymentMethod",
                "Payment method used for the charge.",
                true,
                "enum",
                &["card", "bank_transfer", "wallet"],
            ),
        ],
        WorkflowCategory::Refund => vec![
            FieldRule::new(
                "refundId",
                "Identifier of the payment being refunded.",
                true,
                "string",
                &["ref_12345"],
            ),
            FieldRule::new(
                "refundAmount",
                "Amount to refund in the smallest currency unit.",
                true,
                "integer",
                &["5000"],
            ),
        ],
        WorkflowCategory::Validation => vec![FieldRule::new(
            "data",
            "Arbitrary JSON object to validate against your rules.",
            true,
            "object",
            &["{\"key\": \"value\"}"],
        )],
        WorkflowCategory::Storage => vec![FieldRule::new(
            "storageKey",
            "Path under which the submitted documents are stored.",
            true,
            "string",
            &["documents/user_12345"],
        )],
    }
}

/// Derives the field rules for a process request covering `workflow_names`.
///
/// The first rule is always the optional `recordId`. Each name then adds the
/// rules of every category it matches. Two names in the same category add
/// the same rules twice; callers that want a unique set must de-duplicate.
pub fn derive_field_rules<S: AsRef<str>>(workflow_names: &[S]) -> Vec<FieldRule> {
    let mut rules = vec![record_id_rule()];
    for name in workflow_names {
        for category in WorkflowCategory::classify(name.as_ref()) {
            rules.extend(rules_for(category));
        }
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(rules: &[FieldRule]) -> Vec<&str> {
        rules.iter().map(|r| r.field.as_str()).collect()
    }

    #[test]
    fn test_record_id_always_first_and_optional() {
        for names in [vec![], vec!["Unknown Workflow"], vec!["Payment Processing", "Email Verification"]] {
            let rules = derive_field_rules(&names);
            assert_eq!(rules[0].field, "recordId");
            assert!(!rules[0].required);
        }
    }

    #[test]
    fn test_rules_follow_workflow_order() {
        let rules = derive_field_rules(&["Phone Verification", "ID Check", "Document OCR"]);
        assert_eq!(
            fields(&rules),
            vec!["recordId", "phone", "idNumber", "idType", "document", "documentType"]
        );
    }

    #[test]
    fn test_payment_and_refund_rules() {
        let rules = derive_field_rules(&["Payment Processing", "Refund Processing"]);
        assert_eq!(
            fields(&rules),
            vec!["recordId", "amount", "currency", "paymentMethod", "refundId", "refundAmount"]
        );
    }

    #[test]
    fn test_duplicate_matches_are_kept() {
        let rules = derive_field_rules(&["Email Verification", "Email Deliverability"]);
        assert_eq!(fields(&rules), vec!["recordId", "email", "email"]);
    }

    #[test]
    fn test_unknown_workflow_contributes_nothing() {
        let rules = derive_field_rules(&["Sentiment Analysis"]);
        assert_eq!(rules.len(), 1);
    }
}
