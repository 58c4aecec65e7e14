use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of verification or processing a workflow performs.
///
/// Field rules, request bodies and payload results are all lookups over this
/// tag. Free-form workflow names are mapped onto categories with
/// [`WorkflowCategory::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowCategory {
    EmailCheck,
    PhoneCheck,
    IdCheck,
    Ocr,
    Payment,
    Refund,
    Validation,
    Storage,
}

impl WorkflowCategory {
    /// Every category, in the order generated output lists them.
    pub const ALL: [WorkflowCategory; 8] = [
        WorkflowCategory::EmailCheck,
        WorkflowCategory::PhoneCheck,
        WorkflowCategory::IdCheck,
        WorkflowCategory::Ocr,
        WorkflowCategory::Payment,
        WorkflowCategory::Refund,
        WorkflowCategory::Validation,
        WorkflowCategory::Storage,
    ];

    /// Snake-case name, as serialized and as used for webhook `tags`.
    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowCategory::EmailCheck => "email_check",
            WorkflowCategory::PhoneCheck => "phone_check",
            WorkflowCategory::IdCheck => "id_check",
            WorkflowCategory::Ocr => "ocr",
            WorkflowCategory::Payment => "payment",
            WorkflowCategory::Refund => "refund",
            WorkflowCategory::Validation => "validation",
            WorkflowCategory::Storage => "storage",
        }
    }

    /// Case-sensitive keyword a workflow name must contain to fall into this
    /// category. `"ID Check"` is covered by `"ID"`.
    pub fn keyword(self) -> &'static str {
        match self {
            WorkflowCategory::EmailCheck => "Email",
            WorkflowCategory::PhoneCheck => "Phone",
            WorkflowCategory::IdCheck => "ID",
            WorkflowCategory::Ocr => "OCR",
            WorkflowCategory::Payment => "Payment",
            WorkflowCategory::Refund => "Refund",
            WorkflowCategory::Validation => "Validation",
            WorkflowCategory::Storage => "Storage",
        }
    }

    /// All categories whose keyword appears in `workflow_name`, in [`Self::ALL`] order.
    ///
    /// A name may match several categories ("Email & Phone Check") or none.
    pub fn classify(workflow_name: &str) -> Vec<WorkflowCategory> {
        Self::ALL
            .into_iter()
            .filter(|c| workflow_name.contains(c.keyword()))
            .collect()
    }

    /// Key under which webhook `results` report this category, for the
    /// categories that produce verification data.
    pub fn result_key(self) -> Option<&'static str> {
        match self {
            WorkflowCategory::EmailCheck => Some("emailVerification"),
            WorkflowCategory::PhoneCheck => Some("phoneVerification"),
            WorkflowCategory::IdCheck => Some("idCheck"),
            WorkflowCategory::Ocr => Some("ocr"),
            WorkflowCategory::Payment => Some("payment"),
            WorkflowCategory::Refund | WorkflowCategory::Validation | WorkflowCategory::Storage => {
                None
            }
        }
    }

    /// Plain-language sentence used in the ops welcome guide.
    pub fn plain_description(self) -> &'static str {
        match self {
            WorkflowCategory::EmailCheck => "checks that an email address is real and can receive mail",
            WorkflowCategory::PhoneCheck => "confirms a phone number is valid and reachable",
            WorkflowCategory::IdCheck => "verifies a government-issued ID document",
            WorkflowCategory::Ocr => "reads the text from an uploaded document",
            WorkflowCategory::Payment => "processes a payment",
            WorkflowCategory::Refund => "issues a refund for an earlier payment",
            WorkflowCategory::Validation => "validates the submitted data against your rules",
            WorkflowCategory::Storage => "stores the submitted documents securely",
        }
    }
}

impl fmt::Display for WorkflowCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A workflow offered in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub categories: Vec<WorkflowCategory>,
    pub cost_per_run: f64,
}

impl Workflow {
    pub fn new(id: &str, name: &str, description: &str, cost_per_run: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            categories: WorkflowCategory::classify(name),
            cost_per_run,
        }
    }
}
