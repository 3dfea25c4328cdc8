use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod api;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Overdue,
    Paid,
    DueTomorrow,
}

impl InvoiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::DueTomorrow => "Due Tomorrow",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "draft" => Some(InvoiceStatus::Draft),
            "sent" => Some(InvoiceStatus::Sent),
            "overdue" => Some(InvoiceStatus::Overdue),
            "paid" => Some(InvoiceStatus::Paid),
            "due_tomorrow" => Some(InvoiceStatus::DueTomorrow),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedActionKind {
    SendEmail,
    SendReminder,
    CallCustomer,
    None,
}

impl SuggestedActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestedActionKind::SendEmail => "send_email",
            SuggestedActionKind::SendReminder => "send_reminder",
            SuggestedActionKind::CallCustomer => "call_customer",
            SuggestedActionKind::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedAction {
    #[serde(rename = "type")]
    pub kind: SuggestedActionKind,
    pub label: String,
}

impl SuggestedAction {
    pub fn new(kind: SuggestedActionKind, label: &str) -> Self {
        SuggestedAction {
            kind,
            label: label.to_string(),
        }
    }

    pub fn completed() -> Self {
        Self::new(SuggestedActionKind::None, "Completed")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub customer_name: String,
    pub invoice_number: String,
    pub amount: f64,
    pub due_date: String,
    pub status: InvoiceStatus,
    #[serde(rename = "aiSuggestedAction")]
    pub suggested_action: SuggestedAction,
    pub created_at: DateTime<Utc>,
}

/// Invoice fields supplied by the caller; id, creation time and suggested
/// action are filled in by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub customer_name: String,
    pub invoice_number: String,
    pub amount: f64,
    pub due_date: String,
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub invoice_count: usize,
    pub total_outstanding: f64,
    pub overdue_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    Done,
}

impl TaskStatus {
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Open => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Open,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub description: String,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    InvoiceUploaded,
    AiSuggestion,
    EmailSent,
    CustomerReplySimulated,
    TaskCreated,
    PaymentRecorded,
    StatusChanged,
}

impl ActivityType {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::InvoiceUploaded => "Invoice Uploaded",
            ActivityType::AiSuggestion => "AI Suggestion",
            ActivityType::EmailSent => "Email Sent",
            ActivityType::CustomerReplySimulated => "Customer Reply Simulated",
            ActivityType::TaskCreated => "Task Created",
            ActivityType::PaymentRecorded => "Payment Recorded",
            ActivityType::StatusChanged => "Status Changed",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion_type: Option<String>,
}

impl ActivityMetadata {
    pub fn amount(amount: f64) -> Self {
        ActivityMetadata {
            amount: Some(amount),
            ..Default::default()
        }
    }

    pub fn suggestion(kind: SuggestedActionKind) -> Self {
        ActivityMetadata {
            suggestion_type: Some(kind.as_str().to_string()),
            ..Default::default()
        }
    }

    pub fn transition(old_status: &str, new_status: &str) -> Self {
        ActivityMetadata {
            old_status: Some(old_status.to_string()),
            new_status: Some(new_status.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ActivityMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub description: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub metadata: Option<ActivityMetadata>,
}

impl NewActivity {
    pub fn for_invoice(kind: ActivityType, description: impl Into<String>, invoice: &Invoice) -> Self {
        NewActivity {
            kind,
            description: description.into(),
            customer_name: Some(invoice.customer_name.clone()),
            invoice_number: Some(invoice.invoice_number.clone()),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: ActivityMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub total_outstanding: f64,
    pub rating: api::CustomerRating,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadState {
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleEmail {
    pub id: String,
    pub subject: String,
    pub body: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub email_webhook_url: String,
    pub request_timeout_secs: u64,
}
