use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiInvoice {
    pub id: i64,
    pub invoice_number: String,
    pub invoice_total_amount: f64,
    pub invoice_date: String,
    pub invoice_due_date: String,
    pub invoice_paid_amount: f64,
    #[serde(default)]
    pub expected_payment_date: Option<String>,
    pub customer_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerRating {
    Good,
    Average,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCustomer {
    pub id: i64,
    pub customer_name: String,
    pub email: Option<String>,
    pub total_outstanding_amount: f64,
    pub rating: CustomerRating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTask {
    pub id: i64,
    pub task_number: String,
    pub description: String,
    pub assigned_to: String,
    pub priority: String,
    pub invoice_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedInvoice {
    pub customer_name: String,
    pub invoice_number: String,
    pub amount: f64,
    pub due_date: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceAnalysis {
    pub invoice_number: String,
    pub summary: String,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub recommended_action: Option<String>,
    #[serde(default)]
    pub expected_payment_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagePayload {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageLabel {
    pub id: String,
    pub name: String,
}

/// Body posted to the email webhook, shaped like a Gmail push message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailWebhookMessage {
    pub id: String,
    #[serde(rename = "threadId")]
    pub thread_id: String,
    pub snippet: String,
    pub payload: MessagePayload,
    #[serde(rename = "sizeEstimate")]
    pub size_estimate: usize,
    #[serde(rename = "historyId")]
    pub history_id: String,
    #[serde(rename = "internalDate")]
    pub internal_date: String,
    pub labels: Vec<MessageLabel>,
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "To")]
    pub to: String,
}
