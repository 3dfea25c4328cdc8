use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use jsonschema::JSONSchema;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::models::api::{
    ApiCustomer, ApiInvoice, ApiTask, EmailWebhookMessage, InvoiceAnalysis, MessageLabel, MessagePayload,
    ParsedInvoice,
};
use crate::models::{SampleEmail, Settings};

const EMAIL_FROM: &str = "customer@example.com";
const EMAIL_TO: &str = "settleflow@example.com";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    webhook_url: Url,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(ApiClient {
            http,
            base_url: parse_url(&settings.api_base_url)?,
            webhook_url: parse_url(&settings.email_webhook_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    pub async fn list_invoices(&self) -> ApiResult<Vec<ApiInvoice>> {
        self.get_json("invoices").await
    }

    pub async fn list_customers(&self) -> ApiResult<Vec<ApiCustomer>> {
        self.get_json("customers/").await
    }

    pub async fn list_tasks(&self) -> ApiResult<Vec<ApiTask>> {
        self.get_json("tasks/").await
    }

    /// Uploads an invoice document and returns the fields the backend read
    /// from it.
    pub async fn parse_invoice(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<ParsedInvoice> {
        let url = self.endpoint("invoices/parse");
        debug!(%url, file_name, size = bytes.len(), "uploading invoice for parsing");
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        let response = self.http.post(&url).multipart(form).send().await?;
        let value = read_json(response).await?;
        validate(&parsed_invoice_schema(), &value, "invoices/parse")?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn analyze_invoice(&self, invoice_id: &str) -> ApiResult<InvoiceAnalysis> {
        let path = format!("invoices/{}/analysis", invoice_id);
        let response = self.http.get(self.endpoint(&path)).send().await?;
        let value = read_json(response).await?;
        validate(&analysis_schema(), &value, &path)?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn send_customer_email(&self, email: &SampleEmail, now: DateTime<Utc>) -> ApiResult<()> {
        let message = webhook_message(email, now);
        debug!(email = %email.id, "posting customer email to webhook");
        let response = self
            .http
            .post(self.webhook_url.clone())
            .header("ngrok-skip-browser-warning", "true")
            .json(&message)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    pub async fn test_connection(&self) -> ApiResult<bool> {
        let response = self.http.get(self.endpoint("invoices")).send().await?;
        Ok(response.status().is_success())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.endpoint(path);
        let response = self.http.get(&url).send().await?;
        let response = ensure_success(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

pub fn webhook_message(email: &SampleEmail, now: DateTime<Utc>) -> EmailWebhookMessage {
    EmailWebhookMessage {
        id: email.id.clone(),
        thread_id: email.id.clone(),
        snippet: email.body.clone(),
        payload: MessagePayload {
            mime_type: "text/plain".to_string(),
        },
        size_estimate: email.body.chars().count(),
        history_id: now.timestamp_millis().to_string(),
        internal_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        labels: vec![MessageLabel {
            id: "sent".to_string(),
            name: "SENT".to_string(),
        }],
        from: EMAIL_FROM.to_string(),
        subject: email.subject.clone(),
        to: EMAIL_TO.to_string(),
    }
}

fn parse_url(raw: &str) -> ApiResult<Url> {
    Url::parse(raw).map_err(|e| ApiError::Url(format!("{}: {}", raw, e)))
}

async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), %url, "backend returned an error status");
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn read_json(response: Response) -> ApiResult<Value> {
    let response = ensure_success(response).await?;
    let text = response.text().await?;
    Ok(serde_json::from_str::<Value>(&text)?)
}

fn validate(schema: &Value, value: &Value, endpoint: &str) -> ApiResult<()> {
    let schema_error = |message: String| ApiError::Schema {
        endpoint: endpoint.to_string(),
        message,
    };
    let compiled = JSONSchema::compile(schema).map_err(|e| schema_error(e.to_string()))?;
    if let Err(errors) = compiled.validate(value) {
        let message = errors.map(|e| e.to_string()).collect::<Vec<_>>().join("; ");
        return Err(schema_error(message));
    }
    Ok(())
}

fn parsed_invoice_schema() -> Value {
    json!({
        "type": "object",
        "required": ["customer_name", "invoice_number", "amount", "due_date"],
        "properties": {
            "customer_name": {"type": "string"},
            "invoice_number": {"type": "string"},
            "amount": {"type": "number"},
            "due_date": {"type": "string"},
            "status": {"type": ["string", "null"]}
        }
    })
}

fn analysis_schema() -> Value {
    json!({
        "type": "object",
        "required": ["invoice_number", "summary"],
        "properties": {
            "invoice_number": {"type": "string"},
            "summary": {"type": "string"},
            "risk_level": {"type": ["string", "null"]},
            "recommended_action": {"type": ["string", "null"]},
            "expected_payment_date": {"type": ["string", "null"]}
        }
    })
}
