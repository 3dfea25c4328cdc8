use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::info;

use crate::models::api::{InvoiceAnalysis, ParsedInvoice};
use crate::models::{Invoice, InvoiceStatus, LoadState, NewInvoice, Settings};
use crate::services::api::ApiClient;
use crate::services::seed;
use crate::services::store::AppStore;
use crate::services::suggestion::status_for_due_date;

pub struct AppState {
    pub store: Arc<Mutex<AppStore>>,
    settings: Mutex<Settings>,
    api: Mutex<ApiClient>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_store(AppStore::new(), settings)
    }

    pub fn with_store(store: AppStore, settings: Settings) -> Result<Self> {
        let api = ApiClient::new(&settings)?;
        Ok(AppState {
            store: Arc::new(Mutex::new(store)),
            settings: Mutex::new(settings),
            api: Mutex::new(api),
        })
    }

    pub fn read<R>(&self, f: impl FnOnce(&AppStore) -> R) -> Result<R> {
        let store = self.store.lock().map_err(|_| anyhow!("Store lock"))?;
        Ok(f(&store))
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut AppStore) -> R) -> Result<R> {
        let mut store = self.store.lock().map_err(|_| anyhow!("Store lock"))?;
        Ok(f(&mut store))
    }

    pub fn settings(&self) -> Result<Settings> {
        Ok(self.settings.lock().map_err(|_| anyhow!("Settings lock"))?.clone())
    }

    pub fn update_settings(&self, settings: Settings) -> Result<()> {
        let api = ApiClient::new(&settings)?;
        {
            let mut locked = self.settings.lock().map_err(|_| anyhow!("Settings lock"))?;
            *locked = settings;
        }
        let mut client = self.api.lock().map_err(|_| anyhow!("Client lock"))?;
        *client = api;
        Ok(())
    }

    fn client(&self) -> Result<ApiClient> {
        Ok(self.api.lock().map_err(|_| anyhow!("Client lock"))?.clone())
    }

    pub async fn refresh_invoices(&self) -> Result<LoadState> {
        let client = self.client()?;
        self.update(|store| store.begin_invoices_fetch())?;
        let result = client.list_invoices().await;
        self.update(|store| {
            store.apply_invoices(result);
            store.invoices_state.clone()
        })
    }

    pub async fn refresh_customers(&self) -> Result<LoadState> {
        let client = self.client()?;
        self.update(|store| store.begin_customers_fetch())?;
        let result = client.list_customers().await;
        self.update(|store| {
            store.apply_customers(result);
            store.customers_state.clone()
        })
    }

    pub async fn refresh_tasks(&self) -> Result<LoadState> {
        let client = self.client()?;
        self.update(|store| store.begin_tasks_fetch())?;
        let result = client.list_tasks().await;
        self.update(|store| {
            store.apply_tasks(result);
            store.tasks_state.clone()
        })
    }

    /// Sends the file to the parser and adds the result to the invoice list.
    pub async fn upload_invoice(&self, path: &Path) -> Result<Invoice> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Read invoice file {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("Invalid path"))?
            .to_string();

        let client = self.client()?;
        let parsed = client.parse_invoice(&file_name, bytes).await?;
        let invoice = self.update(|store| {
            let new_invoice = new_invoice_from_parsed(parsed, store.now());
            store.add_invoice(new_invoice)
        })?;
        info!(invoice = %invoice.invoice_number, customer = %invoice.customer_name, "invoice uploaded");
        Ok(invoice)
    }

    pub async fn analyze_invoice(&self, invoice_id: &str) -> Result<InvoiceAnalysis> {
        if !self.read(|store| store.invoice(invoice_id).is_some())? {
            return Err(anyhow!("Invoice not found"));
        }
        let client = self.client()?;
        Ok(client.analyze_invoice(invoice_id).await?)
    }

    pub async fn send_customer_email(&self, email_id: &str) -> Result<()> {
        let email = seed::sample_emails()
            .into_iter()
            .find(|email| email.id == email_id)
            .ok_or_else(|| anyhow!("Email not found"))?;
        let now = self.read(|store| store.now())?;
        let client = self.client()?;
        client.send_customer_email(&email, now).await?;
        info!(email = %email.id, "customer email sent");
        Ok(())
    }

    pub async fn test_backend_connection(&self) -> Result<bool> {
        let client = self.client()?;
        Ok(client.test_connection().await?)
    }
}

pub fn new_invoice_from_parsed(parsed: ParsedInvoice, now: chrono::DateTime<chrono::Utc>) -> NewInvoice {
    let status = parsed
        .status
        .as_deref()
        .and_then(InvoiceStatus::parse)
        .unwrap_or_else(|| status_for_due_date(&parsed.due_date, now));
    NewInvoice {
        customer_name: parsed.customer_name,
        invoice_number: parsed.invoice_number,
        amount: parsed.amount,
        due_date: parsed.due_date,
        status,
    }
}
