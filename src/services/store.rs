use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::models::api::{ApiCustomer, ApiInvoice, ApiTask};
use crate::models::{
    Activity, ActivityMetadata, ActivityType, Customer, CustomerProfile, Invoice, InvoiceStatus, LoadState,
    NewActivity, NewInvoice, NewTask, Task, TaskPriority, TaskStatus,
};
use crate::services::customers::{aggregate_customers, profile_from_api};
use crate::services::seed;
use crate::services::suggestion::{derive_status, determine_action};
use crate::utils::{format_indian_number, generate_id};

pub type Clock = fn() -> DateTime<Utc>;

/// Session state for the dashboard. Every list is kept newest first.
pub struct AppStore {
    invoices: Vec<Invoice>,
    tasks: Vec<Task>,
    activities: Vec<Activity>,
    customer_profiles: Vec<CustomerProfile>,
    pub invoices_state: LoadState,
    pub customers_state: LoadState,
    pub tasks_state: LoadState,
    clock: Clock,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppStore {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: Clock) -> Self {
        let now = clock();
        AppStore {
            invoices: Vec::new(),
            tasks: seed::initial_tasks(),
            activities: seed::initial_activities(now),
            customer_profiles: Vec::new(),
            invoices_state: LoadState::default(),
            customers_state: LoadState::default(),
            tasks_state: LoadState::default(),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn customer_profiles(&self) -> &[CustomerProfile] {
        &self.customer_profiles
    }

    pub fn invoice(&self, invoice_id: &str) -> Option<&Invoice> {
        self.invoices.iter().find(|inv| inv.id == invoice_id)
    }

    pub fn customers(&self) -> Vec<Customer> {
        aggregate_customers(&self.invoices)
    }

    pub fn open_tasks_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.status == TaskStatus::Open).count()
    }

    pub fn add_invoice(&mut self, invoice: NewInvoice) -> Invoice {
        let now = self.now();
        let suggested_action = determine_action(invoice.status, &invoice.due_date, now);
        let saved = Invoice {
            id: generate_id("inv", now),
            customer_name: invoice.customer_name,
            invoice_number: invoice.invoice_number,
            amount: invoice.amount,
            due_date: invoice.due_date,
            status: invoice.status,
            suggested_action,
            created_at: now,
        };
        debug!(invoice = %saved.invoice_number, "invoice added");
        self.invoices.insert(0, saved.clone());

        self.add_activity(
            NewActivity::for_invoice(ActivityType::InvoiceUploaded, "New invoice uploaded and analyzed", &saved)
                .with_metadata(ActivityMetadata::amount(saved.amount)),
        );
        self.add_activity(
            NewActivity::for_invoice(
                ActivityType::AiSuggestion,
                format!("AI recommended {}", saved.suggested_action.label.to_lowercase()),
                &saved,
            )
            .with_metadata(ActivityMetadata::suggestion(saved.suggested_action.kind)),
        );

        saved
    }

    /// Sets the status and recomputes the suggested action. Returns the
    /// previous status, or `None` when no invoice has that id.
    pub fn update_invoice_status(&mut self, invoice_id: &str, status: InvoiceStatus) -> Option<InvoiceStatus> {
        let now = self.now();
        let invoice = self.invoices.iter_mut().find(|inv| inv.id == invoice_id)?;
        let previous = invoice.status;
        invoice.status = status;
        invoice.suggested_action = determine_action(status, &invoice.due_date, now);
        debug!(invoice = %invoice.invoice_number, from = ?previous, to = ?status, "invoice status updated");
        Some(previous)
    }

    /// Status update that also lands in the activity log when the status
    /// actually moved.
    pub fn change_invoice_status(&mut self, invoice_id: &str, status: InvoiceStatus) -> Option<Activity> {
        let previous = self.update_invoice_status(invoice_id, status)?;
        if previous == status {
            return None;
        }
        let invoice = self.invoice(invoice_id)?.clone();
        Some(self.add_activity(
            NewActivity::for_invoice(ActivityType::StatusChanged, "Invoice status changed", &invoice)
                .with_metadata(ActivityMetadata::transition(previous.label(), status.label())),
        ))
    }

    pub fn add_task(&mut self, task: NewTask) -> Task {
        let now = self.now();
        let saved = Task {
            id: generate_id("task", now),
            description: task.description,
            invoice_number: task.invoice_number,
            customer_name: task.customer_name,
            status: task.status,
            priority: task.priority,
            created_at: now,
        };
        self.tasks.insert(0, saved.clone());
        saved
    }

    pub fn toggle_task_status(&mut self, task_id: &str) -> Option<TaskStatus> {
        let task = self.tasks.iter_mut().find(|t| t.id == task_id)?;
        task.status = task.status.toggled();
        Some(task.status)
    }

    pub fn add_activity(&mut self, activity: NewActivity) -> Activity {
        let now = self.now();
        let saved = Activity {
            id: generate_id("act", now),
            kind: activity.kind,
            description: activity.description,
            customer_name: activity.customer_name,
            invoice_number: activity.invoice_number,
            timestamp: now,
            metadata: activity.metadata,
        };
        self.activities.insert(0, saved.clone());
        saved
    }

    pub fn send_email_for_invoice(&mut self, invoice: &Invoice) -> Activity {
        self.add_activity(NewActivity::for_invoice(
            ActivityType::EmailSent,
            "Payment reminder email sent",
            invoice,
        ))
    }

    pub fn simulate_customer_reply(&mut self, invoice: &Invoice) -> Task {
        self.add_activity(NewActivity::for_invoice(
            ActivityType::CustomerReplySimulated,
            "Customer reply simulation triggered",
            invoice,
        ));

        let task = self.add_task(NewTask {
            description: "Fix invoice issue raised by customer".to_string(),
            invoice_number: Some(invoice.invoice_number.clone()),
            customer_name: Some(invoice.customer_name.clone()),
            status: TaskStatus::Open,
            priority: Some(TaskPriority::High),
        });

        self.add_activity(NewActivity::for_invoice(
            ActivityType::TaskCreated,
            "Follow-up task created after customer reply simulation",
            invoice,
        ));

        task
    }

    pub fn mark_invoice_as_paid(&mut self, invoice_id: &str) -> Option<Activity> {
        let invoice = self.invoice(invoice_id)?.clone();
        self.update_invoice_status(invoice_id, InvoiceStatus::Paid);
        Some(self.add_activity(
            NewActivity::for_invoice(
                ActivityType::PaymentRecorded,
                format!("Payment of ₹{} received", format_indian_number(invoice.amount)),
                &invoice,
            )
            .with_metadata(ActivityMetadata::amount(invoice.amount)),
        ))
    }

    pub fn begin_invoices_fetch(&mut self) {
        self.invoices_state = LoadState {
            loading: true,
            error: None,
        };
    }

    pub fn apply_invoices(&mut self, result: Result<Vec<ApiInvoice>, ApiError>) {
        let now = self.now();
        match result {
            Ok(api_invoices) => {
                info!(count = api_invoices.len(), "invoices fetched");
                self.invoices = api_invoices.iter().map(|inv| invoice_from_api(inv, now)).collect();
            }
            Err(err) => {
                warn!(error = %err, "fetching invoices failed, using fallback data");
                self.invoices_state.error = Some(err.to_string());
                self.invoices = seed::fallback_invoices(now);
            }
        }
        self.invoices_state.loading = false;
    }

    pub fn begin_customers_fetch(&mut self) {
        self.customers_state = LoadState {
            loading: true,
            error: None,
        };
    }

    pub fn apply_customers(&mut self, result: Result<Vec<ApiCustomer>, ApiError>) {
        match result {
            Ok(api_customers) => {
                info!(count = api_customers.len(), "customers fetched");
                self.customer_profiles = api_customers.into_iter().map(profile_from_api).collect();
            }
            Err(err) => {
                warn!(error = %err, "fetching customers failed");
                self.customers_state.error = Some(err.to_string());
            }
        }
        self.customers_state.loading = false;
    }

    pub fn begin_tasks_fetch(&mut self) {
        self.tasks_state = LoadState {
            loading: true,
            error: None,
        };
    }

    pub fn apply_tasks(&mut self, result: Result<Vec<ApiTask>, ApiError>) {
        let now = self.now();
        match result {
            Ok(api_tasks) => {
                info!(count = api_tasks.len(), "tasks fetched");
                self.tasks = api_tasks.into_iter().map(|task| task_from_api(task, now)).collect();
            }
            Err(err) => {
                warn!(error = %err, "fetching tasks failed");
                self.tasks_state.error = Some(err.to_string());
                self.tasks = seed::initial_tasks();
            }
        }
        self.tasks_state.loading = false;
    }
}

pub fn invoice_from_api(invoice: &ApiInvoice, now: DateTime<Utc>) -> Invoice {
    let status = derive_status(invoice, now);
    let created_at = crate::utils::parse_due_date(&invoice.invoice_date).unwrap_or(now);
    Invoice {
        id: invoice.id.to_string(),
        customer_name: invoice.customer_name.clone(),
        invoice_number: invoice.invoice_number.clone(),
        amount: invoice.invoice_total_amount,
        due_date: invoice.invoice_due_date.clone(),
        status,
        suggested_action: determine_action(status, &invoice.invoice_due_date, now),
        created_at,
    }
}

/// The task endpoint has no status, customer or creation time; tasks arrive
/// open and are stamped with the fetch time.
pub fn task_from_api(task: ApiTask, now: DateTime<Utc>) -> Task {
    let priority = if task.priority.eq_ignore_ascii_case("high") {
        TaskPriority::High
    } else {
        TaskPriority::Normal
    };
    Task {
        id: task.id.to_string(),
        description: task.description,
        invoice_number: Some(task.invoice_number),
        customer_name: None,
        status: TaskStatus::Open,
        priority: Some(priority),
        created_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SuggestedActionKind;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 20, 10, 0, 0).unwrap()
    }

    fn store() -> AppStore {
        AppStore::with_clock(fixed_now)
    }

    fn new_invoice(customer: &str, number: &str, amount: f64, due: &str, status: InvoiceStatus) -> NewInvoice {
        NewInvoice {
            customer_name: customer.to_string(),
            invoice_number: number.to_string(),
            amount,
            due_date: due.to_string(),
            status,
        }
    }

    fn api_invoice(id: i64, customer: &str, total: f64, paid: f64, due: &str) -> ApiInvoice {
        ApiInvoice {
            id,
            invoice_number: format!("INV-{}", id),
            invoice_total_amount: total,
            invoice_date: "2024-01-02".to_string(),
            invoice_due_date: due.to_string(),
            invoice_paid_amount: paid,
            expected_payment_date: None,
            customer_name: customer.to_string(),
        }
    }

    #[test]
    fn starts_with_seed_activity_and_no_tasks() {
        let store = store();
        assert!(store.invoices().is_empty());
        assert!(store.tasks().is_empty());
        assert_eq!(store.activities().len(), 10);
        assert_eq!(store.open_tasks_count(), 0);
    }

    #[test]
    fn add_invoice_records_upload_and_suggestion() {
        let mut store = store();
        let saved = store.add_invoice(new_invoice("Acme Corp", "INV-1", 45000.0, "2024-01-24", InvoiceStatus::Sent));

        assert!(saved.id.starts_with("inv-"));
        assert_eq!(saved.created_at, fixed_now());
        assert_eq!(saved.suggested_action.kind, SuggestedActionKind::SendReminder);
        assert_eq!(store.invoices()[0], saved);

        let log = store.activities();
        assert_eq!(log.len(), 12);
        assert_eq!(log[0].kind, ActivityType::AiSuggestion);
        assert_eq!(log[0].description, "AI recommended send reminder");
        assert_eq!(
            log[0].metadata.as_ref().and_then(|m| m.suggestion_type.as_deref()),
            Some("send_reminder")
        );
        assert_eq!(log[1].kind, ActivityType::InvoiceUploaded);
        assert_eq!(log[1].description, "New invoice uploaded and analyzed");
        assert_eq!(log[1].metadata.as_ref().and_then(|m| m.amount), Some(45000.0));
        assert_eq!(log[1].invoice_number.as_deref(), Some("INV-1"));
    }

    #[test]
    fn newest_invoice_first() {
        let mut store = store();
        store.add_invoice(new_invoice("Acme Corp", "INV-1", 1.0, "2024-03-01", InvoiceStatus::Sent));
        store.add_invoice(new_invoice("Beta Ltd", "INV-2", 2.0, "2024-03-01", InvoiceStatus::Sent));
        assert_eq!(store.invoices()[0].invoice_number, "INV-2");
        assert_eq!(store.invoices()[1].invoice_number, "INV-1");
    }

    #[test]
    fn status_update_recomputes_action() {
        let mut store = store();
        let saved = store.add_invoice(new_invoice("Acme Corp", "INV-1", 10.0, "2024-03-01", InvoiceStatus::Sent));
        assert_eq!(saved.suggested_action.kind, SuggestedActionKind::None);

        let previous = store.update_invoice_status(&saved.id, InvoiceStatus::Overdue);
        assert_eq!(previous, Some(InvoiceStatus::Sent));
        assert_eq!(store.invoices()[0].suggested_action.kind, SuggestedActionKind::SendEmail);

        store.update_invoice_status(&saved.id, InvoiceStatus::Paid);
        assert_eq!(store.invoices()[0].suggested_action.label, "Completed");
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut store = store();
        let before = store.activities().len();
        assert_eq!(store.update_invoice_status("missing", InvoiceStatus::Paid), None);
        assert!(store.mark_invoice_as_paid("missing").is_none());
        assert!(store.change_invoice_status("missing", InvoiceStatus::Paid).is_none());
        assert_eq!(store.toggle_task_status("missing"), None);
        assert_eq!(store.activities().len(), before);
    }

    #[test]
    fn change_status_logs_transition_once() {
        let mut store = store();
        let saved = store.add_invoice(new_invoice("Acme Corp", "INV-1", 10.0, "2024-03-01", InvoiceStatus::Sent));

        let activity = store
            .change_invoice_status(&saved.id, InvoiceStatus::Overdue)
            .expect("status moved");
        assert_eq!(activity.kind, ActivityType::StatusChanged);
        let metadata = activity.metadata.expect("metadata");
        assert_eq!(metadata.old_status.as_deref(), Some("Sent"));
        assert_eq!(metadata.new_status.as_deref(), Some("Overdue"));

        assert!(store.change_invoice_status(&saved.id, InvoiceStatus::Overdue).is_none());
    }

    #[test]
    fn toggle_flips_back_and_forth() {
        let mut store = store();
        let task = store.add_task(NewTask {
            description: "Call AP team".to_string(),
            invoice_number: None,
            customer_name: None,
            status: TaskStatus::Open,
            priority: None,
        });
        assert_eq!(store.open_tasks_count(), 1);
        assert_eq!(store.toggle_task_status(&task.id), Some(TaskStatus::Done));
        assert_eq!(store.open_tasks_count(), 0);
        assert_eq!(store.toggle_task_status(&task.id), Some(TaskStatus::Open));
        assert_eq!(store.open_tasks_count(), 1);
    }

    #[test]
    fn send_email_only_logs() {
        let mut store = store();
        let saved = store.add_invoice(new_invoice("Acme Corp", "INV-1", 10.0, "2024-01-01", InvoiceStatus::Overdue));
        let activity = store.send_email_for_invoice(&saved);
        assert_eq!(activity.kind, ActivityType::EmailSent);
        assert_eq!(activity.description, "Payment reminder email sent");
        assert_eq!(activity.customer_name.as_deref(), Some("Acme Corp"));
        assert_eq!(store.invoices()[0].status, InvoiceStatus::Overdue);
    }

    #[test]
    fn simulated_reply_creates_high_priority_task() {
        let mut store = store();
        let saved = store.add_invoice(new_invoice("Beta Ltd", "INV-9", 12000.0, "2024-01-21", InvoiceStatus::DueTomorrow));
        let before = store.activities().len();

        let task = store.simulate_customer_reply(&saved);
        assert_eq!(task.description, "Fix invoice issue raised by customer");
        assert_eq!(task.priority, Some(TaskPriority::High));
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.invoice_number.as_deref(), Some("INV-9"));
        assert_eq!(task.customer_name.as_deref(), Some("Beta Ltd"));
        assert_eq!(store.open_tasks_count(), 1);

        let log = store.activities();
        assert_eq!(log.len(), before + 2);
        assert_eq!(log[0].kind, ActivityType::TaskCreated);
        assert_eq!(log[1].kind, ActivityType::CustomerReplySimulated);
    }

    #[test]
    fn mark_paid_updates_status_and_logs_payment() {
        let mut store = store();
        let saved = store.add_invoice(new_invoice("Global Solutions", "INV-4", 156000.0, "2024-01-01", InvoiceStatus::Overdue));

        let activity = store.mark_invoice_as_paid(&saved.id).expect("known invoice");
        assert_eq!(activity.kind, ActivityType::PaymentRecorded);
        assert_eq!(activity.description, "Payment of ₹1,56,000 received");
        assert_eq!(activity.metadata.and_then(|m| m.amount), Some(156000.0));

        let invoice = store.invoice(&saved.id).expect("still there");
        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.suggested_action.label, "Completed");
        assert_eq!(store.customers()[0].total_outstanding, 0.0);
    }

    #[test]
    fn customers_follow_invoice_changes() {
        let mut store = store();
        let a = store.add_invoice(new_invoice("Acme Corp", "INV-1", 100.0, "2024-01-01", InvoiceStatus::Overdue));
        store.add_invoice(new_invoice("Acme Corp", "INV-2", 50.0, "2024-03-01", InvoiceStatus::Sent));

        let customers = store.customers();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].total_outstanding, 150.0);
        assert_eq!(customers[0].overdue_count, 1);

        store.mark_invoice_as_paid(&a.id);
        let customers = store.customers();
        assert_eq!(customers[0].total_outstanding, 50.0);
        assert_eq!(customers[0].overdue_count, 0);
    }

    #[test]
    fn fetched_invoices_replace_state() {
        let mut store = store();
        store.add_invoice(new_invoice("Local", "INV-L", 1.0, "2024-03-01", InvoiceStatus::Draft));

        store.begin_invoices_fetch();
        assert!(store.invoices_state.loading);
        store.apply_invoices(Ok(vec![
            api_invoice(1, "Acme Corp", 100.0, 100.0, "2024-01-01"),
            api_invoice(2, "Beta Ltd", 100.0, 0.0, "2024-01-10"),
            api_invoice(3, "Metro", 100.0, 0.0, "2024-01-21"),
        ]));

        assert_eq!(store.invoices_state, LoadState::default());
        let invoices = store.invoices();
        assert_eq!(invoices.len(), 3);
        assert_eq!(invoices[0].id, "1");
        assert_eq!(invoices[0].status, InvoiceStatus::Paid);
        assert_eq!(invoices[0].suggested_action.label, "Completed");
        assert_eq!(invoices[1].status, InvoiceStatus::Overdue);
        assert_eq!(invoices[2].status, InvoiceStatus::DueTomorrow);
        assert_eq!(invoices[2].created_at, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn failed_invoice_fetch_falls_back() {
        let mut store = store();
        store.begin_invoices_fetch();
        store.apply_invoices(Err(ApiError::Status {
            status: 502,
            body: String::new(),
        }));

        assert!(!store.invoices_state.loading);
        assert_eq!(store.invoices_state.error.as_deref(), Some("HTTP error! status: 502"));
        assert_eq!(store.invoices().len(), 6);
        assert_eq!(store.customers().len(), 6);
    }

    #[test]
    fn retry_clears_previous_error() {
        let mut store = store();
        store.begin_invoices_fetch();
        store.apply_invoices(Err(ApiError::Url("bad".to_string())));
        assert!(store.invoices_state.error.is_some());

        store.begin_invoices_fetch();
        assert_eq!(store.invoices_state.error, None);
        store.apply_invoices(Ok(Vec::new()));
        assert!(store.invoices().is_empty());
        assert_eq!(store.invoices_state.error, None);
    }

    #[test]
    fn fetched_tasks_are_open_with_mapped_priority() {
        let mut store = store();
        store.begin_tasks_fetch();
        store.apply_tasks(Ok(vec![
            ApiTask {
                id: 4,
                task_number: "T-4".to_string(),
                description: "Re-issue invoice with corrected GST".to_string(),
                assigned_to: "ops".to_string(),
                priority: "HIGH".to_string(),
                invoice_number: "INV-2024-003".to_string(),
            },
            ApiTask {
                id: 5,
                task_number: "T-5".to_string(),
                description: "Confirm UTR".to_string(),
                assigned_to: "ops".to_string(),
                priority: "MEDIUM".to_string(),
                invoice_number: "INV-2024-002".to_string(),
            },
        ]));

        let tasks = store.tasks();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].priority, Some(TaskPriority::High));
        assert_eq!(tasks[1].priority, Some(TaskPriority::Normal));
        assert!(tasks.iter().all(|t| t.status == TaskStatus::Open && t.customer_name.is_none()));
        assert_eq!(tasks[0].created_at, fixed_now());
        assert_eq!(store.open_tasks_count(), 2);
    }

    #[test]
    fn failed_task_fetch_resets_to_initial() {
        let mut store = store();
        store.add_task(NewTask {
            description: "local".to_string(),
            invoice_number: None,
            customer_name: None,
            status: TaskStatus::Open,
            priority: None,
        });
        store.begin_tasks_fetch();
        store.apply_tasks(Err(ApiError::Url("bad".to_string())));
        assert!(store.tasks().is_empty());
        assert!(store.tasks_state.error.is_some());
        assert!(!store.tasks_state.loading);
    }

    #[test]
    fn customer_profiles_do_not_touch_derived_list() {
        let mut store = store();
        store.add_invoice(new_invoice("Acme Corp", "INV-1", 10.0, "2024-03-01", InvoiceStatus::Sent));
        store.begin_customers_fetch();
        store.apply_customers(Ok(vec![ApiCustomer {
            id: 1,
            customer_name: "Reliance Industries Ltd".to_string(),
            email: None,
            total_outstanding_amount: 245000.0,
            rating: crate::models::api::CustomerRating::Good,
        }]));

        assert_eq!(store.customer_profiles().len(), 1);
        assert_eq!(store.customers().len(), 1);
        assert_eq!(store.customers()[0].name, "Acme Corp");

        store.begin_customers_fetch();
        store.apply_customers(Err(ApiError::Url("bad".to_string())));
        assert_eq!(store.customer_profiles().len(), 1);
        assert!(store.customers_state.error.is_some());
    }

    #[test]
    fn manual_activity_is_stamped_and_prepended() {
        let mut store = store();
        let activity = store.add_activity(NewActivity {
            kind: ActivityType::EmailSent,
            description: "Statement shared over phone".to_string(),
            customer_name: Some("Metro Distributors".to_string()),
            invoice_number: None,
            metadata: None,
        });

        assert!(activity.id.starts_with("act-"));
        assert_eq!(activity.timestamp, fixed_now());
        assert_eq!(store.activities().len(), 11);
        assert_eq!(store.activities()[0], activity);
    }
}
