use chrono::{DateTime, Utc};

use crate::models::api::ApiInvoice;
use crate::models::{InvoiceStatus, SuggestedAction, SuggestedActionKind};
use crate::utils::days_until_due;

const REMINDER_WINDOW_DAYS: i64 = 7;

/// Next step for an invoice. Status checks win over the due date; an
/// unreadable due date only ever falls through to "No Action Needed".
pub fn determine_action(status: InvoiceStatus, due_date: &str, now: DateTime<Utc>) -> SuggestedAction {
    let days = days_until_due(due_date, now);
    let before = |limit: i64| days.map(|d| d < limit).unwrap_or(false);

    if status == InvoiceStatus::Paid {
        return SuggestedAction::completed();
    }
    if status == InvoiceStatus::Overdue || before(0) {
        return SuggestedAction::new(SuggestedActionKind::SendEmail, "Send Email");
    }
    if status == InvoiceStatus::DueTomorrow || before(2) {
        return SuggestedAction::new(SuggestedActionKind::SendEmail, "Send Email");
    }
    if before(REMINDER_WINDOW_DAYS + 1) {
        return SuggestedAction::new(SuggestedActionKind::SendReminder, "Send Reminder");
    }
    SuggestedAction::new(SuggestedActionKind::None, "No Action Needed")
}

pub fn derive_status(invoice: &ApiInvoice, now: DateTime<Utc>) -> InvoiceStatus {
    if invoice.invoice_paid_amount >= invoice.invoice_total_amount {
        return InvoiceStatus::Paid;
    }
    status_for_due_date(&invoice.invoice_due_date, now)
}

/// Status of an unpaid invoice going by its due date alone.
pub fn status_for_due_date(due_date: &str, now: DateTime<Utc>) -> InvoiceStatus {
    match days_until_due(due_date, now) {
        Some(days) if days < 0 => InvoiceStatus::Overdue,
        Some(days) if days <= 1 => InvoiceStatus::DueTomorrow,
        _ => InvoiceStatus::Sent,
    }
}
