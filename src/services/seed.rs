use chrono::{DateTime, Duration, Utc};

use crate::models::{
    Activity, ActivityMetadata, ActivityType, Invoice, InvoiceStatus, SampleEmail, SuggestedAction,
    SuggestedActionKind, Task,
};

/// Shown when the invoice list can't be fetched.
pub fn fallback_invoices(now: DateTime<Utc>) -> Vec<Invoice> {
    let rows: [(&str, &str, &str, f64, &str, InvoiceStatus, SuggestedActionKind, &str, i64); 6] = [
        ("inv-001", "Acme Corp", "INV-2024-0842", 45000.0, "2024-01-15", InvoiceStatus::Overdue, SuggestedActionKind::SendEmail, "Send Email", 90),
        ("inv-002", "Beta Ltd", "INV-2024-0845", 12000.0, "2024-02-01", InvoiceStatus::DueTomorrow, SuggestedActionKind::SendEmail, "Send Email", 26),
        ("inv-003", "TechVentures Pvt", "INV-2024-0839", 78500.0, "2024-01-20", InvoiceStatus::Overdue, SuggestedActionKind::CallCustomer, "Call Customer", 72),
        ("inv-004", "Global Solutions", "INV-2024-0851", 156000.0, "2024-02-10", InvoiceStatus::Sent, SuggestedActionKind::None, "No Action Needed", 28),
        ("inv-005", "Sunrise Industries", "INV-2024-0836", 32500.0, "2024-01-08", InvoiceStatus::Paid, SuggestedActionKind::None, "Completed", 144),
        ("inv-006", "Metro Distributors", "INV-2024-0848", 89000.0, "2024-01-25", InvoiceStatus::Overdue, SuggestedActionKind::SendReminder, "Send Reminder", 120),
    ];

    rows.iter()
        .map(|(id, customer, number, amount, due, status, kind, label, hours_ago)| Invoice {
            id: id.to_string(),
            customer_name: customer.to_string(),
            invoice_number: number.to_string(),
            amount: *amount,
            due_date: due.to_string(),
            status: *status,
            suggested_action: SuggestedAction::new(*kind, label),
            created_at: now - Duration::hours(*hours_ago),
        })
        .collect()
}

pub fn initial_tasks() -> Vec<Task> {
    Vec::new()
}

pub fn initial_activities(now: DateTime<Utc>) -> Vec<Activity> {
    let entry = |id: &str,
                 kind: ActivityType,
                 description: &str,
                 customer: &str,
                 invoice: &str,
                 minutes_ago: i64,
                 metadata: Option<ActivityMetadata>| Activity {
        id: id.to_string(),
        kind,
        description: description.to_string(),
        customer_name: Some(customer.to_string()),
        invoice_number: Some(invoice.to_string()),
        timestamp: now - Duration::minutes(minutes_ago),
        metadata,
    };

    vec![
        entry("act-001", ActivityType::PaymentRecorded, "Payment of ₹32,500 received", "Sunrise Industries", "INV-2024-0836", 23, Some(ActivityMetadata::amount(32500.0))),
        entry("act-002", ActivityType::TaskCreated, "Follow-up task created after customer reply simulation", "Acme Corp", "INV-2024-0842", 45, None),
        entry("act-003", ActivityType::CustomerReplySimulated, "Customer reply simulation triggered", "Acme Corp", "INV-2024-0842", 47, None),
        entry("act-004", ActivityType::EmailSent, "Payment reminder email sent", "Acme Corp", "INV-2024-0842", 60, None),
        entry("act-005", ActivityType::AiSuggestion, "AI recommended sending payment reminder", "Acme Corp", "INV-2024-0842", 62, Some(ActivityMetadata::suggestion(SuggestedActionKind::SendEmail))),
        entry("act-006", ActivityType::StatusChanged, "Invoice status changed", "Acme Corp", "INV-2024-0842", 90, Some(ActivityMetadata::transition("Sent", "Overdue"))),
        entry("act-007", ActivityType::EmailSent, "Payment reminder email sent", "Beta Ltd", "INV-2024-0845", 26 * 60, None),
        entry("act-008", ActivityType::AiSuggestion, "AI recommended sending early reminder", "Beta Ltd", "INV-2024-0845", 26 * 60 + 30, Some(ActivityMetadata::suggestion(SuggestedActionKind::SendReminder))),
        entry("act-009", ActivityType::InvoiceUploaded, "New invoice uploaded and analyzed", "Global Solutions", "INV-2024-0851", 28 * 60, Some(ActivityMetadata::amount(156000.0))),
        entry("act-010", ActivityType::PaymentRecorded, "Payment of ₹78,500 received", "TechVentures Pvt", "INV-2024-0839", 72 * 60, Some(ActivityMetadata::amount(78500.0))),
    ]
}

/// Canned replies for the "reply as customer" page, each with the outcome
/// the backend is expected to produce.
pub fn sample_emails() -> Vec<SampleEmail> {
    let email = |id: &str, subject: &str, body: &str, output: &str| SampleEmail {
        id: id.to_string(),
        subject: subject.to_string(),
        body: body.to_string(),
        output: output.to_string(),
    };

    vec![
        email(
            "email-001",
            "Re: Payment regarding invoice INV-2024-001",
            "Hi, Apologies for the late reply here. We will close and make the payment by 12-Feb for INV-2024-001",
            "Should update expected payment date for INV-2024-001 to 12-Feb",
        ),
        email(
            "email-002",
            "Re: Payment regarding invoice INV-2024-002",
            "Payment for invoice INV-2024-002 is already via UTR NEFT-HDFC009812131.",
            "Should update expected paid amount for INV-2024-002 and mark it fully paid",
        ),
        email(
            "email-003",
            "Re: Payment regarding invoice INV-2024-003",
            "Please correct the GST and re share the invoice for INV-2024-003.",
            "Should create a task against invoice INV-2024-003",
        ),
        email(
            "email-004",
            "Re: Payment regarding invoice INV-2024-004",
            "We have not made any such purchase. Please revert invoice INV-2024-004 or issue a credit note.",
            "Should create a task against invoice INV-2024-004",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fallback_set_is_stable() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        let invoices = fallback_invoices(now);
        assert_eq!(invoices.len(), 6);
        assert_eq!(invoices[0].invoice_number, "INV-2024-0842");
        assert_eq!(invoices[4].status, InvoiceStatus::Paid);
        assert_eq!(invoices[4].suggested_action, SuggestedAction::completed());
        assert_eq!(invoices[2].created_at, now - Duration::hours(72));
    }

    #[test]
    fn activity_log_is_newest_first() {
        let now = Utc::now();
        let activities = initial_activities(now);
        assert_eq!(activities.len(), 10);
        assert!(activities.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn sample_emails_have_outcomes() {
        let emails = sample_emails();
        assert_eq!(emails.len(), 4);
        assert!(emails.iter().all(|e| !e.output.is_empty()));
    }
}
