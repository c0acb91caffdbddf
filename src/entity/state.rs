use chrono::NaiveDate;
use uuid::Uuid;

/// Per-chat dialogue state. Everything a flow needs to finish is carried in
/// the variant so a handler never depends on widget state outside its chat.
#[derive(Clone, Default, Debug)]
pub enum State {
    #[default]
    Start,

    // Contribution statement flow
    AwaitingStatementContactSearch,
    AwaitingStatementRange {
        contact_id: Uuid,
    },

    // Single receipt flow
    AwaitingReceiptReference,

    // Recurring donation payment flow
    AwaitingPaymentContactSearch,
    AwaitingPaymentAmount {
        contact_id: Uuid,
        donation_id: i32,
        promised_amount: Option<f64>,
    },
    AwaitingPaymentDate {
        contact_id: Uuid,
        donation_id: i32,
        amount: f64,
    },
    AwaitingPaymentDescription {
        contact_id: Uuid,
        donation_id: i32,
        amount: f64,
        income_date: NaiveDate,
    },
}
