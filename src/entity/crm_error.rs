#[derive(Debug, thiserror::Error)]
pub enum CrmError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Transaction not found")]
    TransactionNotFound,

    #[error("Contact not found")]
    ContactNotFound,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Recurring donation not found")]
    RecurringDonationNotFound,

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid date")]
    InvalidDate,

    #[error("Start date is after end date")]
    InvalidDateRange,

    #[error("Failed to load resource: {0}")]
    ResourceLoad(String),

    #[error("Failed to generate document: {0}")]
    Layout(String),
}
