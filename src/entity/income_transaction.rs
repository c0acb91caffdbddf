use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct IncomeTransaction {
    pub id: i32,
    pub reference: String,
    pub income_date: NaiveDate,
    pub income_type: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub contact_id: Option<Uuid>,
    pub account_id: Option<Uuid>,
    pub recurring_donation_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl IncomeTransaction {
    /// Amount with the ledger's "missing means zero" rule applied.
    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}
