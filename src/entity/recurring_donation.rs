use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecurringDonation {
    pub id: i32,
    pub contact_id: Uuid,
    pub name: String,
    pub promised_amount: Option<f64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
