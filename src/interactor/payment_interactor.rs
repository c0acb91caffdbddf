use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::entity::{Contact, CrmError, RecurringDonation};
use crate::interactor::db;

#[async_trait]
pub trait PaymentInteractor: Send + Sync {
    async fn search_contacts(&self, search_term: &str) -> Result<Vec<Contact>>;
    async fn get_contact(&self, contact_id: Uuid) -> Result<Contact>;
    async fn get_recurring_donations(&self, contact_id: Uuid) -> Result<Vec<RecurringDonation>>;
    async fn get_recurring_donation(&self, donation_id: i32) -> Result<RecurringDonation>;

    /// The one remote write: records a payment against a recurring donation
    /// and returns the generated transaction reference.
    async fn create_payment(
        &self,
        contact_id: Uuid,
        donation_id: i32,
        amount: f64,
        income_date: NaiveDate,
        description: Option<String>,
    ) -> Result<String>;
}

pub struct PaymentInteractorImpl {
    db_pool: Arc<PgPool>,
}

impl PaymentInteractorImpl {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentInteractor for PaymentInteractorImpl {
    async fn search_contacts(&self, search_term: &str) -> Result<Vec<Contact>> {
        let contacts = db::search_contacts(&self.db_pool, search_term).await?;
        Ok(contacts)
    }

    async fn get_contact(&self, contact_id: Uuid) -> Result<Contact> {
        let contact = db::get_contact_by_id(&self.db_pool, contact_id)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => anyhow::Error::from(CrmError::ContactNotFound),
                other => anyhow::Error::from(CrmError::Database(other)),
            })?;
        Ok(contact)
    }

    async fn get_recurring_donations(&self, contact_id: Uuid) -> Result<Vec<RecurringDonation>> {
        let donations = db::get_recurring_donations_by_contact(&self.db_pool, contact_id).await?;
        Ok(donations)
    }

    async fn get_recurring_donation(&self, donation_id: i32) -> Result<RecurringDonation> {
        let donation = db::get_recurring_donation_by_id(&self.db_pool, donation_id)
            .await?
            .ok_or(CrmError::RecurringDonationNotFound)?;
        Ok(donation)
    }

    async fn create_payment(
        &self,
        contact_id: Uuid,
        donation_id: i32,
        amount: f64,
        income_date: NaiveDate,
        description: Option<String>,
    ) -> Result<String> {
        if amount <= 0.0 {
            return Err(CrmError::InvalidAmount.into());
        }

        let reference = db::create_income_transaction(
            &self.db_pool,
            contact_id,
            donation_id,
            amount,
            income_date,
            description.as_deref(),
        )
        .await?;

        Ok(reference)
    }
}
