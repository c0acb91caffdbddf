use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::entity::{Contact, CrmError, IncomeTransaction};
use crate::interactor::db;

#[async_trait]
pub trait StatementInteractor: Send + Sync {
    async fn search_contacts(&self, search_term: &str) -> Result<Vec<Contact>>;

    /// Contact info and the transaction list are independent reads, so they
    /// are fetched concurrently.
    async fn fetch_statement(
        &self,
        contact_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<(Contact, Vec<IncomeTransaction>)>;
}

pub struct StatementInteractorImpl {
    db_pool: Arc<PgPool>,
}

impl StatementInteractorImpl {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl StatementInteractor for StatementInteractorImpl {
    async fn search_contacts(&self, search_term: &str) -> Result<Vec<Contact>> {
        let contacts = db::search_contacts(&self.db_pool, search_term).await?;
        Ok(contacts)
    }

    async fn fetch_statement(
        &self,
        contact_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<(Contact, Vec<IncomeTransaction>)> {
        let contact_fut = db::get_contact_by_id(&self.db_pool, contact_id);
        let transactions_fut = async {
            match range {
                Some((start, end)) => {
                    db::get_transactions_by_date_range(&self.db_pool, contact_id, start, end).await
                }
                None => db::get_transactions_by_contact(&self.db_pool, contact_id).await,
            }
        };

        let (contact, transactions) = tokio::try_join!(contact_fut, transactions_fut)
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => CrmError::ContactNotFound,
                other => CrmError::Database(other),
            })?;

        Ok((contact, transactions))
    }
}
