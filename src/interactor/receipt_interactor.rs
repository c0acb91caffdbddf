use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::entity::{Account, Contact, CrmError, IncomeTransaction};
use crate::interactor::db;
use crate::utils;

/// A single transaction together with whichever donor records it links to.
pub struct ReceiptContext {
    pub transaction: IncomeTransaction,
    pub contact: Option<Contact>,
    pub account: Option<Account>,
}

#[async_trait]
pub trait ReceiptInteractor: Send + Sync {
    async fn fetch_by_reference(&self, reference: &str) -> Result<ReceiptContext>;
    async fn fetch_by_id(&self, transaction_id: i32) -> Result<ReceiptContext>;
}

pub struct ReceiptInteractorImpl {
    db_pool: Arc<PgPool>,
}

impl ReceiptInteractorImpl {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }

    // A dangling donor link surfaces as a typed not-found error instead of a
    // bare database error.
    async fn resolve_donors(&self, transaction: IncomeTransaction) -> Result<ReceiptContext> {
        let contact = match transaction.contact_id {
            Some(id) => Some(db::get_contact_by_id(&self.db_pool, id).await.map_err(
                |e| match e {
                    sqlx::Error::RowNotFound => CrmError::ContactNotFound,
                    e => CrmError::Database(e),
                },
            )?),
            None => None,
        };
        let account = match transaction.account_id {
            Some(id) => Some(db::get_account_by_id(&self.db_pool, id).await.map_err(
                |e| match e {
                    sqlx::Error::RowNotFound => CrmError::AccountNotFound,
                    e => CrmError::Database(e),
                },
            )?),
            None => None,
        };

        Ok(ReceiptContext {
            transaction,
            contact,
            account,
        })
    }
}

#[async_trait]
impl ReceiptInteractor for ReceiptInteractorImpl {
    async fn fetch_by_reference(&self, reference: &str) -> Result<ReceiptContext> {
        let normalized = utils::normalize_reference(reference);
        let transaction = db::get_transaction_by_reference(&self.db_pool, &normalized)
            .await?
            .ok_or(CrmError::TransactionNotFound)?;

        self.resolve_donors(transaction).await
    }

    async fn fetch_by_id(&self, transaction_id: i32) -> Result<ReceiptContext> {
        let transaction = db::get_transaction_by_id(&self.db_pool, transaction_id)
            .await?
            .ok_or(CrmError::TransactionNotFound)?;

        self.resolve_donors(transaction).await
    }
}
