use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::interactor::db;

#[async_trait]
pub trait BalanceInteractor: Send + Sync {
    async fn get_net_balance(&self) -> Result<f64>;
}

pub struct BalanceInteractorImpl {
    db_pool: Arc<PgPool>,
}

impl BalanceInteractorImpl {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BalanceInteractor for BalanceInteractorImpl {
    async fn get_net_balance(&self) -> Result<f64> {
        let net = db::get_net_balance(&self.db_pool).await?;
        Ok(net)
    }
}
