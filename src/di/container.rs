use std::sync::Arc;

use sqlx::PgPool;

use crate::entity::Organization;
use crate::pdf::ReceiptRenderer;

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    db_pool: Arc<PgPool>,
    organization: Organization,
    renderer: Arc<ReceiptRenderer>,
}

impl ServiceContainer {
    /// Create a new service container with essential dependencies. The logo
    /// bytes are loaded once at startup and injected into the renderer.
    pub fn new(db_pool: Arc<PgPool>, organization: Organization, logo: Option<Vec<u8>>) -> Self {
        let renderer = Arc::new(ReceiptRenderer::new(organization.clone(), logo));

        Self {
            db_pool,
            organization,
            renderer,
        }
    }

    pub fn db_pool(&self) -> Arc<PgPool> {
        self.db_pool.clone()
    }

    pub fn organization(&self) -> &Organization {
        &self.organization
    }

    pub fn renderer(&self) -> Arc<ReceiptRenderer> {
        self.renderer.clone()
    }
}
