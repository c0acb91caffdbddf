use async_trait::async_trait;

pub mod balance_view;
pub mod payment_view;
pub mod receipt_view;
pub mod statement_view;

// Base view trait
#[async_trait]
pub trait View: Send + Sync {
    // Each view implementation will define its specific methods
}
