use async_trait::async_trait;

pub mod balance_presenter;
pub mod payment_presenter;
pub mod receipt_presenter;
pub mod statement_presenter;

// Base presenter trait
#[async_trait]
pub trait Presenter: Send + Sync {
    // Each presenter implementation will define its specific methods
}
