use async_trait::async_trait;

pub mod balance_interactor;
pub mod db;
pub mod payment_interactor;
pub mod receipt_interactor;
pub mod statement_interactor;

// Base interactor trait
#[async_trait]
pub trait Interactor: Send + Sync {
    // Each interactor implementation will define its specific methods
}
