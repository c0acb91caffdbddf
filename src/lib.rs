pub mod commands;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod pdf;
pub mod presenter;
pub mod resources;
pub mod router;
pub mod utils;
pub mod view;

// Re-export commonly used items
pub use commands::*;
pub use di::*;
pub use entity::*;
pub use interactor::*;
pub use pdf::*;
pub use presenter::*;
pub use router::*;
pub use view::*;

use std::sync::Arc;

use sqlx::PgPool;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::Bot;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wires up the application components: the service container, the router
/// and the per-chat dialogue storage.
pub fn create_application(
    bot: Bot,
    db_pool: Arc<PgPool>,
    organization: Organization,
    logo: Option<Vec<u8>>,
) -> (
    TelegramRouter,
    Bot,
    Arc<ServiceContainer>,
    Arc<InMemStorage<State>>,
) {
    let services = Arc::new(ServiceContainer::new(db_pool, organization, logo));
    let router = TelegramRouter::new(services.clone());
    let storage = InMemStorage::<State>::new();

    (router, bot, services, storage)
}
