pub mod app_config;
pub mod events;
pub mod stock_repo;
pub mod variant_store;

pub use events::{LogEventPublisher, MemoryEventPublisher};
pub use stock_repo::MockStockRepository;
pub use variant_store::{InMemoryVariantStore, VisitorVariantStores};
