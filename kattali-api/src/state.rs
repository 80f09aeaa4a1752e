use std::sync::Arc;

use kattali_catalog::{FabricCatalog, PricingEngine, ProductCatalog};
use kattali_core::experiment::Experiment;
use kattali_core::repository::{EventPublisher, StockRepository};
use kattali_store::app_config::{Config, LatencyConfig};
use kattali_store::{LogEventPublisher, MockStockRepository, VisitorVariantStores};

#[derive(Clone)]
pub struct AppState {
    pub pricing: Arc<PricingEngine>,
    pub products: Arc<ProductCatalog>,
    pub stocks: Arc<dyn StockRepository>,
    pub events: Arc<dyn EventPublisher>,
    pub experiments: Arc<Vec<Experiment>>,
    pub variant_stores: Arc<VisitorVariantStores>,
    pub latency: LatencyConfig,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            pricing: Arc::new(PricingEngine::new(
                config.pricing.clone(),
                FabricCatalog::default(),
            )),
            products: Arc::new(ProductCatalog::default()),
            stocks: Arc::new(MockStockRepository::default()),
            events: Arc::new(LogEventPublisher),
            experiments: Arc::new(Experiment::builtin()),
            variant_stores: Arc::new(VisitorVariantStores::with_capacity(
                config.experiments.max_visitors,
            )),
            latency: config.latency.clone(),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EventPublisher>) -> Self {
        self.events = events;
        self
    }

    pub fn with_stocks(mut self, stocks: Arc<dyn StockRepository>) -> Self {
        self.stocks = stocks;
        self
    }

    pub fn experiment(&self, key: &str) -> Option<&Experiment> {
        self.experiments.iter().find(|e| e.key == key)
    }
}
