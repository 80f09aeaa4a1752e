use config::builder::DefaultState;
use config::ConfigBuilder;
use kattali_catalog::PricingConfig;
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::variant_store::DEFAULT_MAX_VISITORS;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub latency: LatencyConfig,
    pub pricing: PricingConfig,
    pub experiments: ExperimentsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Artificial handler delays, standing in for the network hops a real CRM, mailing list or
/// market feed would add.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LatencyConfig {
    pub contact_ms: u64,
    pub newsletter_ms: u64,
    pub stocks_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            contact_ms: 500,
            newsletter_ms: 300,
            stocks_ms: 100,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExperimentsConfig {
    /// Visitors whose assignments are kept in memory at once.
    pub max_visitors: usize,
}

impl Default for ExperimentsConfig {
    fn default() -> Self {
        Self {
            max_visitors: DEFAULT_MAX_VISITORS,
        }
    }
}

impl LatencyConfig {
    pub fn none() -> Self {
        Self {
            contact_ms: 0,
            newsletter_ms: 0,
            stocks_ms: 0,
        }
    }

    pub fn contact(&self) -> Duration {
        Duration::from_millis(self.contact_ms)
    }

    pub fn newsletter(&self) -> Duration {
        Duration::from_millis(self.newsletter_ms)
    }

    pub fn stocks(&self) -> Duration {
        Duration::from_millis(self.stocks_ms)
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `KATTALI__SERVER__PORT=8080`
            .add_source(
                config::Environment::with_prefix("KATTALI")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, config::ConfigError> {
        builder.build()?.try_deserialize()
    }
}
