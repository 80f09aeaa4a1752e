pub mod currency;
pub mod fabric;
pub mod pricing;
pub mod product;

pub use currency::{format_currency, CURRENCY_SYMBOL};
pub use fabric::{Fabric, FabricCatalog, FabricKey};
pub use pricing::{DiscountTier, PricingConfig, PricingEngine, PricingRequest, PricingResult};
pub use product::{Product, ProductCatalog, ProductCategory};
