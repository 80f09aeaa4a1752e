use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fabric types offered for bulk orders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FabricKey {
    Cotton,
    Silk,
    Wool,
    Synthetic,
    EcoBlend,
    Velvet,
}

impl FabricKey {
    pub const ALL: [FabricKey; 6] = [
        FabricKey::Cotton,
        FabricKey::Silk,
        FabricKey::Wool,
        FabricKey::Synthetic,
        FabricKey::EcoBlend,
        FabricKey::Velvet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FabricKey::Cotton => "cotton",
            FabricKey::Silk => "silk",
            FabricKey::Wool => "wool",
            FabricKey::Synthetic => "synthetic",
            FabricKey::EcoBlend => "eco-blend",
            FabricKey::Velvet => "velvet",
        }
    }
}

impl fmt::Display for FabricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown fabric type: {0}")]
pub struct UnknownFabric(pub String);

impl FromStr for FabricKey {
    type Err = UnknownFabric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FabricKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownFabric(s.to_string()))
    }
}

/// One catalog row: what a meter of this fabric costs and how it is shown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fabric {
    pub key: FabricKey,
    pub label: String,
    /// Whole currency units per meter.
    pub unit_price: i64,
}

/// Static fabric price list. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct FabricCatalog {
    fabrics: Vec<Fabric>,
}

impl FabricCatalog {
    pub fn new(fabrics: Vec<Fabric>) -> Self {
        Self { fabrics }
    }

    pub fn get(&self, key: FabricKey) -> Option<&Fabric> {
        self.fabrics.iter().find(|f| f.key == key)
    }

    /// Looks a fabric up by its wire key (`"eco-blend"`). Unknown keys yield `None`.
    pub fn find(&self, key: &str) -> Option<&Fabric> {
        key.parse::<FabricKey>().ok().and_then(|k| self.get(k))
    }

    pub fn unit_price(&self, key: FabricKey) -> Option<i64> {
        self.get(key).map(|f| f.unit_price)
    }

    pub fn display_name(&self, key: FabricKey) -> String {
        self.get(key)
            .map(|f| f.label.clone())
            .unwrap_or_else(|| key.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fabric> {
        self.fabrics.iter()
    }
}

impl Default for FabricCatalog {
    fn default() -> Self {
        let row = |key, label: &str, unit_price| Fabric {
            key,
            label: label.to_string(),
            unit_price,
        };

        Self::new(vec![
            row(FabricKey::Cotton, "Premium Cotton", 450),
            row(FabricKey::Silk, "Mulberry Silk", 1200),
            row(FabricKey::Wool, "Merino Wool", 850),
            row(FabricKey::Synthetic, "Tech Performance", 680),
            row(FabricKey::EcoBlend, "Eco Blend", 520),
            row(FabricKey::Velvet, "Luxury Velvet", 950),
        ])
    }
}
