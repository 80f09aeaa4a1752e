use async_trait::async_trait;
use chrono::Utc;
use kattali_core::repository::StockRepository;
use kattali_core::stock::{adapt_stock_data, StockRow};
use kattali_core::CoreResult;
use serde_json::{json, Value};

/// Canned DSE/CSE quotes. Records are kept in feed shape and run through the same adapter a
/// live feed would use, stamped with the time of each request.
pub struct MockStockRepository {
    records: Vec<Value>,
}

impl MockStockRepository {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }
}

impl Default for MockStockRepository {
    fn default() -> Self {
        Self::new(vec![
            json!({
                "symbol": "GRAMEENPHONE",
                "name": "Grameenphone Ltd.",
                "price": 358.50,
                "changePct": 2.34,
                "exchange": "DSE",
                "volume": 125000,
                "marketCap": 48500000000u64
            }),
            json!({
                "symbol": "SQURPHARMA",
                "name": "Square Pharmaceuticals Ltd.",
                "price": 245.80,
                "changePct": -1.24,
                "exchange": "DSE",
                "volume": 89000,
                "marketCap": 32400000000u64
            }),
            json!({
                "symbol": "WALTONHIL",
                "name": "Walton Hi-Tech Industries Ltd.",
                "price": 1245.60,
                "changePct": 5.67,
                "exchange": "DSE",
                "volume": 45000,
                "marketCap": 124560000000u64
            }),
            json!({
                "symbol": "BRAC",
                "name": "BRAC Bank Ltd.",
                "price": 56.30,
                "changePct": 0.89,
                "exchange": "CSE",
                "volume": 200000,
                "marketCap": 23800000000u64
            }),
            json!({
                "symbol": "KATTALI",
                "name": "Kattali Textile Ltd.",
                "price": 156.75,
                "changePct": 3.45,
                "exchange": "DSE",
                "volume": 67000,
                "marketCap": 15675000000u64
            }),
        ])
    }
}

#[async_trait]
impl StockRepository for MockStockRepository {
    async fn list_stocks(&self) -> CoreResult<Vec<StockRow>> {
        Ok(adapt_stock_data(&self.records, Utc::now()))
    }
}
