use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Exchange {
    Dse,
    Cse,
}

impl Exchange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Dse => "DSE",
            Exchange::Cse => "CSE",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exchange {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DSE" => Ok(Exchange::Dse),
            "CSE" => Ok(Exchange::Cse),
            _ => Err(()),
        }
    }
}

/// One ticker line on the stocks page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockRow {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change_pct: f64,
    pub exchange: Exchange,
    pub updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<u64>,
}

/// Listing filters from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockFilter {
    /// Exchange tag, case-insensitive. `None` or `"all"` keeps every row; any other
    /// unrecognised tag keeps none.
    pub exchange: Option<String>,
    /// Substring of symbol or name, case-insensitive.
    pub q: Option<String>,
}

impl StockFilter {
    pub fn apply(&self, rows: Vec<StockRow>) -> Vec<StockRow> {
        let exchange = self
            .exchange
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty() && !e.eq_ignore_ascii_case("all"))
            .map(str::to_lowercase);
        let query = self
            .q
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        rows.into_iter()
            .filter(|row| {
                exchange
                    .as_deref()
                    .map_or(true, |e| row.exchange.as_str().to_lowercase() == e)
            })
            .filter(|row| {
                query.as_deref().map_or(true, |q| {
                    row.symbol.to_lowercase().contains(q) || row.name.to_lowercase().contains(q)
                })
            })
            .collect()
    }
}

/// Normalises loosely-shaped feed records into `StockRow`s.
///
/// Accepts the alternate field names used by exchange feeds (`code`, `companyName`,
/// `lastPrice`, `changePercent`). Missing exchange means DSE; a missing timestamp is
/// stamped with `now`.
pub fn adapt_stock_data(items: &[Value], now: DateTime<Utc>) -> Vec<StockRow> {
    items.iter().map(|item| adapt_one(item, now)).collect()
}

fn adapt_one(item: &Value, now: DateTime<Utc>) -> StockRow {
    let exchange = first_str(item, &["exchange"])
        .and_then(|e| match e.parse::<Exchange>() {
            Ok(parsed) => Some(parsed),
            Err(()) => {
                tracing::warn!("Unknown exchange tag {:?}, defaulting to DSE", e);
                None
            }
        })
        .unwrap_or(Exchange::Dse);

    let updated = first_str(item, &["updated"])
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now);

    StockRow {
        symbol: first_str(item, &["symbol", "code"]).unwrap_or_default(),
        name: first_str(item, &["name", "companyName"]).unwrap_or_default(),
        price: first_number(item, &["price", "lastPrice"]),
        change_pct: first_number(item, &["changePct", "changePercent"]),
        exchange,
        updated,
        volume: item.get("volume").and_then(Value::as_u64),
        market_cap: item.get("marketCap").and_then(Value::as_u64),
    }
}

fn first_str(item: &Value, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|f| item.get(*f).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// First field holding a non-zero number (numeric or numeric string); `0.0` otherwise.
fn first_number(item: &Value, fields: &[&str]) -> f64 {
    fields
        .iter()
        .filter_map(|f| item.get(*f))
        .filter_map(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .find(|n| n.is_finite() && *n != 0.0)
        .unwrap_or(0.0)
}
