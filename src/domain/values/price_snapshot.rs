use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// One quoted price, with the 24h change when the source reports it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub price: f64,
    pub change_24h: Option<f64>,
}

impl Quote {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            change_24h: None,
        }
    }

    pub fn with_change(price: f64, change_24h: Option<f64>) -> Self {
        Self { price, change_24h }
    }
}

/// Prices keyed by portfolio symbol, as of one scheduler tick.
///
/// A symbol the source had no data for is simply absent. A quoted price of
/// zero is kept and compared like any other price.
#[derive(Debug, Clone, Serialize)]
pub struct PriceSnapshot {
    pub taken_at: DateTime<Utc>,
    quotes: BTreeMap<String, Quote>,
}

impl PriceSnapshot {
    pub fn new(taken_at: DateTime<Utc>) -> Self {
        Self {
            taken_at,
            quotes: BTreeMap::new(),
        }
    }

    /// Snapshot with no prices, used when a fetch failed.
    pub fn empty() -> Self {
        Self::new(Utc::now())
    }

    pub fn insert(&mut self, symbol: impl Into<String>, quote: Quote) {
        self.quotes.insert(symbol.into(), quote);
    }

    pub fn with_price(mut self, symbol: impl Into<String>, price: f64) -> Self {
        self.insert(symbol, Quote::new(price));
        self
    }

    /// Usable price for `symbol`, or `None` when absent or not finite.
    pub fn price(&self, symbol: &str) -> Option<f64> {
        self.quotes
            .get(symbol)
            .map(|q| q.price)
            .filter(|p| p.is_finite())
    }

    pub fn quote(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.get(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.quotes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
