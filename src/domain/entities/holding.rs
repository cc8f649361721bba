use crate::domain::values::alert_key::AlertKey;
use serde::{Deserialize, Serialize};

/// A profit-taking threshold on one holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub level: u32,
    /// Trigger price in the quote currency.
    pub price: f64,
    /// Share of the holding to sell, 0–100.
    pub percentage: f64,
    pub description: String,
}

impl Target {
    pub fn new(level: u32, price: f64, percentage: f64, description: impl Into<String>) -> Self {
        Self {
            level,
            price,
            percentage,
            description: description.into(),
        }
    }

    pub fn key(&self, symbol: &str) -> AlertKey {
        AlertKey::new(symbol, self.level, self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    #[serde(alias = "holdings")]
    pub quantity: f64,
    /// Identifier used by the quote source (e.g. "ethereum" for ETH).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Holding {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, quantity: f64) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            quantity,
            quote_id: None,
            targets: Vec::new(),
        }
    }

    pub fn with_quote_id(mut self, quote_id: impl Into<String>) -> Self {
        self.quote_id = Some(quote_id.into());
        self
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    /// Quote source identifier, falling back to the lowercased symbol.
    pub fn quote_id(&self) -> String {
        self.quote_id
            .clone()
            .unwrap_or_else(|| self.symbol.to_lowercase())
    }

    pub fn sell_quantity(&self, target: &Target) -> f64 {
        self.quantity * target.percentage / 100.0
    }
}
