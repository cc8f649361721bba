use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable identity of a target occurrence: `(symbol, level, trigger price)`.
///
/// Trigger prices are compared by bit pattern, so two keys are equal only when
/// they were built from the same configured price.
#[derive(Debug, Clone, Serialize)]
pub struct AlertKey {
    symbol: String,
    level: u32,
    trigger_price: f64,
}

impl AlertKey {
    pub fn new(symbol: impl Into<String>, level: u32, trigger_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            level,
            trigger_price,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn trigger_price(&self) -> f64 {
        self.trigger_price
    }
}

impl PartialEq for AlertKey {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && self.level == other.level
            && self.trigger_price.to_bits() == other.trigger_price.to_bits()
    }
}

impl Eq for AlertKey {}

impl Hash for AlertKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
        self.level.hash(state);
        self.trigger_price.to_bits().hash(state);
    }
}

impl fmt::Display for AlertKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.symbol, self.level, self.trigger_price)
    }
}
