//! Static portfolio configuration: holdings, their targets, and load-time validation.

use crate::domain::entities::holding::Holding;
use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Percentage sums within this distance of 100 are not reported.
const PERCENT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }

    /// Parse and validate a portfolio document. Returns the portfolio and any
    /// non-fatal warnings.
    pub fn from_json(json: &str) -> Result<(Self, Vec<String>), DomainError> {
        let portfolio: Portfolio = serde_json::from_str(json)
            .map_err(|e| DomainError::Config(format!("Invalid portfolio JSON: {e}")))?;
        let warnings = portfolio.validate()?;
        Ok((portfolio, warnings))
    }

    pub fn load(path: &Path) -> Result<(Self, Vec<String>), DomainError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!("Cannot read portfolio {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Checks the configuration. Hard problems are errors; conventions the
    /// evaluator does not depend on (ascending targets, percentages summing
    /// to 100, positive trigger prices) only produce warnings.
    pub fn validate(&self) -> Result<Vec<String>, DomainError> {
        let mut warnings = Vec::new();
        let mut symbols = HashSet::new();

        for h in &self.holdings {
            if h.symbol.trim().is_empty() {
                return Err(DomainError::Config("Holding with empty symbol".into()));
            }
            if !symbols.insert(h.symbol.to_uppercase()) {
                return Err(DomainError::Config(format!(
                    "Duplicate holding symbol: {}",
                    h.symbol
                )));
            }
            if !h.quantity.is_finite() || h.quantity < 0.0 {
                return Err(DomainError::Config(format!(
                    "{}: quantity must be a non-negative number, got {}",
                    h.symbol, h.quantity
                )));
            }
            if h.targets.is_empty() {
                warnings.push(format!("{}: no targets configured", h.symbol));
                continue;
            }

            let mut levels = HashSet::new();
            for t in &h.targets {
                if !levels.insert(t.level) {
                    return Err(DomainError::Config(format!(
                        "{}: duplicate target level {}",
                        h.symbol, t.level
                    )));
                }
                if !t.price.is_finite() {
                    return Err(DomainError::Config(format!(
                        "{} level {}: trigger price must be finite",
                        h.symbol, t.level
                    )));
                }
                if !t.percentage.is_finite() || !(0.0..=100.0).contains(&t.percentage) {
                    return Err(DomainError::Config(format!(
                        "{} level {}: percentage must be between 0 and 100, got {}",
                        h.symbol, t.level, t.percentage
                    )));
                }
                if t.price <= 0.0 {
                    warnings.push(format!(
                        "{} level {}: non-positive trigger price {} fires on any price",
                        h.symbol, t.level, t.price
                    ));
                }
            }

            if h.targets.windows(2).any(|w| w[1].price < w[0].price) {
                warnings.push(format!("{}: targets are not in ascending price order", h.symbol));
            }

            let sum: f64 = h.targets.iter().map(|t| t.percentage).sum();
            if (sum - 100.0).abs() > PERCENT_SUM_TOLERANCE {
                warnings.push(format!("{}: target percentages sum to {sum}, not 100", h.symbol));
            }
        }

        Ok(warnings)
    }

    pub fn holding(&self, symbol: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.symbol == symbol)
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.holdings.iter().map(|h| h.symbol.as_str()).collect()
    }

    pub fn target_count(&self) -> usize {
        self.holdings.iter().map(|h| h.targets.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}
