use crate::domain::entities::holding::{Holding, Target};
use crate::domain::values::alert_key::AlertKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a sink needs to report one crossed target.
///
/// Values are kept at full precision. Rounding happens only in [`message`](Self::message).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub display_name: String,
    pub current_price: f64,
    pub target_level: u32,
    pub trigger_price: f64,
    pub target_description: String,
    pub sell_percentage: f64,
    pub sold_quantity: f64,
    pub proceeds: f64,
}

impl NotificationPayload {
    pub fn new(holding: &Holding, target: &Target, current_price: f64, at: DateTime<Utc>) -> Self {
        let sold_quantity = holding.sell_quantity(target);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: at,
            symbol: holding.symbol.clone(),
            display_name: holding.name.clone(),
            current_price,
            target_level: target.level,
            trigger_price: target.price,
            target_description: target.description.clone(),
            sell_percentage: target.percentage,
            sold_quantity,
            proceeds: sold_quantity * current_price,
        }
    }

    pub fn key(&self) -> AlertKey {
        AlertKey::new(self.symbol.as_str(), self.target_level, self.trigger_price)
    }

    /// Human-readable alert text.
    pub fn message(&self) -> String {
        format!(
            "PROFIT ALERT: {} ({}) reached ${:.4}!\n\nTarget: {}\nAction: Sell {}% of position ({:.4} {})\nProfit Value: ${:.2}",
            self.display_name,
            self.symbol,
            self.current_price,
            self.target_description,
            self.sell_percentage,
            self.sold_quantity,
            self.symbol,
            self.proceeds,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_rounds_only_for_display() {
        let eth = Holding::new("ETH", "Ethereum", 6.84722883);
        let target = Target::new(1, 10500.0, 30.0, "First profit target (2.5x)");
        let p = NotificationPayload::new(&eth, &target, 10500.0, Utc::now());

        let msg = p.message();
        assert!(msg.starts_with("PROFIT ALERT: Ethereum (ETH) reached $10500.0000!"));
        assert!(msg.contains("Sell 30% of position (2.0542 ETH)"));
        assert!(msg.contains("Profit Value: $21568.77"));
        // unrounded on the struct
        assert!((p.sold_quantity - 2.054168649).abs() < 1e-12);
        assert_eq!(p.key().to_string(), "ETH-1-10500");
    }
}
