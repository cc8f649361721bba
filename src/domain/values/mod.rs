pub mod alert_key;
pub mod fire_policy;
pub mod price_snapshot;
pub mod trigger_history;
