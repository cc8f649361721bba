use super::alert_key::AlertKey;
use std::collections::HashSet;

/// Targets that already fired during this process lifetime.
///
/// Insert-only. Nothing is ever removed, so a recorded target stays silent
/// even if the price falls back and crosses its threshold again.
#[derive(Debug, Clone, Default)]
pub struct TriggerHistory {
    fired: HashSet<AlertKey>,
}

impl TriggerHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &AlertKey) -> bool {
        self.fired.contains(key)
    }

    /// Records `key`. Returns `false` if it was already present.
    pub fn record(&mut self, key: AlertKey) -> bool {
        self.fired.insert(key)
    }

    pub fn len(&self) -> usize {
        self.fired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fired.is_empty()
    }

    /// Rendered keys in sorted order, for reports and logs.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.fired.iter().map(|k| k.to_string()).collect();
        keys.sort();
        keys
    }
}
