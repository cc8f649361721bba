use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When a crossed target counts as fired and is written to the trigger history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirePolicy {
    /// Record the target as soon as its threshold is crossed. A failed send is not retried.
    #[default]
    OnCross,
    /// Record the target only once the sink accepted the alert. Failed sends re-fire next tick.
    OnDelivery,
}

impl fmt::Display for FirePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnCross => write!(f, "on_cross"),
            Self::OnDelivery => write!(f, "on_delivery"),
        }
    }
}

impl FromStr for FirePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "on_cross" | "cross" => Ok(Self::OnCross),
            "on_delivery" | "delivery" => Ok(Self::OnDelivery),
            _ => Err(format!(
                "Invalid fire policy: '{}'. Use 'on_cross' or 'on_delivery'",
                s
            )),
        }
    }
}
