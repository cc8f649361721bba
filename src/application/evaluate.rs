use crate::domain::entities::notification::NotificationPayload;
use crate::domain::entities::portfolio::Portfolio;
use crate::domain::values::price_snapshot::PriceSnapshot;
use crate::domain::values::trigger_history::TriggerHistory;
use chrono::{DateTime, Utc};

/// Find targets that crossed their threshold and have not fired yet.
///
/// Each returned payload's key is recorded in `history` before the next
/// target is looked at. Output order is portfolio order, then target order.
pub fn evaluate(
    snapshot: &PriceSnapshot,
    portfolio: &Portfolio,
    history: &mut TriggerHistory,
) -> Vec<NotificationPayload> {
    evaluate_at(snapshot, portfolio, history, Utc::now())
}

/// [`evaluate`] with an explicit evaluation time stamped on every payload.
pub fn evaluate_at(
    snapshot: &PriceSnapshot,
    portfolio: &Portfolio,
    history: &mut TriggerHistory,
    now: DateTime<Utc>,
) -> Vec<NotificationPayload> {
    let mut payloads = Vec::new();

    for holding in &portfolio.holdings {
        // No quote this tick: skip, never treat as zero
        let Some(price) = snapshot.price(&holding.symbol) else {
            continue;
        };

        for target in &holding.targets {
            if price < target.price {
                continue;
            }
            if history.record(target.key(&holding.symbol)) {
                payloads.push(NotificationPayload::new(holding, target, price, now));
            }
        }
    }

    payloads
}
