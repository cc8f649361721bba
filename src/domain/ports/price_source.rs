use crate::domain::error::DomainError;
use crate::domain::values::price_snapshot::PriceSnapshot;
use async_trait::async_trait;

/// Read-only source of current prices for the tracked holdings.
/// Implementations can poll CoinGecko, an exchange, a fixture file, etc.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Name of this source (e.g., "coingecko")
    fn name(&self) -> &str;

    /// Fetch current prices keyed by portfolio symbol.
    ///
    /// Symbols the source has no data for must be left out of the snapshot
    /// rather than reported as zero.
    async fn fetch(&self) -> Result<PriceSnapshot, DomainError>;
}
