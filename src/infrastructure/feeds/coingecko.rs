use crate::domain::entities::portfolio::Portfolio;
use crate::domain::error::DomainError;
use crate::domain::ports::price_source::PriceSource;
use crate::domain::values::price_snapshot::{PriceSnapshot, Quote};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;

/// Default CoinGecko public API base URL.
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com";

/// CoinGecko simple-price feed (no auth required).
pub struct CoinGeckoSource {
    /// (portfolio symbol, CoinGecko id) pairs
    assets: Vec<(String, String)>,
    vs_currency: String,
    base_url: String,
    client: reqwest::Client,
}

impl CoinGeckoSource {
    pub fn new(portfolio: &Portfolio, timeout: Duration) -> Self {
        Self {
            assets: portfolio
                .holdings
                .iter()
                .map(|h| (h.symbol.clone(), h.quote_id()))
                .collect(),
            vs_currency: "usd".into(),
            base_url: COINGECKO_API_URL.into(),
            client: reqwest::Client::builder()
                .user_agent("profitwatch/0.1")
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_vs_currency(mut self, vs_currency: impl Into<String>) -> Self {
        self.vs_currency = vs_currency.into().to_lowercase();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn ids_param(&self) -> String {
        let mut ids: Vec<&str> = self.assets.iter().map(|(_, id)| id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.join(",")
    }
}

/// `{ "<id>": { "usd": 3456.7, "usd_24h_change": -1.2 } }`; either value may be null.
type SimplePriceResponse = HashMap<String, HashMap<String, Option<f64>>>;

#[async_trait]
impl PriceSource for CoinGeckoSource {
    fn name(&self) -> &str {
        "coingecko"
    }

    async fn fetch(&self) -> Result<PriceSnapshot, DomainError> {
        if self.assets.is_empty() {
            return Ok(PriceSnapshot::empty());
        }

        let url = format!("{}/api/v3/simple/price", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("ids", self.ids_param().as_str()),
                ("vs_currencies", self.vs_currency.as_str()),
                ("include_24hr_change", "true"),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Network(format!(
                "CoinGecko returned {status}: {body}"
            )));
        }

        let data: SimplePriceResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))?;

        let change_key = format!("{}_24h_change", self.vs_currency);
        let mut snapshot = PriceSnapshot::new(Utc::now());

        for (symbol, id) in &self.assets {
            let Some(fields) = data.get(id) else {
                continue;
            };
            let Some(price) = fields.get(&self.vs_currency).copied().flatten() else {
                continue;
            };
            let change = fields.get(&change_key).copied().flatten();
            snapshot.insert(symbol.clone(), Quote::with_change(price, change));
        }

        Ok(snapshot)
    }
}
