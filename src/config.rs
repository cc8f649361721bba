use crate::domain::error::DomainError;
use crate::domain::values::fire_policy::FirePolicy;
use crate::infrastructure::feeds::coingecko::COINGECKO_API_URL;
use std::path::PathBuf;
use std::time::Duration;

/// Sink URLs still containing this marker are treated as unconfigured.
const SINK_URL_PLACEHOLDER: &str = "YOUR_GOOGLE";

#[derive(Debug, Clone)]
pub struct Settings {
    pub portfolio_path: PathBuf,
    pub check_interval: Duration,
    pub price_api_url: String,
    pub vs_currency: String,

    /// `None` runs in degraded mode: alerts are logged, not sent.
    pub sink_url: Option<String>,
    pub notify_email: Option<String>,

    pub fetch_timeout: Duration,
    pub dispatch_timeout: Duration,
    pub fire_policy: FirePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            portfolio_path: PathBuf::from("portfolio.json"),
            check_interval: Duration::from_secs(30),
            price_api_url: COINGECKO_API_URL.to_string(),
            vs_currency: "usd".to_string(),
            sink_url: None,
            notify_email: None,
            fetch_timeout: Duration::from_secs(10),
            dispatch_timeout: Duration::from_secs(10),
            fire_policy: FirePolicy::OnCross,
        }
    }
}

impl Settings {
    /// Load from the process environment, reading `.env` first if present.
    pub fn load() -> Result<Self, DomainError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut settings = Settings::default();

        if let Some(path) = get("PROFITWATCH_PORTFOLIO") {
            settings.portfolio_path = PathBuf::from(path);
        }
        if let Some(v) = get("PROFITWATCH_CHECK_INTERVAL_SECS") {
            settings.check_interval = parse_secs("PROFITWATCH_CHECK_INTERVAL_SECS", &v)?;
        }
        if let Some(url) = get("PROFITWATCH_PRICE_API_URL") {
            settings.price_api_url = url;
        }
        if let Some(cur) = get("PROFITWATCH_VS_CURRENCY") {
            settings.vs_currency = cur.to_lowercase();
        }
        settings.sink_url = get("PROFITWATCH_SINK_URL").filter(|u| !u.contains(SINK_URL_PLACEHOLDER));
        settings.notify_email = get("PROFITWATCH_NOTIFY_EMAIL");
        if let Some(v) = get("PROFITWATCH_FETCH_TIMEOUT_SECS") {
            settings.fetch_timeout = parse_secs("PROFITWATCH_FETCH_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = get("PROFITWATCH_DISPATCH_TIMEOUT_SECS") {
            settings.dispatch_timeout = parse_secs("PROFITWATCH_DISPATCH_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = get("PROFITWATCH_FIRE_POLICY") {
            settings.fire_policy = v.parse().map_err(DomainError::Config)?;
        }

        Ok(settings)
    }

    pub fn with_check_interval_secs(mut self, secs: u64) -> Result<Self, DomainError> {
        if secs == 0 {
            return Err(DomainError::Config("--interval must be greater than zero".into()));
        }
        self.check_interval = Duration::from_secs(secs);
        Ok(self)
    }
}

fn parse_secs(key: &str, value: &str) -> Result<Duration, DomainError> {
    match value.parse::<u64>() {
        Ok(0) => Err(DomainError::Config(format!("{key} must be greater than zero"))),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(_) => Err(DomainError::Config(format!(
            "{key} must be a whole number of seconds, got '{value}'"
        ))),
    }
}
