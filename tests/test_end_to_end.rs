use profitwatch::application::dispatch::DispatchOutcome;
use profitwatch::config::Settings;
use profitwatch::ProfitWatch;
use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PORTFOLIO: &str = r#"{
  "holdings": [
    { "symbol": "ETH", "name": "Ethereum", "quantity": 6.84722883, "quote_id": "ethereum",
      "targets": [
        { "level": 1, "price": 10500, "percentage": 30, "description": "First profit target (2.5x)" },
        { "level": 2, "price": 25200, "percentage": 40, "description": "Second profit target (6.0x)" },
        { "level": 3, "price": 33600, "percentage": 30, "description": "Final profit target (8.0x)" }
      ] },
    { "symbol": "ADA", "name": "Cardano", "quantity": 12189.717104, "quote_id": "cardano",
      "targets": [
        { "level": 1, "price": 2.40, "percentage": 100, "description": "Full position" }
      ] }
  ]
}"#;

fn portfolio_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PORTFOLIO.as_bytes()).unwrap();
    file
}

async fn mount_prices(server: &MockServer, body: serde_json::Value) {
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/simple/price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_pipeline_alerts_once_per_target() {
    let prices = MockServer::start().await;
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&webhook)
        .await;

    let file = portfolio_file();
    let settings = Settings {
        portfolio_path: file.path().to_path_buf(),
        price_api_url: prices.uri(),
        sink_url: Some(format!("{}/exec", webhook.uri())),
        notify_email: Some("me@example.com".into()),
        ..Settings::default()
    };
    let mut pw = ProfitWatch::new(&settings).unwrap();
    assert_eq!(pw.portfolio().len(), 2);

    mount_prices(
        &prices,
        serde_json::json!({ "ethereum": { "usd": 10500.0 }, "cardano": { "usd": 1.1 } }),
    )
    .await;
    let first = pw.check().await;
    assert_eq!(first.fired(), 1);
    assert_eq!(first.alerts[0].outcome, DispatchOutcome::Delivered);

    mount_prices(
        &prices,
        serde_json::json!({ "ethereum": { "usd": 12000.0 }, "cardano": { "usd": 2.5 } }),
    )
    .await;
    let second = pw.check().await;
    let keys: Vec<String> = second.alerts.iter().map(|a| a.payload.key().to_string()).collect();
    assert_eq!(keys, vec!["ADA-1-2.4"]);

    // upstream outage: nothing fires, nothing breaks
    prices.reset().await;
    let third = pw.check().await;
    assert!(third.fetch_error.is_some());
    assert!(third.alerts.is_empty());

    assert_eq!(webhook.received_requests().await.unwrap().len(), 2);
    assert_eq!(pw.history().keys(), vec!["ADA-1-2.4", "ETH-1-10500"]);
}

#[tokio::test]
async fn test_degraded_mode_without_sink() {
    let prices = MockServer::start().await;
    mount_prices(&prices, serde_json::json!({ "cardano": { "usd": 3.0 } })).await;

    let file = portfolio_file();
    let settings = Settings {
        portfolio_path: file.path().to_path_buf(),
        price_api_url: prices.uri(),
        ..Settings::default()
    };
    let mut pw = ProfitWatch::new(&settings).unwrap();

    let report = pw.check().await;
    assert_eq!(report.fired(), 1);
    assert_eq!(report.alerts[0].outcome, DispatchOutcome::Skipped);
}

#[tokio::test]
async fn test_missing_portfolio_fails_startup() {
    let settings = Settings {
        portfolio_path: "/nonexistent/portfolio.json".into(),
        ..Settings::default()
    };
    assert!(ProfitWatch::new(&settings).is_err());
}
