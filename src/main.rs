use clap::Parser;
use profitwatch::cli::commands::{Cli, Commands};
use profitwatch::config::Settings;
use profitwatch::domain::entities::portfolio::Portfolio;
use profitwatch::ProfitWatch;
use tokio::sync::watch;
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {e}");
            std::process::exit(1);
        }
    };
    if let Some(path) = cli.portfolio {
        settings.portfolio_path = path;
    }

    if let Err(e) = run_command(settings, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(settings: Settings, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Run { interval } => {
            let settings = match interval {
                Some(secs) => settings.with_check_interval_secs(secs)?,
                None => settings,
            };
            let mut pw = ProfitWatch::new(&settings)?;

            info!("Starting portfolio profit monitor");
            match &settings.sink_url {
                Some(_) => info!(
                    "Alerts will be sent to: {}",
                    settings.notify_email.as_deref().unwrap_or("(sink default)")
                ),
                None => info!("No notification sink configured - alerts are logged only"),
            }
            info!(
                holdings = pw.portfolio().len(),
                targets = pw.portfolio().target_count(),
                interval_secs = pw.check_interval().as_secs(),
                policy = %settings.fire_policy,
                "Monitoring"
            );

            let (stop_tx, stop_rx) = watch::channel(false);
            tokio::spawn(async move {
                wait_for_stop_signal().await;
                info!("Stopping portfolio monitor...");
                let _ = stop_tx.send(true);
            });

            let summary = pw.run(stop_rx).await;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Check => {
            let mut pw = ProfitWatch::new(&settings)?;
            let report = pw.check().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Prices => {
            let pw = ProfitWatch::new(&settings)?;
            let snapshot = pw.prices().await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::Validate => {
            let (portfolio, warnings) = Portfolio::load(&settings.portfolio_path)?;
            println!(
                "{}: {} holdings, {} targets",
                settings.portfolio_path.display(),
                portfolio.len(),
                portfolio.target_count()
            );
            for w in &warnings {
                println!("warning: {w}");
            }
        }
    }
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn wait_for_stop_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
