use anyhow::Context;
use fxpulse::config::{parse_pairs, Config};
use fxpulse::services::{BatchRunner, JsonStore, PairEvaluator};
use fxpulse::sources::YahooFinanceClient;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fxpulse=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();

    // Pairs given on the command line replace the configured list
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let pairs = parse_pairs(&args.join(","));
        anyhow::ensure!(!pairs.is_empty(), "no valid currency pairs in arguments");
        config.pairs = pairs;
    }

    info!(
        "Evaluating {} pairs via {} (lookback {} days)",
        config.pairs.len(),
        config.reference_currency,
        config.lookback().as_secs() / 86_400
    );

    let client = YahooFinanceClient::new(config.yahoo_base_url.clone(), config.http_timeout())
        .context("failed to build HTTP client")?;
    let evaluator = PairEvaluator::from_config(Arc::new(client), &config);
    let runner = BatchRunner::from_config(evaluator, &config);
    let store = JsonStore::new(&config.data_dir, &config.history_dir, config.history_days);

    let reports = runner.run(&config.pairs).await;

    for report in &reports {
        let quote = &report.quote;
        info!(
            "{}: {:.4} ({:+.2}%) short {} long {} [{:?}]",
            quote.pair,
            quote.last_close,
            quote.change_percent,
            quote.signal_short,
            quote.signal_long,
            quote.source
        );

        if let Err(e) = store.save(report) {
            error!("Failed to save {}: {}", quote.pair, e);
        }
    }

    let failed = reports.iter().filter(|r| r.quote.is_no_data()).count();
    info!("Done: {} ok, {} without data", reports.len() - failed, failed);
    Ok(())
}
