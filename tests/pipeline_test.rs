//! End-to-end tests for pair evaluation against an in-memory provider

use fxpulse::config::Config;
use fxpulse::error::FetchError;
use fxpulse::services::signals::compute_closes;
use fxpulse::services::{
    BatchRunner, CrossRateResolver, JsonStore, PairEvaluator, PriceSeriesAccessor, RetryPolicy,
};
use fxpulse::sources::InMemoryProvider;
use fxpulse::types::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const DAY: i64 = 86_400;
const LOOKBACK: Duration = Duration::from_secs(150 * 86_400);

fn daily(closes: &[f64]) -> Vec<(i64, f64)> {
    daily_from(0, closes)
}

fn daily_from(first_day: i64, closes: &[f64]) -> Vec<(i64, f64)> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| ((first_day + i as i64) * DAY, c))
        .collect()
}

fn evaluator(provider: Arc<InMemoryProvider>, retry: RetryPolicy) -> PairEvaluator {
    let accessor = PriceSeriesAccessor::new(provider, retry);
    let resolver = CrossRateResolver::new(accessor.clone(), "USD", LOOKBACK);
    PairEvaluator::new(accessor, resolver, LOOKBACK)
}

fn pair(s: &str) -> CurrencyPair {
    CurrencyPair::parse(s).unwrap()
}

/// 70 closes from 100: +0.5 per step, then +2 per step for the last 10.
fn scenario_b_closes() -> Vec<f64> {
    let mut closes = vec![100.0];
    for i in 1..70 {
        let step = if i >= 60 { 2.0 } else { 0.5 };
        closes.push(closes[i - 1] + step);
    }
    closes
}

#[tokio::test]
async fn test_flat_series() {
    let provider = Arc::new(InMemoryProvider::new().with_series("USDJPY=X", &daily(&[150.0; 60])));
    let report = evaluator(provider, RetryPolicy::no_retry())
        .evaluate(&pair("USD/JPY"))
        .await;

    let ind = report.quote.indicators;
    assert_eq!(ind.ma_short, Some(150.0));
    assert_eq!(ind.ma_medium, Some(150.0));
    assert_eq!(ind.ma_long, Some(150.0));
    assert_eq!(ind.rsi, 50.0);
    assert_eq!(ind.macd, 0.0);
    assert_eq!(ind.volatility, Some(0.0));
    assert_eq!(report.quote.signal_short, Signal::Flat);
    assert_eq!(report.quote.signal_long, Signal::Flat);
    assert_eq!(report.quote.change_percent, 0.0);
}

#[tokio::test]
async fn test_accelerating_uptrend() {
    let closes = scenario_b_closes();
    assert_eq!(closes.len(), 70);
    assert_eq!(closes[69], 149.5);

    let provider = Arc::new(InMemoryProvider::new().with_series("USDKRW=X", &daily(&closes)));
    let report = evaluator(provider, RetryPolicy::no_retry())
        .evaluate(&pair("USD/KRW"))
        .await;

    let ind = report.quote.indicators;
    assert!(ind.ma_short.unwrap() > ind.ma_medium.unwrap());
    assert!(ind.ma_medium.unwrap() > ind.ma_long.unwrap());
    // Never falls, so there is no loss to compare against.
    assert_eq!(ind.rsi, 50.0);
    assert!(ind.macd > 0.0);

    assert_eq!(report.quote.signal_short, Signal::Down);
    assert_eq!(report.quote.signal_long, Signal::StrongUp);

    // 10 back: 129.5 -> 149.5
    assert_eq!(report.quote.forecast_short.direction, TrendDirection::Up);
    assert_eq!(report.quote.forecast_short.confidence, 100.0);
    // 60 back: 104.5 -> 149.5
    assert_eq!(report.quote.forecast_long.direction, TrendDirection::Up);
    assert_eq!(report.quote.forecast_long.confidence, 100.0);
}

#[tokio::test]
async fn test_cross_rate_inverts_mismatched_leg() {
    // EUR/KRW is not quoted; EUR/USD is, but KRW only as USD/KRW.
    let provider = Arc::new(
        InMemoryProvider::new()
            .with_series("EURUSD=X", &daily_from(0, &[1.10, 1.12, 1.08, 1.09, 1.11]))
            .with_series("USDKRW=X", &daily_from(2, &[1300.0, 1320.0, 1310.0, 1305.0, 1290.0])),
    );
    let report = evaluator(provider.clone(), RetryPolicy::no_retry())
        .evaluate(&pair("EUR/KRW"))
        .await;

    assert_eq!(report.quote.source, QuoteSource::CrossRate);
    // Days 2, 3 and 4 appear in both legs.
    assert_eq!(report.series.len(), 3);

    let expected = [1.08 * 1300.0, 1.09 * 1320.0, 1.11 * 1310.0];
    for (sample, want) in report.series.samples().iter().zip(expected) {
        assert!((sample.close - want).abs() < 1e-6, "{} vs {}", sample.close, want);
    }
    assert!((report.quote.last_close - 1.11 * 1310.0).abs() < 1e-6);

    assert_eq!(
        provider.calls(),
        vec!["EURKRW=X", "EURUSD=X", "KRWUSD=X", "USDKRW=X"]
    );
}

#[tokio::test]
async fn test_cross_rate_matches_direct_quote() {
    let a = [1.10, 1.12, 1.08, 1.09];
    let b = [0.85, 0.86, 0.84, 0.88];
    let provider = Arc::new(
        InMemoryProvider::new()
            .with_series("EURUSD=X", &daily(&a))
            .with_series("GBPUSD=X", &daily(&b)),
    );
    let report = evaluator(provider, RetryPolicy::no_retry())
        .evaluate(&pair("EUR/GBP"))
        .await;

    assert_eq!(report.series.len(), 4);
    for (i, sample) in report.series.samples().iter().enumerate() {
        assert!((sample.close - a[i] / b[i]).abs() < 1e-12);
    }
}

#[tokio::test]
async fn test_cross_rate_with_reference_base() {
    // USD/THB derived from THB/USD alone.
    let provider = Arc::new(
        InMemoryProvider::new().with_series("THBUSD=X", &daily(&[0.025, 0.028, 0.0275])),
    );
    let resolver = CrossRateResolver::new(
        PriceSeriesAccessor::new(provider, RetryPolicy::no_retry()),
        "usd",
        LOOKBACK,
    );
    let series = resolver.resolve("USD", "THB").await.unwrap();
    assert_eq!(series.len(), 3);
    assert!((series.closes()[0] - 40.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_short_series() {
    let provider = Arc::new(
        InMemoryProvider::new().with_series("USDKRW=X", &daily(&[100.0, 101.0, 102.0, 103.0, 104.0])),
    );
    let report = evaluator(provider, RetryPolicy::no_retry())
        .evaluate(&pair("USD/KRW"))
        .await;

    let ind = report.quote.indicators;
    assert_eq!(ind.ma_short, Some(102.0));
    assert_eq!(ind.ma_medium, None);
    assert_eq!(ind.ma_long, None);
    assert_eq!(ind.macd, 0.0);
    assert_eq!(report.quote.signal_short, Signal::Flat);
    assert_eq!(report.quote.signal_long, Signal::Flat);
    assert_eq!(report.quote.forecast_long.direction, TrendDirection::Unknown);
}

#[tokio::test]
async fn test_persistent_transient_failure_retries_then_no_data() {
    let provider = Arc::new(
        InMemoryProvider::new().with_failure("USDKRW=X", FetchError::Transient("429".into())),
    );
    let report = evaluator(provider.clone(), RetryPolicy::fixed(Duration::ZERO, 3))
        .evaluate(&pair("USD/KRW"))
        .await;

    assert!(report.quote.is_no_data());
    assert_eq!(report.quote.source, QuoteSource::None);
    assert_eq!(provider.call_count("USDKRW=X"), 3);
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let provider = Arc::new(InMemoryProvider::new());
    let accessor = PriceSeriesAccessor::new(provider.clone(), RetryPolicy::fixed(Duration::ZERO, 3));
    let err = accessor.fetch("XAUKRW=X", LOOKBACK).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(provider.call_count("XAUKRW=X"), 1);
}

#[tokio::test]
async fn test_batch_writes_store_files() {
    let dir = tempfile::tempdir().unwrap();
    let vars: HashMap<&str, String> = HashMap::from([
        ("FX_PAIRS", "USD/KRW,XAU/KRW".to_string()),
        ("FX_RETRY_ATTEMPTS", "1".to_string()),
        ("FX_PAIR_DELAY_MS", "0".to_string()),
        ("FX_DATA_DIR", dir.path().join("data").display().to_string()),
        ("FX_HISTORY_DIR", dir.path().join("history").display().to_string()),
        ("FX_HISTORY_DAYS", "3".to_string()),
    ]);
    let config = Config::from_vars(|key| vars.get(key).cloned());

    let provider = Arc::new(
        InMemoryProvider::new().with_series("USDKRW=X", &daily(&[1300.0, 1305.0, 1310.0, 1315.0])),
    );
    let runner = BatchRunner::from_config(PairEvaluator::from_config(provider, &config), &config);
    let store = JsonStore::new(&config.data_dir, &config.history_dir, config.history_days);

    let reports = runner.run(&config.pairs).await;
    assert_eq!(reports.len(), 2);
    for report in &reports {
        store.save(report).unwrap();
    }

    let snapshot: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("data/USD_KRW.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(snapshot["symbol"], "USD/KRW");
    assert_eq!(snapshot["lastValue"], 1315.0);
    assert_eq!(snapshot["source"], "DIRECT");

    let history: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("history/USD_KRW_history.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(history["rates"].as_array().unwrap().len(), 3);
    assert_eq!(history["rates"][0]["rate"], 1305.0);

    let missing: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("data/XAU_KRW.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(missing["signal_long"], "NO_DATA");
    assert!(!dir.path().join("history/XAU_KRW_history.json").exists());
}

#[test]
fn test_snapshot_matches_direct_computation() {
    let closes = scenario_b_closes();
    let snapshot = compute_closes(&closes);
    let window: f64 = closes[65..].iter().sum::<f64>() / 5.0;
    assert!((snapshot.ma_short.unwrap() - window).abs() < 1e-9);
    assert!((0.0..=100.0).contains(&snapshot.rsi));
}

#[tokio::test]
async fn test_raw_gaps_are_normalized_before_evaluation() {
    let raw = vec![
        RawSample { timestamp: 2 * DAY, close: Some(1310.0) },
        RawSample { timestamp: 0, close: Some(1300.0) },
        RawSample { timestamp: DAY, close: None },
        RawSample { timestamp: 3 * DAY, close: Some(0.0) },
        RawSample { timestamp: 4 * DAY, close: Some(1320.0) },
        RawSample { timestamp: 4 * DAY, close: Some(1326.2) },
    ];
    let provider = Arc::new(InMemoryProvider::new().with_raw("USDKRW=X", raw));
    let report = evaluator(provider, RetryPolicy::no_retry())
        .evaluate(&pair("USD/KRW"))
        .await;

    assert_eq!(report.quote.source, QuoteSource::Direct);
    assert_eq!(report.series.closes(), vec![1300.0, 1310.0, 1326.2]);
    assert_eq!(report.quote.prev_close, 1310.0);
    assert_eq!(report.quote.last_close, 1326.2);
    assert!((report.quote.change_percent - 16.2 / 13.1).abs() < 1e-9);
}

#[tokio::test]
async fn test_raw_without_closes_is_retried_as_empty() {
    let raw = vec![
        RawSample { timestamp: 0, close: None },
        RawSample { timestamp: DAY, close: None },
    ];
    let provider = Arc::new(InMemoryProvider::new().with_raw("USDKRW=X", raw));
    let report = evaluator(provider.clone(), RetryPolicy::fixed(Duration::ZERO, 3))
        .evaluate(&pair("USD/KRW"))
        .await;

    assert!(report.quote.is_no_data());
    assert_eq!(provider.call_count("USDKRW=X"), 3);
}
