//! Yahoo Finance chart API client for daily FX closes.
//!
//! Currency pairs are quoted as `USDKRW=X`. Only the close column is used.

use super::PriceProvider;
use crate::error::FetchError;
use crate::types::{CurrencyPair, RawSample};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Option<Vec<Option<f64>>>,
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &str, period: Duration) -> String {
        let period2 = Utc::now().timestamp();
        let period1 = period2 - period.as_secs() as i64;
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&includePrePost=false",
            self.base_url, symbol, period1, period2
        )
    }
}

/// Map a non-success HTTP status onto a fetch failure kind.
fn classify_status(status: StatusCode, symbol: &str) -> FetchError {
    match status {
        StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            FetchError::NotFound(symbol.to_string())
        }
        _ => FetchError::Transient(format!("API error for {}: {}", symbol, status)),
    }
}

/// Decode a chart response body into raw samples.
fn parse_chart(body: &str, symbol: &str) -> Result<Vec<RawSample>, FetchError> {
    let data: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Malformed(format!("{}: {}", symbol, e)))?;

    if let Some(error) = data.chart.error {
        return Err(if error.code.eq_ignore_ascii_case("Not Found") {
            FetchError::NotFound(symbol.to_string())
        } else {
            FetchError::Transient(format!(
                "Yahoo API error: {} - {}",
                error.code, error.description
            ))
        });
    }

    let result = data
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| FetchError::Transient(format!("Empty result for {}", symbol)))?;

    let timestamps = result
        .timestamp
        .ok_or_else(|| FetchError::Transient(format!("No timestamps for {}", symbol)))?;

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close)
        .ok_or_else(|| FetchError::Malformed(format!("No close data for {}", symbol)))?;

    Ok(timestamps
        .iter()
        .enumerate()
        .map(|(i, &timestamp)| RawSample {
            timestamp,
            close: closes.get(i).copied().flatten(),
        })
        .collect())
}

#[async_trait]
impl PriceProvider for YahooFinanceClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    fn symbol_for(&self, pair: &CurrencyPair) -> String {
        format!("{}{}=X", pair.base, pair.quote)
    }

    async fn fetch_series(
        &self,
        symbol: &str,
        period: Duration,
    ) -> Result<Vec<RawSample>, FetchError> {
        let url = self.chart_url(symbol, period);
        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transient(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status, symbol));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transient(format!("Failed to read body: {}", e)))?;

        parse_chart(&body, symbol)
    }
}
