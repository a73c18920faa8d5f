//! Evaluation of many pairs, sequentially with spacing or concurrently.

use super::PairEvaluator;
use crate::config::Config;
use crate::types::{CurrencyPair, PairReport};
use chrono::Utc;
use futures_util::future::join_all;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Runs a pair evaluator over a list of pairs.
pub struct BatchRunner {
    evaluator: PairEvaluator,
    max_concurrency: usize,
    pair_delay: Duration,
    pair_timeout: Duration,
}

impl BatchRunner {
    pub fn new(
        evaluator: PairEvaluator,
        max_concurrency: usize,
        pair_delay: Duration,
        pair_timeout: Duration,
    ) -> Self {
        Self {
            evaluator,
            max_concurrency: max_concurrency.max(1),
            pair_delay,
            pair_timeout,
        }
    }

    pub fn from_config(evaluator: PairEvaluator, config: &Config) -> Self {
        Self::new(
            evaluator,
            config.max_concurrency,
            config.pair_delay(),
            config.pair_timeout(),
        )
    }

    /// Evaluate every pair. Reports come back in input order, one per pair,
    /// with NO_DATA for pairs that failed or timed out.
    pub async fn run(&self, pairs: &[CurrencyPair]) -> Vec<PairReport> {
        info!(
            "Evaluating {} pairs (concurrency {})",
            pairs.len(),
            self.max_concurrency
        );

        let reports = if self.max_concurrency == 1 {
            let mut reports = Vec::with_capacity(pairs.len());
            for (i, pair) in pairs.iter().enumerate() {
                // Space out upstream calls to stay under rate limits.
                if i > 0 && !self.pair_delay.is_zero() {
                    tokio::time::sleep(self.pair_delay).await;
                }
                reports.push(self.evaluate_bounded(pair).await);
            }
            reports
        } else {
            let semaphore = Semaphore::new(self.max_concurrency);
            let semaphore = &semaphore;
            join_all(pairs.iter().map(|pair| async move {
                // The semaphore outlives every task, so acquire cannot fail.
                let _permit = semaphore.acquire().await;
                self.evaluate_bounded(pair).await
            }))
            .await
        };

        let failed = reports.iter().filter(|r| r.quote.is_no_data()).count();
        if failed > 0 {
            warn!("{} of {} pairs returned no data", failed, reports.len());
        }
        reports
    }

    async fn evaluate_bounded(&self, pair: &CurrencyPair) -> PairReport {
        match tokio::time::timeout(self.pair_timeout, self.evaluator.evaluate(pair)).await {
            Ok(report) => report,
            Err(_) => {
                warn!("Evaluation of {} timed out after {:?}", pair, self.pair_timeout);
                PairReport::no_data(pair.clone(), Utc::now())
            }
        }
    }
}
