use std::sync::Arc;

use super::{LaunchArgs, LaunchOutcome, LaunchStrategy};
use crate::error::{LaunchError, LaunchResult};

/// Priority-ordered strategies, probed and tried one at a time.
#[derive(Clone, Default)]
pub struct StrategyChain {
    strategies: Vec<Arc<dyn LaunchStrategy>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainReport {
    pub launched_by: Option<String>,
    /// Every strategy that ran, with its outcome, in order.
    pub attempts: Vec<(String, LaunchOutcome)>,
    /// Strategies whose `can_run` said no.
    pub skipped: Vec<String>,
}

impl ChainReport {
    pub fn is_success(&self) -> bool {
        self.launched_by.is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &LaunchError> {
        self.attempts.iter().flat_map(|(_, outcome)| outcome.iter())
    }

    /// Name of the strategy that launched, or the most relevant failure.
    pub fn into_result(self) -> LaunchResult<String> {
        if let Some(name) = self.launched_by {
            return Ok(name);
        }
        self.attempts
            .into_iter()
            .rev()
            .find_map(|(_, outcome)| outcome.into_iter().next())
            .map_or(Err(LaunchError::NoEligibleStrategy), Err)
    }
}

impl StrategyChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, strategy: Arc<dyn LaunchStrategy>) -> Self {
        self.push(strategy);
        self
    }

    pub fn push(&mut self, strategy: Arc<dyn LaunchStrategy>) {
        self.strategies.push(strategy);
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.strategies
            .iter()
            .map(|strategy| strategy.name().to_string())
            .collect()
    }

    /// Tries eligible strategies in order until one launches.
    pub async fn launch(&self, args: &LaunchArgs) -> ChainReport {
        let mut report = ChainReport::default();

        for strategy in &self.strategies {
            let name = strategy.name().to_string();
            if !strategy.can_run(args).await {
                tracing::debug!(strategy = %name, "strategy cannot run, skipping");
                report.skipped.push(name);
                continue;
            }

            let outcome = strategy.try_launch(args).await;
            let launched = outcome.is_empty();
            report.attempts.push((name.clone(), outcome));
            if launched {
                tracing::info!(strategy = %name, "component launched");
                report.launched_by = Some(name);
                break;
            }
        }

        if !report.is_success() {
            tracing::warn!(
                attempts = report.attempts.len(),
                skipped = report.skipped.len(),
                "no strategy launched the component"
            );
        }
        report
    }
}
