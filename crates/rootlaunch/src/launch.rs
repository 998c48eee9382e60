//! Launch strategies and the contract every backend implements.

pub mod args;
pub mod binder;
pub mod chain;
pub mod command;
pub mod iterative;
pub mod root;
pub mod set;

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures_util::FutureExt;

use crate::error::{LaunchError, LaunchResult};

pub use args::LaunchArgs;
pub use binder::BinderStrategy;
pub use chain::{ChainReport, StrategyChain};
pub use command::{build_command, escape_dollars, CommandTarget};
pub use iterative::IterativeStrategy;
pub use root::RootStrategy;
pub use set::{Backends, StrategySet};

/// Failures of one launch attempt; empty means the launch succeeded.
pub type LaunchOutcome = Vec<LaunchError>;

#[async_trait]
pub trait LaunchStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// Side-effect-free feasibility probe.
    async fn can_run(&self, _args: &LaunchArgs) -> bool {
        true
    }

    /// Performs the launch. Never fails: every error is returned in the outcome.
    async fn try_launch(&self, args: &LaunchArgs) -> LaunchOutcome;
}

/// Runs `attempt`, turning a panic into [`LaunchError::Panicked`].
pub(crate) async fn run_guarded<F>(attempt: F) -> LaunchResult<()>
where
    F: Future<Output = LaunchResult<()>> + Send,
{
    match AssertUnwindSafe(attempt).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(LaunchError::Panicked(panic_message(payload.as_ref()))),
    }
}

/// Converts a guarded attempt into an outcome, logging the failure.
pub(crate) async fn outcome_of<F>(strategy: &str, attempt: F) -> LaunchOutcome
where
    F: Future<Output = LaunchResult<()>> + Send,
{
    match run_guarded(attempt).await {
        Ok(()) => Vec::new(),
        Err(error) => {
            tracing::error!(strategy, %error, "failure to launch through {strategy}");
            vec![error]
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
