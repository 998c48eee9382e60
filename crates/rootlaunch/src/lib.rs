//! Launches Android components through whichever privileged backend can run.

pub mod config;
pub mod error;
pub mod intent;
pub mod launch;
pub mod platform;
pub mod privilege;
pub mod shell;
pub mod target;

#[cfg(test)]
mod testing;

pub use crate::config::LauncherConfig;
pub use crate::error::{ConfigError, LaunchError, LaunchResult};
pub use crate::intent::{ComponentName, Extra, ExtraType, Intent, IntentFilter};
pub use crate::launch::{
    Backends, ChainReport, LaunchArgs, LaunchOutcome, LaunchStrategy, StrategyChain, StrategySet,
};
pub use crate::target::TargetKind;
