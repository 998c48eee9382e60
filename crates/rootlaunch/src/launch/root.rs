use async_trait::async_trait;

use super::{build_command, outcome_of, CommandTarget, LaunchArgs, LaunchOutcome, LaunchStrategy};
use crate::error::{LaunchError, LaunchResult};
use crate::shell::{ShellOutput, SharedShellPool};

/// Launches through `am` in a root shell.
pub struct RootStrategy<T> {
    target: T,
    pool: SharedShellPool,
    name: String,
}

impl<T: CommandTarget> RootStrategy<T> {
    pub fn new(target: T, pool: SharedShellPool) -> Self {
        let name = format!("root-{}", target.label());
        Self { target, pool, name }
    }

    pub fn command_for(&self, args: &LaunchArgs) -> String {
        build_command(&self.target, args)
    }

    async fn run(&self, args: &LaunchArgs) -> LaunchResult<()> {
        let command = self.command_for(args);
        tracing::debug!(strategy = %self.name, %command, "running root command");
        let output = self.pool.run(&command).await?;
        check_exit(output)
    }
}

/// Exit code 0 is success; otherwise stderr becomes the failure message.
pub fn check_exit(output: ShellOutput) -> LaunchResult<()> {
    if output.success() {
        Ok(())
    } else {
        Err(LaunchError::ShellFailed(output.stderr.join("\n")))
    }
}

#[async_trait]
impl<T: CommandTarget> LaunchStrategy for RootStrategy<T> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn can_run(&self, _args: &LaunchArgs) -> bool {
        self.pool.available().await
    }

    async fn try_launch(&self, args: &LaunchArgs) -> LaunchOutcome {
        outcome_of(&self.name, self.run(args)).await
    }
}
