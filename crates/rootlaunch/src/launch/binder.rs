use async_trait::async_trait;

use super::{outcome_of, LaunchArgs, LaunchOutcome, LaunchStrategy};
use crate::error::LaunchResult;
use crate::intent::Intent;
use crate::platform::BinderHandle;
use crate::privilege::PrivilegeSource;
use crate::target::CallTarget;

/// A privilege source composed with a call target.
///
/// The source decides who the call is made as and how the binder is
/// proxied; the target decides which system call is made.
pub struct BinderStrategy<S, T> {
    source: S,
    target: T,
    name: String,
}

impl<S: PrivilegeSource, T: CallTarget> BinderStrategy<S, T> {
    pub fn new(source: S, target: T) -> Self {
        let name = format!("{}-{}", source.name(), target.kind().label());
        Self {
            source,
            target,
            name,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub async fn wrap_binder(&self, binder: BinderHandle) -> LaunchResult<BinderHandle> {
        self.source.wrap(binder).await
    }

    pub async fn uid_and_package(&self) -> LaunchResult<(u32, Option<String>)> {
        self.source.identity().await
    }

    pub async fn call_launch(&self, intent: &Intent) -> LaunchResult<()> {
        self.target.invoke(&self.source, intent).await
    }
}

#[async_trait]
impl<S: PrivilegeSource, T: CallTarget> LaunchStrategy for BinderStrategy<S, T> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn can_run(&self, _args: &LaunchArgs) -> bool {
        self.source.probe().await
    }

    async fn try_launch(&self, args: &LaunchArgs) -> LaunchOutcome {
        outcome_of(&self.name, self.call_launch(&args.intent)).await
    }
}
