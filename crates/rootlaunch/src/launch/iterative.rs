use async_trait::async_trait;

use super::{run_guarded, LaunchArgs, LaunchOutcome, LaunchStrategy};
use crate::error::LaunchResult;
use crate::intent::{Intent, IntentFilter, ACTION_MAIN};
use crate::platform::{SdkVersion, SharedPlatform};
use crate::privilege::PrivilegeSource;
use crate::target::CallTarget;

/// Host used for synthesized data URIs; any non-empty host satisfies a scheme.
const PLACEHOLDER_HOST: &str = "yes";

/// Falls back to the component's declared intent filters.
///
/// One intent is synthesized per filter and tried in declared order until a
/// launch succeeds.
pub struct IterativeStrategy<S, T> {
    source: S,
    target: T,
    platform: SharedPlatform,
    name: String,
}

impl<S: PrivilegeSource, T: CallTarget> IterativeStrategy<S, T> {
    pub fn new(source: S, target: T, platform: SharedPlatform) -> Self {
        let name = format!("{}-iterative-{}", source.name(), target.kind().label());
        Self {
            source,
            target,
            platform,
            name,
        }
    }

    pub fn extra_flags(&self) -> Option<u32> {
        self.target.extra_flags()
    }

    pub async fn perform_launch(&self, _args: &LaunchArgs, intent: &Intent) -> LaunchResult<()> {
        self.target.invoke(&self.source, intent).await
    }

    async fn attempt(&self, args: &LaunchArgs, filter: &IntentFilter) -> LaunchResult<()> {
        let intent = derive_intent(&args.intent, filter, self.extra_flags());
        tracing::debug!(
            strategy = %self.name,
            action = intent.action.as_deref(),
            data = intent.data.as_deref(),
            "trying filter"
        );
        self.perform_launch(args, &intent).await
    }
}

/// Rewrites `base` to match `filter`: its first action (or MAIN), a
/// placeholder URI for its first scheme, and exactly its categories.
///
/// Schemes are taken verbatim from the manifest and never validated.
pub fn derive_intent(base: &Intent, filter: &IntentFilter, extra_flags: Option<u32>) -> Intent {
    let mut intent = base.clone();

    if let Some(flags) = extra_flags {
        intent.add_flags(flags);
    }

    intent.clear_categories();
    intent.action = Some(filter.first_action().unwrap_or(ACTION_MAIN).to_string());
    intent.data = filter
        .first_scheme()
        .map(|scheme| format!("{scheme}://{PLACEHOLDER_HOST}"));
    for category in &filter.categories {
        intent.add_category(category.clone());
    }

    intent
}

#[async_trait]
impl<S: PrivilegeSource, T: CallTarget> LaunchStrategy for IterativeStrategy<S, T> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn can_run(&self, args: &LaunchArgs) -> bool {
        if args.filters.is_empty() || !self.platform.sdk().at_least(SdkVersion::M) {
            return false;
        }
        self.source.probe().await
    }

    async fn try_launch(&self, args: &LaunchArgs) -> LaunchOutcome {
        let mut errors = Vec::new();

        for (index, filter) in args.filters.iter().enumerate() {
            match run_guarded(self.attempt(args, filter)).await {
                Ok(()) => return Vec::new(),
                Err(error) => {
                    tracing::warn!(strategy = %self.name, index, %error, "error with alternative filter");
                    errors.push(error);
                }
            }
        }

        errors
    }
}
