//! Call targets: the component types a launch can address.

pub mod activity;
pub mod receiver;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LaunchResult;
use crate::intent::Intent;
use crate::launch::{CommandTarget, LaunchArgs};
use crate::platform::{Platform, SharedActivityManager, SharedPlatform, ACTIVITY_SERVICE};
use crate::privilege::PrivilegeSource;

pub use activity::{classify_start_result, ActivityTarget};
pub use receiver::{classify_broadcast_result, ReceiverTarget};
pub use service::{classify_service_result, ServiceTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Activity,
    Service,
    Receiver,
}

impl TargetKind {
    pub fn label(self) -> &'static str {
        match self {
            TargetKind::Activity => "activity",
            TargetKind::Service => "service",
            TargetKind::Receiver => "receiver",
        }
    }

    fn am_verb(self) -> &'static str {
        match self {
            TargetKind::Activity => "start",
            TargetKind::Service => "startservice",
            TargetKind::Receiver => "broadcast",
        }
    }
}

impl CommandTarget for TargetKind {
    fn label(&self) -> &str {
        TargetKind::label(*self)
    }

    fn make_command(&self, args: &LaunchArgs) -> String {
        match &args.intent.component {
            Some(component) => format!("am {} -n {}", self.am_verb(), component.flatten()),
            None => format!("am {}", self.am_verb()),
        }
    }
}

/// Delivers an intent to the system through a privilege source.
#[async_trait]
pub trait CallTarget: Send + Sync {
    fn kind(&self) -> TargetKind;

    /// Flags added to intents synthesized by the iterative fallback.
    fn extra_flags(&self) -> Option<u32> {
        None
    }

    async fn invoke(&self, source: &dyn PrivilegeSource, intent: &Intent) -> LaunchResult<()>;
}

#[async_trait]
impl<T: CallTarget + ?Sized> CallTarget for Arc<T> {
    fn kind(&self) -> TargetKind {
        (**self).kind()
    }

    fn extra_flags(&self) -> Option<u32> {
        (**self).extra_flags()
    }

    async fn invoke(&self, source: &dyn PrivilegeSource, intent: &Intent) -> LaunchResult<()> {
        (**self).invoke(source, intent).await
    }
}

/// Builds the call target for `kind`, with its call shape fixed by the platform SDK.
pub fn call_target(kind: TargetKind, platform: SharedPlatform) -> Arc<dyn CallTarget> {
    match kind {
        TargetKind::Activity => Arc::new(ActivityTarget::new(platform)),
        TargetKind::Service => Arc::new(ServiceTarget::new(platform)),
        TargetKind::Receiver => Arc::new(ReceiverTarget::new(platform)),
    }
}

/// Looks up the activity manager and binds it through the source's wrapper.
///
/// Handles are resolved on every call and never cached.
async fn bind_activity_manager(
    platform: &dyn Platform,
    source: &dyn PrivilegeSource,
) -> LaunchResult<SharedActivityManager> {
    let raw = platform.system_service(ACTIVITY_SERVICE)?;
    let wrapped = source.wrap(raw).await?;
    platform.activity_manager(wrapped)
}
