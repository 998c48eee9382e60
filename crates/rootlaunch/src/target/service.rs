use async_trait::async_trait;

use super::{bind_activity_manager, CallTarget, TargetKind};
use crate::error::{LaunchError, LaunchResult};
use crate::intent::{ComponentName, Intent};
use crate::platform::{ServiceBand, SharedPlatform, StartServiceCall};
use crate::privilege::PrivilegeSource;

pub struct ServiceTarget {
    platform: SharedPlatform,
    band: ServiceBand,
}

impl ServiceTarget {
    pub fn new(platform: SharedPlatform) -> Self {
        let band = ServiceBand::for_sdk(platform.sdk());
        Self { platform, band }
    }

    pub fn band(&self) -> ServiceBand {
        self.band
    }
}

#[async_trait]
impl CallTarget for ServiceTarget {
    fn kind(&self) -> TargetKind {
        TargetKind::Service
    }

    async fn invoke(&self, source: &dyn PrivilegeSource, intent: &Intent) -> LaunchResult<()> {
        let manager = bind_activity_manager(self.platform.as_ref(), source).await?;
        let (user_id, package) = source.identity().await?;

        tracing::debug!(band = ?self.band, source = source.name(), "starting service");
        let call = StartServiceCall::new(self.band, intent.clone(), package, user_id);
        let started = manager.start_service(call).await?;
        classify_service_result(started)
    }
}

/// Decodes the sentinel component names `startService` reports failures with.
pub fn classify_service_result(started: Option<ComponentName>) -> LaunchResult<()> {
    let Some(component) = started else {
        return Err(LaunchError::ServiceNotFound);
    };
    match component.package.as_str() {
        "!" => Err(LaunchError::PermissionDenied {
            permission: component.class,
        }),
        "!!" | "?" => Err(LaunchError::ServiceFailed(component.class)),
        _ => Ok(()),
    }
}
