use async_trait::async_trait;

use super::{bind_activity_manager, CallTarget, TargetKind};
use crate::error::{LaunchError, LaunchResult};
use crate::intent::Intent;
use crate::platform::{BroadcastBand, BroadcastCall, SharedPlatform, START_SUCCESS};
use crate::privilege::PrivilegeSource;

pub struct ReceiverTarget {
    platform: SharedPlatform,
    band: BroadcastBand,
}

impl ReceiverTarget {
    pub fn new(platform: SharedPlatform) -> Self {
        let band = BroadcastBand::for_sdk(platform.sdk());
        Self { platform, band }
    }

    pub fn band(&self) -> BroadcastBand {
        self.band
    }
}

#[async_trait]
impl CallTarget for ReceiverTarget {
    fn kind(&self) -> TargetKind {
        TargetKind::Receiver
    }

    async fn invoke(&self, source: &dyn PrivilegeSource, intent: &Intent) -> LaunchResult<()> {
        let manager = bind_activity_manager(self.platform.as_ref(), source).await?;

        tracing::debug!(band = ?self.band, source = source.name(), "broadcasting intent");
        let code = manager
            .broadcast_intent(BroadcastCall::new(self.band, intent.clone()))
            .await?;
        classify_broadcast_result(code)
    }
}

pub fn classify_broadcast_result(code: i32) -> LaunchResult<()> {
    if code == START_SUCCESS {
        Ok(())
    } else {
        Err(LaunchError::Broadcast { code })
    }
}
