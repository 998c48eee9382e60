use async_trait::async_trait;

use super::PrivilegeSource;
use crate::error::LaunchResult;
use crate::platform::{user_id, BinderHandle, SharedPlatform};

/// Calls made as the hosting app, without any broker.
pub struct DirectSource {
    platform: SharedPlatform,
}

impl DirectSource {
    pub fn new(platform: SharedPlatform) -> Self {
        Self { platform }
    }
}

#[async_trait]
impl PrivilegeSource for DirectSource {
    fn name(&self) -> &str {
        "direct"
    }

    async fn probe(&self) -> bool {
        true
    }

    async fn wrap(&self, binder: BinderHandle) -> LaunchResult<BinderHandle> {
        Ok(binder)
    }

    async fn identity(&self) -> LaunchResult<(u32, Option<String>)> {
        let (uid, package) = self.platform.own_identity().await?;
        Ok((user_id(uid), Some(package)))
    }
}
