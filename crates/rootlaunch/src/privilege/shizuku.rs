use std::sync::Arc;

use async_trait::async_trait;

use super::{PrivilegeSource, SharedPermissionPrompt};
use crate::error::LaunchResult;
use crate::platform::{user_id, BinderHandle, BinderRoute, SharedPlatform};

/// Connection to the Shizuku service.
#[async_trait]
pub trait ShizukuClient: Send + Sync {
    async fn ping_binder(&self) -> bool;
    fn has_permission(&self) -> bool;
    /// Uid the Shizuku server runs as (0 for root, 2000 for adb).
    fn uid(&self) -> LaunchResult<u32>;

    fn wrap(&self, binder: BinderHandle) -> LaunchResult<BinderHandle> {
        Ok(binder.routed_through(BinderRoute::Shizuku))
    }
}

pub type SharedShizukuClient = Arc<dyn ShizukuClient>;

pub struct ShizukuSource {
    client: SharedShizukuClient,
    prompt: SharedPermissionPrompt,
    platform: SharedPlatform,
}

impl ShizukuSource {
    pub fn new(
        client: SharedShizukuClient,
        prompt: SharedPermissionPrompt,
        platform: SharedPlatform,
    ) -> Self {
        Self {
            client,
            prompt,
            platform,
        }
    }
}

#[async_trait]
impl PrivilegeSource for ShizukuSource {
    fn name(&self) -> &str {
        "shizuku"
    }

    async fn probe(&self) -> bool {
        if !self.client.ping_binder().await {
            return false;
        }
        self.client.has_permission() || self.prompt.request().await
    }

    async fn wrap(&self, binder: BinderHandle) -> LaunchResult<BinderHandle> {
        self.client.wrap(binder)
    }

    async fn identity(&self) -> LaunchResult<(u32, Option<String>)> {
        let uid = self.client.uid()?;
        let package = self
            .platform
            .packages_for_uid(uid)
            .await?
            .into_iter()
            .next();
        Ok((user_id(uid), package))
    }
}
