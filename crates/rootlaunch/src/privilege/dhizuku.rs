use std::sync::Arc;

use async_trait::async_trait;

use super::{PrivilegeSource, SharedPermissionPrompt};
use crate::error::LaunchResult;
use crate::platform::{user_id, BinderHandle, BinderRoute, SharedPlatform};

pub const DHIZUKU_PACKAGE: &str = "com.rosan.dhizuku";

/// Connection to the Dhizuku device-owner delegate.
#[async_trait]
pub trait DhizukuClient: Send + Sync {
    async fn init(&self) -> bool;
    fn is_permission_granted(&self) -> bool;

    fn wrap(&self, binder: BinderHandle) -> LaunchResult<BinderHandle> {
        Ok(binder.routed_through(BinderRoute::Dhizuku))
    }
}

pub type SharedDhizukuClient = Arc<dyn DhizukuClient>;

pub struct DhizukuSource {
    client: SharedDhizukuClient,
    prompt: SharedPermissionPrompt,
    platform: SharedPlatform,
}

impl DhizukuSource {
    pub fn new(
        client: SharedDhizukuClient,
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
impl PrivilegeSource for DhizukuSource {
    fn name(&self) -> &str {
        "dhizuku"
    }

    async fn probe(&self) -> bool {
        if !self.client.init().await {
            return false;
        }
        self.client.is_permission_granted() || self.prompt.request().await
    }

    async fn wrap(&self, binder: BinderHandle) -> LaunchResult<BinderHandle> {
        self.client.wrap(binder)
    }

    /// Calls are attributed to the Dhizuku app itself.
    async fn identity(&self) -> LaunchResult<(u32, Option<String>)> {
        let uid = self.platform.application_uid(DHIZUKU_PACKAGE).await?;
        Ok((user_id(uid), Some(DHIZUKU_PACKAGE.to_string())))
    }
}
