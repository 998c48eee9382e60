use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{LaunchError, LaunchResult};
use crate::intent::ComponentName;

use super::calls::{BroadcastCall, StartActivityCall, StartServiceCall};
use super::types::{BinderHandle, SdkVersion};

/// Host operating system services the launch core depends on.
///
/// Package and identity lookups may shell out or read procfs, so they are async.
#[async_trait]
pub trait Platform: Send + Sync {
    fn id(&self) -> &str {
        "unsupported"
    }

    fn sdk(&self) -> SdkVersion;

    fn system_service(&self, _name: &str) -> LaunchResult<BinderHandle> {
        Err(LaunchError::NotImplemented)
    }
    /// Binds the activity manager interface to a (possibly wrapped) binder.
    fn activity_manager(&self, _binder: BinderHandle) -> LaunchResult<SharedActivityManager> {
        Err(LaunchError::NotImplemented)
    }

    async fn packages_for_uid(&self, _uid: u32) -> LaunchResult<Vec<String>> {
        Err(LaunchError::NotImplemented)
    }
    async fn application_uid(&self, _package: &str) -> LaunchResult<u32> {
        Err(LaunchError::NotImplemented)
    }
    /// Uid and package of the hosting app.
    async fn own_identity(&self) -> LaunchResult<(u32, String)> {
        Err(LaunchError::NotImplemented)
    }
}

pub type SharedPlatform = Arc<dyn Platform>;

/// The activity manager's start entry points, one per component type.
#[async_trait]
pub trait ActivityManager: Send + Sync {
    async fn start_activity(&self, _call: StartActivityCall) -> LaunchResult<i32> {
        Err(LaunchError::NotImplemented)
    }
    async fn start_service(
        &self,
        _call: StartServiceCall,
    ) -> LaunchResult<Option<ComponentName>> {
        Err(LaunchError::NotImplemented)
    }
    async fn broadcast_intent(&self, _call: BroadcastCall) -> LaunchResult<i32> {
        Err(LaunchError::NotImplemented)
    }
}

pub type SharedActivityManager = Arc<dyn ActivityManager>;

pub mod portable;
