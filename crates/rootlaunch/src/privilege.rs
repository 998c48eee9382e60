//! Privilege sources: who a binder call is made as, and through which broker.

pub mod dhizuku;
pub mod direct;
pub mod shizuku;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LaunchResult;
use crate::platform::BinderHandle;

pub use dhizuku::{DhizukuClient, DhizukuSource, SharedDhizukuClient, DHIZUKU_PACKAGE};
pub use direct::DirectSource;
pub use shizuku::{SharedShizukuClient, ShizukuClient, ShizukuSource};

#[async_trait]
pub trait PrivilegeSource: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the source can serve a call right now. May prompt the user.
    async fn probe(&self) -> bool;

    async fn wrap(&self, binder: BinderHandle) -> LaunchResult<BinderHandle>;

    /// `(user id, package)` the call is attributed to.
    async fn identity(&self) -> LaunchResult<(u32, Option<String>)>;
}

#[async_trait]
impl<S: PrivilegeSource + ?Sized> PrivilegeSource for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn probe(&self) -> bool {
        (**self).probe().await
    }

    async fn wrap(&self, binder: BinderHandle) -> LaunchResult<BinderHandle> {
        (**self).wrap(binder).await
    }

    async fn identity(&self) -> LaunchResult<(u32, Option<String>)> {
        (**self).identity().await
    }
}

/// External routine asking the user to grant a broker permission.
///
/// Resolves once the user answers; there is no timeout.
#[async_trait]
pub trait PermissionPrompt: Send + Sync {
    async fn request(&self) -> bool;
}

pub type SharedPermissionPrompt = Arc<dyn PermissionPrompt>;
