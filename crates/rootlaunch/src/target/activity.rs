use async_trait::async_trait;

use super::{bind_activity_manager, CallTarget, TargetKind};
use crate::error::{LaunchError, LaunchResult};
use crate::intent::Intent;
use crate::platform::{ActivityBand, SharedPlatform, StartActivityCall, START_SUCCESS};
use crate::privilege::PrivilegeSource;

pub struct ActivityTarget {
    platform: SharedPlatform,
    band: ActivityBand,
}

impl ActivityTarget {
    pub fn new(platform: SharedPlatform) -> Self {
        let band = ActivityBand::for_sdk(platform.sdk());
        Self { platform, band }
    }

    pub fn band(&self) -> ActivityBand {
        self.band
    }
}

#[async_trait]
impl CallTarget for ActivityTarget {
    fn kind(&self) -> TargetKind {
        TargetKind::Activity
    }

    async fn invoke(&self, source: &dyn PrivilegeSource, intent: &Intent) -> LaunchResult<()> {
        let manager = bind_activity_manager(self.platform.as_ref(), source).await?;
        let (_, package) = source.identity().await?;

        tracing::debug!(band = ?self.band, source = source.name(), "starting activity");
        let call = StartActivityCall::new(self.band, package, intent.clone());
        let code = manager.start_activity(call).await?;
        classify_start_result(code)
    }
}

pub fn classify_start_result(code: i32) -> LaunchResult<()> {
    if code == START_SUCCESS {
        Ok(())
    } else {
        Err(LaunchError::ActivityStart { code })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::platform::BinderRoute;
    use crate::privilege::DirectSource;
    use crate::testing::{FakeActivityManager, FakePlatform, RoutedSource};

    #[test]
    fn only_start_success_is_success() {
        assert_eq!(classify_start_result(0), Ok(()));
        let error = classify_start_result(-92).unwrap_err();
        assert_eq!(error, LaunchError::ActivityStart { code: -92 });
        assert!(error.to_string().contains("-92"));
    }

    #[tokio::test]
    async fn uses_feature_call_on_r_and_later() {
        let manager = Arc::new(FakeActivityManager::default());
        let platform = Arc::new(
            FakePlatform::new(33)
                .with_manager(manager.clone())
                .with_own_identity(10_050, "com.host"),
        );
        let target = ActivityTarget::new(platform.clone());
        let source = DirectSource::new(platform);

        target.invoke(&source, &Intent::new()).await.unwrap();

        let calls = manager.activity_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].band(), ActivityBand::WithFeature);
        match &calls[0] {
            StartActivityCall::WithFeature {
                calling_package, ..
            } => assert_eq!(calling_package.as_deref(), Some("com.host")),
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[tokio::test]
    async fn uses_legacy_call_before_r() {
        let manager = Arc::new(FakeActivityManager::default());
        let platform = Arc::new(
            FakePlatform::new(29)
                .with_manager(manager.clone())
                .with_own_identity(10_050, "com.host"),
        );
        let target = ActivityTarget::new(platform.clone());
        target
            .invoke(&DirectSource::new(platform), &Intent::new())
            .await
            .unwrap();
        assert_eq!(manager.activity_calls()[0].band(), ActivityBand::Legacy);
    }

    #[tokio::test]
    async fn binds_the_wrapped_binder_and_reports_failure_codes() {
        let manager = Arc::new(FakeActivityManager::default().with_activity_codes(&[-91]));
        let platform = Arc::new(FakePlatform::new(34).with_manager(manager.clone()));
        let target = ActivityTarget::new(platform.clone());
        let source = RoutedSource::new(BinderRoute::Shizuku, Some("com.android.shell"));

        let result = target.invoke(&source, &Intent::new()).await;

        assert_eq!(result, Err(LaunchError::ActivityStart { code: -91 }));
        assert_eq!(platform.bound_routes(), vec![vec![BinderRoute::Shizuku]]);
    }
}
