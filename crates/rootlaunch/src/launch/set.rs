use std::sync::Arc;

use super::{BinderStrategy, IterativeStrategy, RootStrategy, StrategyChain};
use crate::config::{BackendKind, IterativeSource, StrategyConfig};
use crate::platform::SharedPlatform;
use crate::privilege::{
    DhizukuSource, DirectSource, PrivilegeSource, SharedDhizukuClient, SharedPermissionPrompt,
    SharedShizukuClient, ShizukuSource,
};
use crate::shell::SharedShellPool;
use crate::target::{call_target, TargetKind};

/// Collaborators available on this device. Absent backends are left out of chains.
#[derive(Clone)]
pub struct Backends {
    pub platform: SharedPlatform,
    pub shell: Option<SharedShellPool>,
    pub shizuku: Option<(SharedShizukuClient, SharedPermissionPrompt)>,
    pub dhizuku: Option<(SharedDhizukuClient, SharedPermissionPrompt)>,
}

impl Backends {
    pub fn new(platform: SharedPlatform) -> Self {
        Self {
            platform,
            shell: None,
            shizuku: None,
            dhizuku: None,
        }
    }

    pub fn with_shell(mut self, shell: SharedShellPool) -> Self {
        self.shell = Some(shell);
        self
    }

    pub fn with_shizuku(
        mut self,
        client: SharedShizukuClient,
        prompt: SharedPermissionPrompt,
    ) -> Self {
        self.shizuku = Some((client, prompt));
        self
    }

    pub fn with_dhizuku(
        mut self,
        client: SharedDhizukuClient,
        prompt: SharedPermissionPrompt,
    ) -> Self {
        self.dhizuku = Some((client, prompt));
        self
    }

    fn shizuku_source(&self) -> Option<Arc<dyn PrivilegeSource>> {
        let (client, prompt) = self.shizuku.clone()?;
        Some(Arc::new(ShizukuSource::new(
            client,
            prompt,
            self.platform.clone(),
        )))
    }

    fn dhizuku_source(&self) -> Option<Arc<dyn PrivilegeSource>> {
        let (client, prompt) = self.dhizuku.clone()?;
        Some(Arc::new(DhizukuSource::new(
            client,
            prompt,
            self.platform.clone(),
        )))
    }

    fn direct_source(&self) -> Arc<dyn PrivilegeSource> {
        Arc::new(DirectSource::new(self.platform.clone()))
    }
}

/// Builds the standard strategy compositions for a component type.
pub struct StrategySet;

impl StrategySet {
    pub fn for_target(
        kind: TargetKind,
        backends: &Backends,
        config: &StrategyConfig,
    ) -> StrategyChain {
        let platform = &backends.platform;
        let target = || call_target(kind, platform.clone());
        let mut chain = StrategyChain::new();

        for backend in &config.order {
            match backend {
                BackendKind::Root => {
                    if let Some(shell) = &backends.shell {
                        chain.push(Arc::new(RootStrategy::new(kind, shell.clone())));
                    }
                }
                BackendKind::Shizuku => {
                    if let Some(source) = backends.shizuku_source() {
                        chain.push(Arc::new(BinderStrategy::new(source, target())));
                    }
                }
                BackendKind::Dhizuku => {
                    if let Some(source) = backends.dhizuku_source() {
                        chain.push(Arc::new(BinderStrategy::new(source, target())));
                    }
                }
                BackendKind::Direct => {
                    chain.push(Arc::new(BinderStrategy::new(backends.direct_source(), target())));
                }
                BackendKind::Iterative => {
                    let source = match config.iterative_source {
                        IterativeSource::Shizuku => backends.shizuku_source(),
                        IterativeSource::Dhizuku => backends.dhizuku_source(),
                        IterativeSource::Direct => Some(backends.direct_source()),
                    };
                    if let Some(source) = source {
                        chain.push(Arc::new(IterativeStrategy::new(
                            source,
                            target(),
                            platform.clone(),
                        )));
                    }
                }
            }
        }

        tracing::debug!(
            target_kind = kind.label(),
            strategies = ?chain.names(),
            "built strategy chain"
        );
        chain
    }
}
