//! In-memory collaborators shared by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{LaunchError, LaunchResult};
use crate::intent::ComponentName;
use crate::launch::{LaunchArgs, LaunchOutcome, LaunchStrategy};
use crate::platform::{
    ActivityManager, BinderHandle, BinderRoute, BroadcastCall, Platform, SdkVersion,
    ServiceBand, SharedActivityManager, StartActivityCall, StartServiceCall, ACTIVITY_SERVICE,
};
use crate::privilege::{DhizukuClient, PermissionPrompt, PrivilegeSource, ShizukuClient};
use crate::shell::{ShellOutput, ShellPool};

/// Records every call; start results are scripted, defaulting to success.
pub struct FakeActivityManager {
    activity_codes: Mutex<VecDeque<i32>>,
    service_results: Mutex<VecDeque<Option<ComponentName>>>,
    missing_service_band: Option<ServiceBand>,
    activity_calls: Mutex<Vec<StartActivityCall>>,
    service_calls: Mutex<Vec<StartServiceCall>>,
    broadcast_calls: Mutex<Vec<BroadcastCall>>,
}

impl Default for FakeActivityManager {
    fn default() -> Self {
        Self {
            activity_codes: Mutex::new(VecDeque::new()),
            service_results: Mutex::new(VecDeque::new()),
            missing_service_band: None,
            activity_calls: Mutex::new(Vec::new()),
            service_calls: Mutex::new(Vec::new()),
            broadcast_calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeActivityManager {
    pub fn with_activity_codes(self, codes: &[i32]) -> Self {
        *self.activity_codes.lock().unwrap() = codes.iter().copied().collect();
        self
    }

    pub fn with_service_results(self, results: Vec<Option<ComponentName>>) -> Self {
        *self.service_results.lock().unwrap() = results.into();
        self
    }

    pub fn without_service_band(mut self, band: ServiceBand) -> Self {
        self.missing_service_band = Some(band);
        self
    }

    pub fn activity_calls(&self) -> Vec<StartActivityCall> {
        self.activity_calls.lock().unwrap().clone()
    }

    pub fn service_calls(&self) -> Vec<StartServiceCall> {
        self.service_calls.lock().unwrap().clone()
    }

    pub fn broadcast_calls(&self) -> Vec<BroadcastCall> {
        self.broadcast_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActivityManager for FakeActivityManager {
    async fn start_activity(&self, call: StartActivityCall) -> LaunchResult<i32> {
        self.activity_calls.lock().unwrap().push(call);
        Ok(self.activity_codes.lock().unwrap().pop_front().unwrap_or(0))
    }

    async fn start_service(&self, call: StartServiceCall) -> LaunchResult<Option<ComponentName>> {
        if self.missing_service_band == Some(call.band()) {
            return Err(LaunchError::MethodUnavailable(format!(
                "startService for {:?}",
                call.band()
            )));
        }
        self.service_calls.lock().unwrap().push(call);
        let scripted = self.service_results.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or_else(|| Some(ComponentName::new("com.example", "com.example.Svc"))))
    }

    async fn broadcast_intent(&self, call: BroadcastCall) -> LaunchResult<i32> {
        self.broadcast_calls.lock().unwrap().push(call);
        Ok(0)
    }
}

pub struct FakePlatform {
    sdk: u32,
    manager: Option<Arc<FakeActivityManager>>,
    packages: HashMap<u32, Vec<String>>,
    own_identity: Option<(u32, String)>,
    activity_service: bool,
    bound_routes: Mutex<Vec<Vec<BinderRoute>>>,
}

impl FakePlatform {
    pub fn new(sdk: u32) -> Self {
        Self {
            sdk,
            manager: None,
            packages: HashMap::new(),
            own_identity: None,
            activity_service: true,
            bound_routes: Mutex::new(Vec::new()),
        }
    }

    pub fn with_manager(mut self, manager: Arc<FakeActivityManager>) -> Self {
        self.manager = Some(manager);
        self
    }

    pub fn with_packages(mut self, uid: u32, packages: &[&str]) -> Self {
        self.packages
            .insert(uid, packages.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn with_own_identity(mut self, uid: u32, package: &str) -> Self {
        self.own_identity = Some((uid, package.to_string()));
        self
    }

    pub fn without_activity_service(mut self) -> Self {
        self.activity_service = false;
        self
    }

    /// Routes of every binder the activity manager was bound through.
    pub fn bound_routes(&self) -> Vec<Vec<BinderRoute>> {
        self.bound_routes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Platform for FakePlatform {
    fn id(&self) -> &str {
        "fake"
    }

    fn sdk(&self) -> SdkVersion {
        SdkVersion(self.sdk)
    }

    fn system_service(&self, name: &str) -> LaunchResult<BinderHandle> {
        if name == ACTIVITY_SERVICE && !self.activity_service {
            return Err(LaunchError::Transport(format!("no service {name}")));
        }
        Ok(BinderHandle::new(name, 1))
    }

    fn activity_manager(&self, binder: BinderHandle) -> LaunchResult<SharedActivityManager> {
        self.bound_routes
            .lock()
            .unwrap()
            .push(binder.routes().to_vec());
        match &self.manager {
            Some(manager) => Ok(manager.clone()),
            None => Err(LaunchError::NotImplemented),
        }
    }

    async fn packages_for_uid(&self, uid: u32) -> LaunchResult<Vec<String>> {
        Ok(self.packages.get(&uid).cloned().unwrap_or_default())
    }

    async fn application_uid(&self, package: &str) -> LaunchResult<u32> {
        self.packages
            .iter()
            .find(|(_, packages)| packages.iter().any(|p| p == package))
            .map(|(uid, _)| *uid)
            .ok_or_else(|| LaunchError::Transport(format!("package not installed: {package}")))
    }

    async fn own_identity(&self) -> LaunchResult<(u32, String)> {
        self.own_identity.clone().ok_or(LaunchError::NotImplemented)
    }
}

pub struct FakeShizuku {
    reachable: bool,
    granted: bool,
    uid: u32,
}

impl FakeShizuku {
    pub fn new(reachable: bool, granted: bool, uid: u32) -> Self {
        Self {
            reachable,
            granted,
            uid,
        }
    }
}

#[async_trait]
impl ShizukuClient for FakeShizuku {
    async fn ping_binder(&self) -> bool {
        self.reachable
    }

    fn has_permission(&self) -> bool {
        self.granted
    }

    fn uid(&self) -> LaunchResult<u32> {
        Ok(self.uid)
    }
}

pub struct FakeDhizuku {
    init: bool,
    granted: bool,
}

impl FakeDhizuku {
    pub fn new(init: bool, granted: bool) -> Self {
        Self { init, granted }
    }
}

#[async_trait]
impl DhizukuClient for FakeDhizuku {
    async fn init(&self) -> bool {
        self.init
    }

    fn is_permission_granted(&self) -> bool {
        self.granted
    }
}

pub struct FakePrompt {
    answer: bool,
    requests: AtomicUsize,
}

impl FakePrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionPrompt for FakePrompt {
    async fn request(&self) -> bool {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

enum IdentityMode {
    Resolved,
    Failing,
    Panicking,
}

/// A source that always probes true and routes binders through one broker.
pub struct RoutedSource {
    route: BinderRoute,
    package: Option<String>,
    user: u32,
    identity: IdentityMode,
}

impl RoutedSource {
    pub fn new(route: BinderRoute, package: Option<&str>) -> Self {
        Self {
            route,
            package: package.map(str::to_string),
            user: 0,
            identity: IdentityMode::Resolved,
        }
    }

    pub fn with_user(mut self, user: u32) -> Self {
        self.user = user;
        self
    }

    pub fn failing_identity(mut self) -> Self {
        self.identity = IdentityMode::Failing;
        self
    }

    pub fn panicking_identity(mut self) -> Self {
        self.identity = IdentityMode::Panicking;
        self
    }
}

#[async_trait]
impl PrivilegeSource for RoutedSource {
    fn name(&self) -> &str {
        match self.route {
            BinderRoute::Shizuku => "shizuku",
            BinderRoute::Dhizuku => "dhizuku",
        }
    }

    async fn probe(&self) -> bool {
        true
    }

    async fn wrap(&self, binder: BinderHandle) -> LaunchResult<BinderHandle> {
        Ok(binder.routed_through(self.route))
    }

    async fn identity(&self) -> LaunchResult<(u32, Option<String>)> {
        match self.identity {
            IdentityMode::Resolved => Ok((self.user, self.package.clone())),
            IdentityMode::Failing => Err(LaunchError::Transport("uid lookup failed".to_string())),
            IdentityMode::Panicking => panic!("binder died"),
        }
    }
}

pub struct FakeShellPool {
    available: bool,
    result: LaunchResult<ShellOutput>,
    commands: Mutex<Vec<String>>,
}

impl FakeShellPool {
    pub fn new(available: bool, output: ShellOutput) -> Self {
        Self {
            available,
            result: Ok(output),
            commands: Mutex::new(Vec::new()),
        }
    }

    /// A pool whose shell cannot be reached at all.
    pub fn failing(message: &str) -> Self {
        Self {
            available: false,
            result: Err(LaunchError::Transport(message.to_string())),
            commands: Mutex::new(Vec::new()),
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShellPool for FakeShellPool {
    async fn available(&self) -> bool {
        self.available
    }

    async fn run(&self, command: &str) -> LaunchResult<ShellOutput> {
        self.commands.lock().unwrap().push(command.to_string());
        self.result.clone()
    }
}

pub struct ScriptedStrategy {
    name: String,
    can_run: bool,
    outcome: LaunchOutcome,
    launches: AtomicUsize,
}

impl ScriptedStrategy {
    pub fn new(name: &str, can_run: bool, outcome: LaunchOutcome) -> Self {
        Self {
            name: name.to_string(),
            can_run,
            outcome,
            launches: AtomicUsize::new(0),
        }
    }

    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LaunchStrategy for ScriptedStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    async fn can_run(&self, _args: &LaunchArgs) -> bool {
        self.can_run
    }

    async fn try_launch(&self, _args: &LaunchArgs) -> LaunchOutcome {
        self.launches.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
