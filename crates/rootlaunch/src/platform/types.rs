use serde::{Deserialize, Serialize};

/// Name the activity manager is registered under in the service manager.
pub const ACTIVITY_SERVICE: &str = "activity";

/// `ActivityManager.START_SUCCESS`; broadcasts report success with the same value.
pub const START_SUCCESS: i32 = 0;

/// `AppOpsManager.OP_NONE`.
pub const OP_NONE: i32 = -1;

/// `UserHandle.PER_USER_RANGE`.
pub const PER_USER_RANGE: u32 = 100_000;

/// Maps an app uid to the Android user it runs under.
pub fn user_id(uid: u32) -> u32 {
    uid / PER_USER_RANGE
}

/// Android API level of the running system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SdkVersion(pub u32);

impl SdkVersion {
    /// Android 6.0
    pub const M: SdkVersion = SdkVersion(23);
    /// Android 8.0
    pub const O: SdkVersion = SdkVersion(26);
    /// Android 11
    pub const R: SdkVersion = SdkVersion(30);

    pub fn at_least(self, other: SdkVersion) -> bool {
        self >= other
    }
}

/// Broker a binder transaction is proxied through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinderRoute {
    Shizuku,
    Dhizuku,
}

/// Opaque reference to a system service binder.
///
/// Wrapping never mutates the original handle; it returns a new handle whose
/// route list records every broker the transaction passes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinderHandle {
    service: String,
    token: u64,
    routes: Vec<BinderRoute>,
}

impl BinderHandle {
    pub fn new(service: impl Into<String>, token: u64) -> Self {
        Self {
            service: service.into(),
            token,
            routes: Vec::new(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn routes(&self) -> &[BinderRoute] {
        &self.routes
    }

    pub fn is_direct(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn routed_through(mut self, route: BinderRoute) -> Self {
        self.routes.push(route);
        self
    }
}
