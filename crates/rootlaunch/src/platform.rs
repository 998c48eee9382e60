mod adapters;
pub mod calls;
pub mod factory;
pub mod types;

pub use adapters::portable::PortablePlatform;
pub use adapters::{ActivityManager, Platform, SharedActivityManager, SharedPlatform};
pub use calls::{
    ActivityBand, BroadcastBand, BroadcastCall, ServiceBand, StartActivityCall, StartServiceCall,
};
pub use factory::default_platform;
pub use types::{
    user_id, BinderHandle, BinderRoute, SdkVersion, ACTIVITY_SERVICE, OP_NONE, PER_USER_RANGE,
    START_SUCCESS,
};
