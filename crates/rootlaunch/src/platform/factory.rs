use std::sync::Arc;

use super::adapters::SharedPlatform;

pub async fn default_platform() -> SharedPlatform {
    Arc::new(super::adapters::portable::PortablePlatform::detect().await)
}
