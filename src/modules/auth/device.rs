use std::sync::Arc;

use super::error::AuthError;
use super::store::DeviceStore;
use crate::modules::utils::logging::log_auth_event;

/// Validates device identities presented by machine callers
/// Device tokens are pre-shared opaque secrets checked by exact pair lookup;
/// any miss fails closed
pub struct DeviceGuard {
    store: Arc<dyn DeviceStore>,
}

impl DeviceGuard {
    pub fn new(store: Arc<dyn DeviceStore>) -> Self {
        Self { store }
    }

    /// Check a (device id, token) pair against the device table
    pub fn verify_device(&self, device_id: &str, token: &str) -> Result<(), AuthError> {
        if self.store.device_token_matches(device_id, token)? {
            log_auth_event("device_verify", device_id, true, None);
            Ok(())
        } else {
            log_auth_event("device_verify", device_id, false, Some("unknown device or token"));
            Err(AuthError::Unauthorized)
        }
    }
}
