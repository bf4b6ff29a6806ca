use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::store::Role;
use crate::modules::utils::time::get_current_timestamp;

/// Name of the client-held identity cookie
pub const SESSION_COOKIE: &str = "user_session";

/// Name of the client-held role marker cookie
pub const ROLE_COOKIE: &str = "user_role";

/// Default session lifetime in seconds (60 minutes)
pub const DEFAULT_SESSION_LIFETIME: u64 = 3600;

/// Ephemeral session state handed to the client after a successful login
/// Never persisted server-side: expiry rides entirely on the cookie max-age,
/// so an issued session cannot be revoked before it expires
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionDescriptor {
    pub username: String,
    pub role: Role,
    pub issued_at: u64,
    pub expires_at: u64,
}

impl SessionDescriptor {
    /// Value of the identity cookie
    pub fn identity_value(&self) -> &str {
        &self.username
    }

    /// Value of the role marker cookie
    pub fn role_value(&self) -> &'static str {
        self.role.as_marker()
    }

    /// Max-age to set on both cookies
    pub fn max_age_secs(&self) -> u64 {
        self.expires_at.saturating_sub(self.issued_at)
    }
}

/// Issues session descriptors and gates protected requests on the values the
/// client sends back
pub struct SessionManager {
    lifetime_secs: u64,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            lifetime_secs: DEFAULT_SESSION_LIFETIME,
        }
    }

    pub fn with_lifetime(lifetime_secs: u64) -> Self {
        Self { lifetime_secs }
    }

    /// Create a session descriptor for a freshly authenticated user
    pub fn issue(&self, username: &str, role: Role) -> SessionDescriptor {
        let issued_at = get_current_timestamp();
        SessionDescriptor {
            username: username.to_string(),
            role,
            issued_at,
            expires_at: issued_at + self.lifetime_secs,
        }
    }

    /// Require a session identity on a protected request
    pub fn authenticate(&self, identity: Option<&str>) -> Result<String, AuthError> {
        match identity {
            Some(username) if !username.is_empty() => Ok(username.to_string()),
            _ => Err(AuthError::NotAuthenticated),
        }
    }

    /// Require an administrator session on an admin-gated request
    /// A missing identity is reported before the role is considered
    pub fn require_admin(
        &self,
        identity: Option<&str>,
        role_marker: Option<&str>,
    ) -> Result<String, AuthError> {
        let username = self.authenticate(identity)?;
        match role_marker.and_then(Role::from_marker) {
            Some(Role::Administrator) => Ok(username),
            _ => Err(AuthError::Forbidden),
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
