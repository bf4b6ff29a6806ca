use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::modules::utils::time::get_current_timestamp;

/// Role carried by a user record and echoed in the session role marker
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Administrator,
    Standard,
}

impl Role {
    /// Stable marker written into the client-held role value
    pub fn as_marker(&self) -> &'static str {
        match self {
            Role::Administrator => "admin",
            Role::Standard => "user",
        }
    }

    /// Parse a client-held role marker back into a role
    pub fn from_marker(marker: &str) -> Option<Role> {
        match marker {
            "admin" => Some(Role::Administrator),
            "user" => Some(Role::Standard),
            _ => None,
        }
    }
}

/// Define activation state enum
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationState {
    Pending,
    Active,
}

impl ActivationState {
    pub fn is_active(&self) -> bool {
        matches!(self, ActivationState::Active)
    }
}

/// Represents a single user record as held by the credential store
/// The password secret is a self-describing hash string, never plaintext;
/// each token field is single-use and nulled by the mutation that consumes it
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub password_secret: String,
    pub role: Role,
    pub state: ActivationState,
    pub activation_token: Option<String>,
    pub reset_token: Option<String>,
    pub created_at: u64,
}

/// Fields needed to create a new user record
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_secret: String,
    pub role: Role,
    pub activation_token: String,
}

/// Lookup keys understood by find_user
#[derive(Debug, Clone, Copy)]
pub enum UserLookup<'a> {
    Username(&'a str),
    Email(&'a str),
    ActivationToken(&'a str),
    ResetToken(&'a str),
}

/// Errors surfaced by a store adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Unique constraint violated on insert
    Conflict,
    /// The store could not be reached or the operation failed mid-flight
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Conflict => write!(f, "unique constraint violated"),
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Narrow interface to the relational store holding user records
///
/// Each operation commits atomically. The token-consuming mutations are
/// conditional updates keyed by the token itself and report whether a row
/// changed, so a concurrent consume of the same token surfaces as false
/// rather than a blind overwrite.
pub trait CredentialStore: Send + Sync {
    /// Look up a single user by one of the unique keys
    fn find_user(&self, by: UserLookup) -> Result<Option<User>, StoreError>;

    /// Create a user record in the pending state with its activation token
    /// Fails with Conflict when the username or email is already taken
    fn insert_user(&self, new: NewUser) -> Result<User, StoreError>;

    /// Activate the record holding this token and clear the token, in one
    /// mutation; returns whether a record was updated
    fn set_active(&self, activation_token: &str) -> Result<bool, StoreError>;

    /// Attach a reset token to the record with this email address
    fn set_reset_token(&self, email: &str, token: &str) -> Result<(), StoreError>;

    /// Replace the password secret of the record holding this reset token
    /// and clear the token, in one mutation; returns whether a record was
    /// updated
    fn set_password_and_clear_reset(
        &self,
        reset_token: &str,
        new_secret: &str,
    ) -> Result<bool, StoreError>;
}

/// Read-only view of the device table
pub trait DeviceStore: Send + Sync {
    /// Exact (device id, token) pair lookup
    fn device_token_matches(&self, device_id: &str, token: &str) -> Result<bool, StoreError>;
}

/// In-memory store backing the tests and small single-process deployments
/// A SQL adapter implements the same traits against the real user and device
/// tables
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

struct MemoryInner {
    users: Vec<User>,
    devices: HashMap<String, String>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                users: Vec::new(),
                devices: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Register a device and its pre-shared token
    pub fn add_device(&self, device_id: &str, token: &str) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner
            .devices
            .insert(device_id.to_string(), token.to_string());
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryInner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for MemoryStore {
    fn find_user(&self, by: UserLookup) -> Result<Option<User>, StoreError> {
        let inner = self.lock()?;
        let found = inner.users.iter().find(|user| match by {
            UserLookup::Username(username) => user.username == username,
            UserLookup::Email(email) => user.email == email,
            UserLookup::ActivationToken(token) => user.activation_token.as_deref() == Some(token),
            UserLookup::ResetToken(token) => user.reset_token.as_deref() == Some(token),
        });
        Ok(found.cloned())
    }

    fn insert_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut inner = self.lock()?;

        // Both unique keys are checked before anything is written
        if inner
            .users
            .iter()
            .any(|user| user.username == new.username || user.email == new.email)
        {
            return Err(StoreError::Conflict);
        }

        let user = User {
            id: inner.next_id,
            username: new.username,
            email: new.email,
            password_secret: new.password_secret,
            role: new.role,
            state: ActivationState::Pending,
            activation_token: Some(new.activation_token),
            reset_token: None,
            created_at: get_current_timestamp(),
        };

        inner.next_id += 1;
        inner.users.push(user.clone());
        Ok(user)
    }

    fn set_active(&self, activation_token: &str) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        for user in inner.users.iter_mut() {
            if user.activation_token.as_deref() == Some(activation_token) {
                user.state = ActivationState::Active;
                user.activation_token = None;
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn set_reset_token(&self, email: &str, token: &str) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        for user in inner.users.iter_mut() {
            if user.email == email {
                user.reset_token = Some(token.to_string());
            }
        }
        Ok(())
    }

    fn set_password_and_clear_reset(
        &self,
        reset_token: &str,
        new_secret: &str,
    ) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        for user in inner.users.iter_mut() {
            if user.reset_token.as_deref() == Some(reset_token) {
                user.password_secret = new_secret.to_string();
                user.reset_token = None;
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl DeviceStore for MemoryStore {
    fn device_token_matches(&self, device_id: &str, token: &str) -> Result<bool, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .devices
            .get(device_id)
            .map(|stored| stored == token)
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str, token: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_secret: "$pbkdf2-sha256$stub".to_string(),
            role: Role::Standard,
            activation_token: token.to_string(),
        }
    }

    #[test]
    fn test_insert_starts_pending_with_token() {
        let store = MemoryStore::new();
        let user = store.insert_user(new_user("alice", "a@x.com", "tok-1")).unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.state, ActivationState::Pending);
        assert_eq!(user.activation_token.as_deref(), Some("tok-1"));
        assert!(user.reset_token.is_none());
        assert!(user.created_at > 0);
    }

    #[test]
    fn test_insert_rejects_duplicate_username_and_email() {
        let store = MemoryStore::new();
        store.insert_user(new_user("alice", "a@x.com", "tok-1")).unwrap();

        let same_name = store.insert_user(new_user("alice", "other@x.com", "tok-2"));
        assert_eq!(same_name.unwrap_err(), StoreError::Conflict);

        let same_email = store.insert_user(new_user("bob", "a@x.com", "tok-3"));
        assert_eq!(same_email.unwrap_err(), StoreError::Conflict);

        // The first record is unaffected by the rejected inserts
        let user = store
            .find_user(UserLookup::Username("alice"))
            .unwrap()
            .unwrap();
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.activation_token.as_deref(), Some("tok-1"));
    }

    #[test]
    fn test_find_user_by_each_key() {
        let store = MemoryStore::new();
        store.insert_user(new_user("alice", "a@x.com", "tok-1")).unwrap();
        store.set_reset_token("a@x.com", "reset-1").unwrap();

        for lookup in [
            UserLookup::Username("alice"),
            UserLookup::Email("a@x.com"),
            UserLookup::ActivationToken("tok-1"),
            UserLookup::ResetToken("reset-1"),
        ] {
            let found = store.find_user(lookup).unwrap();
            assert_eq!(found.unwrap().username, "alice");
        }

        assert!(store.find_user(UserLookup::Username("bob")).unwrap().is_none());
        assert!(store
            .find_user(UserLookup::ActivationToken("no-such"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_set_active_consumes_the_token_once() {
        let store = MemoryStore::new();
        store.insert_user(new_user("alice", "a@x.com", "tok-1")).unwrap();

        assert!(store.set_active("tok-1").unwrap());

        let user = store
            .find_user(UserLookup::Username("alice"))
            .unwrap()
            .unwrap();
        assert_eq!(user.state, ActivationState::Active);
        assert!(user.activation_token.is_none());

        // The token no longer selects any record
        assert!(!store.set_active("tok-1").unwrap());
    }

    #[test]
    fn test_password_reset_mutation_is_conditional_on_the_token() {
        let store = MemoryStore::new();
        store.insert_user(new_user("alice", "a@x.com", "tok-1")).unwrap();
        store.set_reset_token("a@x.com", "reset-1").unwrap();

        assert!(!store
            .set_password_and_clear_reset("wrong-token", "$new$secret")
            .unwrap());

        assert!(store
            .set_password_and_clear_reset("reset-1", "$new$secret")
            .unwrap());

        let user = store
            .find_user(UserLookup::Username("alice"))
            .unwrap()
            .unwrap();
        assert_eq!(user.password_secret, "$new$secret");
        assert!(user.reset_token.is_none());

        // Second consume of the same token updates nothing
        assert!(!store
            .set_password_and_clear_reset("reset-1", "$another$secret")
            .unwrap());
    }

    #[test]
    fn test_device_pair_lookup() {
        let store = MemoryStore::new();
        store.add_device("sensor-01", "shared-secret").unwrap();

        assert!(store
            .device_token_matches("sensor-01", "shared-secret")
            .unwrap());
        assert!(!store.device_token_matches("sensor-01", "wrong").unwrap());
        assert!(!store
            .device_token_matches("sensor-99", "shared-secret")
            .unwrap());
    }

    #[test]
    fn test_role_markers() {
        assert_eq!(Role::Administrator.as_marker(), "admin");
        assert_eq!(Role::Standard.as_marker(), "user");
        assert_eq!(Role::from_marker("admin"), Some(Role::Administrator));
        assert_eq!(Role::from_marker("user"), Some(Role::Standard));
        assert_eq!(Role::from_marker("root"), None);
    }

    #[test]
    fn test_activation_state() {
        assert!(ActivationState::Active.is_active());
        assert!(!ActivationState::Pending.is_active());
    }
}
