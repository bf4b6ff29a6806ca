pub mod account;
pub mod device;
pub mod error;
pub mod password;
pub mod session;
pub mod store;
pub mod tokens;

// Re-export the main types and functions
pub use account::{AccountManager, AuthenticatedUser};
pub use device::DeviceGuard;
pub use error::AuthError;
pub use password::{hash_password, prepare_password, verify_password};
pub use session::{
    SessionDescriptor, SessionManager, DEFAULT_SESSION_LIFETIME, ROLE_COOKIE, SESSION_COOKIE,
};
pub use store::{
    ActivationState, CredentialStore, DeviceStore, MemoryStore, NewUser, Role, StoreError, User,
    UserLookup,
};
pub use tokens::{generate_token, TOKEN_ENTROPY_BYTES};
