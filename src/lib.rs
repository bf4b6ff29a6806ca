// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{auth, config, email, utils};

// Re-export commonly used types
pub use modules::auth::account::{AccountManager, AuthenticatedUser};
pub use modules::auth::device::DeviceGuard;
pub use modules::auth::error::AuthError;
pub use modules::auth::session::{SessionDescriptor, SessionManager};
pub use modules::auth::store::{CredentialStore, DeviceStore, MemoryStore, Role, User};
pub use modules::config::AppConfig;
pub use modules::email::mailer::{MailDispatcher, Mailer, SmtpMailer};

// Constants
pub use modules::auth::session::{DEFAULT_SESSION_LIFETIME, ROLE_COOKIE, SESSION_COOKIE};
pub use modules::auth::tokens::TOKEN_ENTROPY_BYTES;
