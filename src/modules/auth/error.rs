use std::fmt;

use super::store::StoreError;

/// Caller-visible outcomes of the credential lifecycle and access guards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Username or email already taken at registration
    Conflict,
    /// Activation or reset token not found or already consumed
    InvalidToken,
    /// Unknown username or wrong password
    InvalidCredentials,
    /// Credentials are valid but the account has not been activated yet
    AccountNotActive,
    /// No session identity presented on a protected request
    NotAuthenticated,
    /// Authenticated but lacking the administrator role
    Forbidden,
    /// Device credential check failed
    Unauthorized,
    /// Infrastructure failure, fatal to the current request
    Server(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Conflict => write!(f, "username or email is already taken"),
            AuthError::InvalidToken => write!(f, "invalid or already used token"),
            AuthError::InvalidCredentials => write!(f, "invalid username or password"),
            AuthError::AccountNotActive => write!(f, "account has not been activated"),
            AuthError::NotAuthenticated => write!(f, "not logged in"),
            AuthError::Forbidden => write!(f, "administrator access required"),
            AuthError::Unauthorized => write!(f, "invalid device credentials"),
            AuthError::Server(msg) => write!(f, "server error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => AuthError::Conflict,
            StoreError::Unavailable(msg) => AuthError::Server(msg),
        }
    }
}
