use std::sync::Arc;

use log::debug;

use super::error::AuthError;
use super::password::{hash_password, verify_password};
use super::store::{CredentialStore, NewUser, Role, User, UserLookup};
use super::tokens::generate_token;
use crate::modules::config::EmailLinks;
use crate::modules::email::mailer::MailDispatcher;
use crate::modules::email::templates::{activation_email, reset_email};
use crate::modules::utils::logging::log_auth_event;

/// Identity and role of a successfully authenticated user, as handed to the
/// session manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: u64,
    pub username: String,
    pub role: Role,
}

/// Orchestrates registration, activation, password reset and login against
/// the injected store and mailer
pub struct AccountManager {
    store: Arc<dyn CredentialStore>,
    mail: MailDispatcher,
    links: EmailLinks,
}

impl AccountManager {
    pub fn new(store: Arc<dyn CredentialStore>, mail: MailDispatcher, links: EmailLinks) -> Self {
        Self { store, mail, links }
    }

    /// Create a new account in the pending state and dispatch the activation
    /// email
    /// Self-service callers pass Role::Standard; only admin-initiated
    /// provisioning passes Role::Administrator
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AuthError> {
        let password_secret = hash_password(password).map_err(AuthError::Server)?;
        let activation_token = generate_token();

        let user = self.store.insert_user(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_secret,
            role,
            activation_token: activation_token.clone(),
        })?;

        log_auth_event("register", username, true, None);

        // Fire-and-forget: a delivery failure is logged by the dispatcher
        // and never turns a completed registration into an error
        let (subject, body) = activation_email(username, &activation_token, &self.links);
        self.mail.dispatch(email.to_string(), subject, body);

        Ok(user)
    }

    /// Consume an activation token, moving the account to the active state
    /// A missing token and an already-consumed one are indistinguishable
    pub fn activate_account(&self, token: &str) -> Result<(), AuthError> {
        if self
            .store
            .find_user(UserLookup::ActivationToken(token))?
            .is_none()
        {
            log_auth_event("activate", token, false, Some("unknown or consumed token"));
            return Err(AuthError::InvalidToken);
        }

        // Conditional update keyed by the token itself; a concurrent consume
        // shows up as no row changed
        if !self.store.set_active(token)? {
            return Err(AuthError::InvalidToken);
        }

        log_auth_event("activate", token, true, None);
        Ok(())
    }

    /// Start a password reset for the given email address
    /// Returns the same success outcome whether or not the address is known,
    /// so callers cannot probe which emails are registered; only a known
    /// address gets a token and a mail
    pub fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let user = match self.store.find_user(UserLookup::Email(email))? {
            Some(user) => user,
            None => {
                debug!("Password reset requested for unknown email");
                return Ok(());
            }
        };

        let token = generate_token();
        self.store.set_reset_token(email, &token)?;
        log_auth_event("reset_request", &user.username, true, None);

        let (subject, body) = reset_email(&token, &self.links);
        self.mail.dispatch(email.to_string(), subject, body);

        Ok(())
    }

    /// Consume a reset token, replacing the stored password secret and
    /// clearing the token in one store mutation
    pub fn complete_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let user = match self.store.find_user(UserLookup::ResetToken(token))? {
            Some(user) => user,
            None => {
                log_auth_event(
                    "reset_complete",
                    token,
                    false,
                    Some("unknown or consumed token"),
                );
                return Err(AuthError::InvalidToken);
            }
        };

        let new_secret = hash_password(new_password).map_err(AuthError::Server)?;
        if !self
            .store
            .set_password_and_clear_reset(token, &new_secret)?
        {
            return Err(AuthError::InvalidToken);
        }

        log_auth_event("reset_complete", &user.username, true, None);
        Ok(())
    }

    /// Check a username/password pair
    /// An unknown username and a wrong password produce the same failure; a
    /// valid but unactivated account is reported separately
    pub fn login(&self, username: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        let user = match self.store.find_user(UserLookup::Username(username))? {
            Some(user) => user,
            None => {
                log_auth_event("login", username, false, Some("unknown username"));
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_secret) {
            log_auth_event("login", username, false, Some("wrong password"));
            return Err(AuthError::InvalidCredentials);
        }

        if !user.state.is_active() {
            log_auth_event("login", username, false, Some("account not active"));
            return Err(AuthError::AccountNotActive);
        }

        log_auth_event("login", username, true, None);
        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}
