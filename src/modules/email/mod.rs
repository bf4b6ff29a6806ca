pub mod mailer;
pub mod smtp;
pub mod templates;

pub use mailer::{MailDispatcher, Mailer, SmtpMailer};
pub use smtp::SmtpConfig;
pub use templates::{activation_email, reset_email};
