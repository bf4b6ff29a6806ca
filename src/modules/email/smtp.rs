use serde::{Deserialize, Serialize};

/// SMTP connection settings for the outbound mailer
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SmtpConfig {
    // SMTP server hostname (e.g., smtp.gmail.com)
    pub server: String,
    // SMTP server port (typically 587 for TLS)
    pub port: u16,
    // The email address/username for SMTP authentication
    pub user: String,
    // The password or app-specific password for SMTP
    pub password: String,
}
