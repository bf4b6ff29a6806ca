use std::sync::Arc;
use std::thread;

use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::transport::smtp::PoolConfig;
use lettre::{Message, SmtpTransport, Transport};

use super::smtp::SmtpConfig;
use crate::modules::utils::logging::log_mail_event;

/// Outbound mail transport interface
pub trait Mailer: Send + Sync {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), String>;
}

/// Mailer backed by a blocking SMTP relay
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        // Create email message
        let email = Message::builder()
            .from(
                format!("GliderBlog <{}>", self.config.user)
                    .parse()
                    .map_err(|e| format!("Invalid from address: {}", e))?,
            )
            .to(to
                .parse()
                .map_err(|e| format!("Invalid to address: {}", e))?)
            .subject(subject)
            .header(lettre::message::header::ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| format!("Failed to create email: {}", e))?;

        // Configure TLS parameters
        let tls_parameters = TlsParameters::builder(self.config.server.clone())
            .build()
            .map_err(|e| format!("Failed to build TLS parameters: {}", e))?;

        // Set up SMTP transport with explicit TLS configuration
        let mailer = SmtpTransport::relay(&self.config.server)
            .map_err(|e| format!("Failed to create SMTP transport: {}", e))?
            .credentials(Credentials::new(
                self.config.user.clone(),
                self.config.password.clone(),
            ))
            .port(self.config.port)
            .tls(Tls::Required(tls_parameters))
            .pool_config(PoolConfig::new().max_size(1))
            .timeout(Some(std::time::Duration::from_secs(10)))
            .build();

        mailer
            .send(&email)
            .map(|_| ())
            .map_err(|e| format!("Failed to send email: {}", e))
    }
}

/// Hands each message to a background thread so the triggering operation
/// never waits on delivery
/// Delivery failures are logged at this boundary and go no further
#[derive(Clone)]
pub struct MailDispatcher {
    mailer: Arc<dyn Mailer>,
}

impl MailDispatcher {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Queue a message for delivery
    /// The returned worker handle may be dropped; it is joinable where a
    /// caller needs to wait out a send
    pub fn dispatch(&self, to: String, subject: String, body: String) -> thread::JoinHandle<()> {
        let mailer = Arc::clone(&self.mailer);
        thread::spawn(move || match mailer.send(&to, &subject, &body) {
            Ok(_) => log_mail_event(&to, true, None),
            Err(e) => log_mail_event(&to, false, Some(&e)),
        })
    }
}
