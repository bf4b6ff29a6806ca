use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::modules::email::smtp::SmtpConfig;

/// Base address used to build the links embedded in outgoing emails
/// This points at the public face of the presentation layer, which owns the
/// /activate and /reset routes
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EmailLinks {
    pub hostlink: String,
    pub portlink: u16,
}

impl EmailLinks {
    /// Link a new user follows to activate their account
    pub fn activation_url(&self, token: &str) -> String {
        format!("http://{}:{}/activate/{}", self.hostlink, self.portlink, token)
    }

    /// Link a user follows to complete a password reset
    pub fn reset_url(&self, token: &str) -> String {
        format!("http://{}:{}/reset/{}", self.hostlink, self.portlink, token)
    }
}

/// Application configuration, loaded once at startup and passed explicitly
/// into the components that need it
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub smtp: SmtpConfig,
    pub email: EmailLinks,
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, String> {
        let data = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        serde_json::from_str(&data).map_err(|e| format!("Failed to parse config file: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "smtp": {{
                    "server": "smtp.example.com",
                    "port": 587,
                    "user": "mailer@example.com",
                    "password": "app-password"
                }},
                "email": {{
                    "hostlink": "blog.example.com",
                    "portlink": 8000
                }}
            }}"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.smtp.server, "smtp.example.com");
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.smtp.user, "mailer@example.com");
        assert_eq!(config.email.hostlink, "blog.example.com");
        assert_eq!(config.email.portlink, 8000);
    }

    #[test]
    fn test_load_reports_missing_file_and_bad_json() {
        let missing = AppConfig::load(Path::new("/no/such/config.json"));
        assert!(missing.unwrap_err().contains("Failed to read config file"));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();
        let bad = AppConfig::load(file.path());
        assert!(bad.unwrap_err().contains("Failed to parse config file"));
    }

    #[test]
    fn test_email_links() {
        let links = EmailLinks {
            hostlink: "blog.example.com".to_string(),
            portlink: 8000,
        };
        assert_eq!(
            links.activation_url("tok"),
            "http://blog.example.com:8000/activate/tok"
        );
        assert_eq!(
            links.reset_url("tok"),
            "http://blog.example.com:8000/reset/tok"
        );
    }
}
