use crate::modules::config::EmailLinks;

/// Function to build the account activation email
/// Returns (subject, body) with the activation link embedded
pub fn activation_email(username: &str, token: &str, links: &EmailLinks) -> (String, String) {
    let subject = "Welcome to GliderBlog - Activate Your Account".to_string();
    let body = format!(
        "Welcome to GliderBlog, {}!\n\
        \n\
        Please activate your account by visiting the link below:\n\
        \n\
        {}\n\
        \n\
        If you did not create this account, you can ignore this email.\n\
        \n\
        Best regards,\n\
        The GliderBlog Team",
        username,
        links.activation_url(token)
    );
    (subject, body)
}

/// Function to build the password reset email
pub fn reset_email(token: &str, links: &EmailLinks) -> (String, String) {
    let subject = "Password Reset Request - GliderBlog".to_string();
    let body = format!(
        "Hello,\n\
        \n\
        A password reset was requested for your GliderBlog account.\n\
        \n\
        To choose a new password, visit the link below:\n\
        \n\
        {}\n\
        \n\
        If you did not request this reset, please ignore this email and ensure \
        your account is secure.\n\
        \n\
        Best regards,\n\
        The GliderBlog Team",
        links.reset_url(token)
    );
    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_links() -> EmailLinks {
        EmailLinks {
            hostlink: "blog.example.com".to_string(),
            portlink: 8000,
        }
    }

    #[test]
    fn test_activation_email_contents() {
        let (subject, body) = activation_email("alice", "tok-abc123", &test_links());

        assert!(subject.contains("Activate"));
        assert!(body.contains("alice"));
        assert!(body.contains("http://blog.example.com:8000/activate/tok-abc123"));
        assert!(body.contains("ignore this email"));
    }

    #[test]
    fn test_reset_email_contents() {
        let (subject, body) = reset_email("tok-reset456", &test_links());

        assert!(subject.contains("Password Reset"));
        assert!(body.contains("http://blog.example.com:8000/reset/tok-reset456"));
        assert!(
            body.contains("did not request this reset"),
            "Email should address case of unrequested resets"
        );
        // The reset mail names no account details beyond the recipient
        assert!(!body.contains("alice"));
    }
}
