//! Login form state.

/// Inline message shown when the service rejects a login.
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoginForm {
    /// Inline error shown under the form.
    pub error: Option<String>,
    /// Name of the user whose login is in flight.
    pub pending_name: Option<String>,
}

impl LoginForm {
    pub fn is_submitting(&self) -> bool {
        self.pending_name.is_some()
    }
}

/// Checks the form fields, returning trimmed values.
pub fn validate(name: &str, email: &str) -> Result<(String, String), String> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() {
        return Err("Name and email are required.".to_string());
    }
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid_email {
        return Err("Enter a valid email address.".to_string());
    }
    Ok((name.to_string(), email.to_string()))
}
