//! Process configuration

use crate::error::{FormsError, Result};

/// Environment variable holding the admin passkey
pub const ENV_ADMIN_PASSKEY: &str = "CAREPULSE_ADMIN_PASSKEY";
/// Environment variable holding the persistence API base URL
pub const ENV_API_URL: &str = "CAREPULSE_API_URL";

/// Default persistence API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Expected admin secret, compared verbatim against entered and decoded values
#[derive(Clone, PartialEq, Eq)]
pub struct AdminPasskey(String);

impl AdminPasskey {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(FormsError::Config("admin passkey cannot be empty".into()));
        }
        Ok(Self(value))
    }

    /// Read the passkey from `CAREPULSE_ADMIN_PASSKEY`
    pub fn from_env() -> Result<Self> {
        let value = std::env::var(ENV_ADMIN_PASSKEY)
            .map_err(|_| FormsError::Config(format!("{} is not set", ENV_ADMIN_PASSKEY)))?;
        Self::new(value)
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes() == candidate.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AdminPasskey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminPasskey(***)")
    }
}

/// Persistence API base URL from `CAREPULSE_API_URL`, falling back to the default
pub fn api_url_from_env() -> String {
    std::env::var(ENV_API_URL)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passkey_matches_exactly() {
        let key = AdminPasskey::new("123456").unwrap();
        assert!(key.matches("123456"));
        assert!(!key.matches("123457"));
        assert!(!key.matches("12345"));
        assert!(!key.matches(" 123456"));
    }

    #[test]
    fn test_empty_passkey_rejected() {
        assert!(matches!(AdminPasskey::new(""), Err(FormsError::Config(_))));
    }

    #[test]
    fn test_debug_hides_secret() {
        let key = AdminPasskey::new("123456").unwrap();
        assert!(!format!("{:?}", key).contains("123456"));
    }
}
