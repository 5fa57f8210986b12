//! Phone Value Object
//!
//! International phone number stored as `+` followed by 10 to 15 digits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Calling code applied when input carries no `+` prefix (default country IN)
pub const DEFAULT_CALLING_CODE: &str = "91";

/// Phone number value object
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse an already normalized international number
    pub fn parse(value: &str) -> Result<Self, PhoneError> {
        let value = value.trim();

        if value.is_empty() {
            return Err(PhoneError::Empty);
        }

        let Some(digits) = value.strip_prefix('+') else {
            return Err(PhoneError::InvalidFormat);
        };

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::InvalidCharacters);
        }

        if digits.len() < 10 || digits.len() > 15 {
            return Err(PhoneError::InvalidLength);
        }

        Ok(Self(value.to_string()))
    }

    /// Normalize free-form phone input the way the phone widget stores it.
    ///
    /// Separators are dropped. Input without a `+` prefix is taken as a
    /// national number in the default country, its trunk `0` dropped.
    /// Empty input stays empty.
    pub fn normalize(raw: &str) -> String {
        let raw = raw.trim();
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.is_empty() {
            return String::new();
        }

        if raw.starts_with('+') || raw.starts_with("00") {
            let digits = if raw.starts_with("00") { &digits[2..] } else { &digits[..] };
            format!("+{}", digits)
        } else {
            let national = digits.strip_prefix('0').unwrap_or(digits.as_str());
            format!("+{}{}", DEFAULT_CALLING_CODE, national)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digits after the `+`
    pub fn digits(&self) -> &str {
        &self.0[1..]
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    Empty,
    InvalidLength,
    InvalidCharacters,
    InvalidFormat,
}

impl std::error::Error for PhoneError {}

impl fmt::Display for PhoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Phone number cannot be empty"),
            Self::InvalidLength => write!(f, "Invalid phone number length"),
            Self::InvalidCharacters => write!(f, "Phone number contains invalid characters"),
            Self::InvalidFormat => write!(f, "Invalid phone number format"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_international() {
        let phone = Phone::parse("+918966620102").unwrap();
        assert_eq!(phone.as_str(), "+918966620102");
        assert_eq!(phone.digits(), "918966620102");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(Phone::parse(""), Err(PhoneError::Empty));
        assert_eq!(Phone::parse("918966620102"), Err(PhoneError::InvalidFormat));
        assert_eq!(Phone::parse("+91 8966620102"), Err(PhoneError::InvalidCharacters));
        assert_eq!(Phone::parse("+123456789"), Err(PhoneError::InvalidLength));
        assert_eq!(Phone::parse("+1234567890123456"), Err(PhoneError::InvalidLength));
    }

    #[test]
    fn test_normalize_strips_separators() {
        assert_eq!(Phone::normalize("+91 89666-20102"), "+918966620102");
        assert_eq!(Phone::normalize("+1 (555) 123-4567"), "+15551234567");
    }

    #[test]
    fn test_normalize_applies_default_country() {
        assert_eq!(Phone::normalize("8966620102"), "+918966620102");
        assert_eq!(Phone::normalize("08966620102"), "+918966620102");
        assert_eq!(Phone::normalize("0 89666-20102"), "+918966620102");
        assert!(Phone::parse(&Phone::normalize("08966620102")).is_ok());
    }

    #[test]
    fn test_normalize_international_prefix() {
        assert_eq!(Phone::normalize("0044 20 7946 0958"), "+442079460958");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(Phone::normalize("   "), "");
        assert_eq!(Phone::normalize("+"), "");
    }
}
