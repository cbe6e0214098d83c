use crate::error::ShortenerError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const MIN_LENGTH: usize = 6;
pub const MAX_LENGTH: usize = 12;

/// A validated short code identifier for a shortened URL.
///
/// Short codes are 6-12 characters long and drawn from `[A-Za-z0-9_-]`,
/// the same 64 symbols the code encoder emits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    pub fn new(code: impl Into<String>) -> std::result::Result<Self, ShortenerError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// such as rows already read back from the store.
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns `true` if `code` would be accepted by [`ShortCode::new`].
    pub fn is_valid(code: &str) -> bool {
        Self::validate(code).is_ok()
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> std::result::Result<(), ShortenerError> {
        if code.len() < MIN_LENGTH || code.len() > MAX_LENGTH {
            return Err(ShortenerError::InvalidInput(format!(
                "short code length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                code.len()
            )));
        }

        if !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ShortenerError::InvalidInput(format!(
                "short code must contain only alphanumeric characters, hyphens, or underscores: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl TryFrom<String> for ShortCode {
    type Error = ShortenerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShortCode> for String {
    fn from(code: ShortCode) -> Self {
        code.0
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(ShortCode::new("abc123").is_ok());
        assert!(ShortCode::new("Abc-12_xyz").is_ok());
        assert!(ShortCode::new("a".repeat(12)).is_ok());
    }

    #[test]
    fn too_short() {
        assert!(ShortCode::new("abcde").is_err());
        assert!(ShortCode::new("").is_err());
    }

    #[test]
    fn too_long() {
        assert!(ShortCode::new("a".repeat(13)).is_err());
        // "nonexistent" is 11 chars and therefore well-formed.
        assert!(ShortCode::new("nonexistent").is_ok());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortCode::new("abc def").is_err());
        assert!(ShortCode::new("abc/def").is_err());
        assert!(ShortCode::new("abc!def").is_err());
        assert!(ShortCode::new("abc+def").is_err());
        assert!(ShortCode::new("ÅbcdefÅ").is_err());
    }

    #[test]
    fn invalid_code_is_an_input_error() {
        let err = ShortCode::new("ab").unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn display_and_as_str() {
        let code = ShortCode::new("my-code").unwrap();
        assert_eq!(code.to_string(), "my-code");
        assert_eq!(code.as_str(), "my-code");
    }

    #[test]
    fn to_url_trims_trailing_slash() {
        let code = ShortCode::new("abc123").unwrap();
        assert_eq!(code.to_url("https://hash.link"), "https://hash.link/abc123");
        assert_eq!(code.to_url("https://hash.link/"), "https://hash.link/abc123");
    }

    #[test]
    fn deserialize_validates() {
        let ok: ShortCode = serde_json::from_str("\"AADTpwh4\"").unwrap();
        assert_eq!(ok.as_str(), "AADTpwh4");

        let err = serde_json::from_str::<ShortCode>("\"no\"");
        assert!(err.is_err());
    }
}
