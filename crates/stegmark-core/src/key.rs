use std::fmt::{self, Debug, Formatter};

use crate::error::StegmarkError;
use crate::result::Result;

/// The fixed, publicly documented key used for visible watermarks.
///
/// Visible marks carry their metadata with this key, so recovering it never
/// requires the end user to know a secret. It is not a security boundary.
pub const VISIBLE_DEFAULT_KEY: &str = "VISIBLE_DEFAULT_KEY";

/// A non-empty secret shared by the embedder and the extractor.
///
/// It decides which pixels carry the watermark and is bound into the record hash.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new<S: Into<String>>(key: S) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(StegmarkError::MissingSecretKey);
        }

        Ok(Self(key))
    }

    /// Turns an optional user input into a key, `None` and `""` are both missing.
    pub fn require<S: AsRef<str>>(key: Option<S>) -> Result<Self> {
        match key {
            Some(key) => Self::new(key.as_ref()),
            None => Err(StegmarkError::MissingSecretKey),
        }
    }

    pub fn visible_default() -> Self {
        Self(VISIBLE_DEFAULT_KEY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({})", "*".repeat(self.0.len()))
    }
}

impl AsRef<str> for SecretKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for SecretKey {
    type Error = StegmarkError;

    fn try_from(key: &str) -> Result<Self> {
        Self::new(key)
    }
}

impl TryFrom<String> for SecretKey {
    type Error = StegmarkError;

    fn try_from(key: String) -> Result<Self> {
        Self::new(key)
    }
}
