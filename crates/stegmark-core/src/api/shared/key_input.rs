use std::fmt::{self, Debug, Formatter};

use crate::key::SecretKey;
use crate::result::Result;

/// A key as supplied by the user, possibly absent.
#[derive(Default, Clone)]
pub struct KeyInput(Option<String>);

impl KeyInput {
    pub fn is_missing(&self) -> bool {
        self.0.as_deref().map_or(true, str::is_empty)
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Fails with `MissingSecretKey` for an absent or empty key.
    pub fn require(&self) -> Result<SecretKey> {
        SecretKey::require(self.0.as_deref())
    }
}

impl Debug for KeyInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(key) = &self.0 {
            write!(f, "KeyInput({})", "*".repeat(key.len()))
        } else {
            write!(f, "KeyInput(None)")
        }
    }
}

impl From<Option<String>> for KeyInput {
    fn from(key: Option<String>) -> Self {
        Self(key)
    }
}

impl From<&str> for KeyInput {
    fn from(key: &str) -> Self {
        Self(Some(key.to_string()))
    }
}

impl From<String> for KeyInput {
    fn from(key: String) -> Self {
        Self(Some(key))
    }
}
