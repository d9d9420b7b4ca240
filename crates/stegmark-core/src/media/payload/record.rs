use std::io;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, Serializer};
use sha2::{Digest, Sha256};

use crate::key::SecretKey;
use crate::result::Result;

/// The provenance record that travels inside the image.
///
/// Field order is part of the wire format: `id`, `ts`, `hash`, `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Placeholder for the embedding actor, `user_<n>`, not reproducible.
    pub id: String,
    /// Milliseconds since the unix epoch at embed time.
    pub ts: i64,
    /// `hex(sha256(key ++ ts))`
    pub hash: String,
    #[serde(default)]
    pub text: String,
}

impl Record {
    /// Creates a record for `text`, stamped with the current time.
    pub fn stamp(key: &SecretKey, text: &str) -> Self {
        let id = format!("user_{}", fastrand::u32(..10_000));
        Self::issue_at(key, text, id, Utc::now().timestamp_millis())
    }

    /// Creates a record with a given id and timestamp.
    pub fn issue_at<S: Into<String>>(key: &SecretKey, text: &str, id: S, ts: i64) -> Self {
        Self {
            id: id.into(),
            ts,
            hash: integrity_hash(key, ts),
            text: text.to_string(),
        }
    }

    /// Compact JSON in field order, non-ASCII characters are written as `\uXXXX` escapes.
    pub fn to_payload(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buf, AsciiFormatter);
        self.serialize(&mut serializer)?;

        // only ASCII bytes were written
        Ok(buf.into_iter().map(char::from).collect())
    }

    pub fn from_payload(payload: &str) -> Option<Self> {
        serde_json::from_str(payload).ok()
    }

    /// Whether the hash matches the one recomputed from `key` and `ts`.
    pub fn is_signed_by(&self, key: &SecretKey) -> bool {
        integrity_hash(key, self.ts) == self.hash
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.ts)
    }
}

/// `hex(sha256(key ++ decimal(ts)))`
pub fn integrity_hash(key: &SecretKey, ts: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_str().as_bytes());
    hasher.update(ts.to_string().as_bytes());

    hex::encode(hasher.finalize())
}

/// Compact JSON formatter that keeps the output within ASCII.
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}
