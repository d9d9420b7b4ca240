//! Integrity verification of recovered watermark records.
//!
//! A failed verification is a value, not an error: the caller gets a
//! [`VerificationResult`] either way and can tell garbled data apart from a
//! record that parsed but carries the wrong hash.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::key::SecretKey;
use crate::media::payload::{Record, Unframed};

/// Recovered payload, parsed as a record or left as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Parsed(Record),
    Unparsed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Record parsed and the hash matches the key.
    Authentic,
    /// Record parsed, hash differs: tampered data or the wrong key.
    HashMismatch,
    /// No terminator within the scan limit and nothing parseable.
    NotTerminated,
    /// Terminated, but not a record.
    Unparsed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub is_valid: bool,
    pub decoded: Decoded,
    pub raw: String,
    /// Whether the extractor found the terminator.
    pub terminated: bool,
}

impl VerificationResult {
    pub fn record(&self) -> Option<&Record> {
        match &self.decoded {
            Decoded::Parsed(record) => Some(record),
            Decoded::Unparsed(_) => None,
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.record().and_then(Record::timestamp)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.record().map(|r| r.id.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        self.record().map(|r| r.text.as_str())
    }

    pub fn status(&self) -> VerificationStatus {
        match (&self.decoded, self.is_valid) {
            (Decoded::Parsed(_), true) => VerificationStatus::Authentic,
            (Decoded::Parsed(_), false) => VerificationStatus::HashMismatch,
            (Decoded::Unparsed(_), _) if !self.terminated => VerificationStatus::NotTerminated,
            (Decoded::Unparsed(_), _) => VerificationStatus::Unparsed,
        }
    }

    /// At most `chars` characters of the raw text, for diagnostics.
    pub fn raw_preview(&self, chars: usize) -> String {
        self.raw.chars().take(chars).collect()
    }

    pub fn report(&self) -> VerificationReport<'_> {
        VerificationReport {
            is_valid: self.is_valid,
            status: self.status(),
            decoded: self.record(),
            raw: &self.raw,
            timestamp: self.timestamp().map(|t| t.to_rfc3339()),
            user_id: self.user_id(),
            text: self.text(),
        }
    }
}

/// Serializable view of a [`VerificationResult`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport<'a> {
    pub is_valid: bool,
    pub status: VerificationStatus,
    pub decoded: Option<&'a Record>,
    pub raw: &'a str,
    pub timestamp: Option<String>,
    pub user_id: Option<&'a str>,
    pub text: Option<&'a str>,
}

/// Parses `text` as a record and checks its hash against `key`.
pub fn verify(key: &SecretKey, text: &str) -> VerificationResult {
    verify_with_termination(key, text, true)
}

/// Verifies the bytes an extractor recovered.
pub fn verify_unframed(key: &SecretKey, unframed: &Unframed) -> VerificationResult {
    verify_with_termination(key, &unframed.to_text(), unframed.is_terminated())
}

fn verify_with_termination(key: &SecretKey, text: &str, terminated: bool) -> VerificationResult {
    match Record::from_payload(text) {
        Some(record) => VerificationResult {
            is_valid: record.is_signed_by(key),
            decoded: Decoded::Parsed(record),
            raw: text.to_string(),
            terminated,
        },
        None => VerificationResult {
            is_valid: false,
            decoded: Decoded::Unparsed(text.to_string()),
            raw: text.to_string(),
            terminated,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> SecretKey {
        SecretKey::new(k).unwrap()
    }

    #[test]
    fn should_accept_a_record_signed_by_the_key() {
        let record = Record::issue_at(&key("mysecret"), "hello", "user_7", 1_700_000_000_000);
        let result = verify(&key("mysecret"), &record.to_payload().unwrap());

        assert!(result.is_valid);
        assert_eq!(result.status(), VerificationStatus::Authentic);
        assert_eq!(result.user_id(), Some("user_7"));
        assert_eq!(result.text(), Some("hello"));
        assert_eq!(
            result.timestamp().map(|t| t.timestamp_millis()),
            Some(1_700_000_000_000)
        );
    }

    #[test]
    fn should_keep_the_record_on_hash_mismatch() {
        let record = Record::issue_at(&key("mysecret"), "hello", "user_7", 1);
        let result = verify(&key("wrong"), &record.to_payload().unwrap());

        assert!(!result.is_valid);
        assert_eq!(result.status(), VerificationStatus::HashMismatch);
        assert_eq!(result.record(), Some(&record));
    }

    #[test]
    fn should_surface_garbage_as_raw_text() {
        let result = verify(&key("mysecret"), "\u{1}\u{ff}garbage");

        assert!(!result.is_valid);
        assert_eq!(result.status(), VerificationStatus::Unparsed);
        assert_eq!(result.decoded, Decoded::Unparsed("\u{1}\u{ff}garbage".to_string()));
        assert_eq!(result.raw_preview(3), "\u{1}\u{ff}g");
        assert_eq!(result.text(), None);
    }

    #[test]
    fn should_flag_unterminated_scans() {
        let unframed = Unframed::NotTerminated(b"{\"id\":".to_vec());
        let result = verify_unframed(&key("mysecret"), &unframed);

        assert!(!result.is_valid);
        assert!(!result.terminated);
        assert_eq!(result.status(), VerificationStatus::NotTerminated);
        assert_eq!(result.raw, "{\"id\":");
    }

    #[test]
    fn should_report_in_camel_case() {
        let record = Record::issue_at(&key("k"), "t", "user_1", 0);
        let result = verify(&key("k"), &record.to_payload().unwrap());
        let json = serde_json::to_value(result.report()).unwrap();

        assert_eq!(json["isValid"], true);
        assert_eq!(json["status"], "authentic");
        assert_eq!(json["userId"], "user_1");
        assert_eq!(json["text"], "t");
        assert_eq!(json["decoded"]["hash"], record.hash.as_str());
    }
}
