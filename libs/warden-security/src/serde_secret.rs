//! Serde helpers for `SecretString` configuration fields.
//!
//! Use with `#[serde(with = "warden_security::serde_secret")]`. Values are
//! read as plain strings and always written back redacted.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serializer};

pub const REDACTED: &str = "[REDACTED]";

/// Serialize a secret as [`REDACTED`].
///
/// # Errors
///
/// Propagates the serializer's error.
pub fn serialize<S: Serializer>(_secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(REDACTED)
}

/// Deserialize a secret from a plain string.
///
/// # Errors
///
/// Fails when the input is not a string.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}
