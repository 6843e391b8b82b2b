//! Gateway signatures.
//!
//! The gateway authenticates every request with
//! `base64(sha1(private_key + data + private_key))`. SHA-1 is part of the
//! gateway protocol and must stay bit-for-bit compatible.

use std::fmt::Display;

use base64::{Engine, prelude::BASE64_STANDARD};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use subtle::ConstantTimeEq;

use crate::{
    errors::{Error, Result},
    types::SerializedPayload,
};

/// A base64-encoded SHA-1 signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(pub String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against another signature in constant time.
    pub fn matches(&self, other: &str) -> bool {
        self.0.as_bytes().ct_eq(other.as_bytes()).into()
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Signature(s))
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Base64 of the SHA-1 digest of `input`.
pub fn str_to_sign(input: &str) -> Signature {
    let digest = Sha1::digest(input.as_bytes());
    Signature(BASE64_STANDARD.encode(digest))
}

/// Sign a serialized payload with the merchant's private key.
///
/// ```
/// use liqpay::{signature::sign, types::SerializedPayload};
///
/// let data = SerializedPayload(
///     r#"{"version":3,"public_key":"pub","action":"pay","amount":1,"currency":"USD","description":"x","order_id":"1"}"#
///         .to_string(),
/// );
/// let signature = sign("sandbox_key", &data).unwrap();
/// assert_eq!(signature.as_str(), "pIxN15QtpH8oQcYUl3l8VvlCXAM=");
/// ```
pub fn sign(private_key: &str, payload: &SerializedPayload) -> Result<Signature> {
    if private_key.is_empty() {
        return Err(Error::invalid_argument("private_key is empty"));
    }
    if payload.as_str().is_empty() {
        return Err(Error::invalid_argument("payload is empty"));
    }

    let mut hasher = Sha1::new();
    hasher.update(private_key.as_bytes());
    hasher.update(payload.as_str().as_bytes());
    hasher.update(private_key.as_bytes());

    Ok(Signature(BASE64_STANDARD.encode(hasher.finalize())))
}
