//! Attestation seal types
//!
//! - Ed25519 signature over a fixed message
//! - Created once, immutable afterwards
//! - Byte fields travel as lowercase hex

use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use ed25519_dalek::pkcs8::EncodePublicKey;
use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::{MonitorError, MonitorResult};
use crate::SEAL_ALGORITHM;

/// Public half of a seal: everything a verifier needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationSeal {
    /// Ed25519 verifying key (32 bytes)
    #[serde(with = "hex")]
    pub public_key: Vec<u8>,
    /// Ed25519 signature (64 bytes)
    #[serde(with = "hex")]
    pub signature: Vec<u8>,
    /// The message that was signed
    #[serde(with = "hex")]
    pub message: Vec<u8>,
    /// Always "Ed25519"
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

fn default_algorithm() -> String {
    SEAL_ALGORITHM.to_string()
}

impl AttestationSeal {
    pub fn new(public_key: Vec<u8>, signature: Vec<u8>, message: Vec<u8>) -> Self {
        Self {
            public_key,
            signature,
            message,
            algorithm: default_algorithm(),
        }
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(&self.public_key)
    }

    pub fn signature_hex(&self) -> String {
        hex::encode(&self.signature)
    }

    /// Public key as an SPKI `PUBLIC KEY` PEM block
    pub fn public_key_pem(&self) -> MonitorResult<String> {
        let bytes: [u8; 32] = self.public_key.as_slice().try_into().map_err(|_| {
            MonitorError::MalformedKey(format!("expected 32 bytes, got {}", self.public_key.len()))
        })?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| MonitorError::MalformedKey(e.to_string()))?;
        key.to_public_key_pem(LineEnding::LF)
            .map_err(|e| MonitorError::MalformedKey(e.to_string()))
    }

    /// Message as text (lossy for non-UTF-8 bytes)
    pub fn message_text(&self) -> String {
        String::from_utf8_lossy(&self.message).into_owned()
    }

    /// Short SHA-256 fingerprint of the public key, for display and logs only.
    /// Not an integrity check.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(&self.public_key);
        hex::encode(&digest[..8])
    }
}

/// What happens to the signing key after the one signature is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyRetention {
    /// Drop the signing key immediately after signing
    #[default]
    Discard,
    /// Keep it inside the `Sealed` value, owned by the caller
    Retain,
}

/// Lifecycle of a seal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SealState {
    Unsealed,
    /// Terminal
    Sealed,
}

impl std::fmt::Display for SealState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SealState::Unsealed => "UNSEALED",
            SealState::Sealed => "SEALED",
        };
        write!(f, "{}", name)
    }
}
