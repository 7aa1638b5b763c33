//! Integrity Seal
//!
//! - One fresh Ed25519 key pair per seal, from the OS CSPRNG
//! - Exactly one signature, over the attestation message
//! - `Unsealed → Sealed` is consuming; a `Sealed` value never signs again
//! - Verification is pure and needs only the public triple
//! - Public keys are accepted as hex or PEM; imported keys only verify

use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use ed25519_dalek::pkcs8::{DecodePublicKey, EncodePrivateKey};
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{info, warn};

use crate::types::{AttestationSeal, KeyRetention, MonitorError, MonitorResult, SealState};

/// A message waiting to be sealed
#[derive(Debug, Clone)]
pub struct Unsealed {
    message: Vec<u8>,
}

impl Unsealed {
    pub fn new(message: impl Into<Vec<u8>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn state(&self) -> SealState {
        SealState::Unsealed
    }

    /// Generate a key pair from the OS CSPRNG and sign
    pub fn seal(self, retention: KeyRetention) -> Sealed {
        self.seal_with_rng(&mut OsRng, retention)
    }

    /// Same as `seal` with a caller-supplied CSPRNG
    pub fn seal_with_rng<R: CryptoRng + RngCore>(self, rng: &mut R, retention: KeyRetention) -> Sealed {
        let signing_key = SigningKey::generate(rng);
        let signature = signing_key.sign(&self.message);
        let attestation = AttestationSeal::new(
            signing_key.verifying_key().to_bytes().to_vec(),
            signature.to_bytes().to_vec(),
            self.message,
        );

        info!(
            fingerprint = %attestation.fingerprint(),
            ?retention,
            "attestation sealed"
        );

        let signing_key = match retention {
            KeyRetention::Discard => None,
            KeyRetention::Retain => Some(signing_key),
        };
        Sealed {
            attestation,
            signing_key,
        }
    }
}

/// Terminal seal state
pub struct Sealed {
    attestation: AttestationSeal,
    signing_key: Option<SigningKey>,
}

impl Sealed {
    pub fn attestation(&self) -> &AttestationSeal {
        &self.attestation
    }

    pub fn into_attestation(self) -> AttestationSeal {
        self.attestation
    }

    /// Present only under `KeyRetention::Retain`
    pub fn signing_key(&self) -> Option<&SigningKey> {
        self.signing_key.as_ref()
    }

    /// PKCS#8 PEM of the retained signing key; `None` under `Discard`
    pub fn signing_key_pem(&self) -> MonitorResult<Option<String>> {
        let Some(key) = &self.signing_key else {
            return Ok(None);
        };
        let pem = key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| MonitorError::MalformedKey(e.to_string()))?;
        Ok(Some(String::from(pem.as_str())))
    }

    pub fn state(&self) -> SealState {
        SealState::Sealed
    }

    /// Verify the seal against its own key and message
    pub fn verify(&self) -> MonitorResult<()> {
        verify_attestation(&self.attestation)
    }
}

impl std::fmt::Debug for Sealed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sealed")
            .field("attestation", &self.attestation)
            .field("key_retained", &self.signing_key.is_some())
            .finish()
    }
}

/// Seal `message` with a fresh key pair
pub fn initialize(message: impl Into<Vec<u8>>, retention: KeyRetention) -> Sealed {
    Unsealed::new(message).seal(retention)
}

/// Verify an Ed25519 signature.
///
/// Wrong key, wrong message, bad signature and malformed byte lengths all
/// return `TamperedOrForged`.
pub fn verify(public_key: &[u8], signature: &[u8], message: &[u8]) -> MonitorResult<()> {
    let result = check(public_key, signature, message);
    if result.is_err() {
        warn!(
            key_len = public_key.len(),
            sig_len = signature.len(),
            "attestation failed verification"
        );
    }
    result
}

fn check(public_key: &[u8], signature: &[u8], message: &[u8]) -> MonitorResult<()> {
    let key_bytes: [u8; 32] = public_key
        .try_into()
        .map_err(|_| MonitorError::TamperedOrForged)?;
    let sig_bytes: [u8; 64] = signature
        .try_into()
        .map_err(|_| MonitorError::TamperedOrForged)?;

    let key = VerifyingKey::from_bytes(&key_bytes).map_err(|_| MonitorError::TamperedOrForged)?;
    let sig = Signature::from_bytes(&sig_bytes);

    key.verify_strict(message, &sig)
        .map_err(|_| MonitorError::TamperedOrForged)
}

pub fn verify_attestation(seal: &AttestationSeal) -> MonitorResult<()> {
    verify(&seal.public_key, &seal.signature, &seal.message)
}

/// Decode a public key given as hex or as a `PUBLIC KEY` PEM block
pub fn decode_public_key(text: &str) -> MonitorResult<Vec<u8>> {
    let text = text.trim();
    if text.starts_with("-----BEGIN") {
        let key = VerifyingKey::from_public_key_pem(text)
            .map_err(|e| MonitorError::MalformedKey(format!("invalid PEM: {e}")))?;
        Ok(key.to_bytes().to_vec())
    } else {
        hex::decode(text).map_err(|e| MonitorError::MalformedKey(format!("invalid hex: {e}")))
    }
}

/// `verify` with the public key as hex or PEM text
pub fn verify_encoded(public_key: &str, signature: &[u8], message: &[u8]) -> MonitorResult<()> {
    let key = decode_public_key(public_key)?;
    verify(&key, signature, message)
}

// =============================================================================
// TESTS
// =============================================================================
