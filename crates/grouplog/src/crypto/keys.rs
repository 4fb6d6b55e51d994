//! Ed25519 key pairs and raw public-key handling.
//!
//! Group keys travel between peers as raw 32-byte public keys. Those bytes
//! are only trusted after [`public_key_from_bytes`] has validated them.

use ed25519_dalek::{SigningKey, VerifyingKey};
use zeroize::Zeroize;

use crate::error::{GroupLogError, Result};

/// Length in bytes of a raw Ed25519 public key.
pub const PUBLIC_KEY_LENGTH: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;

/// An Ed25519 key pair for signing operations.
///
/// The signing key is zeroized on drop to prevent private key leakage.
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl Ed25519KeyPair {
    /// Generate a new random Ed25519 key pair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        Self::from_signing_key(signing_key)
    }

    /// Reconstruct a key pair from raw signing key bytes.
    pub fn from_signing_key_bytes(bytes: &[u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(bytes))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Return a reference to the signing key.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// Return the verifying (public) key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Return the verifying key bytes.
    pub fn verifying_key_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// Return the verifying key as lowercase hex.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.verifying_key_bytes())
    }
}

impl Clone for Ed25519KeyPair {
    fn clone(&self) -> Self {
        let mut bytes = self.signing_key.to_bytes();
        let copy = Self::from_signing_key_bytes(&bytes);
        bytes.zeroize();
        copy
    }
}

impl Drop for Ed25519KeyPair {
    fn drop(&mut self) {
        // SigningKey stores bytes internally; zeroize via conversion
        let mut bytes = self.signing_key.to_bytes();
        bytes.zeroize();
    }
}

/// Validate raw public-key bytes and return the verifying key.
///
/// Fails when the slice is not exactly 32 bytes or is not a valid
/// compressed Edwards point.
pub fn public_key_from_bytes(bytes: &[u8]) -> Result<VerifyingKey> {
    let array: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
        GroupLogError::InvalidKey(format!(
            "public key must be {PUBLIC_KEY_LENGTH} bytes, got {}",
            bytes.len()
        ))
    })?;
    VerifyingKey::from_bytes(&array)
        .map_err(|e| GroupLogError::InvalidKey(format!("invalid verifying key: {e}")))
}

/// Decode a hex public key and validate it.
pub fn public_key_from_hex(encoded: &str) -> Result<VerifyingKey> {
    let bytes = hex::decode(encoded)
        .map_err(|e| GroupLogError::InvalidKey(format!("invalid hex public key: {e}")))?;
    public_key_from_bytes(&bytes)
}
