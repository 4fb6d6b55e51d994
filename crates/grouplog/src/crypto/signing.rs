//! Ed25519 signing and verification with hex-encoded signatures.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use crate::error::{GroupLogError, Result};

/// Sign a message with an Ed25519 signing key.
pub fn sign(signing_key: &SigningKey, message: &[u8]) -> Signature {
    signing_key.sign(message)
}

/// Verify an Ed25519 signature against a public key and message.
pub fn verify(verifying_key: &VerifyingKey, message: &[u8], signature: &Signature) -> Result<()> {
    verifying_key
        .verify(message, signature)
        .map_err(|_| GroupLogError::SignatureInvalid)
}

/// Sign a message and return the signature as lowercase hex.
pub fn sign_to_hex(signing_key: &SigningKey, message: &[u8]) -> String {
    hex::encode(sign(signing_key, message).to_bytes())
}

/// Verify a hex-encoded signature.
pub fn verify_from_hex(
    verifying_key: &VerifyingKey,
    message: &[u8],
    signature_hex: &str,
) -> Result<()> {
    let sig_bytes = hex::decode(signature_hex)
        .map_err(|e| GroupLogError::InvalidKey(format!("invalid hex signature: {e}")))?;

    let sig_array: [u8; 64] = sig_bytes
        .try_into()
        .map_err(|_| GroupLogError::InvalidKey("signature must be 64 bytes".into()))?;

    verify(verifying_key, message, &Signature::from_bytes(&sig_array))
}
