//! Group key derivation using HKDF-SHA256.
//!
//! Peers that share a group seed derive the same group key and the same
//! group signing key without exchanging either.

use hkdf::Hkdf;
use sha2::Sha256;

use crate::error::{GroupLogError, Result};

/// Derive a 32-byte child key from a root key and context string.
///
/// Uses HKDF-SHA256 (RFC 5869) with the root key as IKM and
/// the context as info.
pub fn derive_key(root_key_bytes: &[u8; 32], context: &str) -> Result<[u8; 32]> {
    let hk = Hkdf::<Sha256>::new(None, root_key_bytes);
    let mut output = [0u8; 32];
    hk.expand(context.as_bytes(), &mut output)
        .map_err(|e| GroupLogError::DerivationFailed(format!("HKDF expand failed: {e}")))?;
    Ok(output)
}

/// Derivation context for the group key (the group identifier).
pub fn group_key_context() -> String {
    "grouplog/group".to_string()
}

/// Derivation context for the group signing key.
pub fn group_signing_context() -> String {
    "grouplog/group/signing".to_string()
}
