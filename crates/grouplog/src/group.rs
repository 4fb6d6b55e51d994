//! Groups — the logical unit of a replicated store.
//!
//! A group is identified by its group public key and secured by a separate
//! signing key pair. Members that only hold the public halves can still
//! derive the group's access policy; only members holding the private
//! signing half can register it in a keystore.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::derivation;
use crate::crypto::keys::{self, Ed25519KeyPair};
use crate::error::{GroupLogError, Result};

/// What the derivation functions need to read from a group.
///
/// Both accessors are fallible: a group assembled from untrusted bytes may
/// carry malformed key material, which only surfaces when it is read.
pub trait GroupDescriptor {
    /// Render the group identifier as a string.
    fn group_id_string(&self) -> Result<String>;

    /// Extract the raw bytes of the group's public signing key.
    fn signing_public_raw(&self) -> Result<Vec<u8>>;
}

/// The group's signing key pair.
///
/// The private half is optional: a member that received only the public
/// parts holds a verify-only key.
#[derive(Clone)]
pub struct GroupSigningKey {
    public: Vec<u8>,
    private: Option<Ed25519KeyPair>,
}

impl GroupSigningKey {
    /// Wrap a full key pair.
    pub fn from_key_pair(key_pair: Ed25519KeyPair) -> Self {
        Self {
            public: key_pair.verifying_key_bytes().to_vec(),
            private: Some(key_pair),
        }
    }

    /// A verify-only key from raw public bytes. The bytes are not validated
    /// until they are extracted.
    pub fn from_public_bytes(public: Vec<u8>) -> Self {
        Self {
            public,
            private: None,
        }
    }

    /// Extract the validated raw public-key bytes.
    pub fn public_raw(&self) -> Result<Vec<u8>> {
        let key = keys::public_key_from_bytes(&self.public)?;
        Ok(key.to_bytes().to_vec())
    }

    /// Return the private half, if this member holds it.
    pub fn key_pair(&self) -> Option<&Ed25519KeyPair> {
        self.private.as_ref()
    }
}

impl fmt::Debug for GroupSigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupSigningKey")
            .field("public", &hex::encode(&self.public))
            .field("has_private", &self.private.is_some())
            .finish()
    }
}

/// A logical shared store: group public key plus signing key pair.
#[derive(Debug, Clone)]
pub struct Group {
    public_key: Vec<u8>,
    signing_key: GroupSigningKey,
}

impl Group {
    /// Create a group with fresh random keys.
    pub fn generate() -> Self {
        let group_key = Ed25519KeyPair::generate();
        Self {
            public_key: group_key.verifying_key_bytes().to_vec(),
            signing_key: GroupSigningKey::from_key_pair(Ed25519KeyPair::generate()),
        }
    }

    /// Derive a group from a shared 32-byte seed.
    ///
    /// Every peer holding the same seed derives the same group key and
    /// the same signing key pair.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self> {
        let group_secret = derivation::derive_key(seed, &derivation::group_key_context())?;
        let signing_secret = derivation::derive_key(seed, &derivation::group_signing_context())?;

        let group_key = Ed25519KeyPair::from_signing_key_bytes(&group_secret);
        let signing_key = Ed25519KeyPair::from_signing_key_bytes(&signing_secret);

        log::trace!("derived group {} from seed", group_key.public_key_hex());

        Ok(Self {
            public_key: group_key.verifying_key_bytes().to_vec(),
            signing_key: GroupSigningKey::from_key_pair(signing_key),
        })
    }

    /// Assemble a verify-only group from raw public parts.
    pub fn from_public_parts(public_key: Vec<u8>, signing_public_key: Vec<u8>) -> Self {
        Self {
            public_key,
            signing_key: GroupSigningKey::from_public_bytes(signing_public_key),
        }
    }

    /// Assemble a verify-only group from a public document.
    pub fn from_document(doc: &GroupDocument) -> Result<Self> {
        let public_key = hex::decode(&doc.group_id)
            .map_err(|e| GroupLogError::InvalidGroupId(format!("invalid hex group id: {e}")))?;
        let signing_public_key = hex::decode(&doc.signing_public_key)
            .map_err(|e| GroupLogError::InvalidKey(format!("invalid hex signing key: {e}")))?;
        Ok(Self::from_public_parts(public_key, signing_public_key))
    }

    /// Return the group's signing key.
    pub fn signing_key(&self) -> &GroupSigningKey {
        &self.signing_key
    }

    /// Generate the public group document.
    pub fn to_document(&self) -> Result<GroupDocument> {
        Ok(GroupDocument {
            group_id: self.group_id_string()?,
            signing_public_key: hex::encode(self.signing_public_raw()?),
        })
    }
}

impl GroupDescriptor for Group {
    fn group_id_string(&self) -> Result<String> {
        let key = keys::public_key_from_bytes(&self.public_key).map_err(|e| match e {
            GroupLogError::InvalidKey(msg) => GroupLogError::InvalidGroupId(msg),
            other => other,
        })?;
        Ok(hex::encode(key.to_bytes()))
    }

    fn signing_public_raw(&self) -> Result<Vec<u8>> {
        self.signing_key.public_raw()
    }
}

/// Public group document (shareable, does not contain private keys).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDocument {
    /// Hex-encoded group public key.
    pub group_id: String,
    /// Hex-encoded public signing key.
    pub signing_public_key: String,
}
