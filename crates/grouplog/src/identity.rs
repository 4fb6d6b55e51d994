//! Identities — the credential a peer signs its own log entries with.
//!
//! A group identity is bound to the group's public signing key: its
//! identifier is the hex-encoded raw key, its type tag is [`IDENTITY_TYPE`],
//! and it keeps a reference to the keystore that signs on its behalf.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{GroupLogError, Result};
use crate::group::GroupDescriptor;
use crate::keystore::{CreateIdentityOptions, Keystore};

/// Type tag of identities derived for groups.
pub const IDENTITY_TYPE: &str = "grouplog";

/// Signatures proving the keystore controls the identity's key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySignatures {
    /// Signature over the identifier.
    pub id: String,
    /// Signature over the public key concatenated with the id signature.
    pub public_key: String,
}

/// A signed identity bound to a keystore.
#[derive(Clone)]
pub struct Identity {
    id: String,
    public_key: String,
    signatures: IdentitySignatures,
    identity_type: String,
    keystore: Arc<dyn Keystore>,
}

impl Identity {
    pub fn new(
        id: String,
        public_key: String,
        signatures: IdentitySignatures,
        identity_type: String,
        keystore: Arc<dyn Keystore>,
    ) -> Self {
        Self {
            id,
            public_key,
            signatures,
            identity_type,
            keystore,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn signatures(&self) -> &IdentitySignatures {
        &self.signatures
    }

    pub fn identity_type(&self) -> &str {
        &self.identity_type
    }

    /// The keystore that signs for this identity.
    pub fn keystore(&self) -> &Arc<dyn Keystore> {
        &self.keystore
    }

    /// Generate the public identity document (no keystore reference).
    pub fn to_document(&self) -> IdentityDocument {
        IdentityDocument {
            id: self.id.clone(),
            public_key: self.public_key.clone(),
            signatures: self.signatures.clone(),
            identity_type: self.identity_type.clone(),
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("public_key", &self.public_key)
            .field("signatures", &self.signatures)
            .field("identity_type", &self.identity_type)
            .finish_non_exhaustive()
    }
}

/// Public identity document (shareable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityDocument {
    pub id: String,
    pub public_key: String,
    pub signatures: IdentitySignatures,
    #[serde(rename = "type")]
    pub identity_type: String,
}

/// Derive the local peer's identity for a group.
///
/// Extracts the group's public signing key afresh, hex-encodes it, and asks
/// the keystore's identity provider to create one identity for it. Errors
/// are wrapped as unclassified and never retried.
pub fn derive_identity<G: GroupDescriptor + ?Sized>(
    group: &G,
    keystore: &Arc<dyn Keystore>,
) -> Result<Identity> {
    let signing_key = group.signing_public_raw().map_err(GroupLogError::wrap)?;
    let id = hex::encode(signing_key);

    let identity = keystore
        .identity_provider()
        .create_identity(CreateIdentityOptions {
            identity_type: IDENTITY_TYPE.to_string(),
            keystore: Arc::clone(keystore),
            id,
        })
        .map_err(GroupLogError::wrap)?;

    log::debug!("derived {} identity {}", identity.identity_type(), identity.id());
    Ok(identity)
}
