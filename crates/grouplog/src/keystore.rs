//! Keystore capabilities and an in-memory signing backend.
//!
//! Derivation code only sees the [`Keystore`] and [`IdentityProvider`]
//! traits, so any signing backend can be plugged in. [`MemoryKeystore`] is
//! the reference backend: it holds Ed25519 keys indexed by their hex public
//! key and signs identities with them.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::crypto::keys::Ed25519KeyPair;
use crate::crypto::signing;
use crate::error::{GroupLogError, Result};
use crate::group::Group;
use crate::identity::{Identity, IdentitySignatures};

/// A holder of signing keys exposing identity creation.
pub trait Keystore: Send + Sync {
    /// The identity provider backed by this keystore.
    fn identity_provider(&self) -> &dyn IdentityProvider;
}

/// Creates signed identities.
pub trait IdentityProvider: Send + Sync {
    /// Create an identity for `options.id`, signed through `options.keystore`.
    fn create_identity(&self, options: CreateIdentityOptions) -> Result<Identity>;
}

/// Arguments for [`IdentityProvider::create_identity`].
#[derive(Clone)]
pub struct CreateIdentityOptions {
    /// Identity scheme type tag.
    pub identity_type: String,
    /// Keystore acting as the signing backend of the new identity.
    pub keystore: Arc<dyn Keystore>,
    /// Identifier of the identity (hex public key).
    pub id: String,
}

impl fmt::Debug for CreateIdentityOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateIdentityOptions")
            .field("identity_type", &self.identity_type)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// In-memory keystore of Ed25519 key pairs, keyed by hex public key.
#[derive(Default)]
pub struct MemoryKeystore {
    keys: RwLock<HashMap<String, Ed25519KeyPair>>,
}

impl MemoryKeystore {
    /// Create an empty keystore.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a key pair. Returns the hex public key it is indexed under.
    pub fn insert_key(&self, key_pair: Ed25519KeyPair) -> String {
        let id = key_pair.public_key_hex();
        self.write_keys().insert(id.clone(), key_pair);
        id
    }

    /// Store the private signing half of a group.
    pub fn register_group(&self, group: &Group) -> Result<String> {
        let key_pair = group.signing_key().key_pair().ok_or_else(|| {
            GroupLogError::KeyNotFound("group has no private signing key".into())
        })?;
        Ok(self.insert_key(key_pair.clone()))
    }

    /// Whether a key is stored under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.read_keys().contains_key(id)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.read_keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_keys(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Ed25519KeyPair>> {
        // A poisoned lock still holds a consistent map; key inserts are atomic.
        self.keys.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_keys(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Ed25519KeyPair>> {
        self.keys.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl fmt::Debug for MemoryKeystore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryKeystore")
            .field("keys", &self.len())
            .finish()
    }
}

impl Keystore for MemoryKeystore {
    fn identity_provider(&self) -> &dyn IdentityProvider {
        self
    }
}

impl IdentityProvider for MemoryKeystore {
    fn create_identity(&self, options: CreateIdentityOptions) -> Result<Identity> {
        let keys = self.read_keys();
        let key_pair = keys
            .get(&options.id)
            .ok_or_else(|| GroupLogError::KeyNotFound(options.id.clone()))?;

        let public_key = key_pair.public_key_hex();
        let id_signature = signing::sign_to_hex(key_pair.signing_key(), options.id.as_bytes());
        let public_key_signature = signing::sign_to_hex(
            key_pair.signing_key(),
            format!("{public_key}{id_signature}").as_bytes(),
        );

        log::trace!("signed {} identity {}", options.identity_type, options.id);

        Ok(Identity::new(
            options.id,
            public_key,
            IdentitySignatures {
                id: id_signature,
                public_key: public_key_signature,
            },
            options.identity_type,
            options.keystore,
        ))
    }
}
