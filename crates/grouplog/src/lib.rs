//! grouplog — store configuration for peer-to-peer replicated group logs.
//!
//! Derives, from a group's signing key and identifier, the two inputs a
//! store-creation routine cannot supply itself: a write-access policy and
//! the signed identity the local peer appends with. Every peer holding the
//! same group computes the same policy.

pub mod crypto;
pub mod error;
pub mod group;
pub mod identity;
pub mod keystore;
pub mod options;
pub mod policy;

// Re-export primary types
pub use error::{GroupLogError, Result};
pub use group::{Group, GroupDescriptor, GroupDocument, GroupSigningKey};
pub use identity::{
    derive_identity, Identity, IdentityDocument, IdentitySignatures, IDENTITY_TYPE,
};
pub use keystore::{CreateIdentityOptions, IdentityProvider, Keystore, MemoryKeystore};
pub use options::{resolve_default_options, StoreOptions};
pub use policy::{
    build_access_policy, AccessPolicySpec, GROUP_ID_KEY, SIMPLE_POLICY_KIND, WRITE_PERMISSION,
};
