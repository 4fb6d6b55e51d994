//! Error types for grouplog.
//!
//! Every derivation failure is a configuration error: the group value or the
//! keystore is unusable, and retrying will not help. Public entry points wrap
//! the concrete cause in [`GroupLogError::Unclassified`] so callers branch on
//! success or failure only, while the cause chain stays available for logging.
//! Private key material is never included in error messages.

/// Error types covering group derivation and keystore operations.
#[derive(Debug, thiserror::Error)]
pub enum GroupLogError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Signature verification failed")]
    SignatureInvalid,

    #[error("Invalid group id: {0}")]
    InvalidGroupId(String),

    #[error("Key not found in keystore: {0}")]
    KeyNotFound(String),

    #[error("Identity creation failed: {0}")]
    IdentityCreation(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Unclassified error: {0}")]
    Unclassified(#[source] Box<GroupLogError>),
}

impl GroupLogError {
    /// Wrap this error with the generic unclassified marker.
    pub fn wrap(self) -> Self {
        GroupLogError::Unclassified(Box::new(self))
    }

    /// Return the innermost error, skipping any unclassified wrappers.
    pub fn root_cause(&self) -> &GroupLogError {
        let mut current = self;
        while let GroupLogError::Unclassified(inner) = current {
            current = inner;
        }
        current
    }

    /// Whether this error carries the unclassified marker.
    pub fn is_unclassified(&self) -> bool {
        matches!(self, GroupLogError::Unclassified(_))
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, GroupLogError>;
