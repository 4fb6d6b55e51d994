//! Store options — the aggregate handed to the store-opening routine.
//!
//! [`resolve_default_options`] fills in what a group store needs:
//!   - `create` is always forced to `true`
//!   - `access_controller` is derived only when the caller left it unset
//!   - `keystore` and `identity` are always replaced, even when set
//!
//! The last two rules are deliberately asymmetric. A caller may bring its
//! own access policy but never its own keystore or identity.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{GroupLogError, Result};
use crate::group::GroupDescriptor;
use crate::identity::{derive_identity, Identity};
use crate::keystore::Keystore;
use crate::policy::{build_access_policy, AccessPolicySpec};

/// Configuration consumed when opening or creating a replicated store.
///
/// `None` means "not set by the caller".
#[derive(Clone, Default)]
pub struct StoreOptions {
    /// Create the store if it does not exist.
    pub create: Option<bool>,
    /// Access policy of the store.
    pub access_controller: Option<AccessPolicySpec>,
    /// Keystore signing entries for the store.
    pub keystore: Option<Arc<dyn Keystore>>,
    /// Identity the local peer appends with.
    pub identity: Option<Identity>,
    /// Store type (e.g. `eventlog`, `keyvalue`). Passed through untouched.
    pub store_type: Option<String>,
    /// Local directory of the store. Passed through untouched.
    pub directory: Option<PathBuf>,
    /// Overwrite an existing local store. Passed through untouched.
    pub overwrite: Option<bool>,
    /// Open without contacting peers. Passed through untouched.
    pub local_only: Option<bool>,
    /// Replicate with peers. Passed through untouched.
    pub replicate: Option<bool>,
}

impl StoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create(mut self, create: bool) -> Self {
        self.create = Some(create);
        self
    }

    pub fn with_access_controller(mut self, policy: AccessPolicySpec) -> Self {
        self.access_controller = Some(policy);
        self
    }

    pub fn with_keystore(mut self, keystore: Arc<dyn Keystore>) -> Self {
        self.keystore = Some(keystore);
        self
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_store_type(mut self, store_type: impl Into<String>) -> Self {
        self.store_type = Some(store_type.into());
        self
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    pub fn with_local_only(mut self, local_only: bool) -> Self {
        self.local_only = Some(local_only);
        self
    }

    pub fn with_replicate(mut self, replicate: bool) -> Self {
        self.replicate = Some(replicate);
        self
    }
}

impl fmt::Debug for StoreOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreOptions")
            .field("create", &self.create)
            .field("access_controller", &self.access_controller)
            .field("keystore", &self.keystore.as_ref().map(|_| "<keystore>"))
            .field("identity", &self.identity)
            .field("store_type", &self.store_type)
            .field("directory", &self.directory)
            .field("overwrite", &self.overwrite)
            .field("local_only", &self.local_only)
            .field("replicate", &self.replicate)
            .finish()
    }
}

/// Fill in the defaults a group store needs.
///
/// `options` of `None` starts from an empty aggregate. On error the
/// aggregate is dropped, so a half-filled value is never returned.
pub fn resolve_default_options<G: GroupDescriptor + ?Sized>(
    group: &G,
    options: Option<StoreOptions>,
    keystore: Arc<dyn Keystore>,
) -> Result<StoreOptions> {
    let mut options = options.unwrap_or_default();
    options.create = Some(true);

    if options.access_controller.is_none() {
        options.access_controller = Some(build_access_policy(group).map_err(GroupLogError::wrap)?);
    } else {
        log::debug!("keeping caller-supplied access controller");
    }

    options.identity = Some(derive_identity(group, &keystore).map_err(GroupLogError::wrap)?);
    options.keystore = Some(keystore);

    Ok(options)
}
