//! Access policies — who may append entries to a group's log.
//!
//! The default policy for a group is of kind `simple` and carries exactly
//! two entries:
//!   - `write` — the hex-encoded public signing key of the group
//!   - `group_id` — the group identifier, scoping the policy to one group
//!
//! Every peer holding the same group derives byte-identical policies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{GroupLogError, Result};
use crate::group::GroupDescriptor;

/// Policy kind understood by the store's simple access controller.
pub const SIMPLE_POLICY_KIND: &str = "simple";

/// Permission name for appending entries.
pub const WRITE_PERMISSION: &str = "write";

/// Reserved attribute binding a policy to a single group.
pub const GROUP_ID_KEY: &str = "group_id";

/// A declarative access-control specification.
///
/// Maps a permission name to the principals holding it. Treated as a value:
/// there are no mutating methods once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicySpec {
    #[serde(rename = "type")]
    kind: String,
    access: BTreeMap<String, Vec<String>>,
}

impl AccessPolicySpec {
    /// Create a policy of the given kind from a permission map.
    pub fn new(kind: impl Into<String>, access: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            kind: kind.into(),
            access,
        }
    }

    /// The policy kind (e.g. `simple`).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The full permission map.
    pub fn access(&self) -> &BTreeMap<String, Vec<String>> {
        &self.access
    }

    /// Principals granted a permission. Empty if the permission is absent.
    pub fn principals(&self, permission: &str) -> &[String] {
        self.access
            .get(permission)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The group this policy is scoped to, if any.
    pub fn group_id(&self) -> Option<&str> {
        self.principals(GROUP_ID_KEY).first().map(String::as_str)
    }

    /// Serialize to canonical JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| GroupLogError::SerializationError(e.to_string()))
    }

    /// Parse a policy from JSON.
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| GroupLogError::SerializationError(e.to_string()))
    }
}

/// Build the default access policy for a group.
///
/// Grants `write` to the group's public signing key only, and scopes the
/// policy to the group identifier. Errors are wrapped as unclassified.
pub fn build_access_policy<G: GroupDescriptor + ?Sized>(group: &G) -> Result<AccessPolicySpec> {
    let group_id = group.group_id_string().map_err(GroupLogError::wrap)?;
    let signing_key = group.signing_public_raw().map_err(GroupLogError::wrap)?;

    let mut access = BTreeMap::new();
    access.insert(WRITE_PERMISSION.to_string(), vec![hex::encode(signing_key)]);
    access.insert(GROUP_ID_KEY.to_string(), vec![group_id]);

    let policy = AccessPolicySpec::new(SIMPLE_POLICY_KIND, access);
    log::debug!(
        "built {} access policy for group {}",
        policy.kind(),
        policy.group_id().unwrap_or_default()
    );
    Ok(policy)
}
