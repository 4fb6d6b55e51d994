//! Integration test: substituting the signing backend.
//!
//! Derivation only depends on the `Keystore` and `IdentityProvider` traits,
//! so a stub backend can stand in for the real keystore.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use grouplog::{
    derive_identity, resolve_default_options, CreateIdentityOptions, Group, GroupDescriptor,
    GroupLogError, Identity, IdentityProvider, IdentitySignatures, Keystore, StoreOptions,
    IDENTITY_TYPE,
};

/// Records every creation request and signs nothing.
#[derive(Default)]
struct RecordingKeystore {
    calls: AtomicUsize,
    fail: bool,
}

impl Keystore for RecordingKeystore {
    fn identity_provider(&self) -> &dyn IdentityProvider {
        self
    }
}

impl IdentityProvider for RecordingKeystore {
    fn create_identity(&self, options: CreateIdentityOptions) -> grouplog::Result<Identity> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GroupLogError::IdentityCreation("backend offline".into()));
        }
        Ok(Identity::new(
            options.id.clone(),
            options.id,
            IdentitySignatures {
                id: "stub".into(),
                public_key: "stub".into(),
            },
            options.identity_type,
            options.keystore,
        ))
    }
}

#[test]
fn stub_receives_type_tag_and_hex_id() {
    let group = Group::generate();
    let stub = Arc::new(RecordingKeystore::default());
    let ks: Arc<dyn Keystore> = stub.clone();

    let identity = derive_identity(&group, &ks).expect("stub never fails");
    assert_eq!(identity.identity_type(), IDENTITY_TYPE);
    assert_eq!(identity.id(), hex::encode(group.signing_public_raw().unwrap()));
    assert!(Arc::ptr_eq(identity.keystore(), &ks));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn stub_called_once_per_resolution() {
    let group = Group::generate();
    let stub = Arc::new(RecordingKeystore::default());

    for _ in 0..3 {
        resolve_default_options(&group, None, stub.clone()).unwrap();
    }
    assert_eq!(stub.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn stub_failure_is_wrapped_and_aborts() {
    let group = Group::generate();
    let stub = Arc::new(RecordingKeystore {
        calls: AtomicUsize::new(0),
        fail: true,
    });

    let err = resolve_default_options(&group, Some(StoreOptions::new()), stub.clone())
        .expect_err("identity creation failure must abort");
    assert!(err.is_unclassified());
    assert!(matches!(
        err.root_cause(),
        GroupLogError::IdentityCreation(msg) if msg == "backend offline"
    ));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1, "no internal retry");
}

#[test]
fn stub_not_called_when_key_is_malformed() {
    let good = Group::generate();
    let bad = Group::from_public_parts(
        hex::decode(good.to_document().unwrap().group_id).unwrap(),
        vec![0u8; 16],
    );
    let stub = Arc::new(RecordingKeystore::default());

    assert!(resolve_default_options(&bad, None, stub.clone()).is_err());
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}
