//! Integration test: full end-to-end derivation workflow.
//!
//! Tests the complete path:
//! 1. Two peers derive the same group from a shared seed
//! 2. Each peer derives the group's access policy
//! 3. Each peer derives its identity through its own keystore
//! 4. Each peer resolves default store options

use std::sync::Arc;

use grouplog::crypto::keys::public_key_from_hex;
use grouplog::crypto::random::random_seed;
use grouplog::crypto::signing::verify_from_hex;
use grouplog::{
    build_access_policy, derive_identity, resolve_default_options, Group, GroupDescriptor,
    Keystore, MemoryKeystore, GROUP_ID_KEY, IDENTITY_TYPE, WRITE_PERMISSION,
};

fn peer(seed: &[u8; 32]) -> (Group, Arc<dyn Keystore>) {
    let group = Group::from_seed(seed).expect("seed derivation should succeed");
    let ks = MemoryKeystore::new();
    ks.register_group(&group)
        .expect("group carries its private signing key");
    (group, Arc::new(ks))
}

#[test]
fn full_workflow_two_peers_agree() {
    // ── Step 1: Shared seed, two peers ──────────────────────────────────
    let seed = random_seed();
    let (alice_group, alice_ks) = peer(&seed);
    let (bob_group, bob_ks) = peer(&seed);

    assert_eq!(
        alice_group.group_id_string().unwrap(),
        bob_group.group_id_string().unwrap()
    );

    // ── Step 2: Access policy ───────────────────────────────────────────
    let alice_policy = build_access_policy(&alice_group).expect("policy should build");
    let bob_policy = build_access_policy(&bob_group).expect("policy should build");
    assert_eq!(
        alice_policy.to_json_bytes().unwrap(),
        bob_policy.to_json_bytes().unwrap(),
        "Peers sharing a group must derive byte-identical policies"
    );

    let signing_hex = hex::encode(alice_group.signing_public_raw().unwrap());
    assert_eq!(alice_policy.principals(WRITE_PERMISSION), [signing_hex.clone()]);
    assert_eq!(
        alice_policy.principals(GROUP_ID_KEY),
        [alice_group.group_id_string().unwrap()]
    );

    // ── Step 3: Identity ────────────────────────────────────────────────
    let alice_identity = derive_identity(&alice_group, &alice_ks).expect("identity should derive");
    let bob_identity = derive_identity(&bob_group, &bob_ks).expect("identity should derive");
    assert_eq!(alice_identity.id(), signing_hex);
    assert_eq!(alice_identity.identity_type(), IDENTITY_TYPE);
    assert_eq!(alice_identity.to_document(), bob_identity.to_document());

    // The identity signature checks out against the policy's writer key
    let writer = public_key_from_hex(&alice_policy.principals(WRITE_PERMISSION)[0]).unwrap();
    assert!(verify_from_hex(
        &writer,
        alice_identity.id().as_bytes(),
        &alice_identity.signatures().id
    )
    .is_ok());

    // ── Step 4: Store options ───────────────────────────────────────────
    let opts = resolve_default_options(&alice_group, None, alice_ks.clone())
        .expect("options should resolve");
    assert_eq!(opts.create, Some(true));
    assert_eq!(opts.access_controller.as_ref(), Some(&alice_policy));
    assert!(Arc::ptr_eq(opts.keystore.as_ref().unwrap(), &alice_ks));
    assert_eq!(
        opts.identity.as_ref().unwrap().to_document(),
        alice_identity.to_document()
    );
}

#[test]
fn full_workflow_verify_only_member_builds_same_policy() {
    let (group, _) = peer(&[11u8; 32]);
    let member = Group::from_document(&group.to_document().unwrap()).unwrap();

    assert_eq!(
        build_access_policy(&group).unwrap(),
        build_access_policy(&member).unwrap()
    );

    // A member without the private half cannot sign an identity
    let empty: Arc<dyn Keystore> = Arc::new(MemoryKeystore::new());
    let err = resolve_default_options(&member, None, empty).unwrap_err();
    assert!(err.is_unclassified());
}

#[test]
fn full_workflow_options_rerun_is_idempotent() {
    let (group, ks) = peer(&[12u8; 32]);
    let first = resolve_default_options(&group, None, ks.clone()).unwrap();
    let second = resolve_default_options(&group, Some(first.clone()), ks.clone()).unwrap();

    assert_eq!(first.create, second.create);
    assert_eq!(first.access_controller, second.access_controller);
    assert_eq!(
        first.identity.unwrap().to_document(),
        second.identity.unwrap().to_document()
    );
}
