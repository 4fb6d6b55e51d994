//! Stress test: derivations run in parallel threads against shared and
//! per-thread keystores, and all results agree.

use std::sync::Arc;
use std::thread;

use grouplog::{
    build_access_policy, resolve_default_options, Group, Keystore, MemoryKeystore,
};

#[test]
fn stress_parallel_same_group_same_results() {
    let group = Arc::new(Group::from_seed(&[21u8; 32]).unwrap());
    let ks = MemoryKeystore::new();
    ks.register_group(&group).unwrap();
    let ks: Arc<dyn Keystore> = Arc::new(ks);

    let expected = build_access_policy(group.as_ref()).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let group = Arc::clone(&group);
            let ks = Arc::clone(&ks);
            thread::spawn(move || {
                (0..50)
                    .map(|_| {
                        let opts = resolve_default_options(group.as_ref(), None, ks.clone())
                            .expect("derivation should succeed");
                        (
                            opts.access_controller.unwrap(),
                            opts.identity.unwrap().to_document(),
                        )
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut identities = Vec::new();
    for handle in handles {
        for (policy, identity) in handle.join().expect("thread panicked") {
            assert_eq!(policy, expected);
            identities.push(identity);
        }
    }

    assert_eq!(identities.len(), 400);
    assert!(identities.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn stress_parallel_distinct_groups_independent() {
    let handles: Vec<_> = (0..16u8)
        .map(|i| {
            thread::spawn(move || {
                let group = Group::from_seed(&[i; 32]).unwrap();
                let ks = MemoryKeystore::new();
                ks.register_group(&group).unwrap();
                let opts = resolve_default_options(&group, None, Arc::new(ks)).unwrap();
                opts.identity.unwrap().id().to_string()
            })
        })
        .collect();

    let mut ids: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16, "each group derives its own identity");
}
