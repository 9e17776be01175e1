// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
mod common;

use std::sync::Arc;

use common::{capture_logs, three_mode_iso};
use mrcam_control::{LockedConfigStore, PropertyCycler};
use mrcam_session::{ChromaKeyConfig, DeviceSession, LockType, PropertyType};
use mrcam_sim::{Call, CallKind, SimRuntime};

fn blue() -> ChromaKeyConfig {
    ChromaKeyConfig::hsv([0.61, 0.7, 0.6], [0.08, 0.3, 0.3], [0.02, 0.1, 0.1])
}

#[test]
fn unlocked_set_config_logs_then_calls_device() {
    let runtime = three_mode_iso();
    let session = runtime.session();
    let store = LockedConfigStore::new(&session);

    let (accepted, logs) = capture_logs(|| store.set_config(1, &blue()));
    assert!(!accepted, "device rejects the unlocked write");
    let lock_msg = logs
        .find("lock required for writing")
        .expect("missing lock warning");
    let reject_msg = logs
        .find("setting chroma-key config failed")
        .expect("missing device rejection");
    assert!(lock_msg < reject_msg, "{logs}");
    assert_eq!(session.mutations(), vec![Call::SetChromaKeyConfig(1, blue())]);
}

#[test]
fn redundant_toggle_is_warned_and_silent_on_device() {
    let runtime = SimRuntime::new();
    let session = runtime.session();
    let mut store = LockedConfigStore::new(&session);

    let (changed, logs) = capture_logs(|| store.toggle_enabled(false));
    assert!(!changed);
    assert!(logs.contains("already in requested state"), "{logs}");
    assert!(session.calls().iter().all(|c| c.kind() != CallKind::SetChromaKeyEnabled));
}

#[test]
fn store_and_cycler_share_one_session() {
    let runtime = SimRuntime::new();
    let session = Arc::new(runtime.session());
    let cycler = PropertyCycler::new(Arc::clone(&session));
    let mut store = LockedConfigStore::new(Arc::clone(&session));

    assert!(store.lock());
    assert!(cycler.advance(PropertyType::IsoValue), "lock classes are independent");
    assert!(store.set_config(0, &blue()));
    assert!(store.toggle_enabled(true));
    store.unlock();

    assert_eq!(runtime.chroma_slot(0), Some(blue()));
    assert!(runtime.chroma_enabled());
    assert_eq!(session.count(CallKind::Lock), 2);
    assert_eq!(session.count(CallKind::Unlock), 2);
}

#[test]
fn second_client_is_refused_until_first_unlocks() {
    let runtime = SimRuntime::new();
    let a = runtime.session();
    let b = runtime.session();
    let mut first = LockedConfigStore::new(&a);
    let mut second = LockedConfigStore::new(&b);

    assert!(first.lock());
    let (locked, logs) = capture_logs(|| second.lock());
    assert!(!locked);
    assert!(logs.contains("could not acquire the chroma-key lock"), "{logs}");

    first.unlock();
    assert!(second.lock());
    assert_eq!(runtime.lock_holder(LockType::ChromaKey), Some(b.id()));
}

#[test]
fn dropping_locked_store_frees_lock_for_others() {
    let runtime = SimRuntime::new();
    let a = runtime.session();
    let b = runtime.session();
    {
        let mut store = LockedConfigStore::new(&a);
        assert!(store.lock());
    }
    assert!(b.lock(LockType::ChromaKey));
}

#[test]
fn config_reads_need_no_lock() {
    let runtime = SimRuntime::builder().with_chroma_slot(0, blue()).build();
    let session = runtime.session();
    let store = LockedConfigStore::new(&session);

    assert_eq!(store.config_count(), 1);
    assert_eq!(store.config(0), Some(blue()));
    assert_eq!(store.config(1), None);
    assert_eq!(store.config(0).map(|c| c.is_disabled()), Some(false));
    assert_eq!(session.count(CallKind::Lock), 0);
}
