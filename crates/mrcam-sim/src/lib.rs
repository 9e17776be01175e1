// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-process simulated runtime for mrcam.
//!
//! Stands in for the closed-source runtime in tests and in the demo CLI. It
//! enforces the same call contract as the real device (lock requirements,
//! value validation, error slot) while recording every call.
//!
//! # Modules
//!
//! - [`call`] - Recorded call log entries and their discriminants
//! - [`runtime`] - Shared device state, lock broker and the runtime builder
//! - [`session`] - [`DeviceSession`](mrcam_session::DeviceSession) implementation with fault injection
#![forbid(unsafe_code)]

pub mod call;
pub mod runtime;
pub mod session;

pub use call::{Call, CallKind};
pub use runtime::{PropertySpec, SessionId, SimRuntime, SimRuntimeBuilder};
pub use session::SimSession;

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use mrcam_session::{
        ChromaKeyConfig, DeviceSession, DeviceSessionExt, ErrorCode, LockType, PropertyMode,
        PropertyType, PropertyValue,
    };

    #[test]
    fn mutation_without_lock_parks_error() {
        let runtime = SimRuntime::new();
        let session = runtime.session();

        session.set_property_mode(PropertyType::IsoValue, PropertyMode::Manual);

        assert_eq!(session.take_error(), ErrorCode::CAMERA_NOT_LOCKED);
        assert_eq!(session.take_error(), ErrorCode::NONE, "slot clears on read");
        assert_eq!(
            runtime.property_state(PropertyType::IsoValue).map(|s| s.0),
            Some(PropertyMode::Auto)
        );
    }

    #[test]
    fn lock_is_exclusive_across_sessions() {
        let runtime = SimRuntime::new();
        let a = runtime.session();
        let b = runtime.session();

        assert!(a.lock(LockType::Camera));
        assert!(!b.lock(LockType::Camera));
        assert_eq!(b.take_error(), ErrorCode::NONE, "contention is not an error");
        assert!(b.lock(LockType::ChromaKey), "lock classes are independent");

        a.unlock(LockType::Camera);
        assert!(b.lock(LockType::Camera));
        assert_eq!(runtime.lock_holder(LockType::Camera), Some(b.id()));
    }

    #[test]
    fn relocking_own_lock_reports_already_locked() {
        let runtime = SimRuntime::new();
        let session = runtime.session();
        assert!(session.lock(LockType::Camera));
        assert!(!session.lock(LockType::Camera));
        assert_eq!(session.take_error(), ErrorCode::ALREADY_LOCKED);
    }

    #[test]
    fn unlock_without_holding_reports_not_locked() {
        let runtime = SimRuntime::new();
        let session = runtime.session();
        session.unlock(LockType::ChromaKey);
        assert_eq!(session.take_error(), ErrorCode::NOT_LOCKED);
    }

    #[test]
    fn dropping_session_releases_its_locks() {
        let runtime = SimRuntime::new();
        {
            let session = runtime.session();
            assert!(session.lock(LockType::Camera));
        }
        assert_eq!(runtime.lock_holder(LockType::Camera), None);
    }

    #[test]
    fn injected_fault_skips_the_call_once() {
        let runtime = SimRuntime::new();
        let session = runtime.session();
        assert!(session.lock(LockType::Camera));

        session.fail_next(CallKind::SetPropertyValue, ErrorCode::OPERATION_FAILED);
        let err = session
            .checked(|s| s.set_property_value(PropertyType::IsoValue, &PropertyValue::Int(400)))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OPERATION_FAILED);
        assert_eq!(
            runtime.property_state(PropertyType::IsoValue).and_then(|s| s.1),
            Some(PropertyValue::Int(100))
        );

        session
            .checked(|s| s.set_property_value(PropertyType::IsoValue, &PropertyValue::Int(400)))
            .unwrap();
        assert_eq!(
            runtime.property_state(PropertyType::IsoValue).and_then(|s| s.1),
            Some(PropertyValue::Int(400))
        );
    }

    #[test]
    fn rejects_values_outside_the_list() {
        let runtime = SimRuntime::new();
        let session = runtime.session();
        assert!(session.lock(LockType::Camera));

        session.set_property_value(PropertyType::IsoValue, &PropertyValue::Double(100.0));
        assert_eq!(session.take_error(), ErrorCode::CAMERA_INVALID_PROPERTY_VALUE);

        session.set_property_mode(PropertyType::FlickerCompensation, PropertyMode::Auto);
        assert_eq!(session.take_error(), ErrorCode::CAMERA_INVALID_PROPERTY_MODE);
    }

    #[test]
    fn unsupported_property_enumerates_empty() {
        let runtime = SimRuntime::builder().build();
        let session = runtime.session();

        assert_eq!(session.property_mode_count(PropertyType::Sharpness), 0);
        assert_eq!(session.take_error(), ErrorCode::NONE);
        assert!(session.property_values(PropertyType::Sharpness, 8).is_empty());

        let _ = session.property_mode(PropertyType::Sharpness);
        assert_eq!(session.take_error(), ErrorCode::CAMERA_INVALID_PROPERTY_TYPE);
    }

    #[test]
    fn reset_restores_defaults() {
        let runtime = SimRuntime::new();
        let session = runtime.session();
        assert!(session.lock(LockType::Camera));
        session.set_property_value(PropertyType::WhiteBalance, &PropertyValue::Int(6000));
        session.set_property_mode(PropertyType::WhiteBalance, PropertyMode::Manual);
        session.reset_properties();
        assert_eq!(session.take_error(), ErrorCode::NONE);
        assert_eq!(
            runtime.property_state(PropertyType::WhiteBalance),
            Some((PropertyMode::Auto, Some(PropertyValue::Int(2000))))
        );
    }

    #[test]
    fn chroma_slots_need_lock_and_bounds() {
        let runtime = SimRuntime::new();
        let session = runtime.session();
        let cfg = ChromaKeyConfig::hsv([0.33, 0.6, 0.6], [0.1, 0.3, 0.3], [0.02, 0.1, 0.1]);

        session.set_chroma_key_config(0, &cfg);
        assert_eq!(session.take_error(), ErrorCode::CHROMA_KEY_NOT_LOCKED);

        assert!(session.lock(LockType::ChromaKey));
        session.set_chroma_key_config(9, &cfg);
        assert_eq!(session.take_error(), ErrorCode::INDEX_OUT_OF_BOUNDS);

        session.set_chroma_key_config(1, &cfg);
        assert_eq!(session.take_error(), ErrorCode::NONE);
        assert_eq!(session.chroma_key_config(1), cfg);
    }

    #[test]
    fn call_log_tracks_mutations() {
        let runtime = SimRuntime::new();
        let session = runtime.session();
        assert!(session.lock(LockType::Camera));
        let _ = session.property_mode(PropertyType::IsoValue);
        session.set_property_mode(PropertyType::IsoValue, PropertyMode::Manual);
        session.unlock(LockType::Camera);

        assert_eq!(session.calls().len(), 4);
        assert_eq!(
            session.mutations(),
            vec![Call::SetPropertyMode(
                PropertyType::IsoValue,
                PropertyMode::Manual
            )]
        );
        assert_eq!(session.count(CallKind::Unlock), 1);

        session.clear_calls();
        assert!(session.calls().is_empty());
    }
}
