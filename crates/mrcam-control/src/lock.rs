// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scoped acquisition of runtime resource locks.

use mrcam_session::{DeviceError, DeviceSession, DeviceSessionExt, LockType};
use tracing::{debug, error, warn};

use crate::ControlError;

/// Try once to take `kind`. Never retries.
///
/// The return value of `lock` is authoritative: if the device also reported an
/// error but granted the lock, the lock is treated as held so it gets released.
pub(crate) fn try_acquire<S>(session: &S, kind: LockType) -> Result<(), ControlError>
where
    S: DeviceSession + ?Sized,
{
    let acquired = session.lock(kind);
    let code = session.take_error();
    match (acquired, code.is_ok()) {
        (true, true) => Ok(()),
        (true, false) => {
            warn!(lock = %kind, %code, "lock granted with a pending device error");
            Ok(())
        }
        (false, true) => Err(ControlError::LockDenied(kind)),
        (false, false) => Err(DeviceError::new(code, session.error_description(code)).into()),
    }
}

/// Release `kind`, reporting any device error.
pub(crate) fn release<S>(session: &S, kind: LockType) -> Result<(), ControlError>
where
    S: DeviceSession + ?Sized,
{
    session.checked(|s| s.unlock(kind))?;
    Ok(())
}

/// A held runtime lock, released when dropped.
///
/// Acquisition is a single non-blocking attempt. A guard exists only if the
/// lock was granted, so a denied acquisition can never be followed by a
/// release, and every exit path after a successful one releases exactly once.
///
/// # Example
///
/// ```
/// use mrcam_control::ResourceLock;
/// use mrcam_session::{DeviceSession, LockType, PropertyMode, PropertyType};
/// use mrcam_sim::SimRuntime;
///
/// let runtime = SimRuntime::new();
/// let session = runtime.session();
/// {
///     let _guard = ResourceLock::acquire(&session, LockType::Camera).unwrap();
///     session.set_property_mode(PropertyType::IsoValue, PropertyMode::Manual);
/// }
/// assert_eq!(runtime.lock_holder(LockType::Camera), None);
/// ```
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct ResourceLock<'s, S: DeviceSession + ?Sized> {
    session: &'s S,
    kind: LockType,
}

impl<'s, S: DeviceSession + ?Sized> ResourceLock<'s, S> {
    /// Try to take `kind` on `session`.
    pub fn acquire(session: &'s S, kind: LockType) -> Result<Self, ControlError> {
        try_acquire(session, kind)?;
        debug!(lock = %kind, "lock acquired");
        Ok(Self { session, kind })
    }

    /// Lock class held by this guard.
    pub fn kind(&self) -> LockType {
        self.kind
    }
}

impl<S: DeviceSession + ?Sized> Drop for ResourceLock<'_, S> {
    fn drop(&mut self) {
        match release(self.session, self.kind) {
            Ok(()) => debug!(lock = %self.kind, "lock released"),
            Err(err) => error!(lock = %self.kind, %err, "releasing lock failed"),
        }
    }
}
