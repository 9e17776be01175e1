// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Device session port trait defining the runtime call contract.

use core::fmt;
use std::sync::Arc;

use crate::{
    ChromaKeyConfig, DeviceError, ErrorCode, PropertyConfigType, PropertyMode, PropertyType,
    PropertyValue,
};

/// Resource class guarded by a runtime lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LockType {
    /// Camera property configuration.
    Camera,
    /// Chroma-key configuration.
    ChromaKey,
}

impl fmt::Display for LockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Camera => "camera",
            Self::ChromaKey => "chroma-key",
        })
    }
}

/// Device session port.
///
/// One implementation wraps a live runtime session; tests and the demo CLI use
/// an in-process simulation. Every call returns its plain result and records
/// a failure in the session error slot, which [`take_error`](Self::take_error)
/// reads and clears. Callers are expected to poll the slot after each call;
/// [`DeviceSessionExt::checked`] does exactly that.
///
/// # Locking
///
/// `set_*` and `reset_properties` require the matching [`LockType`] to be held
/// by this session. The runtime enforces this authoritatively and reports
/// `*_NOT_LOCKED` otherwise. Lock acquisition is a non-blocking try-acquire
/// that fails while another session (possibly another process) holds it.
pub trait DeviceSession {
    /// Try to acquire the lock for `lock`. Returns `false` if it is held elsewhere.
    fn lock(&self, lock: LockType) -> bool;
    /// Release the lock for `lock`.
    fn unlock(&self, lock: LockType);

    /// Number of modes supported by `ty`.
    fn property_mode_count(&self, ty: PropertyType) -> usize;
    /// Up to `max` supported modes of `ty`.
    fn property_modes(&self, ty: PropertyType, max: usize) -> Vec<PropertyMode>;
    /// How the manual values of `ty` are described.
    fn property_config_type(&self, ty: PropertyType) -> PropertyConfigType;
    /// Number of discrete manual values of `ty`.
    fn property_value_count(&self, ty: PropertyType) -> usize;
    /// Up to `max` discrete manual values of `ty`.
    fn property_values(&self, ty: PropertyType, max: usize) -> Vec<PropertyValue>;
    /// Current mode of `ty`.
    fn property_mode(&self, ty: PropertyType) -> PropertyMode;
    /// Set the mode of `ty`. Requires [`LockType::Camera`].
    fn set_property_mode(&self, ty: PropertyType, mode: PropertyMode);
    /// Current manual value of `ty`.
    fn property_value(&self, ty: PropertyType) -> PropertyValue;
    /// Set the manual value of `ty`. Requires [`LockType::Camera`].
    fn set_property_value(&self, ty: PropertyType, value: &PropertyValue);
    /// Reset every camera property to its default. Requires [`LockType::Camera`].
    fn reset_properties(&self);

    /// Number of chroma-key slots.
    fn chroma_key_config_count(&self) -> usize;
    /// Config stored in slot `index`.
    fn chroma_key_config(&self, index: usize) -> ChromaKeyConfig;
    /// Store `config` in slot `index`. Requires [`LockType::ChromaKey`].
    fn set_chroma_key_config(&self, index: usize, config: &ChromaKeyConfig);
    /// Turn chroma keying on or off.
    fn set_chroma_key_enabled(&self, enabled: bool);

    /// Read and clear the session error slot.
    fn take_error(&self) -> ErrorCode;

    /// Description for `code`. Defaults to the canonical runtime text.
    fn error_description(&self, code: ErrorCode) -> String {
        code.description().to_owned()
    }
}

macro_rules! forward_session {
    ($($ptr:ty),*) => {$(
        impl<S: DeviceSession + ?Sized> DeviceSession for $ptr {
            fn lock(&self, lock: LockType) -> bool {
                (**self).lock(lock)
            }
            fn unlock(&self, lock: LockType) {
                (**self).unlock(lock);
            }
            fn property_mode_count(&self, ty: PropertyType) -> usize {
                (**self).property_mode_count(ty)
            }
            fn property_modes(&self, ty: PropertyType, max: usize) -> Vec<PropertyMode> {
                (**self).property_modes(ty, max)
            }
            fn property_config_type(&self, ty: PropertyType) -> PropertyConfigType {
                (**self).property_config_type(ty)
            }
            fn property_value_count(&self, ty: PropertyType) -> usize {
                (**self).property_value_count(ty)
            }
            fn property_values(&self, ty: PropertyType, max: usize) -> Vec<PropertyValue> {
                (**self).property_values(ty, max)
            }
            fn property_mode(&self, ty: PropertyType) -> PropertyMode {
                (**self).property_mode(ty)
            }
            fn set_property_mode(&self, ty: PropertyType, mode: PropertyMode) {
                (**self).set_property_mode(ty, mode);
            }
            fn property_value(&self, ty: PropertyType) -> PropertyValue {
                (**self).property_value(ty)
            }
            fn set_property_value(&self, ty: PropertyType, value: &PropertyValue) {
                (**self).set_property_value(ty, value);
            }
            fn reset_properties(&self) {
                (**self).reset_properties();
            }
            fn chroma_key_config_count(&self) -> usize {
                (**self).chroma_key_config_count()
            }
            fn chroma_key_config(&self, index: usize) -> ChromaKeyConfig {
                (**self).chroma_key_config(index)
            }
            fn set_chroma_key_config(&self, index: usize, config: &ChromaKeyConfig) {
                (**self).set_chroma_key_config(index, config);
            }
            fn set_chroma_key_enabled(&self, enabled: bool) {
                (**self).set_chroma_key_enabled(enabled);
            }
            fn take_error(&self) -> ErrorCode {
                (**self).take_error()
            }
            fn error_description(&self, code: ErrorCode) -> String {
                (**self).error_description(code)
            }
        }
    )*};
}

forward_session!(&S, Box<S>, Arc<S>);

/// Checked-call helpers available on every [`DeviceSession`].
pub trait DeviceSessionExt: DeviceSession {
    /// Run one session call and immediately poll the error slot.
    ///
    /// Returns the call's result when the slot is clear, otherwise the pending
    /// error with the session's description of it.
    fn checked<T, F>(&self, call: F) -> Result<T, DeviceError>
    where
        F: FnOnce(&Self) -> T,
    {
        let out = call(self);
        match self.take_error() {
            code if code.is_ok() => Ok(out),
            code => Err(DeviceError::new(code, self.error_description(code))),
        }
    }
}

impl<S: DeviceSession + ?Sized> DeviceSessionExt for S {}
