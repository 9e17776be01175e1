// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy for control operations.

use mrcam_session::{DeviceError, LockType, PropertyConfigType, PropertyMode, PropertyType, PropertyValue};
use thiserror::Error;

/// Why a control operation stopped.
///
/// Public operations log these at the point of failure and report only a
/// coarse success flag. The type is exposed for [`ResourceLock`](crate::ResourceLock)
/// users composing their own mutation sequences.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    /// Another client holds the lock.
    #[error("could not acquire the {0} lock; another client holds it")]
    LockDenied(LockType),
    /// The requested mode is not in the property's supported modes.
    #[error("{mode} mode not supported for {property}")]
    UnsupportedMode {
        /// Property queried.
        property: PropertyType,
        /// Mode requested.
        mode: PropertyMode,
    },
    /// The property's manual values are not a discrete list.
    #[error("{property} reports {config_type} values; expected a discrete list")]
    UnsupportedConfigType {
        /// Property queried.
        property: PropertyType,
        /// Config type reported by the device.
        config_type: PropertyConfigType,
    },
    /// The device's current value is missing from its own value list.
    #[error("current value {value} of {property} is not in the supported value list")]
    ValueNotFound {
        /// Property queried.
        property: PropertyType,
        /// Value reported as current.
        value: PropertyValue,
    },
    /// Manual mode cannot be entered: there is no value to seed it with.
    #[error("{property} has no manual values to start Manual mode from")]
    NoManualValues {
        /// Property queried.
        property: PropertyType,
    },
    /// The device's current mode is missing from its own mode list.
    #[error("current mode {mode} of {property} is not in the supported mode list")]
    ModeNotFound {
        /// Property queried.
        property: PropertyType,
        /// Mode reported as current.
        mode: PropertyMode,
    },
    /// A session call left an error in the error slot.
    #[error(transparent)]
    Device(#[from] DeviceError),
}

impl ControlError {
    /// Whether this is an expected refusal rather than a fault.
    pub(crate) const fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedMode { .. } | Self::UnsupportedConfigType { .. }
        )
    }
}
