// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Runtime error codes and the error type for failed session calls.

use core::fmt;

use thiserror::Error;

/// Error code reported through the session error slot.
///
/// The runtime's code space is open-ended, so this is a newtype rather than an
/// enum. Codes this client does not know still round-trip and print.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorCode(pub i64);

impl ErrorCode {
    /// No error pending.
    pub const NONE: Self = Self(0);
    /// Unspecified failure.
    pub const UNKNOWN: Self = Self(-1);
    /// Session handle is invalid or already shut down.
    pub const INVALID_SESSION: Self = Self(1);
    /// Index outside the valid range.
    pub const INDEX_OUT_OF_BOUNDS: Self = Self(14);
    /// Resource already locked.
    pub const ALREADY_LOCKED: Self = Self(15);
    /// Resource not locked.
    pub const NOT_LOCKED: Self = Self(16);
    /// Request to the runtime service failed.
    pub const REQUEST_FAILED: Self = Self(700);
    /// Operation failed inside the runtime.
    pub const OPERATION_FAILED: Self = Self(701);
    /// Feature not available.
    pub const NOT_AVAILABLE: Self = Self(702);
    /// Capability not available on this device.
    pub const CAPABILITY_NOT_AVAILABLE: Self = Self(703);
    /// Camera configuration locked by another client.
    pub const CAMERA_ALREADY_LOCKED: Self = Self(704);
    /// Camera configuration must be locked first.
    pub const CAMERA_NOT_LOCKED: Self = Self(705);
    /// Unknown camera property type.
    pub const CAMERA_INVALID_PROPERTY_TYPE: Self = Self(706);
    /// Value not accepted for this camera property.
    pub const CAMERA_INVALID_PROPERTY_VALUE: Self = Self(707);
    /// Mode not supported for this camera property.
    pub const CAMERA_INVALID_PROPERTY_MODE: Self = Self(708);
    /// Chroma-key configuration locked by another client.
    pub const CHROMA_KEY_ALREADY_LOCKED: Self = Self(709);
    /// Chroma-key configuration must be locked first.
    pub const CHROMA_KEY_NOT_LOCKED: Self = Self(710);
    /// Unknown chroma-key config type.
    pub const CHROMA_KEY_INVALID_TYPE: Self = Self(711);
    /// Chroma-key estimator already running.
    pub const CHROMA_KEY_ESTIMATOR_ALREADY_RUNNING: Self = Self(712);
    /// Chroma-key estimator not running.
    pub const CHROMA_KEY_ESTIMATOR_NOT_RUNNING: Self = Self(713);

    /// Whether this code signals success.
    pub const fn is_ok(self) -> bool {
        self.0 == Self::NONE.0
    }

    /// Canonical runtime description of this code.
    pub const fn description(self) -> &'static str {
        match self.0 {
            0 => "No error",
            1 => "Invalid session",
            14 => "Index out of bounds",
            15 => "Already locked",
            16 => "Not locked",
            700 => "Request failed",
            701 => "Operation failed",
            702 => "Not available",
            703 => "Capability not available",
            704 => "Camera configuration already locked",
            705 => "Camera configuration not locked",
            706 => "Invalid camera property type",
            707 => "Invalid camera property value",
            708 => "Invalid camera property mode",
            709 => "Chroma key configuration already locked",
            710 => "Chroma key configuration not locked",
            711 => "Invalid chroma key type",
            712 => "Chroma key estimator already running",
            713 => "Chroma key estimator not running",
            _ => "Unknown error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A session call that left an error in the error slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("device error {code}: {description}")]
pub struct DeviceError {
    /// Code read from the error slot.
    pub code: ErrorCode,
    /// Text supplied by the session for `code`.
    pub description: String,
}

impl DeviceError {
    /// Build an error from a code and its description.
    pub fn new(code: ErrorCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}

impl From<ErrorCode> for DeviceError {
    fn from(code: ErrorCode) -> Self {
        Self::new(code, code.description())
    }
}
