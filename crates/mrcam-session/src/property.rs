// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Camera property identifiers, modes and typed values.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tunable camera property exposed by the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    /// Sensor exposure time.
    ExposureTime,
    /// Sensor ISO sensitivity.
    IsoValue,
    /// Color temperature.
    WhiteBalance,
    /// Mains flicker compensation (50/60 Hz).
    FlickerCompensation,
    /// Image sharpening strength.
    Sharpness,
}

impl PropertyType {
    /// Every property, in canonical display order.
    pub const ALL: [Self; 5] = [
        Self::ExposureTime,
        Self::IsoValue,
        Self::WhiteBalance,
        Self::FlickerCompensation,
        Self::Sharpness,
    ];

    /// Runtime code for this property.
    pub const fn as_raw(self) -> i64 {
        match self {
            Self::ExposureTime => 1,
            Self::IsoValue => 2,
            Self::WhiteBalance => 3,
            Self::FlickerCompensation => 4,
            Self::Sharpness => 5,
        }
    }

    /// Map a runtime code back to a property. Returns `None` for codes this
    /// client does not know about.
    pub const fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            1 => Some(Self::ExposureTime),
            2 => Some(Self::IsoValue),
            3 => Some(Self::WhiteBalance),
            4 => Some(Self::FlickerCompensation),
            5 => Some(Self::Sharpness),
            _ => None,
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ExposureTime => "Exposure Time",
            Self::IsoValue => "ISO Value",
            Self::WhiteBalance => "White Balance",
            Self::FlickerCompensation => "Flicker Compensation",
            Self::Sharpness => "Sharpness",
        }
    }

    /// Short kebab-case name accepted by [`FromStr`].
    pub const fn key(self) -> &'static str {
        match self {
            Self::ExposureTime => "exposure-time",
            Self::IsoValue => "iso",
            Self::WhiteBalance => "white-balance",
            Self::FlickerCompensation => "flicker-compensation",
            Self::Sharpness => "sharpness",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a property name does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown camera property `{0}` (expected one of: exposure-time, iso, white-balance, flicker-compensation, sharpness, or a runtime code 1-5)")]
pub struct ParsePropertyTypeError(pub String);

impl FromStr for PropertyType {
    type Err = ParsePropertyTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        match needle.as_str() {
            "exposure-time" | "exposure" => Ok(Self::ExposureTime),
            "iso" | "iso-value" => Ok(Self::IsoValue),
            "white-balance" | "wb" => Ok(Self::WhiteBalance),
            "flicker-compensation" | "flicker" => Ok(Self::FlickerCompensation),
            "sharpness" => Ok(Self::Sharpness),
            code => code
                .parse()
                .ok()
                .and_then(Self::from_raw)
                .ok_or_else(|| ParsePropertyTypeError(s.to_owned())),
        }
    }
}

/// Operating mode of a camera property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyMode {
    /// Feature disabled.
    Off,
    /// Device picks the value.
    Auto,
    /// Value is set explicitly from the discrete value list.
    Manual,
}

impl fmt::Display for PropertyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "Off",
            Self::Auto => "Auto",
            Self::Manual => "Manual",
        })
    }
}

/// How the runtime describes the manual values of a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyConfigType {
    /// A discrete, enumerable list of values.
    List,
    /// A continuous min/max range.
    Range,
}

impl fmt::Display for PropertyConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "List",
            Self::Range => "Range",
        })
    }
}

/// Type tag of a [`PropertyValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyDataType {
    /// Boolean payload.
    Bool,
    /// Integer payload.
    Int,
    /// Floating-point payload.
    Double,
}

/// One discrete manual setting of a property.
///
/// Equality is variant-and-payload equality. A `Double(1.0)` never equals an
/// `Int(1)`: the device reports values with a fixed type per property, so a
/// cross-type match would mean comparing against the wrong list.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum PropertyValue {
    /// Boolean setting.
    Bool(bool),
    /// Integer setting.
    Int(i64),
    /// Floating-point setting.
    Double(f64),
}

impl PropertyValue {
    /// Type tag of this value.
    pub const fn data_type(&self) -> PropertyDataType {
        match self {
            Self::Bool(_) => PropertyDataType::Bool,
            Self::Int(_) => PropertyDataType::Int,
            Self::Double(_) => PropertyDataType::Double,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v:.2}"),
        }
    }
}
