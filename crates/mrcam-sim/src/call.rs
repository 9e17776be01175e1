// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recorded session calls.

use mrcam_session::{ChromaKeyConfig, LockType, PropertyMode, PropertyType, PropertyValue};

/// One call made through a [`SimSession`](crate::SimSession), with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// `lock(kind)`.
    Lock(LockType),
    /// `unlock(kind)`.
    Unlock(LockType),
    /// `property_mode_count(ty)`.
    PropertyModeCount(PropertyType),
    /// `property_modes(ty, ..)`.
    PropertyModes(PropertyType),
    /// `property_config_type(ty)`.
    PropertyConfigType(PropertyType),
    /// `property_value_count(ty)`.
    PropertyValueCount(PropertyType),
    /// `property_values(ty, ..)`.
    PropertyValues(PropertyType),
    /// `property_mode(ty)`.
    PropertyMode(PropertyType),
    /// `set_property_mode(ty, mode)`.
    SetPropertyMode(PropertyType, PropertyMode),
    /// `property_value(ty)`.
    PropertyValue(PropertyType),
    /// `set_property_value(ty, value)`.
    SetPropertyValue(PropertyType, PropertyValue),
    /// `reset_properties()`.
    ResetProperties,
    /// `chroma_key_config_count()`.
    ChromaKeyConfigCount,
    /// `chroma_key_config(index)`.
    ChromaKeyConfig(usize),
    /// `set_chroma_key_config(index, config)`.
    SetChromaKeyConfig(usize, ChromaKeyConfig),
    /// `set_chroma_key_enabled(enabled)`.
    SetChromaKeyEnabled(bool),
}

/// Argument-free discriminant of a [`Call`], used to target fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// See [`Call::Lock`].
    Lock,
    /// See [`Call::Unlock`].
    Unlock,
    /// See [`Call::PropertyModeCount`].
    PropertyModeCount,
    /// See [`Call::PropertyModes`].
    PropertyModes,
    /// See [`Call::PropertyConfigType`].
    PropertyConfigType,
    /// See [`Call::PropertyValueCount`].
    PropertyValueCount,
    /// See [`Call::PropertyValues`].
    PropertyValues,
    /// See [`Call::PropertyMode`].
    PropertyMode,
    /// See [`Call::SetPropertyMode`].
    SetPropertyMode,
    /// See [`Call::PropertyValue`].
    PropertyValue,
    /// See [`Call::SetPropertyValue`].
    SetPropertyValue,
    /// See [`Call::ResetProperties`].
    ResetProperties,
    /// See [`Call::ChromaKeyConfigCount`].
    ChromaKeyConfigCount,
    /// See [`Call::ChromaKeyConfig`].
    ChromaKeyConfig,
    /// See [`Call::SetChromaKeyConfig`].
    SetChromaKeyConfig,
    /// See [`Call::SetChromaKeyEnabled`].
    SetChromaKeyEnabled,
}

impl Call {
    /// Discriminant of this call.
    pub const fn kind(&self) -> CallKind {
        match self {
            Self::Lock(_) => CallKind::Lock,
            Self::Unlock(_) => CallKind::Unlock,
            Self::PropertyModeCount(_) => CallKind::PropertyModeCount,
            Self::PropertyModes(_) => CallKind::PropertyModes,
            Self::PropertyConfigType(_) => CallKind::PropertyConfigType,
            Self::PropertyValueCount(_) => CallKind::PropertyValueCount,
            Self::PropertyValues(_) => CallKind::PropertyValues,
            Self::PropertyMode(_) => CallKind::PropertyMode,
            Self::SetPropertyMode(..) => CallKind::SetPropertyMode,
            Self::PropertyValue(_) => CallKind::PropertyValue,
            Self::SetPropertyValue(..) => CallKind::SetPropertyValue,
            Self::ResetProperties => CallKind::ResetProperties,
            Self::ChromaKeyConfigCount => CallKind::ChromaKeyConfigCount,
            Self::ChromaKeyConfig(_) => CallKind::ChromaKeyConfig,
            Self::SetChromaKeyConfig(..) => CallKind::SetChromaKeyConfig,
            Self::SetChromaKeyEnabled(_) => CallKind::SetChromaKeyEnabled,
        }
    }

    /// Whether this call changes device state (lock traffic excluded).
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::SetPropertyMode(..)
                | Self::SetPropertyValue(..)
                | Self::ResetProperties
                | Self::SetChromaKeyConfig(..)
                | Self::SetChromaKeyEnabled(_)
        )
    }
}
