// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Camera property enumeration and cycling.

use mrcam_session::{
    DeviceSession, DeviceSessionExt, LockType, PropertyConfigType, PropertyMode, PropertyType,
    PropertyValue,
};
use tracing::{debug, error, info, warn};

use crate::cycle::{CyclePosition, CycleStep, Slot};
use crate::{ControlError, ResourceLock};

/// Index of `mode` in `modes`.
pub fn find_mode_index(mode: PropertyMode, modes: &[PropertyMode]) -> Option<usize> {
    modes.iter().position(|m| *m == mode)
}

/// Index of `value` in `values`, by exact typed equality.
///
/// A value never matches an entry of a different type, even when the numeric
/// payloads coincide.
pub fn find_value_index(value: &PropertyValue, values: &[PropertyValue]) -> Option<usize> {
    values.iter().position(|v| v == value)
}

/// What an [`advance`](PropertyCycler::advance) changed.
#[derive(Clone, Copy, Debug)]
enum Applied {
    Value(PropertyValue),
    Mode(PropertyMode),
}

/// Enumerates and cycles the modes and manual values of camera properties.
///
/// Holds no device state of its own: every call re-queries the session, since
/// supported modes and values can change between calls. Mutations run under
/// the camera lock, acquired once per operation and released on every exit
/// path.
pub struct PropertyCycler<S> {
    session: S,
}

impl<S: DeviceSession> PropertyCycler<S> {
    /// Wrap a session.
    pub fn new(session: S) -> Self {
        Self { session }
    }

    /// Session this cycler talks to.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Supported modes of `ty`, freshly queried. Empty when unsupported.
    pub fn mode_list(&self, ty: PropertyType) -> Vec<PropertyMode> {
        self.try_mode_list(ty).unwrap_or_else(|err| {
            error!(property = %ty, %err, "querying property modes failed");
            Vec::new()
        })
    }

    /// Supported discrete manual values of `ty`, freshly queried.
    ///
    /// Empty when the property is not list-typed; range-typed properties are not
    /// handled here.
    pub fn value_list(&self, ty: PropertyType) -> Vec<PropertyValue> {
        match self.try_value_list(ty) {
            Ok(values) => values,
            Err(err) if err.is_warning() => {
                debug!(property = %ty, %err, "no discrete value list");
                Vec::new()
            }
            Err(err) => {
                error!(property = %ty, %err, "querying property values failed");
                Vec::new()
            }
        }
    }

    /// Display text for the current state of `ty`: the manual value in Manual
    /// mode, the mode name otherwise.
    pub fn current_as_text(&self, ty: PropertyType) -> String {
        self.try_current_as_text(ty).unwrap_or_else(|err| {
            error!(property = %ty, %err, "reading current property state failed");
            "Unknown".to_owned()
        })
    }

    /// Put `ty` into Auto mode. Returns whether the mode was set.
    pub fn set_auto_mode(&self, ty: PropertyType) -> bool {
        log_outcome("setting auto mode", ty, self.try_set_auto_mode(ty))
    }

    /// Step `ty` to its next manual value, or to its next mode once the values
    /// are exhausted. Returns whether a step was applied.
    pub fn advance(&self, ty: PropertyType) -> bool {
        match self.try_advance(ty) {
            Ok(Applied::Value(value)) => {
                debug!(property = %ty, %value, "advanced manual value");
                true
            }
            Ok(Applied::Mode(mode)) => {
                debug!(property = %ty, %mode, "advanced mode");
                true
            }
            Err(err) => log_outcome("advancing property", ty, Err(err)),
        }
    }

    /// Reset every camera property to the device defaults.
    pub fn reset_to_defaults(&self) -> bool {
        match self.try_reset() {
            Ok(()) => {
                info!("camera properties reset to defaults");
                true
            }
            Err(err) => {
                error!(%err, "resetting camera properties failed");
                false
            }
        }
    }

    fn try_mode_list(&self, ty: PropertyType) -> Result<Vec<PropertyMode>, ControlError> {
        let count = self.session.checked(|s| s.property_mode_count(ty))?;
        if count == 0 {
            return Ok(Vec::new());
        }
        Ok(self.session.checked(|s| s.property_modes(ty, count))?)
    }

    fn try_value_list(&self, ty: PropertyType) -> Result<Vec<PropertyValue>, ControlError> {
        let config_type = self.session.checked(|s| s.property_config_type(ty))?;
        if config_type != PropertyConfigType::List {
            return Err(ControlError::UnsupportedConfigType {
                property: ty,
                config_type,
            });
        }
        let count = self.session.checked(|s| s.property_value_count(ty))?;
        if count == 0 {
            return Ok(Vec::new());
        }
        Ok(self.session.checked(|s| s.property_values(ty, count))?)
    }

    fn try_current_as_text(&self, ty: PropertyType) -> Result<String, ControlError> {
        let mode = self.session.checked(|s| s.property_mode(ty))?;
        if mode == PropertyMode::Manual {
            let value = self.session.checked(|s| s.property_value(ty))?;
            return Ok(value.to_string());
        }
        Ok(mode.to_string())
    }

    fn try_set_auto_mode(&self, ty: PropertyType) -> Result<(), ControlError> {
        if !self.mode_list(ty).contains(&PropertyMode::Auto) {
            return Err(ControlError::UnsupportedMode {
                property: ty,
                mode: PropertyMode::Auto,
            });
        }
        let _lock = ResourceLock::acquire(&self.session, LockType::Camera)?;
        self.apply_mode(ty, PropertyMode::Auto)
    }

    fn try_reset(&self) -> Result<(), ControlError> {
        let _lock = ResourceLock::acquire(&self.session, LockType::Camera)?;
        self.session.checked(|s| s.reset_properties())?;
        Ok(())
    }

    fn try_advance(&self, ty: PropertyType) -> Result<Applied, ControlError> {
        let _lock = ResourceLock::acquire(&self.session, LockType::Camera)?;

        let current_mode = self.session.checked(|s| s.property_mode(ty))?;
        let modes = self.try_mode_list(ty)?;

        let mut values = Vec::new();
        let mut value_slot = None;
        if current_mode == PropertyMode::Manual {
            let current = self.session.checked(|s| s.property_value(ty))?;
            values = self.try_value_list(ty)?;
            let index =
                find_value_index(&current, &values).ok_or(ControlError::ValueNotFound {
                    property: ty,
                    value: current,
                })?;
            value_slot = Some(Slot {
                index,
                count: values.len(),
            });
        }

        let position = CyclePosition {
            mode: find_mode_index(current_mode, &modes).map(|index| Slot {
                index,
                count: modes.len(),
            }),
            value: value_slot,
        };

        match position.step() {
            Some(CycleStep::Value(index)) => {
                let next = values[index];
                self.apply_value(ty, next)?;
                Ok(Applied::Value(next))
            }
            Some(CycleStep::Mode(index)) => {
                let next = modes[index];
                if next == PropertyMode::Manual {
                    if values.is_empty() {
                        values = self.try_value_list(ty)?;
                    }
                    let first = values
                        .first()
                        .copied()
                        .ok_or(ControlError::NoManualValues { property: ty })?;
                    self.apply_value(ty, first)?;
                }
                self.apply_mode(ty, next)?;
                Ok(Applied::Mode(next))
            }
            None => Err(ControlError::ModeNotFound {
                property: ty,
                mode: current_mode,
            }),
        }
    }

    fn apply_value(&self, ty: PropertyType, value: PropertyValue) -> Result<(), ControlError> {
        info!(property = %ty, %value, "setting camera property manual value");
        self.session.checked(|s| s.set_property_value(ty, &value))?;
        Ok(())
    }

    fn apply_mode(&self, ty: PropertyType, mode: PropertyMode) -> Result<(), ControlError> {
        info!(property = %ty, %mode, "setting camera property mode");
        self.session.checked(|s| s.set_property_mode(ty, mode))?;
        Ok(())
    }
}

fn log_outcome(action: &str, ty: PropertyType, result: Result<(), ControlError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) if err.is_warning() => {
            warn!(property = %ty, %err, "{action} skipped");
            false
        }
        Err(err) => {
            error!(property = %ty, %err, "{action} failed");
            false
        }
    }
}
