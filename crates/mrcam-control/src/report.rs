// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Diagnostic snapshots of camera properties.

use mrcam_session::{DeviceSession, PropertyMode, PropertyType, PropertyValue};
use tracing::debug;

use crate::PropertyCycler;

/// What the device reports for one property at a point in time.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyReport {
    /// Property described.
    pub property: PropertyType,
    /// Supported modes.
    pub modes: Vec<PropertyMode>,
    /// Supported discrete manual values; empty for non-list properties.
    pub values: Vec<PropertyValue>,
    /// Current state as display text.
    pub current: String,
}

impl PropertyReport {
    /// Whether the device supports the property at all.
    pub fn is_supported(&self) -> bool {
        !self.modes.is_empty()
    }

    /// Manual values joined for display.
    pub fn values_text(&self) -> String {
        join(&self.values)
    }

    /// Modes joined for display.
    pub fn modes_text(&self) -> String {
        join(&self.modes)
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl<S: DeviceSession> PropertyCycler<S> {
    /// Snapshot of modes, values and current state for `ty`.
    pub fn describe(&self, ty: PropertyType) -> PropertyReport {
        PropertyReport {
            property: ty,
            modes: self.mode_list(ty),
            values: self.value_list(ty),
            current: self.current_as_text(ty),
        }
    }

    /// Log the supported modes and values of every property.
    pub fn log_supported_properties(&self) {
        for ty in PropertyType::ALL {
            let report = self.describe(ty);
            debug!(
                property = %ty,
                code = ty.as_raw(),
                modes = %report.modes_text(),
                values = %report.values_text(),
                "supported camera property"
            );
        }
    }

    /// Log the current state of every property.
    pub fn log_current_config(&self) {
        for ty in PropertyType::ALL {
            debug!(property = %ty, current = %self.current_as_text(ty), "camera property state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrcam_sim::{PropertySpec, SimRuntime};

    #[test]
    fn describe_collects_modes_values_and_current() {
        let runtime = SimRuntime::new();
        let session = runtime.session();
        let cycler = PropertyCycler::new(&session);

        let report = cycler.describe(PropertyType::FlickerCompensation);
        assert!(report.is_supported());
        assert_eq!(report.modes, vec![PropertyMode::Manual]);
        assert_eq!(report.values_text(), "50, 60");
        assert_eq!(report.current, "50");
    }

    #[test]
    fn describe_unsupported_property() {
        let runtime = SimRuntime::builder()
            .with_property(
                PropertyType::IsoValue,
                PropertySpec::list(vec![PropertyMode::Auto], vec![PropertyValue::Int(100)]),
            )
            .build();
        let session = runtime.session();
        let cycler = PropertyCycler::new(&session);

        let report = cycler.describe(PropertyType::Sharpness);
        assert!(!report.is_supported());
        assert!(report.values.is_empty());
        assert_eq!(report.current, "Unknown");
        assert_eq!(cycler.describe(PropertyType::IsoValue).modes_text(), "Auto");
    }

    #[test]
    fn log_dumps_touch_every_property_without_mutating() {
        let runtime = SimRuntime::new();
        let session = runtime.session();
        let cycler = PropertyCycler::new(&session);
        cycler.log_supported_properties();
        cycler.log_current_config();
        assert!(session.mutations().is_empty());
        assert_eq!(
            session.count(mrcam_sim::CallKind::PropertyModeCount),
            PropertyType::ALL.len()
        );
    }
}
