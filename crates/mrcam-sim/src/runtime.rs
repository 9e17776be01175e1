// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared simulated runtime: device state plus the lock broker.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use mrcam_session::{
    ChromaKeyConfig, ErrorCode, LockType, PropertyConfigType, PropertyMode, PropertyType,
    PropertyValue,
};

use crate::SimSession;

/// Identifier of a session opened on a [`SimRuntime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

/// What the simulated device supports for one property, and where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    /// Supported modes, in the order the device reports them.
    pub modes: Vec<PropertyMode>,
    /// How manual values are described.
    pub config_type: PropertyConfigType,
    /// Discrete manual values (only meaningful for [`PropertyConfigType::List`]).
    pub values: Vec<PropertyValue>,
    /// Mode after construction and after a reset.
    pub default_mode: PropertyMode,
    /// Manual value after construction and after a reset.
    pub default_value: Option<PropertyValue>,
}

impl PropertySpec {
    /// A list-typed property. Starts in the first mode with the first value.
    pub fn list(modes: Vec<PropertyMode>, values: Vec<PropertyValue>) -> Self {
        Self {
            default_mode: modes.first().copied().unwrap_or(PropertyMode::Off),
            default_value: values.first().copied(),
            modes,
            config_type: PropertyConfigType::List,
            values,
        }
    }

    /// A range-typed property with no enumerable values.
    pub fn range(modes: Vec<PropertyMode>, default_value: PropertyValue) -> Self {
        Self {
            default_mode: modes.first().copied().unwrap_or(PropertyMode::Off),
            default_value: Some(default_value),
            modes,
            config_type: PropertyConfigType::Range,
            values: Vec::new(),
        }
    }

    /// Override the starting (and reset) state.
    pub fn starting_at(mut self, mode: PropertyMode, value: Option<PropertyValue>) -> Self {
        self.default_mode = mode;
        self.default_value = value;
        self
    }

    fn accepts(&self, value: &PropertyValue) -> bool {
        match self.config_type {
            PropertyConfigType::List => self.values.contains(value),
            PropertyConfigType::Range => self
                .default_value
                .is_none_or(|d| d.data_type() == value.data_type()),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PropertyState {
    pub(crate) spec: PropertySpec,
    pub(crate) mode: PropertyMode,
    pub(crate) value: Option<PropertyValue>,
}

impl PropertyState {
    fn new(spec: PropertySpec) -> Self {
        Self {
            mode: spec.default_mode,
            value: spec.default_value,
            spec,
        }
    }

    fn reset(&mut self) {
        self.mode = self.spec.default_mode;
        self.value = self.spec.default_value;
    }
}

#[derive(Debug)]
pub(crate) struct RuntimeState {
    pub(crate) properties: BTreeMap<PropertyType, PropertyState>,
    pub(crate) chroma_slots: Vec<ChromaKeyConfig>,
    pub(crate) chroma_enabled: bool,
    pub(crate) lock_holders: HashMap<LockType, SessionId>,
    next_session: u64,
}

impl RuntimeState {
    fn property(&self, ty: PropertyType) -> Result<&PropertyState, ErrorCode> {
        self.properties
            .get(&ty)
            .ok_or(ErrorCode::CAMERA_INVALID_PROPERTY_TYPE)
    }

    pub(crate) fn require_lock(&self, session: SessionId, lock: LockType) -> Result<(), ErrorCode> {
        if self.lock_holders.get(&lock) == Some(&session) {
            return Ok(());
        }
        Err(match lock {
            LockType::Camera => ErrorCode::CAMERA_NOT_LOCKED,
            LockType::ChromaKey => ErrorCode::CHROMA_KEY_NOT_LOCKED,
        })
    }

    /// `Ok(true)` when acquired, `Ok(false)` when another session holds it.
    pub(crate) fn lock(&mut self, session: SessionId, lock: LockType) -> Result<bool, ErrorCode> {
        match self.lock_holders.get(&lock) {
            Some(holder) if *holder == session => Err(ErrorCode::ALREADY_LOCKED),
            Some(_) => Ok(false),
            None => {
                self.lock_holders.insert(lock, session);
                Ok(true)
            }
        }
    }

    pub(crate) fn unlock(&mut self, session: SessionId, lock: LockType) -> Result<(), ErrorCode> {
        match self.lock_holders.get(&lock) {
            Some(holder) if *holder == session => {
                self.lock_holders.remove(&lock);
                Ok(())
            }
            _ => Err(ErrorCode::NOT_LOCKED),
        }
    }

    pub(crate) fn release_all(&mut self, session: SessionId) {
        self.lock_holders.retain(|_, holder| *holder != session);
    }

    pub(crate) fn modes(&self, ty: PropertyType) -> Vec<PropertyMode> {
        self.properties
            .get(&ty)
            .map(|p| p.spec.modes.clone())
            .unwrap_or_default()
    }

    pub(crate) fn config_type(&self, ty: PropertyType) -> Result<PropertyConfigType, ErrorCode> {
        Ok(self.property(ty)?.spec.config_type)
    }

    pub(crate) fn values(&self, ty: PropertyType) -> Vec<PropertyValue> {
        self.properties
            .get(&ty)
            .filter(|p| p.spec.config_type == PropertyConfigType::List)
            .map(|p| p.spec.values.clone())
            .unwrap_or_default()
    }

    pub(crate) fn mode(&self, ty: PropertyType) -> Result<PropertyMode, ErrorCode> {
        Ok(self.property(ty)?.mode)
    }

    pub(crate) fn value(&self, ty: PropertyType) -> Result<PropertyValue, ErrorCode> {
        self.property(ty)?.value.ok_or(ErrorCode::OPERATION_FAILED)
    }

    pub(crate) fn set_mode(
        &mut self,
        session: SessionId,
        ty: PropertyType,
        mode: PropertyMode,
    ) -> Result<(), ErrorCode> {
        self.require_lock(session, LockType::Camera)?;
        let prop = self
            .properties
            .get_mut(&ty)
            .ok_or(ErrorCode::CAMERA_INVALID_PROPERTY_TYPE)?;
        if !prop.spec.modes.contains(&mode) {
            return Err(ErrorCode::CAMERA_INVALID_PROPERTY_MODE);
        }
        prop.mode = mode;
        Ok(())
    }

    pub(crate) fn set_value(
        &mut self,
        session: SessionId,
        ty: PropertyType,
        value: PropertyValue,
    ) -> Result<(), ErrorCode> {
        self.require_lock(session, LockType::Camera)?;
        let prop = self
            .properties
            .get_mut(&ty)
            .ok_or(ErrorCode::CAMERA_INVALID_PROPERTY_TYPE)?;
        if !prop.spec.accepts(&value) {
            return Err(ErrorCode::CAMERA_INVALID_PROPERTY_VALUE);
        }
        prop.value = Some(value);
        Ok(())
    }

    pub(crate) fn reset(&mut self, session: SessionId) -> Result<(), ErrorCode> {
        self.require_lock(session, LockType::Camera)?;
        self.properties.values_mut().for_each(PropertyState::reset);
        Ok(())
    }

    pub(crate) fn chroma_config(&self, index: usize) -> Result<ChromaKeyConfig, ErrorCode> {
        self.chroma_slots
            .get(index)
            .copied()
            .ok_or(ErrorCode::INDEX_OUT_OF_BOUNDS)
    }

    pub(crate) fn set_chroma_config(
        &mut self,
        session: SessionId,
        index: usize,
        config: ChromaKeyConfig,
    ) -> Result<(), ErrorCode> {
        self.require_lock(session, LockType::ChromaKey)?;
        let slot = self
            .chroma_slots
            .get_mut(index)
            .ok_or(ErrorCode::INDEX_OUT_OF_BOUNDS)?;
        *slot = config;
        Ok(())
    }
}

/// A simulated runtime shared by any number of sessions.
///
/// Cloning yields another handle to the same device. Sessions opened from it
/// contend for the same locks, which is how cross-process contention is
/// exercised in tests.
///
/// # Example
///
/// ```
/// use mrcam_session::{DeviceSession, LockType};
/// use mrcam_sim::SimRuntime;
///
/// let runtime = SimRuntime::new();
/// let ours = runtime.session();
/// let theirs = runtime.session();
///
/// assert!(theirs.lock(LockType::Camera));
/// assert!(!ours.lock(LockType::Camera));
/// ```
#[derive(Clone)]
pub struct SimRuntime {
    inner: Arc<Mutex<RuntimeState>>,
}

impl Default for SimRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl SimRuntime {
    /// A runtime with the stock camera property set and four empty chroma-key slots.
    pub fn new() -> Self {
        SimRuntimeBuilder::stock().build()
    }

    /// Start from an empty device (no properties, no chroma slots).
    pub fn builder() -> SimRuntimeBuilder {
        SimRuntimeBuilder::default()
    }

    /// Open a new session on this runtime.
    pub fn session(&self) -> SimSession {
        let id = {
            let mut state = self.state();
            state.next_session += 1;
            SessionId(state.next_session)
        };
        SimSession::new(id, self.clone())
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, RuntimeState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current (mode, value) of `ty`, bypassing any session.
    pub fn property_state(&self, ty: PropertyType) -> Option<(PropertyMode, Option<PropertyValue>)> {
        self.state().properties.get(&ty).map(|p| (p.mode, p.value))
    }

    /// Change `ty` out-of-band, as another client or the device itself would.
    ///
    /// No validation and no locking: this models drift the client cannot see.
    pub fn force_property(&self, ty: PropertyType, mode: PropertyMode, value: Option<PropertyValue>) {
        if let Some(prop) = self.state().properties.get_mut(&ty) {
            prop.mode = mode;
            prop.value = value;
        }
    }

    /// Config stored in chroma-key slot `index`.
    pub fn chroma_slot(&self, index: usize) -> Option<ChromaKeyConfig> {
        self.state().chroma_slots.get(index).copied()
    }

    /// Whether chroma keying is currently on.
    pub fn chroma_enabled(&self) -> bool {
        self.state().chroma_enabled
    }

    /// Session currently holding `lock`, if any.
    pub fn lock_holder(&self, lock: LockType) -> Option<SessionId> {
        self.state().lock_holders.get(&lock).copied()
    }
}

/// Builder for a [`SimRuntime`].
#[derive(Debug, Default)]
pub struct SimRuntimeBuilder {
    properties: BTreeMap<PropertyType, PropertySpec>,
    chroma_slots: Vec<ChromaKeyConfig>,
    chroma_enabled: bool,
}

impl SimRuntimeBuilder {
    /// The stock camera: every [`PropertyType`] with list-typed manual values,
    /// and four disabled chroma-key slots.
    pub fn stock() -> Self {
        use PropertyMode::{Auto, Manual, Off};

        let ints = |vals: &[i64]| -> Vec<PropertyValue> {
            vals.iter().copied().map(PropertyValue::Int).collect()
        };
        Self::default()
            .with_property(
                PropertyType::ExposureTime,
                PropertySpec::list(
                    vec![Auto, Manual],
                    [0.5, 1.0, 2.0, 4.0, 8.0]
                        .into_iter()
                        .map(PropertyValue::Double)
                        .collect(),
                ),
            )
            .with_property(
                PropertyType::IsoValue,
                PropertySpec::list(vec![Auto, Manual], ints(&[100, 200, 400, 800, 1600])),
            )
            .with_property(
                PropertyType::WhiteBalance,
                PropertySpec::list(
                    vec![Auto, Manual],
                    ints(&[2000, 3000, 4000, 5000, 6000, 7000]),
                ),
            )
            .with_property(
                PropertyType::FlickerCompensation,
                PropertySpec::list(vec![Manual], ints(&[50, 60])),
            )
            .with_property(
                PropertyType::Sharpness,
                PropertySpec::list(vec![Off, Manual], ints(&[0, 1, 2, 3, 4, 5]))
                    .starting_at(Manual, Some(PropertyValue::Int(2))),
            )
            .with_chroma_slots(4)
    }

    /// Add or replace a property.
    pub fn with_property(mut self, ty: PropertyType, spec: PropertySpec) -> Self {
        self.properties.insert(ty, spec);
        self
    }

    /// Remove a property so the device reports it as unsupported.
    pub fn without_property(mut self, ty: PropertyType) -> Self {
        self.properties.remove(&ty);
        self
    }

    /// Number of chroma-key slots, all starting disabled.
    pub fn with_chroma_slots(mut self, count: usize) -> Self {
        self.chroma_slots = vec![ChromaKeyConfig::Disabled; count];
        self
    }

    /// Pre-fill a chroma-key slot. Grows the slot table if needed.
    pub fn with_chroma_slot(mut self, index: usize, config: ChromaKeyConfig) -> Self {
        if self.chroma_slots.len() <= index {
            self.chroma_slots.resize(index + 1, ChromaKeyConfig::Disabled);
        }
        self.chroma_slots[index] = config;
        self
    }

    /// Initial chroma-keying state.
    pub fn with_chroma_enabled(mut self, enabled: bool) -> Self {
        self.chroma_enabled = enabled;
        self
    }

    /// Build the runtime.
    pub fn build(self) -> SimRuntime {
        let state = RuntimeState {
            properties: self
                .properties
                .into_iter()
                .map(|(ty, spec)| (ty, PropertyState::new(spec)))
                .collect(),
            chroma_slots: self.chroma_slots,
            chroma_enabled: self.chroma_enabled,
            lock_holders: HashMap::new(),
            next_session: 0,
        };
        SimRuntime {
            inner: Arc::new(Mutex::new(state)),
        }
    }
}
