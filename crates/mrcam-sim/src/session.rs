// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Simulated session: error slot, call log and fault injection.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use mrcam_session::{
    ChromaKeyConfig, DeviceSession, ErrorCode, LockType, PropertyConfigType, PropertyMode,
    PropertyType, PropertyValue,
};

use crate::{Call, CallKind, SessionId, SimRuntime};

#[derive(Default)]
struct SessionLocal {
    error: ErrorCode,
    calls: Vec<Call>,
    faults: HashMap<CallKind, Vec<ErrorCode>>,
}

/// One client session on a [`SimRuntime`].
///
/// Implements [`DeviceSession`] with runtime-faithful semantics: mutations need
/// the matching lock, invalid arguments park an error code in the slot, and
/// locks held by other sessions make `lock` return `false`. Every call is
/// recorded so tests can assert on exact call sequences.
///
/// Dropping the session releases any locks it still holds, as closing a real
/// runtime session does.
pub struct SimSession {
    id: SessionId,
    runtime: SimRuntime,
    local: Mutex<SessionLocal>,
}

impl SimSession {
    pub(crate) fn new(id: SessionId, runtime: SimRuntime) -> Self {
        Self {
            id,
            runtime,
            local: Mutex::new(SessionLocal::default()),
        }
    }

    fn local(&self) -> MutexGuard<'_, SessionLocal> {
        self.local.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Identifier of this session within its runtime.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Runtime this session is connected to.
    pub fn runtime(&self) -> &SimRuntime {
        &self.runtime
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.local().calls.clone()
    }

    /// Calls that change device state, in order.
    pub fn mutations(&self) -> Vec<Call> {
        self.local()
            .calls
            .iter()
            .filter(|c| c.is_mutation())
            .cloned()
            .collect()
    }

    /// Number of recorded calls of `kind`.
    pub fn count(&self, kind: CallKind) -> usize {
        self.local()
            .calls
            .iter()
            .filter(|c| c.kind() == kind)
            .count()
    }

    /// Forget the recorded calls (pending faults and the error slot are kept).
    pub fn clear_calls(&self) {
        self.local().calls.clear();
    }

    /// Make the next call of `kind` fail with `code` without touching device state.
    ///
    /// Faults queue per kind, so calling this twice fails the next two calls.
    pub fn fail_next(&self, kind: CallKind, code: ErrorCode) {
        self.local().faults.entry(kind).or_default().push(code);
    }

    /// Peek at the error slot without clearing it.
    pub fn pending_error(&self) -> ErrorCode {
        self.local().error
    }

    /// Record `call` and pop an injected fault for it, if any.
    fn begin(&self, call: Call) -> Option<ErrorCode> {
        let mut local = self.local();
        let kind = call.kind();
        local.calls.push(call);
        let fault = local.faults.get_mut(&kind).and_then(|queue| {
            if queue.is_empty() {
                None
            } else {
                Some(queue.remove(0))
            }
        });
        if let Some(code) = fault {
            local.error = code;
        }
        fault
    }

    fn finish<T>(&self, result: Result<T, ErrorCode>, fallback: T) -> T {
        match result {
            Ok(v) => v,
            Err(code) => {
                self.local().error = code;
                fallback
            }
        }
    }

    /// Run a read against the runtime unless a fault was injected.
    fn read<T>(
        &self,
        call: Call,
        fallback: T,
        op: impl FnOnce(&crate::runtime::RuntimeState) -> Result<T, ErrorCode>,
    ) -> T {
        if self.begin(call).is_some() {
            return fallback;
        }
        let result = op(&self.runtime.state());
        self.finish(result, fallback)
    }

    /// Run a mutation against the runtime unless a fault was injected.
    fn write(
        &self,
        call: Call,
        op: impl FnOnce(&mut crate::runtime::RuntimeState) -> Result<(), ErrorCode>,
    ) {
        if self.begin(call).is_some() {
            return;
        }
        let result = op(&mut self.runtime.state());
        self.finish(result, ());
    }
}

impl Drop for SimSession {
    fn drop(&mut self) {
        self.runtime.state().release_all(self.id);
    }
}

impl DeviceSession for SimSession {
    fn lock(&self, lock: LockType) -> bool {
        if self.begin(Call::Lock(lock)).is_some() {
            return false;
        }
        let result = self.runtime.state().lock(self.id, lock);
        self.finish(result, false)
    }

    fn unlock(&self, lock: LockType) {
        let id = self.id;
        self.write(Call::Unlock(lock), |st| st.unlock(id, lock));
    }

    fn property_mode_count(&self, ty: PropertyType) -> usize {
        self.read(Call::PropertyModeCount(ty), 0, |st| Ok(st.modes(ty).len()))
    }

    fn property_modes(&self, ty: PropertyType, max: usize) -> Vec<PropertyMode> {
        self.read(Call::PropertyModes(ty), Vec::new(), |st| {
            Ok(st.modes(ty).into_iter().take(max).collect())
        })
    }

    fn property_config_type(&self, ty: PropertyType) -> PropertyConfigType {
        self.read(
            Call::PropertyConfigType(ty),
            PropertyConfigType::List,
            |st| st.config_type(ty),
        )
    }

    fn property_value_count(&self, ty: PropertyType) -> usize {
        self.read(Call::PropertyValueCount(ty), 0, |st| Ok(st.values(ty).len()))
    }

    fn property_values(&self, ty: PropertyType, max: usize) -> Vec<PropertyValue> {
        self.read(Call::PropertyValues(ty), Vec::new(), |st| {
            Ok(st.values(ty).into_iter().take(max).collect())
        })
    }

    fn property_mode(&self, ty: PropertyType) -> PropertyMode {
        self.read(Call::PropertyMode(ty), PropertyMode::Off, |st| st.mode(ty))
    }

    fn set_property_mode(&self, ty: PropertyType, mode: PropertyMode) {
        let id = self.id;
        self.write(Call::SetPropertyMode(ty, mode), |st| st.set_mode(id, ty, mode));
    }

    fn property_value(&self, ty: PropertyType) -> PropertyValue {
        self.read(Call::PropertyValue(ty), PropertyValue::Int(0), |st| {
            st.value(ty)
        })
    }

    fn set_property_value(&self, ty: PropertyType, value: &PropertyValue) {
        let id = self.id;
        let value = *value;
        self.write(Call::SetPropertyValue(ty, value), |st| {
            st.set_value(id, ty, value)
        });
    }

    fn reset_properties(&self) {
        let id = self.id;
        self.write(Call::ResetProperties, |st| st.reset(id));
    }

    fn chroma_key_config_count(&self) -> usize {
        self.read(Call::ChromaKeyConfigCount, 0, |st| Ok(st.chroma_slots.len()))
    }

    fn chroma_key_config(&self, index: usize) -> ChromaKeyConfig {
        self.read(
            Call::ChromaKeyConfig(index),
            ChromaKeyConfig::Disabled,
            |st| st.chroma_config(index),
        )
    }

    fn set_chroma_key_config(&self, index: usize, config: &ChromaKeyConfig) {
        let id = self.id;
        let config = *config;
        self.write(Call::SetChromaKeyConfig(index, config), |st| {
            st.set_chroma_config(id, index, config)
        });
    }

    fn set_chroma_key_enabled(&self, enabled: bool) {
        self.write(Call::SetChromaKeyEnabled(enabled), |st| {
            st.chroma_enabled = enabled;
            Ok(())
        });
    }

    fn take_error(&self) -> ErrorCode {
        std::mem::take(&mut self.local().error)
    }
}
