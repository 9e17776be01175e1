// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Chroma-key configuration slots behind the chroma-key lock.

use mrcam_session::{ChromaKeyConfig, DeviceSession, DeviceSessionExt, LockType};
use tracing::{debug, error, info, warn};

use crate::lock;

/// Indexed chroma-key configuration records plus the enable switch.
///
/// Keeps two local shadow flags: whether this client holds the chroma-key
/// lock, and whether keying was last switched on. The lock is taken and
/// released explicitly with [`lock`](Self::lock) / [`unlock`](Self::unlock);
/// a store dropped while still locked releases the lock itself.
pub struct LockedConfigStore<S: DeviceSession> {
    session: S,
    config_count: usize,
    locked: bool,
    enabled: bool,
}

impl<S: DeviceSession> LockedConfigStore<S> {
    /// Wrap a session and read the number of config slots once.
    pub fn new(session: S) -> Self {
        let config_count = session
            .checked(|s| s.chroma_key_config_count())
            .unwrap_or_else(|err| {
                error!(%err, "querying chroma-key config count failed");
                0
            });
        debug!(config_count, "chroma-key store ready");
        Self {
            session,
            config_count,
            locked: false,
            enabled: false,
        }
    }

    /// Session this store talks to.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Number of config slots, as read at construction.
    pub fn config_count(&self) -> usize {
        self.config_count
    }

    /// Whether this store believes it holds the chroma-key lock.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether keying was last switched on through this store.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Take the chroma-key lock. Returns whether the lock is held afterwards.
    pub fn lock(&mut self) -> bool {
        if self.locked {
            warn!("chroma-key config already locked");
            return true;
        }
        match lock::try_acquire(&self.session, LockType::ChromaKey) {
            Ok(()) => {
                self.locked = true;
                info!("chroma-key config locked");
                true
            }
            Err(err) => {
                error!(%err, "locking chroma-key config failed");
                false
            }
        }
    }

    /// Release the chroma-key lock.
    pub fn unlock(&mut self) {
        if !self.locked {
            warn!("chroma-key config not locked");
            return;
        }
        if let Err(err) = lock::release(&self.session, LockType::ChromaKey) {
            error!(%err, "unlocking chroma-key config failed");
        }
        self.locked = false;
        info!("chroma-key config unlocked");
    }

    /// Read config slot `index`. Needs no lock.
    pub fn config(&self, index: usize) -> Option<ChromaKeyConfig> {
        match self.session.checked(|s| s.chroma_key_config(index)) {
            Ok(config) => {
                debug!(index, %config, "chroma-key config");
                Some(config)
            }
            Err(err) => {
                error!(index, %err, "reading chroma-key config failed");
                None
            }
        }
    }

    /// Write config slot `index`. Returns whether the device accepted it.
    ///
    /// Writing without the lock is reported but still attempted; the device
    /// decides whether to reject it.
    pub fn set_config(&self, index: usize, config: &ChromaKeyConfig) -> bool {
        if !self.locked {
            error!(index, "chroma-key config lock required for writing");
        }
        match self.session.checked(|s| s.set_chroma_key_config(index, config)) {
            Ok(()) => {
                info!(index, %config, "chroma-key config set");
                true
            }
            Err(err) => {
                error!(index, %err, "setting chroma-key config failed");
                false
            }
        }
    }

    /// Switch keying on or off. Returns whether the state changed.
    ///
    /// Requesting the state already shadowed is a no-op that never reaches the
    /// device.
    pub fn toggle_enabled(&mut self, enabled: bool) -> bool {
        if enabled == self.enabled {
            warn!(enabled, "chroma keying already in requested state");
            return false;
        }
        match self.session.checked(|s| s.set_chroma_key_enabled(enabled)) {
            Ok(()) => {
                self.enabled = enabled;
                info!(enabled, "chroma keying toggled");
                true
            }
            Err(err) => {
                error!(enabled, %err, "toggling chroma keying failed");
                false
            }
        }
    }

    /// Overwrite the enabled shadow flag without talking to the device.
    ///
    /// For clients that know the device state changed elsewhere, e.g. keying
    /// switched on by a previous process.
    pub fn resync_enabled(&mut self, enabled: bool) {
        debug!(enabled, "chroma keying shadow flag resynced");
        self.enabled = enabled;
    }
}

impl<S: DeviceSession> Drop for LockedConfigStore<S> {
    fn drop(&mut self) {
        if self.locked {
            warn!("chroma-key store dropped while locked; releasing");
            self.unlock();
        }
    }
}
