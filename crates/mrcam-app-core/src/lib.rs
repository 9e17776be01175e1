// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for mrcam tools (config storage, preferences).
//! Keeps CLI and other front ends thin; nothing here talks to the device.

pub mod config;
pub mod memory;
pub mod prefs;

pub use config::{ConfigError, ConfigService, ConfigStore};
pub use memory::MemoryConfigStore;
pub use prefs::{ChromaPreset, PrefsService, ToolPrefs};
