// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved tool preferences: named chroma-key presets and property display order.

use mrcam_session::{ChromaKeyConfig, PropertyType};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ConfigService, ConfigStore};

/// Store key the preferences live under.
pub const PREFS_KEY: &str = "mrcam-prefs";

/// A chroma-key configuration saved under a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChromaPreset {
    /// Lookup name, e.g. `green-screen`.
    pub name: String,
    /// Configuration applied to a slot.
    pub config: ChromaKeyConfig,
}

impl ChromaPreset {
    /// Build a preset.
    pub fn new(name: impl Into<String>, config: ChromaKeyConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Preferences shared by mrcam tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPrefs {
    /// Named chroma-key presets.
    pub presets: Vec<ChromaPreset>,
    /// Order properties are listed in.
    pub property_order: Vec<PropertyType>,
}

impl Default for ToolPrefs {
    fn default() -> Self {
        Self {
            presets: vec![
                ChromaPreset::new(
                    "green-screen",
                    ChromaKeyConfig::hsv([0.333, 0.6, 0.6], [0.08, 0.35, 0.35], [0.03, 0.1, 0.1]),
                ),
                ChromaPreset::new(
                    "blue-screen",
                    ChromaKeyConfig::hsv([0.611, 0.7, 0.6], [0.07, 0.3, 0.35], [0.03, 0.1, 0.1]),
                ),
                ChromaPreset::new("off", ChromaKeyConfig::disabled()),
            ],
            property_order: PropertyType::ALL.to_vec(),
        }
    }
}

impl ToolPrefs {
    /// Preset named `name`.
    pub fn preset(&self, name: &str) -> Option<&ChromaPreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Add `preset`, replacing any preset with the same name.
    pub fn upsert_preset(&mut self, preset: ChromaPreset) {
        match self.presets.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    /// Every property exactly once: saved order first, then the rest in
    /// canonical order.
    pub fn ordered_properties(&self) -> Vec<PropertyType> {
        let mut out: Vec<PropertyType> = Vec::with_capacity(PropertyType::ALL.len());
        for ty in self.property_order.iter().chain(PropertyType::ALL.iter()) {
            if !out.contains(ty) {
                out.push(*ty);
            }
        }
        out
    }
}

/// Loads and saves [`ToolPrefs`] through a [`ConfigStore`].
pub struct PrefsService<S> {
    config: ConfigService<S>,
}

impl<S: ConfigStore> PrefsService<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self {
            config: ConfigService::new(store),
        }
    }

    /// Saved preferences, or the defaults when none are saved.
    pub fn load(&self) -> Result<ToolPrefs, ConfigError> {
        Ok(self.config.load(PREFS_KEY)?.unwrap_or_default())
    }

    /// Persist `prefs`.
    pub fn save(&self, prefs: &ToolPrefs) -> Result<(), ConfigError> {
        self.config.save(PREFS_KEY, prefs)
    }
}
