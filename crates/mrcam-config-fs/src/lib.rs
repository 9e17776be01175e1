// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `ConfigStore` for mrcam tools (uses platform config dir).

use directories::ProjectDirs;
use mrcam_app_core::config::{ConfigError, ConfigStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Store configs as JSON files under a base directory.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Create a store rooted at the user config directory (e.g., `~/.config/mrcam`).
    pub fn new() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("dev", "mrcam", "mrcam")
            .ok_or_else(|| ConfigError::Other("could not resolve config dir".into()))?;
        Self::with_base(proj.config_dir())
    }

    /// Create a store rooted at `base`, creating the directory if needed.
    pub fn with_base(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base = base.as_ref().to_path_buf();
        fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    /// Directory the files live in.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use mrcam_app_core::prefs::PREFS_KEY;
    use mrcam_app_core::{ChromaPreset, PrefsService, ToolPrefs};

    #[test]
    fn missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::with_base(dir.path()).unwrap();
        assert!(matches!(store.load_raw("absent"), Err(ConfigError::NotFound)));
    }

    #[test]
    fn with_base_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FsConfigStore::with_base(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.base(), nested.as_path());
    }

    #[test]
    fn raw_blobs_land_in_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::with_base(dir.path()).unwrap();
        store.save_raw("slots", b"[1]").unwrap();
        assert_eq!(fs::read(dir.path().join("slots.json")).unwrap(), b"[1]");
        assert_eq!(store.load_raw("slots").unwrap(), b"[1]");
    }

    #[test]
    fn prefs_persist_across_store_instances() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = ToolPrefs::default();
        let green = prefs.preset("green-screen").unwrap().config;
        prefs.upsert_preset(ChromaPreset::new("studio", green));
        prefs.property_order.reverse();

        PrefsService::new(FsConfigStore::with_base(dir.path()).unwrap())
            .save(&prefs)
            .unwrap();
        let reloaded = PrefsService::new(FsConfigStore::with_base(dir.path()).unwrap())
            .load()
            .unwrap();
        assert_eq!(reloaded, prefs);
        assert!(dir.path().join(format!("{PREFS_KEY}.json")).is_file());
    }
}
