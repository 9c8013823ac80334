use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};

use crate::settings::config::Settings;

/// Settings with an on-disk TOML home. Each process works on its own copy;
/// nothing is written back unless [`SettingsManager::save`] is called, so a
/// session can flip to mock providers without affecting the next run.
#[derive(Clone)]
pub struct SettingsManager {
    settings_path: PathBuf,
    inner: Arc<Mutex<Settings>>,
}

impl SettingsManager {
    /// Create a manager rooted at the default location
    /// (`~/.teddytalk/settings.toml`), writing defaults on first run.
    pub fn new() -> Result<Self> {
        Self::from_path(Self::default_settings_path()?)
    }

    /// Create a manager rooted at a specific settings file.
    pub fn from_path(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {parent:?}"))?;
            }
            let contents = toml::to_string_pretty(&Settings::default())
                .context("Failed to serialize default settings")?;
            fs::write(&path, contents)
                .with_context(|| format!("Failed to write default settings to {path:?}"))?;
        }

        let loaded = Self::load_with_backup(&path)?;

        Ok(Self {
            settings_path: path,
            inner: Arc::new(Mutex::new(loaded)),
        })
    }

    fn default_settings_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home.join(".teddytalk").join("settings.toml"))
    }

    /// Load from a TOML file; a file that no longer parses is moved aside
    /// to `settings.toml.backup` and replaced with defaults.
    fn load_with_backup(path: &Path) -> Result<Settings> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {path:?}"))?;

        match toml::from_str(&contents) {
            Ok(settings) => Ok(settings),
            Err(_) => {
                let backup_path = path.with_extension("toml.backup");
                fs::rename(path, &backup_path).with_context(|| {
                    format!("Failed to back up corrupted settings to {backup_path:?}")
                })?;

                let defaults = Settings::default();
                let contents = toml::to_string_pretty(&defaults)
                    .context("Failed to serialize default settings")?;
                fs::write(path, contents)
                    .with_context(|| format!("Failed to write default settings to {path:?}"))?;

                Ok(defaults)
            }
        }
    }

    /// Snapshot of the in-memory settings.
    pub fn settings(&self) -> Settings {
        self.inner.lock().unwrap().clone()
    }

    /// Update the in-memory settings. Not persisted until [`save`] runs.
    ///
    /// [`save`]: SettingsManager::save
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut Settings),
    {
        let mut guard = self.inner.lock().unwrap();
        updater(&mut guard);
    }

    /// Persist the in-memory settings to disk.
    pub fn save(&self) -> Result<()> {
        let contents = toml::to_string_pretty(&self.settings())
            .context("Failed to serialize settings")?;
        fs::write(&self.settings_path, contents)
            .with_context(|| format!("Failed to write settings to {:?}", self.settings_path))
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }
}
