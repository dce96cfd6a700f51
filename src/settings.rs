use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock, time::Duration};

use crate::{
    floating::{DEFAULT_ALPHABET, DEFAULT_RANDOM_COUNT},
    log_warn,
};

const ENABLE_LOGS: bool = true;

/// Upper bound on random floating characters per generation.
pub const MAX_RANDOM_COUNT: usize = 1000;
/// Upper bound on the cosmetic delay, one minute.
pub const MAX_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationSettings {
    pub random_count: usize,
    /// Cosmetic pause before results are revealed. Zero disables it.
    pub delay_ms: u64,
    pub alphabet: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            random_count: DEFAULT_RANDOM_COUNT,
            delay_ms: 0,
            alphabet: DEFAULT_ALPHABET.into(),
        }
    }
}

impl GenerationSettings {
    pub fn delay(&self) -> Option<Duration> {
        (self.delay_ms > 0).then(|| Duration::from_millis(self.delay_ms))
    }

    pub fn validate(&self) -> Result<()> {
        if self.random_count > MAX_RANDOM_COUNT {
            bail!(
                "random count {} exceeds the maximum of {MAX_RANDOM_COUNT}",
                self.random_count
            );
        }
        if self.delay_ms > MAX_DELAY_MS {
            bail!(
                "delay of {} ms exceeds the maximum of {MAX_DELAY_MS} ms",
                self.delay_ms
            );
        }
        if self.random_count > 0 && self.alphabet.is_empty() {
            bail!("alphabet must not be empty when random characters are requested");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserSettings {
    #[serde(default)]
    generation: GenerationSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    /// Open the settings file. A missing or unreadable JSON body falls back
    /// to defaults; only I/O failures on an existing file are errors.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!("Ignoring unreadable settings in {}: {err}", path.display());
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn generation(&self) -> GenerationSettings {
        self.data
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .generation
            .clone()
    }

    pub fn update_generation(&self, settings: GenerationSettings) -> Result<()> {
        settings.validate()?;

        let mut guard = self
            .data
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.generation = settings;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
