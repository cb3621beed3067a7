//! Project configuration.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use taskdeck_core::StatusFilter;
use taskdeck_store_memory::Latency;

const CONFIG_DIR: &str = ".taskdeck";
const CONFIG_FILE: &str = "config.toml";
const MAX_LATENCY_MS: u64 = 10_000;

/// Top-level configuration loaded from `.taskdeck/config.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Store behaviour.
    #[serde(default)]
    pub store: StoreConfig,
    /// View defaults.
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from `<workdir>/.taskdeck/config.toml`, falling back to defaults.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read, parsed or validated.
    pub fn from_workdir(workdir: impl AsRef<Path>) -> Result<Self> {
        let config_path = workdir.as_ref().join(CONFIG_DIR).join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::from_path(config_path)
    }

    /// Load configuration from an explicit file.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read, parsed or validated.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let mut config: Self =
            toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Same configuration with store latency switched off.
    #[must_use]
    pub fn without_latency(mut self) -> Self {
        self.store = self.store.without_latency();
        self
    }

    fn validate(&self) -> Result<()> {
        self.store.validate()?;
        self.view.validate()
    }

    /// Seed file path, resolved against the directory holding the config file.
    #[must_use]
    pub fn seed_path(&self) -> Option<PathBuf> {
        let seed = self.store.seed_file.as_ref()?;
        Some(match &self.base_dir {
            Some(base) if seed.is_relative() => base.join(seed),
            _ => seed.clone(),
        })
    }
}

/// `[store]` block.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_simulate_latency")]
    simulate_latency: bool,
    #[serde(default)]
    latency_ms: Option<u64>,
    #[serde(default)]
    seed_file: Option<PathBuf>,
}

const fn default_simulate_latency() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            simulate_latency: default_simulate_latency(),
            latency_ms: None,
            seed_file: None,
        }
    }
}

impl StoreConfig {
    /// Same configuration with latency switched off.
    #[must_use]
    pub const fn without_latency(mut self) -> Self {
        self.simulate_latency = false;
        self
    }

    /// Delay strategy for both stores.
    #[must_use]
    pub const fn latency(&self) -> Latency {
        if !self.simulate_latency {
            return Latency::none();
        }
        match self.latency_ms {
            Some(ms) => Latency::fixed(Duration::from_millis(ms)),
            None => Latency::simulated(),
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(ms) = self.latency_ms
            && ms > MAX_LATENCY_MS
        {
            bail!("store.latency_ms must be at most {MAX_LATENCY_MS}, got {ms}");
        }
        Ok(())
    }
}

/// `[view]` block.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ViewConfig {
    #[serde(default)]
    default_status: Option<String>,
}

impl ViewConfig {
    /// Status tab used when a command does not pick one.
    #[must_use]
    pub fn default_status(&self) -> StatusFilter {
        self.default_status
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    fn validate(&self) -> Result<()> {
        if let Some(raw) = self.default_status.as_deref() {
            raw.parse::<StatusFilter>()
                .context("view.default_status must be one of all, pending, completed, high")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_config(dir: &Path, contents: &str) -> Result<()> {
        let config_dir = dir.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir)?;
        fs::write(config_dir.join(CONFIG_FILE), contents)?;
        Ok(())
    }

    #[test]
    fn missing_config_returns_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::from_workdir(dir.path())?;
        assert_eq!(config.store.latency(), Latency::simulated());
        assert_eq!(config.view.default_status(), StatusFilter::All);
        assert!(config.seed_path().is_none());
        Ok(())
    }

    #[test]
    fn load_config_with_store_and_view() -> Result<()> {
        let dir = tempdir()?;
        write_config(
            dir.path(),
            r#"
[store]
latency_ms = 25
seed_file = "seed.json"

[view]
default_status = "pending"
"#,
        )?;

        let config = AppConfig::from_workdir(dir.path())?;
        assert_eq!(
            config.store.latency(),
            Latency::fixed(Duration::from_millis(25))
        );
        assert_eq!(config.view.default_status(), StatusFilter::Pending);
        assert_eq!(
            config.seed_path(),
            Some(dir.path().join(CONFIG_DIR).join("seed.json"))
        );
        Ok(())
    }

    #[test]
    fn latency_can_be_disabled() -> Result<()> {
        let dir = tempdir()?;
        write_config(dir.path(), "[store]\nsimulate_latency = false\nlatency_ms = 50\n")?;
        let config = AppConfig::from_workdir(dir.path())?;
        assert_eq!(config.store.latency(), Latency::none());
        Ok(())
    }

    #[test]
    fn excessive_latency_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        write_config(dir.path(), "[store]\nlatency_ms = 60000\n")?;
        let err = AppConfig::from_workdir(dir.path()).expect_err("latency above the cap must fail");
        assert!(format!("{err:#}").contains("latency_ms"));
        Ok(())
    }

    #[test]
    fn unknown_default_status_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        write_config(dir.path(), "[view]\ndefault_status = \"someday\"\n")?;
        let err = AppConfig::from_workdir(dir.path()).expect_err("unknown status must fail");
        assert!(format!("{err:#}").contains("someday"));
        Ok(())
    }

    #[test]
    fn malformed_toml_mentions_path() -> Result<()> {
        let dir = tempdir()?;
        write_config(dir.path(), "[store\n")?;
        let err = AppConfig::from_workdir(dir.path()).expect_err("broken toml must fail");
        assert!(err.to_string().contains("config.toml"));
        Ok(())
    }

    #[test]
    fn absolute_seed_path_is_kept() {
        let config = AppConfig {
            store: StoreConfig {
                seed_file: Some(PathBuf::from("/srv/seed.json")),
                ..StoreConfig::default()
            },
            ..AppConfig::default()
        };
        assert_eq!(config.seed_path(), Some(PathBuf::from("/srv/seed.json")));
    }
}
