//! Initial board contents.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use taskdeck_core::{Category, Task};

const BUILTIN_SEED: &str = include_str!("../seed/default.json");

/// Categories and tasks loaded into fresh stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    /// Categories in display order.
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Tasks in store order (newest first).
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Seed {
    /// Sample board shipped with the binary.
    ///
    /// # Errors
    /// Returns an error if the embedded JSON is malformed.
    pub fn builtin() -> Result<Self> {
        serde_json::from_str(BUILTIN_SEED).context("built-in seed data is malformed")
    }

    /// Load a seed from a JSON file.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Use `path` when given, otherwise the built-in seed.
    ///
    /// # Errors
    /// Returns an error when the chosen seed cannot be loaded.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(Self::builtin, Self::from_path)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use std::collections::HashSet;
    use tempfile::tempdir;

    #[test]
    fn builtin_seed_is_consistent() -> Result<()> {
        let seed = Seed::builtin()?;
        assert!(!seed.categories.is_empty());
        assert!(!seed.tasks.is_empty());

        let names: HashSet<&str> = seed.categories.iter().map(|c| c.name.as_str()).collect();
        assert!(seed.tasks.iter().all(|task| names.contains(task.category.as_str())));

        let ids: HashSet<_> = seed.tasks.iter().map(|task| task.id).collect();
        assert_eq!(ids.len(), seed.tasks.len());
        Ok(())
    }

    #[test]
    fn seed_file_overrides_builtin() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("seed.json");
        fs::write(
            &path,
            r#"{"categories":[{"id":"9","name":"Garden"}],"tasks":[]}"#,
        )?;

        let seed = Seed::load(Some(path.as_path()))?;
        assert_eq!(seed.categories.len(), 1);
        assert_eq!(seed.categories[0].icon, "Folder");
        assert!(seed.tasks.is_empty());
        Ok(())
    }

    #[test]
    fn unreadable_seed_reports_path() {
        let err = Seed::from_path("/nonexistent/seed.json").expect_err("missing file must fail");
        assert!(err.to_string().contains("/nonexistent/seed.json"));
    }
}
