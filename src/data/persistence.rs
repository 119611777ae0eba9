use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Set once at startup by main() from the --data-dir argument.
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Call this from main() before any load operations.
pub fn set_data_dir(path: PathBuf) {
    let _ = DATA_DIR.set(path);
}

pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = DATA_DIR.get() {
        return Ok(dir.clone());
    }
    // Fallback when running tests or if set_data_dir was not called
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    Ok(cwd.join("config"))
}

/// A YAML document living in the data directory.
///
/// Files are read-only at runtime; only `init` writes them, to scaffold a
/// fresh data directory.
pub trait Persistable: Sized + Default + Serialize + DeserializeOwned {
    fn filename() -> &'static str;

    /// Loads from the global data directory, falling back to `Default`.
    fn load() -> Result<Self> {
        Self::load_from(&get_data_dir()?)
    }

    /// Loads from the global data directory, or `None` when the file is absent.
    fn try_load() -> Result<Option<Self>> {
        Self::try_load_from(&get_data_dir()?)
    }

    fn load_from(dir: &Path) -> Result<Self> {
        Ok(Self::try_load_from(dir)?.unwrap_or_default())
    }

    fn try_load_from(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(Self::filename());
        if !path.exists() {
            tracing::debug!(path = %path.display(), "data file absent");
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let parsed = serde_norway::from_str(&contents)
            .with_context(|| format!("failed to parse YAML from {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded data file");
        Ok(Some(parsed))
    }

    fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create dir {}", dir.display()))?;
        let path = dir.join(Self::filename());
        let contents = serde_norway::to_string(self).context("failed to serialize YAML")?;
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
