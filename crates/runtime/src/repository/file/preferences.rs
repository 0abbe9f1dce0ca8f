//! File-based PreferenceStore implementation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::repository::{PreferenceStore, RepositoryError, Result};

/// On-disk layout of one namespace.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceFile {
    namespace: String,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// File-based implementation of PreferenceStore.
///
/// Each namespace is one JSON document, `{namespace}.json`, under the base
/// directory. Slots are buffered in memory and written on [`flush`].
///
/// # File Format
///
/// ```text
/// {
///   "namespace": "player_behavior_history",
///   "entries": { "records": "1718000000000,1250,Normal,1,...\n" }
/// }
/// ```
///
/// Writes go to a temp file first and are moved into place with an atomic
/// rename, so a crash mid-flush leaves the previous document intact.
///
/// [`flush`]: PreferenceStore::flush
pub struct FilePreferences {
    path: PathBuf,
    namespace: String,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FilePreferences {
    /// Open (or lazily create) the namespace under `base_dir`.
    pub fn open(base_dir: impl AsRef<Path>, namespace: impl Into<String>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir).map_err(RepositoryError::Io)?;

        let namespace = namespace.into();
        let path = base_dir.join(format!("{}.json", namespace));

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(RepositoryError::Io)?;
            let file: PreferenceFile =
                serde_json::from_str(&raw).map_err(|e| RepositoryError::Json(e.to_string()))?;
            tracing::debug!(
                "Opened preferences '{}' ({} slots) from {}",
                namespace,
                file.entries.len(),
                path.display()
            );
            file.entries
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            namespace,
            entries: RwLock::new(entries),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferences {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn put_string(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let entries = self
            .entries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let file = PreferenceFile {
            namespace: self.namespace.clone(),
            entries: entries.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            "Flushed preferences '{}' to {}",
            self.namespace,
            self.path.display()
        );

        Ok(())
    }
}
