//! In-memory PreferenceStore implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::repository::{PreferenceStore, RepositoryError, Result};

/// In-memory implementation of PreferenceStore.
///
/// Nothing outlives the process; `flush` is a no-op. Share one instance
/// between sessions through an `Arc` to simulate a persistent device store.
pub struct InMemoryPreferences {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryPreferences {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create with one slot already populated.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl Default for InMemoryPreferences {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for InMemoryPreferences {
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
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_remove() {
        let prefs = InMemoryPreferences::new();
        assert_eq!(prefs.get_string("records").unwrap(), None);

        prefs.put_string("records", "a".to_string()).unwrap();
        assert_eq!(prefs.get_string("records").unwrap().as_deref(), Some("a"));
        assert!(prefs.contains("records").unwrap());

        prefs.remove("records").unwrap();
        assert!(!prefs.contains("records").unwrap());
        prefs.remove("records").unwrap();
    }

    #[test]
    fn with_entry_prepopulates() {
        let prefs = InMemoryPreferences::with_entry("records", "x");
        assert_eq!(prefs.get_string("records").unwrap().as_deref(), Some("x"));
    }
}
