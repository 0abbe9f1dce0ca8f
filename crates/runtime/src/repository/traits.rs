//! Repository contracts for the player's persisted behavior history.

use std::sync::Arc;

use game_core::MatchRecord;

use super::Result;

/// Named key-value slot store, modeled on platform "preferences" storage.
///
/// Writes may be buffered; they are only guaranteed durable after
/// [`PreferenceStore::flush`] returns.
pub trait PreferenceStore: Send + Sync {
    /// Read a string slot, `None` when it was never written.
    fn get_string(&self, key: &str) -> Result<Option<String>>;

    /// Replace a string slot.
    fn put_string(&self, key: &str, value: String) -> Result<()>;

    /// Remove a slot. Removing a missing slot is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Persist buffered writes.
    fn flush(&self) -> Result<()>;

    /// Check if a slot holds a value
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get_string(key)?.is_some())
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Arc<S> {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        (**self).get_string(key)
    }

    fn put_string(&self, key: &str, value: String) -> Result<()> {
        (**self).put_string(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }
}

/// Repository for the bounded match history.
///
/// The history is an append-only log ordered oldest first. Implementations
/// must never fail a load because of individually corrupt records; those are
/// skipped.
pub trait HistoryRepository: Send + Sync {
    /// Load every readable record, oldest first.
    fn load(&self) -> Result<Vec<MatchRecord>>;

    /// Replace the stored history with `records`.
    fn save(&self, records: &[MatchRecord]) -> Result<()>;

    /// Append a record, evicting the oldest entries beyond `max_records`.
    ///
    /// Returns the number of evicted records.
    fn append(&self, record: MatchRecord, max_records: usize) -> Result<usize> {
        let mut history = self.load()?;
        history.push(record);

        let evicted = history.len().saturating_sub(max_records);
        if evicted > 0 {
            history.drain(..evicted);
        }

        self.save(&history)?;
        Ok(evicted)
    }

    /// Drop the whole history.
    fn clear(&self) -> Result<()> {
        self.save(&[])
    }
}
