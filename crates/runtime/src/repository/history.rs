//! Match history stored as a single line-format slot in a preference store.

use game_core::MatchRecord;
use game_core::behavior::codec;

use super::{HistoryRepository, PreferenceStore, Result};

/// [`HistoryRepository`] backed by one string slot of a [`PreferenceStore`].
pub struct PreferenceHistory<S> {
    store: S,
    key: String,
}

impl<S: PreferenceStore> PreferenceHistory<S> {
    pub const DEFAULT_KEY: &'static str = "records";

    pub fn new(store: S) -> Self {
        Self::with_key(store, Self::DEFAULT_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: PreferenceStore> HistoryRepository for PreferenceHistory<S> {
    fn load(&self) -> Result<Vec<MatchRecord>> {
        let Some(raw) = self.store.get_string(&self.key)? else {
            return Ok(Vec::new());
        };

        let mut records = Vec::new();
        for (line_no, parsed) in codec::decode_lines(&raw) {
            match parsed {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!("Skipping history line {} in '{}': {}", line_no, self.key, err)
                }
            }
        }

        Ok(records)
    }

    fn save(&self, records: &[MatchRecord]) -> Result<()> {
        let encoded = codec::encode_history(records)?;
        self.store.put_string(&self.key, encoded)?;
        self.store.flush()
    }
}
