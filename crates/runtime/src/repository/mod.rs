//! Repository layer for the persisted player behavior history.
//!
//! - [`PreferenceStore`] abstracts named string slots (file-backed or in-memory)
//! - [`HistoryRepository`] is the bounded, oldest-first match log
//! - [`PreferenceHistory`] stores that log as line-format text in one slot

mod error;
mod history;
mod traits;

pub mod file;
pub mod memory;

pub use error::{RepositoryError, Result};
pub use file::FilePreferences;
pub use history::PreferenceHistory;
pub use memory::InMemoryPreferences;
pub use traits::{HistoryRepository, PreferenceStore};
