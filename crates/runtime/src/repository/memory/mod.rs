//! In-memory repository implementations for testing and development.

mod preferences;

pub use preferences::InMemoryPreferences;
