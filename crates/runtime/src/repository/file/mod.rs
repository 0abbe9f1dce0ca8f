//! File-based repository implementations.

mod preferences;

pub use preferences::FilePreferences;
