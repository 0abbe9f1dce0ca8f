//! Session orchestration and persistence for the adaptive enemy AI.
//!
//! This crate owns everything around the pure logic in `game-core` that has
//! state or touches storage. A game loop embeds one [`MatchSession`] per
//! match: it seeds a [`PlayerBehaviorTracker`] from the persisted history,
//! feeds one shared snapshot per tick to every enemy's decision engine, and
//! appends a [`MatchRecord`](game_core::MatchRecord) when the match ends.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the per-match context and its builder
//! - [`tracker`] models the player's play style
//! - [`repository`] provides preference stores and the history adapter
//! - [`config`] loads runtime settings from the environment
pub mod config;
pub mod error;
pub mod repository;
pub mod session;
pub mod tracker;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use repository::{
    FilePreferences, HistoryRepository, InMemoryPreferences, PreferenceHistory, PreferenceStore,
    RepositoryError,
};
pub use session::{EnemyId, EnemyTick, MatchSession, MatchSessionBuilder};
pub use tracker::PlayerBehaviorTracker;
