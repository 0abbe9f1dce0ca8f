//! Pure enemy-AI and player-behavior logic shared across the game.
//!
//! `game-core` defines the decision engine that drives every enemy and the
//! value types of the player behavior model. It performs no I/O: the runtime
//! crate owns the tracker state, persistence, and per-session orchestration,
//! and depends on the types re-exported here.
pub mod ai;
pub mod behavior;
pub mod config;
pub mod math;

pub use ai::{EnemyAction, EnemyDecisionEngine, Maneuver, PatrolState, Projectile, TacticalState};
pub use behavior::{
    BehaviorSnapshot, Difficulty, Ema, MatchRecord, RecordFormatError, RecordParseError,
};
pub use config::{AiConfig, BehaviorConfig};
pub use math::Vec2;
