//! Enemy decision-making.
//!
//! - [`EnemyDecisionEngine`]: per-enemy state machine (patrol, evade, pursue, attack)
//! - [`TacticalState`] / [`Projectile`]: the world's per-tick input
//! - [`EnemyAction`]: the single action handed back to the world each tick
//! - [`Maneuver`]: which branch produced it, for logging and tests

mod engine;
mod types;

pub use engine::EnemyDecisionEngine;
pub use types::{EnemyAction, Maneuver, PatrolState, Projectile, TacticalState};
