//! Inputs and outputs of the enemy decision engine.

use crate::math::{Vec2, has_direction};

/// A live projectile the enemy may need to dodge.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projectile {
    pub position: Vec2,
    /// Heading of travel. Need not be unit length; it is normalized on use.
    pub direction: Vec2,
}

impl Projectile {
    pub fn new(position: Vec2, direction: Vec2) -> Self {
        Self {
            position,
            direction,
        }
    }
}

/// Per-tick tactical picture for one enemy, borrowed from the world.
#[derive(Clone, Copy, Debug)]
pub struct TacticalState<'a> {
    /// Position of the deciding enemy.
    pub self_position: Vec2,
    /// Position of the player being hunted.
    pub target_position: Vec2,
    /// Every active projectile on the map.
    pub projectiles: &'a [Projectile],
}

impl<'a> TacticalState<'a> {
    pub fn new(self_position: Vec2, target_position: Vec2, projectiles: &'a [Projectile]) -> Self {
        Self {
            self_position,
            target_position,
            projectiles,
        }
    }

    pub fn distance_to_target(&self) -> f32 {
        self.self_position.distance(self.target_position)
    }

    /// Unit vector from self toward the target, zero when they coincide.
    pub fn direction_to_target(&self) -> Vec2 {
        (self.target_position - self.self_position).normalize_or_zero()
    }
}

/// What an enemy does this tick. The world applies the consequences.
///
/// A `Move` direction is unit length except when pursuing an adaptive
/// target, where its magnitude (≥ 1) encodes how hard the enemy closes in.
/// `Shoot` directions are always unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyAction {
    Idle,
    Move(Vec2),
    Shoot(Vec2),
}

impl EnemyAction {
    /// Movement along `direction`, or `Idle` when it has no length.
    pub fn moving(direction: Vec2) -> Self {
        if has_direction(direction) {
            EnemyAction::Move(direction)
        } else {
            EnemyAction::Idle
        }
    }

    /// A shot along `direction`, or `Idle` when it has no length.
    pub fn shooting(direction: Vec2) -> Self {
        let direction = direction.normalize_or_zero();
        if has_direction(direction) {
            EnemyAction::Shoot(direction)
        } else {
            EnemyAction::Idle
        }
    }
}

/// Which branch of the decision process produced the last action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Maneuver {
    /// Target out of sight: wandering along the patrol heading.
    Patrol,
    /// Sidestepping the nearest projectile perpendicular to its path.
    Evade,
    /// Fixed leftward hop of engines without evasion capability.
    Dodge,
    /// Closing distance to the target.
    Pursue,
    /// Firing at the target.
    Attack,
    /// Degenerate geometry (e.g. standing on the target): nothing to do.
    Hold,
}

/// Patrol heading and the time left before a new one is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatrolState {
    pub direction: Vec2,
    pub time_remaining: f32,
}

impl PatrolState {
    pub fn new(direction: Vec2, time_remaining: f32) -> Self {
        Self {
            direction,
            time_remaining,
        }
    }

    /// Counts the timer down by one tick.
    pub fn advance(&mut self, delta: f32) {
        self.time_remaining -= delta.max(0.0);
    }

    /// Keeps the timer at or above `floor` while the target is in sight.
    pub fn hold(&mut self, floor: f32) {
        self.time_remaining = self.time_remaining.max(floor);
    }

    pub fn is_expired(&self) -> bool {
        self.time_remaining <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_actions_collapse_to_idle() {
        assert_eq!(EnemyAction::moving(Vec2::ZERO), EnemyAction::Idle);
        assert_eq!(EnemyAction::shooting(Vec2::ZERO), EnemyAction::Idle);
    }

    #[test]
    fn shooting_normalizes_direction() {
        let action = EnemyAction::shooting(Vec2::new(0.0, 5.0));
        assert_eq!(action, EnemyAction::Shoot(Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn direction_to_coincident_target_is_zero() {
        let state = TacticalState::new(Vec2::new(4.0, 4.0), Vec2::new(4.0, 4.0), &[]);
        assert_eq!(state.direction_to_target(), Vec2::ZERO);
        assert_eq!(state.distance_to_target(), 0.0);
    }

    #[test]
    fn patrol_hold_only_raises_the_timer() {
        let mut patrol = PatrolState::new(Vec2::new(1.0, 0.0), 0.2);
        patrol.hold(1.0);
        assert_eq!(patrol.time_remaining, 1.0);

        patrol.time_remaining = 3.0;
        patrol.hold(1.0);
        assert_eq!(patrol.time_remaining, 3.0);
    }

    #[test]
    fn patrol_advance_expires_timer() {
        let mut patrol = PatrolState::new(Vec2::new(1.0, 0.0), 0.5);
        patrol.advance(0.25);
        assert!(!patrol.is_expired());
        patrol.advance(0.25);
        assert!(patrol.is_expired());
    }
}
