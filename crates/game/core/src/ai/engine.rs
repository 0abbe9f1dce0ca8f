//! Per-enemy decision engine.
//!
//! Each tick the engine turns a [`TacticalState`] into one [`EnemyAction`]:
//!
//! 1. Count the patrol timer down (always, whatever branch is taken)
//! 2. Target outside vision: keep patrolling, drawing a new heading when the
//!    timer runs out
//! 3. Target in vision: dodge incoming fire if able, otherwise pursue until
//!    within standoff range and then shoot
//!
//! [`EnemyDecisionEngine::decide_action_adaptive`] scales vision, standoff
//! range, pursuit urgency, evasion gating and aim jitter with the player's
//! [`BehaviorSnapshot`]. Without a snapshot it falls back to
//! [`EnemyDecisionEngine::decide_action`], the fixed-threshold variant.
//!
//! Engines share no state with each other. Randomness comes from the engine's
//! own generator so tests can pin it with a seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::types::{EnemyAction, Maneuver, PatrolState, Projectile, TacticalState};
use crate::behavior::BehaviorSnapshot;
use crate::config::AiConfig;
use crate::math::{Vec2, clamp01, has_direction, heading_deg, lerp};

/// Decision state owned by a single enemy for its whole lifetime.
#[derive(Clone, Debug)]
pub struct EnemyDecisionEngine<R = ChaCha8Rng> {
    /// Whether the enemy can sidestep projectiles perpendicular to their path.
    evasive: bool,
    config: AiConfig,
    patrol: PatrolState,
    last_maneuver: Maneuver,
    rng: R,
}

impl EnemyDecisionEngine<ChaCha8Rng> {
    /// Engine with default tunables and an entropy-seeded generator.
    pub fn new(evasive: bool) -> Self {
        Self::with_rng(evasive, AiConfig::default(), ChaCha8Rng::from_entropy())
    }

    /// Engine whose random draws are fully determined by `seed`.
    pub fn seeded(evasive: bool, config: AiConfig, seed: u64) -> Self {
        Self::with_rng(evasive, config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> EnemyDecisionEngine<R> {
    pub fn with_rng(evasive: bool, config: AiConfig, rng: R) -> Self {
        Self {
            evasive,
            config,
            patrol: PatrolState::default(),
            last_maneuver: Maneuver::Patrol,
            rng,
        }
    }

    pub fn is_evasive(&self) -> bool {
        self.evasive
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn patrol(&self) -> &PatrolState {
        &self.patrol
    }

    /// Overrides the patrol heading and timer (e.g. after a respawn).
    pub fn set_patrol(&mut self, patrol: PatrolState) {
        self.patrol = patrol;
    }

    /// Branch that produced the most recent action.
    pub fn last_maneuver(&self) -> Maneuver {
        self.last_maneuver
    }

    /// Detection radius against a player with the given profile.
    ///
    /// More aggressive players are noticed from farther away.
    pub fn vision_range(&self, base_vision_range: f32, snapshot: &BehaviorSnapshot) -> f32 {
        let aggression = clamp01(snapshot.aggression());
        base_vision_range * (1.0 + aggression * self.config.vision_aggression_gain)
    }

    /// Standoff distance at which the enemy stops closing in and starts firing.
    ///
    /// Accurate players push the standoff outward.
    pub fn engagement_distance(&self, snapshot: &BehaviorSnapshot) -> f32 {
        lerp(
            self.config.engagement_near,
            self.config.engagement_far,
            clamp01(snapshot.accuracy()),
        )
    }

    /// Adaptive decision for one tick.
    ///
    /// `snapshot` is `None` until the player has produced telemetry; the
    /// engine then behaves exactly like [`Self::decide_action`].
    pub fn decide_action_adaptive(
        &mut self,
        state: &TacticalState<'_>,
        base_vision_range: f32,
        snapshot: Option<&BehaviorSnapshot>,
        delta: f32,
    ) -> EnemyAction {
        self.patrol.advance(delta);

        let Some(snapshot) = snapshot else {
            return self.react(state, base_vision_range);
        };

        let aggression = clamp01(snapshot.aggression());
        let accuracy = clamp01(snapshot.accuracy());
        let preferred_distance = clamp01(snapshot.preferred_distance());

        let distance = state.distance_to_target();
        let vision = self.vision_range(base_vision_range, snapshot);
        let engagement = self.engagement_distance(snapshot);

        if distance >= vision {
            return self.patrol_action();
        }

        self.patrol.hold(self.config.detection_hold_secs);

        let evasion_unlocked = self.evasive
            && (accuracy > self.config.evasion_accuracy_threshold
                || aggression > self.config.evasion_aggression_threshold);
        if evasion_unlocked
            && let Some(dodge) = self.evade_bullets(state)
            && self.rng.gen_bool(clamp01(self.config.evasion_chance) as f64)
        {
            return self.finish(Maneuver::Evade, EnemyAction::moving(dodge));
        }

        let to_target = state.direction_to_target();
        if distance > engagement {
            let urgency = 1.0 + preferred_distance * self.config.pursuit_distance_gain;
            return self.finish(Maneuver::Pursue, EnemyAction::moving(to_target * urgency));
        }

        let aim = self.aim_with_strafe(to_target, accuracy);
        self.finish(Maneuver::Attack, EnemyAction::shooting(aim))
    }

    /// Fixed-threshold decision for one tick, used when no player profile exists.
    pub fn decide_action(
        &mut self,
        state: &TacticalState<'_>,
        vision_range: f32,
        delta: f32,
    ) -> EnemyAction {
        self.patrol.advance(delta);
        self.react(state, vision_range)
    }

    /// Sidestep for the nearest projectile within the evade radius.
    ///
    /// Returns the unit vector perpendicular `(-dy, dx)` to that projectile's
    /// heading, or `None` when nothing is close enough. A projectile with no
    /// heading yields [`Vec2::ZERO`]: the enemy holds still rather than
    /// falling through to pursuit. Ties on distance go to the earliest
    /// projectile.
    pub fn evade_bullets(&self, state: &TacticalState<'_>) -> Option<Vec2> {
        let nearest = nearest_projectile(
            state.projectiles,
            state.self_position,
            self.config.evade_radius,
        )?;
        Some(nearest.direction.normalize_or_zero().perp())
    }

    /// Non-adaptive body shared by both entry points. The timer has already
    /// been advanced by the caller.
    fn react(&mut self, state: &TacticalState<'_>, vision_range: f32) -> EnemyAction {
        let distance = state.distance_to_target();
        if distance >= vision_range {
            return self.patrol_action();
        }

        self.patrol.hold(self.config.detection_hold_secs);

        if self.evasive {
            if let Some(dodge) = self.evade_bullets(state) {
                return self.finish(Maneuver::Evade, EnemyAction::moving(dodge));
            }
        } else if self.senses_incoming(state) {
            return self.finish(Maneuver::Dodge, EnemyAction::Move(Vec2::new(-1.0, 0.0)));
        }

        let to_target = state.direction_to_target();
        if distance > self.config.shoot_distance {
            self.finish(Maneuver::Pursue, EnemyAction::moving(to_target))
        } else {
            self.finish(Maneuver::Attack, EnemyAction::shooting(to_target))
        }
    }

    /// Simple danger heuristic: a close projectile heading roughly at us.
    fn senses_incoming(&self, state: &TacticalState<'_>) -> bool {
        state.projectiles.iter().any(|projectile| {
            let offset = state.self_position - projectile.position;
            offset.length() < self.config.danger_radius
                && projectile
                    .direction
                    .normalize_or_zero()
                    .dot(offset.normalize_or_zero())
                    > self.config.danger_alignment
        })
    }

    fn patrol_action(&mut self) -> EnemyAction {
        if self.patrol.is_expired() {
            self.patrol.direction = heading_deg(self.rng.gen_range(0.0..360.0));
            self.patrol.time_remaining = self.draw_patrol_duration();
        }
        self.finish(Maneuver::Patrol, EnemyAction::moving(self.patrol.direction))
    }

    fn draw_patrol_duration(&mut self) -> f32 {
        let (min, max) = (self.config.patrol_min_secs, self.config.patrol_max_secs);
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Mixes a random lateral offset into the aim against precise players.
    fn aim_with_strafe(&mut self, aim: Vec2, accuracy: f32) -> Vec2 {
        let threshold = self.config.strafe_accuracy_threshold;
        if accuracy <= threshold || !has_direction(aim) {
            return aim;
        }

        let max_offset = (accuracy - threshold) * self.config.strafe_gain;
        if max_offset <= 0.0 {
            return aim;
        }

        let magnitude = self.rng.gen_range(0.0..=max_offset);
        let side = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        (aim + aim.perp() * (magnitude * side)).normalize_or_zero()
    }

    fn finish(&mut self, maneuver: Maneuver, action: EnemyAction) -> EnemyAction {
        self.last_maneuver = match action {
            EnemyAction::Idle => Maneuver::Hold,
            _ => maneuver,
        };
        action
    }
}

/// Strictly nearest projectile closer than `radius`; the first one wins ties.
fn nearest_projectile(projectiles: &[Projectile], origin: Vec2, radius: f32) -> Option<&Projectile> {
    let mut best: Option<(&Projectile, f32)> = None;
    for projectile in projectiles {
        let distance = projectile.position.distance(origin);
        if distance >= radius {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((projectile, distance)),
        }
    }
    best.map(|(projectile, _)| projectile)
}
