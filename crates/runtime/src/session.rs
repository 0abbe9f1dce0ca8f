//! Per-match context tying the behavior tracker to the enemies it informs.
//!
//! A [`MatchSession`] is created at match start (seeding the tracker from
//! history), driven once per tick by the game loop, and consumed by
//! [`MatchSession::finish`], which persists the match record. Consuming the
//! session makes a second finalization impossible.
//!
//! Per tick the world should:
//!
//! 1. Call [`MatchSession::advance`] with the frame delta
//! 2. Forward player shots and hits as they happen
//! 3. Ask [`MatchSession::decide`] (or [`MatchSession::decide_all`]) for each
//!    enemy's action
//!
//! Every enemy reads the same snapshot for the whole tick.

use std::collections::BTreeMap;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use game_core::{
    AiConfig, BehaviorConfig, BehaviorSnapshot, EnemyAction, EnemyDecisionEngine, MatchRecord,
    TacticalState, Vec2,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::repository::HistoryRepository;
use crate::tracker::PlayerBehaviorTracker;

/// Handle for an enemy registered in a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u32);

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One enemy's input for a batched [`MatchSession::decide_all`].
#[derive(Clone, Copy, Debug)]
pub struct EnemyTick<'a> {
    pub enemy: EnemyId,
    pub state: TacticalState<'a>,
}

/// Explicit context for one match.
pub struct MatchSession<H> {
    tracker: PlayerBehaviorTracker<H>,
    ai_config: AiConfig,
    evasive_by_default: bool,
    enemies: BTreeMap<EnemyId, EnemyDecisionEngine>,
    next_enemy: u32,
    rng: ChaCha8Rng,
    snapshot: Option<BehaviorSnapshot>,
    tick: u64,
}

impl<H: HistoryRepository> MatchSession<H> {
    /// Create a new session builder over `history`.
    pub fn builder(history: H) -> MatchSessionBuilder<H> {
        MatchSessionBuilder::new(history)
    }

    /// Register an enemy using the session's default evasion capability.
    pub fn spawn_enemy(&mut self) -> EnemyId {
        self.spawn_enemy_with(self.evasive_by_default)
    }

    /// Register an enemy with explicit evasion capability.
    pub fn spawn_enemy_with(&mut self, evasive: bool) -> EnemyId {
        let id = EnemyId(self.next_enemy);
        self.next_enemy = self.next_enemy.wrapping_add(1);

        let seed = self.rng.r#gen::<u64>();
        let engine = EnemyDecisionEngine::seeded(evasive, self.ai_config.clone(), seed);
        self.enemies.insert(id, engine);

        tracing::debug!("Spawned enemy {} (evasive={})", id, evasive);
        id
    }

    /// Remove an enemy and drop its decision state.
    pub fn despawn_enemy(&mut self, enemy: EnemyId) -> Result<()> {
        self.enemies
            .remove(&enemy)
            .map(|_| tracing::debug!("Despawned enemy {}", enemy))
            .ok_or(RuntimeError::UnknownEnemy(enemy))
    }

    /// Advance the match clock and refresh the shared snapshot.
    ///
    /// The snapshot stays absent until the tracker has telemetry, which keeps
    /// enemies on the fixed-threshold fallback.
    pub fn advance(&mut self, delta: f32) {
        self.tracker.update_frame(delta);
        self.snapshot = self
            .tracker
            .has_telemetry()
            .then(|| self.tracker.snapshot());
        self.tick = self.tick.wrapping_add(1);

        if let Some(snapshot) = &self.snapshot {
            tracing::debug!(
                "Tick {}: aggression={:.3} accuracy={:.3} distance={:.3}",
                self.tick,
                snapshot.aggression(),
                snapshot.accuracy(),
                snapshot.preferred_distance()
            );
        }
    }

    /// Decide one enemy's action for the current tick.
    pub fn decide(
        &mut self,
        enemy: EnemyId,
        state: &TacticalState<'_>,
        base_vision_range: f32,
        delta: f32,
    ) -> Result<EnemyAction> {
        let engine = self
            .enemies
            .get_mut(&enemy)
            .ok_or(RuntimeError::UnknownEnemy(enemy))?;

        let action =
            engine.decide_action_adaptive(state, base_vision_range, self.snapshot.as_ref(), delta);
        tracing::debug!(
            "Enemy {} chose {:?} ({:?})",
            enemy,
            action,
            engine.last_maneuver()
        );

        Ok(action)
    }

    /// Decide for a batch of enemies, in input order.
    ///
    /// Fails on the first unknown enemy; engines decided before it keep
    /// their advanced state.
    pub fn decide_all<'a>(
        &mut self,
        ticks: impl IntoIterator<Item = EnemyTick<'a>>,
        base_vision_range: f32,
        delta: f32,
    ) -> Result<Vec<(EnemyId, EnemyAction)>> {
        ticks
            .into_iter()
            .map(|tick| {
                self.decide(tick.enemy, &tick.state, base_vision_range, delta)
                    .map(|action| (tick.enemy, action))
            })
            .collect()
    }

    pub fn on_player_shot(&mut self, shooter: Vec2, nearest_target: Option<Vec2>) {
        self.tracker.on_player_shot(shooter, nearest_target);
    }

    pub fn on_player_hit_enemy(&mut self) {
        self.tracker.on_player_hit_enemy();
    }

    /// End the match and persist its record, stamped with the wall clock.
    pub fn finish(self, score: u32, difficulty: &str, win: bool) -> Result<MatchRecord> {
        self.log_finish();
        self.tracker.finalize_and_persist(score, difficulty, win)
    }

    /// End the match with an explicit epoch-millis timestamp.
    pub fn finish_at(
        self,
        timestamp: i64,
        score: u32,
        difficulty: &str,
        win: bool,
    ) -> Result<MatchRecord> {
        self.log_finish();
        self.tracker
            .finalize_and_persist_at(timestamp, score, difficulty, win)
    }

    fn log_finish(&self) {
        tracing::info!(
            "Finishing match after {} tick(s), {:.1}s, {} enemy(ies) alive",
            self.tick,
            self.tracker.game_time(),
            self.enemies.len()
        );
    }
}

impl<H> MatchSession<H> {
    pub fn tracker(&self) -> &PlayerBehaviorTracker<H> {
        &self.tracker
    }

    /// Snapshot shared by every enemy this tick.
    pub fn snapshot(&self) -> Option<&BehaviorSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn enemy(&self, enemy: EnemyId) -> Option<&EnemyDecisionEngine> {
        self.enemies.get(&enemy)
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }
}

/// Builder for [`MatchSession`].
pub struct MatchSessionBuilder<H> {
    history: H,
    behavior: BehaviorConfig,
    ai: AiConfig,
    evasive_by_default: bool,
    rng_seed: Option<u64>,
}

impl<H: HistoryRepository> MatchSessionBuilder<H> {
    fn new(history: H) -> Self {
        Self {
            history,
            behavior: BehaviorConfig::default(),
            ai: AiConfig::default(),
            evasive_by_default: true,
            rng_seed: None,
        }
    }

    /// Take tracker, AI and spawn settings from a runtime configuration.
    pub fn config(mut self, config: &RuntimeConfig) -> Self {
        self.behavior = config.behavior.clone();
        self.ai = config.ai.clone();
        self.evasive_by_default = config.evasive_enemies;
        self
    }

    pub fn behavior_config(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn ai_config(mut self, ai: AiConfig) -> Self {
        self.ai = ai;
        self
    }

    /// Evasion capability for [`MatchSession::spawn_enemy`].
    pub fn evasive_by_default(mut self, evasive: bool) -> Self {
        self.evasive_by_default = evasive;
        self
    }

    /// Make every enemy's random draws reproducible.
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Seed the tracker from history and create the session.
    pub fn build(self) -> Result<MatchSession<H>> {
        let tracker = PlayerBehaviorTracker::new(self.history, self.behavior)?;
        let rng = match self.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(MatchSession {
            tracker,
            ai_config: self.ai,
            evasive_by_default: self.evasive_by_default,
            enemies: BTreeMap::new(),
            next_enemy: 0,
            rng,
            snapshot: None,
            tick: 0,
        })
    }
}
