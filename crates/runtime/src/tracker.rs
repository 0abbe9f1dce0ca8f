//! Live model of how the player fights.
//!
//! [`PlayerBehaviorTracker`] folds shot and hit events into smoothed running
//! metrics and turns them into a [`BehaviorSnapshot`] on demand. At
//! construction it seeds those metrics from the persisted match history so a
//! returning player is not treated as a newcomer; at match end it appends one
//! [`MatchRecord`] to that history.

use game_core::{BehaviorConfig, BehaviorSnapshot, Ema, MatchRecord, Vec2};

use crate::error::Result;
use crate::repository::HistoryRepository;

/// Per-session accumulator of player combat telemetry.
pub struct PlayerBehaviorTracker<H> {
    history: H,
    config: BehaviorConfig,
    total_shots: u32,
    total_hits: u32,
    /// Accumulated session time in seconds; never decreases.
    game_time: f32,
    last_shot_time: Option<f32>,
    shot_frequency: Ema,
    preferred_distance: Ema,
}

impl<H: HistoryRepository> PlayerBehaviorTracker<H> {
    /// Creates a tracker and seeds it from `history`.
    ///
    /// Corrupt history lines are skipped; only storage failures are errors.
    pub fn new(history: H, config: BehaviorConfig) -> Result<Self> {
        let mut tracker = Self {
            shot_frequency: Ema::new(config.shot_frequency_alpha),
            preferred_distance: Ema::new(config.distance_alpha),
            history,
            config,
            total_shots: 0,
            total_hits: 0,
            game_time: 0.0,
            last_shot_time: None,
        };
        tracker.seed_from_history()?;
        Ok(tracker)
    }

    /// Advances the session clock. Call once per tick, whether or not the
    /// player acted. Negative or non-finite deltas are ignored.
    pub fn update_frame(&mut self, delta: f32) {
        if delta.is_finite() && delta > 0.0 {
            self.game_time += delta;
        }
    }

    /// Records a player shot fired from `shooter`, optionally at the nearest
    /// enemy position.
    pub fn on_player_shot(&mut self, shooter: Vec2, nearest_target: Option<Vec2>) {
        self.total_shots = self.total_shots.saturating_add(1);

        if let Some(target) = nearest_target {
            let distance = shooter.distance(target);
            if distance.is_finite() {
                self.preferred_distance.update(distance);
            }
        }

        if let Some(last) = self.last_shot_time {
            let interval = (self.game_time - last).max(self.config.min_shot_interval);
            self.shot_frequency.update(1.0 / interval);
        }

        self.last_shot_time = Some(self.game_time);
    }

    pub fn on_player_hit_enemy(&mut self) {
        self.total_hits = self.total_hits.saturating_add(1);
    }

    /// Current normalized view of the player. Pure; call as often as needed.
    pub fn snapshot(&self) -> BehaviorSnapshot {
        let accuracy = if self.total_shots > 0 {
            self.total_hits as f32 / self.total_shots as f32
        } else {
            0.0
        };
        let aggression = self.shot_frequency.value() / self.config.reference_shot_frequency;
        let preferred_distance = self.preferred_distance.value() / self.config.reference_distance;

        BehaviorSnapshot::new(aggression, accuracy, preferred_distance)
    }

    /// Whether any telemetry exists, live or seeded from history.
    pub fn has_telemetry(&self) -> bool {
        self.total_shots > 0
            || !self.shot_frequency.is_empty()
            || !self.preferred_distance.is_empty()
    }

    /// Appends this match to the history, stamped with the current wall clock.
    pub fn finalize_and_persist(
        &self,
        score: u32,
        difficulty: &str,
        win: bool,
    ) -> Result<MatchRecord> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        self.finalize_and_persist_at(timestamp, score, difficulty, win)
    }

    /// Appends this match to the history with an explicit epoch-millis
    /// timestamp, evicting the oldest records beyond the configured cap.
    ///
    /// Calling this twice appends twice.
    pub fn finalize_and_persist_at(
        &self,
        timestamp: i64,
        score: u32,
        difficulty: &str,
        win: bool,
    ) -> Result<MatchRecord> {
        let record =
            MatchRecord::from_snapshot(timestamp, score, difficulty, win, &self.snapshot());
        let max_records = self.config.max_records.max(1);
        let evicted = self.history.append(record.clone(), max_records)?;

        tracing::info!(
            "Persisted match record (score={}, difficulty={}, win={}, aggression={:.3}, accuracy={:.3}, distance={:.3})",
            record.score,
            record.difficulty,
            record.win,
            record.aggression,
            record.accuracy,
            record.preferred_distance
        );
        if evicted > 0 {
            tracing::info!(
                "Evicted {} oldest match record(s) beyond cap {}",
                evicted,
                max_records
            );
        }

        Ok(record)
    }

    /// Every readable persisted record, oldest first.
    pub fn load_history(&self) -> Result<Vec<MatchRecord>> {
        Ok(self.history.load()?)
    }

    fn seed_from_history(&mut self) -> Result<()> {
        let records = self.history.load()?;
        if records.is_empty() {
            tracing::debug!("No match history; tracker starts from zero");
            return Ok(());
        }

        let mean_aggression = mean(&records, |r| r.aggression);
        let mean_accuracy = mean(&records, |r| r.accuracy);
        let mean_distance = mean(&records, |r| r.preferred_distance);

        self.shot_frequency
            .seed((mean_aggression * self.config.reference_shot_frequency as f64) as f32);
        self.preferred_distance
            .seed((mean_distance * self.config.reference_distance as f64) as f32);

        if mean_accuracy > 0.0 {
            let shots = self.config.seed_sample_shots;
            let hits = (mean_accuracy * shots as f64).round().clamp(0.0, shots as f64);
            self.total_shots = shots;
            self.total_hits = hits as u32;
        }

        tracing::debug!(
            "Seeded tracker from {} record(s): shot_frequency={:.3}, distance={:.1}, baseline={}/{}",
            records.len(),
            self.shot_frequency.value(),
            self.preferred_distance.value(),
            self.total_hits,
            self.total_shots
        );

        Ok(())
    }
}

impl<H> PlayerBehaviorTracker<H> {
    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn total_shots(&self) -> u32 {
        self.total_shots
    }

    pub fn total_hits(&self) -> u32 {
        self.total_hits
    }

    pub fn game_time(&self) -> f32 {
        self.game_time
    }

    /// Session time of the latest shot, `None` before the first one.
    pub fn last_shot_time(&self) -> Option<f32> {
        self.last_shot_time
    }

    /// Smoothed shots per second.
    pub fn shot_frequency(&self) -> f32 {
        self.shot_frequency.value()
    }

    /// Smoothed firing distance in world units.
    pub fn preferred_distance(&self) -> f32 {
        self.preferred_distance.value()
    }
}

fn mean(records: &[MatchRecord], metric: impl Fn(&MatchRecord) -> f32) -> f64 {
    let sum: f64 = records.iter().map(|r| metric(r) as f64).sum();
    sum / records.len() as f64
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use game_core::Difficulty;

    use super::*;
    use crate::repository::{InMemoryPreferences, PreferenceHistory};

    type MemoryHistory = PreferenceHistory<Arc<InMemoryPreferences>>;

    fn empty_history() -> MemoryHistory {
        PreferenceHistory::new(Arc::new(InMemoryPreferences::new()))
    }

    fn history_with(raw: &str) -> MemoryHistory {
        PreferenceHistory::new(Arc::new(InMemoryPreferences::with_entry("records", raw)))
    }

    #[test]
    fn empty_history_starts_from_zero() {
        let tracker = PlayerBehaviorTracker::new(empty_history(), BehaviorConfig::default()).unwrap();

        assert_eq!(tracker.shot_frequency(), 0.0);
        assert_eq!(tracker.preferred_distance(), 0.0);
        assert_eq!(tracker.total_shots(), 0);
        assert_eq!(tracker.snapshot(), BehaviorSnapshot::new(0.0, 0.0, 0.0));
        assert!(!tracker.has_telemetry());
    }

    #[test]
    fn seeding_uses_history_means() {
        let raw = "\
1,100,Easy,1,0.4000,0.2000,0.6000,1
2,100,Easy,0,0.6000,0.3000,0.4000,1
";
        let tracker = PlayerBehaviorTracker::new(history_with(raw), BehaviorConfig::default()).unwrap();

        assert!((tracker.shot_frequency() - 1.5).abs() < 1e-5);
        assert!((tracker.preferred_distance() - 150.0).abs() < 1e-3);
        assert_eq!(tracker.total_shots(), 100);
        assert_eq!(tracker.total_hits(), 25);
        assert!(tracker.has_telemetry());

        let snap = tracker.snapshot();
        assert!((snap.aggression() - 0.5).abs() < 1e-5);
        assert!((snap.accuracy() - 0.25).abs() < 1e-6);
        assert!((snap.preferred_distance() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn zero_historical_accuracy_synthesizes_no_shots() {
        let raw = "1,100,Easy,1,0.5000,0.0000,0.5000,1\n";
        let tracker = PlayerBehaviorTracker::new(history_with(raw), BehaviorConfig::default()).unwrap();

        assert_eq!(tracker.total_shots(), 0);
        assert_eq!(tracker.total_hits(), 0);
        assert_eq!(tracker.snapshot().accuracy(), 0.0);
    }

    #[test]
    fn first_shot_sets_distance_exactly() {
        let mut tracker =
            PlayerBehaviorTracker::new(empty_history(), BehaviorConfig::default()).unwrap();
        tracker.on_player_shot(Vec2::new(0.0, 0.0), Some(Vec2::new(30.0, 40.0)));

        assert_eq!(tracker.preferred_distance(), 50.0);
        assert_eq!(tracker.last_shot_time(), Some(0.0));
        // A single shot has no interval yet.
        assert_eq!(tracker.shot_frequency(), 0.0);
    }

    #[test]
    fn later_distances_blend_with_alpha() {
        let mut tracker =
            PlayerBehaviorTracker::new(empty_history(), BehaviorConfig::default()).unwrap();
        tracker.on_player_shot(Vec2::ZERO, Some(Vec2::new(100.0, 0.0)));
        tracker.on_player_shot(Vec2::ZERO, Some(Vec2::new(200.0, 0.0)));

        // 100 * 0.92 + 200 * 0.08
        assert!((tracker.preferred_distance() - 108.0).abs() < 1e-3);
    }

    #[test]
    fn shot_without_target_leaves_distance_untouched() {
        let mut tracker =
            PlayerBehaviorTracker::new(empty_history(), BehaviorConfig::default()).unwrap();
        tracker.on_player_shot(Vec2::ZERO, None);

        assert_eq!(tracker.total_shots(), 1);
        assert_eq!(tracker.preferred_distance(), 0.0);
    }

    #[test]
    fn shot_interval_drives_aggression() {
        let mut tracker =
            PlayerBehaviorTracker::new(empty_history(), BehaviorConfig::default()).unwrap();
        tracker.on_player_shot(Vec2::ZERO, None);
        tracker.update_frame(0.5);
        tracker.on_player_shot(Vec2::ZERO, None);

        assert!((tracker.shot_frequency() - 2.0).abs() < 1e-5);
        assert!((tracker.snapshot().aggression() - 2.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn simultaneous_shots_do_not_divide_by_zero() {
        let mut tracker =
            PlayerBehaviorTracker::new(empty_history(), BehaviorConfig::default()).unwrap();
        tracker.on_player_shot(Vec2::ZERO, None);
        tracker.on_player_shot(Vec2::ZERO, None);

        assert!(tracker.shot_frequency().is_finite());
        assert!((tracker.shot_frequency() - 10_000.0).abs() < 1.0);
        assert_eq!(tracker.snapshot().aggression(), 1.0);
    }

    #[test]
    fn hits_without_shots_keep_accuracy_zero() {
        let mut tracker =
            PlayerBehaviorTracker::new(empty_history(), BehaviorConfig::default()).unwrap();
        tracker.on_player_hit_enemy();
        tracker.on_player_hit_enemy();

        assert_eq!(tracker.snapshot().accuracy(), 0.0);
    }

    #[test]
    fn excess_hits_clamp_accuracy() {
        let mut tracker =
            PlayerBehaviorTracker::new(empty_history(), BehaviorConfig::default()).unwrap();
        tracker.on_player_shot(Vec2::ZERO, None);
        tracker.on_player_hit_enemy();
        tracker.on_player_hit_enemy();

        assert_eq!(tracker.snapshot().accuracy(), 1.0);
    }

    #[test]
    fn clock_ignores_negative_delta() {
        let mut tracker =
            PlayerBehaviorTracker::new(empty_history(), BehaviorConfig::default()).unwrap();
        tracker.update_frame(1.0);
        tracker.update_frame(-5.0);
        tracker.update_frame(f32::NAN);

        assert_eq!(tracker.game_time(), 1.0);
    }

    #[test]
    fn fifty_first_record_evicts_oldest() {
        let history = empty_history();
        let tracker = PlayerBehaviorTracker::new(history, BehaviorConfig::default()).unwrap();

        for ts in 0..51 {
            tracker
                .finalize_and_persist_at(ts, 10, Difficulty::Normal.label(), ts % 2 == 0)
                .unwrap();
        }

        let records = tracker.load_history().unwrap();
        assert_eq!(records.len(), 50);
        assert_eq!(records[0].timestamp, 1);
        assert!(records.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn finalized_record_seeds_next_tracker() {
        let store = Arc::new(InMemoryPreferences::new());
        let config = BehaviorConfig::default();

        let mut first =
            PlayerBehaviorTracker::new(PreferenceHistory::new(store.clone()), config.clone())
                .unwrap();
        for _ in 0..4 {
            first.on_player_shot(Vec2::ZERO, Some(Vec2::new(150.0, 0.0)));
            first.update_frame(1.0);
        }
        first.on_player_hit_enemy();
        let record = first
            .finalize_and_persist_at(42, 300, Difficulty::Hard.label(), true)
            .unwrap();
        assert_eq!(record.accuracy, 0.25);

        let second = PlayerBehaviorTracker::new(PreferenceHistory::new(store), config).unwrap();
        assert_eq!(second.total_shots(), 100);
        assert_eq!(second.total_hits(), 25);
        assert!((second.preferred_distance() - 150.0).abs() < 1e-2);
    }

    #[test]
    fn unencodable_difficulty_is_an_error() {
        let tracker = PlayerBehaviorTracker::new(empty_history(), BehaviorConfig::default()).unwrap();
        let result = tracker.finalize_and_persist_at(1, 0, "a,b", false);

        assert!(result.is_err());
        assert!(tracker.load_history().unwrap().is_empty());
    }
}
