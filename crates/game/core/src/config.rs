//! Tunable parameters for the enemy decision engine and the behavior model.
//!
//! Every default below is a hand-tuned constant carried over unchanged from
//! the shipped game. They are exposed as associated `const`s so tests and
//! tooling can reference them, and as runtime-tunable struct fields so a
//! difficulty preset can override them.

/// Decision-engine tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiConfig {
    /// Radius in which the nearest projectile is dodged perpendicular to its path.
    pub evade_radius: f32,
    /// Radius of the simple danger heuristic used by engines without evasion.
    pub danger_radius: f32,
    /// Minimum alignment between a projectile's heading and the line to the
    /// enemy for the simple heuristic to consider it incoming.
    pub danger_alignment: f32,
    /// Standoff distance of the non-adaptive engine (pursue beyond, shoot within).
    pub shoot_distance: f32,
    /// Patrol leg duration is drawn uniformly from `[patrol_min_secs, patrol_max_secs)`.
    pub patrol_min_secs: f32,
    pub patrol_max_secs: f32,
    /// Floor applied to the patrol timer while the target is in sight.
    pub detection_hold_secs: f32,
    /// Vision range grows by `aggression * vision_aggression_gain`.
    pub vision_aggression_gain: f32,
    /// Engagement distance is `lerp(near, far, accuracy)`.
    pub engagement_near: f32,
    pub engagement_far: f32,
    /// Adaptive evasion unlocks above either threshold.
    pub evasion_accuracy_threshold: f32,
    pub evasion_aggression_threshold: f32,
    /// Probability that an available dodge is actually taken.
    pub evasion_chance: f32,
    /// Pursuit vector is scaled by `1 + preferred_distance * pursuit_distance_gain`.
    pub pursuit_distance_gain: f32,
    /// Strafe mixing starts above this accuracy...
    pub strafe_accuracy_threshold: f32,
    /// ...with a lateral offset of up to `(accuracy - threshold) * strafe_gain`.
    pub strafe_gain: f32,
}

impl AiConfig {
    pub const DEFAULT_EVADE_RADIUS: f32 = 100.0;
    pub const DEFAULT_DANGER_RADIUS: f32 = 60.0;
    pub const DEFAULT_DANGER_ALIGNMENT: f32 = 0.7;
    pub const DEFAULT_SHOOT_DISTANCE: f32 = 200.0;
    pub const DEFAULT_PATROL_MIN_SECS: f32 = 2.0;
    pub const DEFAULT_PATROL_MAX_SECS: f32 = 4.5;
    pub const DEFAULT_DETECTION_HOLD_SECS: f32 = 1.0;
    pub const DEFAULT_VISION_AGGRESSION_GAIN: f32 = 0.3;
    pub const DEFAULT_ENGAGEMENT_NEAR: f32 = 160.0;
    pub const DEFAULT_ENGAGEMENT_FAR: f32 = 260.0;
    pub const DEFAULT_EVASION_ACCURACY_THRESHOLD: f32 = 0.5;
    pub const DEFAULT_EVASION_AGGRESSION_THRESHOLD: f32 = 0.6;
    pub const DEFAULT_EVASION_CHANCE: f32 = 0.85;
    pub const DEFAULT_PURSUIT_DISTANCE_GAIN: f32 = 0.4;
    pub const DEFAULT_STRAFE_ACCURACY_THRESHOLD: f32 = 0.5;
    pub const DEFAULT_STRAFE_GAIN: f32 = 0.6;

    pub fn new() -> Self {
        Self {
            evade_radius: Self::DEFAULT_EVADE_RADIUS,
            danger_radius: Self::DEFAULT_DANGER_RADIUS,
            danger_alignment: Self::DEFAULT_DANGER_ALIGNMENT,
            shoot_distance: Self::DEFAULT_SHOOT_DISTANCE,
            patrol_min_secs: Self::DEFAULT_PATROL_MIN_SECS,
            patrol_max_secs: Self::DEFAULT_PATROL_MAX_SECS,
            detection_hold_secs: Self::DEFAULT_DETECTION_HOLD_SECS,
            vision_aggression_gain: Self::DEFAULT_VISION_AGGRESSION_GAIN,
            engagement_near: Self::DEFAULT_ENGAGEMENT_NEAR,
            engagement_far: Self::DEFAULT_ENGAGEMENT_FAR,
            evasion_accuracy_threshold: Self::DEFAULT_EVASION_ACCURACY_THRESHOLD,
            evasion_aggression_threshold: Self::DEFAULT_EVASION_AGGRESSION_THRESHOLD,
            evasion_chance: Self::DEFAULT_EVASION_CHANCE,
            pursuit_distance_gain: Self::DEFAULT_PURSUIT_DISTANCE_GAIN,
            strafe_accuracy_threshold: Self::DEFAULT_STRAFE_ACCURACY_THRESHOLD,
            strafe_gain: Self::DEFAULT_STRAFE_GAIN,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Player behavior model tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorConfig {
    /// EMA smoothing factor for shot frequency.
    pub shot_frequency_alpha: f32,
    /// EMA smoothing factor for firing distance.
    pub distance_alpha: f32,
    /// Shots per second that map to aggression 1.0.
    pub reference_shot_frequency: f32,
    /// Firing distance (world units) that maps to preferred distance 1.0.
    pub reference_distance: f32,
    /// Lower bound on the interval between two shots, in seconds.
    pub min_shot_interval: f32,
    /// Synthetic shot count used to pin the historical accuracy baseline.
    ///
    /// Tunable heuristic: larger values make early real shots move the
    /// displayed accuracy more slowly.
    pub seed_sample_shots: u32,
    /// Number of match records retained; older records are evicted first.
    pub max_records: usize,
}

impl BehaviorConfig {
    pub const DEFAULT_SHOT_FREQUENCY_ALPHA: f32 = 0.18;
    pub const DEFAULT_DISTANCE_ALPHA: f32 = 0.08;
    pub const DEFAULT_REFERENCE_SHOT_FREQUENCY: f32 = 3.0;
    pub const DEFAULT_REFERENCE_DISTANCE: f32 = 300.0;
    pub const DEFAULT_MIN_SHOT_INTERVAL: f32 = 0.0001;
    pub const DEFAULT_SEED_SAMPLE_SHOTS: u32 = 100;
    pub const DEFAULT_MAX_RECORDS: usize = 50;

    pub fn new() -> Self {
        Self {
            shot_frequency_alpha: Self::DEFAULT_SHOT_FREQUENCY_ALPHA,
            distance_alpha: Self::DEFAULT_DISTANCE_ALPHA,
            reference_shot_frequency: Self::DEFAULT_REFERENCE_SHOT_FREQUENCY,
            reference_distance: Self::DEFAULT_REFERENCE_DISTANCE,
            min_shot_interval: Self::DEFAULT_MIN_SHOT_INTERVAL,
            seed_sample_shots: Self::DEFAULT_SEED_SAMPLE_SHOTS,
            max_records: Self::DEFAULT_MAX_RECORDS,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self::new()
    }
}
