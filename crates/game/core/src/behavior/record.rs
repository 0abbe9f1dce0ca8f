//! Per-match summary persisted to seed future sessions.

use std::fmt;

use super::BehaviorSnapshot;

/// Summary of one completed match.
///
/// Records are created once per match by the tracker and appended to a
/// bounded, oldest-first history.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchRecord {
    /// Wall-clock time the match ended, in epoch milliseconds.
    pub timestamp: i64,
    pub score: u32,
    /// Difficulty label; must not contain `,` or line breaks.
    pub difficulty: String,
    pub win: bool,
    pub aggression: f32,
    pub accuracy: f32,
    pub preferred_distance: f32,
    /// Line format version.
    pub version: u32,
}

impl MatchRecord {
    pub const CURRENT_VERSION: u32 = 1;

    /// Wraps a final snapshot with match metadata.
    pub fn from_snapshot(
        timestamp: i64,
        score: u32,
        difficulty: impl Into<String>,
        win: bool,
        snapshot: &BehaviorSnapshot,
    ) -> Self {
        Self {
            timestamp,
            score,
            difficulty: difficulty.into(),
            win,
            aggression: snapshot.aggression(),
            accuracy: snapshot.accuracy(),
            preferred_distance: snapshot.preferred_distance(),
            version: Self::CURRENT_VERSION,
        }
    }

    /// The behavior metrics of this record as a snapshot.
    pub fn snapshot(&self) -> BehaviorSnapshot {
        BehaviorSnapshot::new(self.aggression, self.accuracy, self.preferred_distance)
    }
}

/// Difficulty presets offered by the game menus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard]
    }

    /// Label stored in match records.
    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Case-insensitive parse. Unknown or missing labels fall back to `Easy`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_ascii_uppercase()).as_deref() {
            Some("NORMAL") => Difficulty::Normal,
            Some("HARD") => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
