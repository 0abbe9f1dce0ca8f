//! Runtime configuration structures and loaders.

use std::env;
use std::path::PathBuf;

use game_core::{AiConfig, BehaviorConfig};

use crate::error::Result;
use crate::repository::{FilePreferences, PreferenceHistory};

/// Configuration shared by the tracker, the enemy engines and persistence.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub behavior: BehaviorConfig,
    pub ai: AiConfig,
    /// Preference namespace holding the match history.
    pub history_namespace: String,
    /// Slot within the namespace holding the line-format history.
    pub history_key: String,
    /// Overrides the platform data directory when set.
    pub save_data_dir: Option<PathBuf>,
    /// Evasion capability given to enemies spawned without an explicit choice.
    pub evasive_enemies: bool,
}

impl RuntimeConfig {
    pub const DEFAULT_HISTORY_NAMESPACE: &'static str = "player_behavior_history";
    pub const DEFAULT_HISTORY_KEY: &'static str = "records";

    pub fn new(behavior: BehaviorConfig, ai: AiConfig) -> Self {
        Self {
            behavior,
            ai,
            history_namespace: Self::DEFAULT_HISTORY_NAMESPACE.to_string(),
            history_key: Self::DEFAULT_HISTORY_KEY.to_string(),
            save_data_dir: None,
            evasive_enemies: true,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// - `SAVE_DATA_DIR` - Directory for persisted history (default: platform data dir)
    /// - `BEHAVIOR_HISTORY_NAMESPACE` - History namespace (default: player_behavior_history)
    /// - `BEHAVIOR_MAX_RECORDS` - History cap (default: 50, minimum 1)
    /// - `ENEMY_EVASION` - Spawn enemies with evasion enabled (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.save_data_dir = env::var("SAVE_DATA_DIR").ok().map(PathBuf::from);

        if let Some(namespace) = read_env::<String>("BEHAVIOR_HISTORY_NAMESPACE")
            && !namespace.trim().is_empty()
        {
            config.history_namespace = namespace;
        }

        if let Some(max_records) = read_env::<usize>("BEHAVIOR_MAX_RECORDS") {
            config.behavior.max_records = max_records.max(1);
        }

        if let Some(evasive) = read_env_bool("ENEMY_EVASION") {
            config.evasive_enemies = evasive;
        }

        config
    }

    /// Directory holding the preference documents.
    ///
    /// Follows platform conventions:
    /// - macOS: `~/Library/Application Support/survival-shooter`
    /// - Linux: `~/.local/share/survival-shooter` (or `$XDG_DATA_HOME/survival-shooter`)
    /// - Windows: `%APPDATA%\survival-shooter`
    /// - Fallback: `./save_data`
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.save_data_dir {
            return dir.clone();
        }

        directories::ProjectDirs::from("", "", "survival-shooter")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./save_data"))
    }

    /// Open the file-backed history described by this configuration.
    pub fn open_history(&self) -> Result<PreferenceHistory<FilePreferences>> {
        let store = FilePreferences::open(self.data_dir(), self.history_namespace.as_str())?;
        Ok(PreferenceHistory::with_key(store, self.history_key.as_str()))
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(BehaviorConfig::default(), AiConfig::default())
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{HistoryRepository, PreferenceStore};
    use game_core::{BehaviorSnapshot, MatchRecord};
    use tempfile::TempDir;

    #[test]
    fn defaults_match_persisted_layout() {
        let config = RuntimeConfig::default();
        assert_eq!(config.history_namespace, "player_behavior_history");
        assert_eq!(config.history_key, "records");
        assert_eq!(config.behavior.max_records, 50);
        assert!(config.evasive_enemies);
    }

    #[test]
    fn explicit_save_dir_wins() {
        let temp_dir = TempDir::new().unwrap();
        let config = RuntimeConfig {
            save_data_dir: Some(temp_dir.path().to_path_buf()),
            ..RuntimeConfig::default()
        };
        assert_eq!(config.data_dir(), temp_dir.path());
    }

    #[test]
    fn open_history_uses_namespace_and_key() {
        let temp_dir = TempDir::new().unwrap();
        let config = RuntimeConfig {
            save_data_dir: Some(temp_dir.path().to_path_buf()),
            ..RuntimeConfig::default()
        };

        let history = config.open_history().unwrap();
        let snap = BehaviorSnapshot::new(0.1, 0.2, 0.3);
        history
            .append(MatchRecord::from_snapshot(9, 1, "Easy", false, &snap), 50)
            .unwrap();

        assert!(
            temp_dir
                .path()
                .join("player_behavior_history.json")
                .exists()
        );
        assert!(history.store().contains("records").unwrap());

        let reopened = config.open_history().unwrap();
        assert_eq!(reopened.load().unwrap().len(), 1);
    }
}
