//! Code Clicker game state definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Click power with no upgrades.
pub const BASE_CLICK_POWER: f64 = 1.0;

/// Full persisted state of a Code Clicker run.
///
/// Field names serialize in camelCase so saves stay readable by any client
/// of the save/load API. Every field falls back to its default when missing
/// and unknown fields are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    /// Spendable commits.
    pub commits: f64,
    /// Commits earned all-time. Spending never lowers this.
    pub total_commits: f64,
    pub commits_per_click: f64,
    /// Cached CPS, always re-derived from `upgrades`.
    pub commits_per_second: f64,
    /// Owned count per upgrade id.
    pub upgrades: BTreeMap<String, u32>,
    /// Unlocked achievement ids in unlock order.
    pub achievements: Vec<String>,
    pub total_clicks: u64,
    /// Epoch millis when this run started.
    pub started_at: i64,
    /// Seconds of play accumulated by ticks.
    pub play_time: f64,
    pub level: u32,
    /// XP within the current level.
    pub experience: f64,
    /// Epoch millis of the last successful save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<i64>,
}

impl GameState {
    pub fn new(now_ms: i64) -> Self {
        Self {
            started_at: now_ms,
            ..Self::default()
        }
    }

    /// Owned count of an upgrade (0 if never bought).
    pub fn owned(&self, upgrade_id: &str) -> u32 {
        self.upgrades.get(upgrade_id).copied().unwrap_or(0)
    }

    pub fn has_achievement(&self, achievement_id: &str) -> bool {
        self.achievements.iter().any(|a| a == achievement_id)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            commits: 0.0,
            total_commits: 0.0,
            commits_per_click: BASE_CLICK_POWER,
            commits_per_second: 0.0,
            upgrades: BTreeMap::new(),
            achievements: Vec::new(),
            total_clicks: 0,
            started_at: 0,
            play_time: 0.0,
            level: 1,
            experience: 0.0,
            last_saved: None,
        }
    }
}

/// A partial `GameState` coming from an external source (save file, API).
///
/// Only the fields that are present overwrite the current state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStatePatch {
    pub commits: Option<f64>,
    pub total_commits: Option<f64>,
    pub commits_per_click: Option<f64>,
    pub commits_per_second: Option<f64>,
    pub upgrades: Option<BTreeMap<String, u32>>,
    pub achievements: Option<Vec<String>>,
    pub total_clicks: Option<u64>,
    pub started_at: Option<i64>,
    pub play_time: Option<f64>,
    pub level: Option<u32>,
    pub experience: Option<f64>,
    pub last_saved: Option<i64>,
}

impl From<GameState> for GameStatePatch {
    fn from(state: GameState) -> Self {
        Self {
            commits: Some(state.commits),
            total_commits: Some(state.total_commits),
            commits_per_click: Some(state.commits_per_click),
            commits_per_second: Some(state.commits_per_second),
            upgrades: Some(state.upgrades),
            achievements: Some(state.achievements),
            total_clicks: Some(state.total_clicks),
            started_at: Some(state.started_at),
            play_time: Some(state.play_time),
            level: Some(state.level),
            experience: Some(state.experience),
            last_saved: state.last_saved,
        }
    }
}
