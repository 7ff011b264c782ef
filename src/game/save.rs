//! Code Clicker セーブ/ロード機能。
//!
//! ## バージョニング方針
//!
//! - `SAVE_VERSION`: 現在のセーブ形式バージョン。フィールド追加時にインクリメントする。
//! - `MIN_COMPATIBLE_VERSION`: 互換性を維持できる最小バージョン。
//!   既存フィールドの意味変更や削除など破壊的変更を行った場合のみインクリメントする。
//!
//! `GameState` は全フィールドが `#[serde(default)]` なので、旧バージョンの
//! セーブデータは不足フィールドをデフォルト値で補完して読み込める。
//! 読み込み結果は `GameStatePatch` として返し、`logic::load_state` で
//! 現在の状態にマージする (CPS とクリック力は必ず再計算される)。

use serde::{Deserialize, Serialize};

use super::state::{GameState, GameStatePatch};

/// セーブデータのフォーマットバージョン。
pub const SAVE_VERSION: u32 = 1;

/// 互換性を維持できる最小バージョン。
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

/// localStorage のキー。
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "code_clicker_save";

/// オートセーブの間隔 (tick数)。10 ticks/sec × 30秒 = 300 ticks。
pub const AUTOSAVE_INTERVAL: u32 = 300;

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to serialize save data: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to parse save data: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("save version {saved} is older than the minimum compatible version {min}")]
    Incompatible { saved: u32, min: u32 },

    #[error("storage unavailable: {0}")]
    Storage(String),
}

#[derive(Serialize)]
struct SaveData<'a> {
    version: u32,
    game: &'a GameState,
}

#[derive(Deserialize)]
struct LoadedSave {
    version: u32,
    #[serde(default)]
    game: GameStatePatch,
}

/// GameState をセーブ用 JSON に変換する。
pub fn encode(state: &GameState) -> Result<String, SaveError> {
    serde_json::to_string(&SaveData {
        version: SAVE_VERSION,
        game: state,
    })
    .map_err(SaveError::Serialize)
}

/// セーブ JSON を読み込み、マージ用のパッチを返す。
pub fn decode(json: &str) -> Result<GameStatePatch, SaveError> {
    let loaded: LoadedSave = serde_json::from_str(json).map_err(SaveError::Parse)?;
    if loaded.version < MIN_COMPATIBLE_VERSION {
        return Err(SaveError::Incompatible {
            saved: loaded.version,
            min: MIN_COMPATIBLE_VERSION,
        });
    }
    Ok(loaded.game)
}

/// localStorage にアクセスする。WASM 環境でのみ動作。
#[cfg(target_arch = "wasm32")]
fn get_storage() -> Result<web_sys::Storage, SaveError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| SaveError::Storage("localStorage is not available".into()))
}

/// ゲーム状態を localStorage に保存する。成功したら true。
/// 失敗時はコンソールにログ出力するだけでゲームは続行する。
#[cfg(target_arch = "wasm32")]
pub fn save_game(state: &GameState) -> bool {
    let result = encode(state).and_then(|json| {
        get_storage()?
            .set_item(STORAGE_KEY, &json)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    });
    match result {
        Ok(()) => true,
        Err(e) => {
            web_sys::console::warn_1(&format!("Code Clicker: セーブに失敗: {e}").into());
            false
        }
    }
}

/// localStorage からセーブデータを読み込む。
/// パースエラーや互換性のないバージョンの場合はデータを破棄して None を返す。
#[cfg(target_arch = "wasm32")]
pub fn load_game() -> Option<GameStatePatch> {
    let storage = get_storage().ok()?;
    let json = storage.get_item(STORAGE_KEY).ok()??;

    match decode(&json) {
        Ok(patch) => Some(patch),
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Code Clicker: セーブデータを破棄します: {e}").into(),
            );
            // 壊れたデータを削除
            let _ = storage.remove_item(STORAGE_KEY);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::logic;

    #[test]
    fn encode_and_decode_roundtrip() {
        let mut original = GameState::new(1_700_000_000_000);
        original.commits = 12_345.6;
        original.total_commits = 99_999.0;
        original.total_clicks = 42;
        original.upgrades.insert("html".into(), 4);
        original.upgrades.insert("cursor".into(), 2);
        original.achievements = vec!["first-commit".into(), "100-commits".into()];
        original.play_time = 321.5;
        original.level = 3;
        original.experience = 17.0;
        logic::load_state(&mut original, GameStatePatch::default());

        let json = encode(&original).unwrap();
        let patch = decode(&json).unwrap();

        let mut restored = GameState::new(0);
        logic::load_state(&mut restored, patch);
        assert_eq!(restored, original);
        assert!((restored.commits_per_second - 2.0).abs() < 1e-9);
        assert_eq!(restored.commits_per_click, 3.0);
    }

    #[test]
    fn envelope_carries_version() {
        let json = encode(&GameState::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], SAVE_VERSION);
        assert!(value["game"]["totalCommits"].is_number());
    }

    /// 古いセーブ（フィールドが少ない）でも互換フィールドは復元される。
    #[test]
    fn partial_save_keeps_current_values_for_missing_fields() {
        let old_json = r#"{
            "version": 1,
            "game": {
                "commits": 500.0,
                "upgrades": { "hello-world": 3 },
                "commitsPerSecond": 1000000.0
            }
        }"#;
        let mut state = GameState::new(7);
        state.total_clicks = 12;
        logic::load_state(&mut state, decode(old_json).unwrap());

        assert_eq!(state.commits, 500.0);
        assert_eq!(state.total_clicks, 12);
        assert_eq!(state.started_at, 7);
        assert!((state.commits_per_second - 0.3).abs() < 1e-9);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{ "version": 1, "game": { "commits": 1.0, "theme": "dark" }, "extra": 5 }"#;
        let patch = decode(json).unwrap();
        assert_eq!(patch.commits, Some(1.0));
    }

    #[test]
    fn version_below_min_compatible_is_rejected() {
        let json = r#"{ "version": 0, "game": {} }"#;
        match decode(json) {
            Err(SaveError::Incompatible { saved, min }) => {
                assert_eq!(saved, 0);
                assert_eq!(min, MIN_COMPATIBLE_VERSION);
            }
            other => panic!("expected Incompatible, got {other:?}"),
        }
    }

    #[test]
    fn corrupt_json_is_a_parse_error() {
        assert!(matches!(decode("{not json"), Err(SaveError::Parse(_))));
        assert!(matches!(
            decode(r#"{ "version": 1, "game": { "commits": "many" } }"#),
            Err(SaveError::Parse(_))
        ));
    }
}
