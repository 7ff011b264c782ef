//! Endpoint handlers for the save/load API.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Service info |
//! | `GET` | `/health` | Liveness check |
//! | `POST` | `/save` | Store a game state for a user |
//! | `GET` | `/load` | Fetch the stored game state for a user |

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::Uri;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::ApiError;
use super::state::{slot_key, AppState};
use crate::game::state::GameState;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: [&'static str; 3],
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: i64,
}

/// `POST /save` body. `gameState` is taken as raw JSON so that a payload
/// of the wrong shape, or none at all, yields `success: false` instead of
/// a 4xx.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGameRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub game_state: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaveGameResponse {
    pub success: bool,
    pub saved_at: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoadGameResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameState>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "Code Clicker API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ["/save", "/load", "/health"],
    })
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        timestamp: Utc::now().timestamp_millis(),
    })
}

/// Validate and store a game state.
///
/// Missing fields take their defaults (a missing `startedAt` becomes the
/// time of the save) and unknown fields are dropped. Anything that does not
/// type-check is answered with `{ success: false, savedAt: 0 }`.
pub async fn save(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaveGameRequest>, JsonRejection>,
) -> Result<Json<SaveGameResponse>, ApiError> {
    let Json(request) = payload?;
    let user_id = slot_key(request.user_id.as_deref());
    let now = Utc::now().timestamp_millis();

    let Some(game_state) = validate_game_state(request.game_state, now) else {
        warn!(user_id, "rejected invalid game state");
        return Ok(Json(SaveGameResponse {
            success: false,
            saved_at: 0,
        }));
    };

    state.save(user_id, game_state, now).await;
    info!(user_id, saved_at = now, "game saved");

    Ok(Json(SaveGameResponse {
        success: true,
        saved_at: now,
    }))
}

pub async fn load(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoadQuery>,
) -> Json<LoadGameResponse> {
    let user_id = slot_key(query.user_id.as_deref());

    match state.load(user_id).await {
        Some(saved) => {
            info!(user_id, "game loaded");
            Json(LoadGameResponse {
                success: true,
                game_state: Some(saved.state),
            })
        }
        None => Json(LoadGameResponse {
            success: false,
            game_state: None,
        }),
    }
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_owned())
}

fn validate_game_state(value: serde_json::Value, now_ms: i64) -> Option<GameState> {
    let has_started_at = value.get("startedAt").is_some();
    let mut game_state: GameState = serde_json::from_value(value).ok()?;
    if !has_started_at {
        game_state.started_at = now_ms;
    }
    Some(game_state)
}
