//! Remote save slot on the Code Clicker API.
//!
//! `POST {base}/save` stores the current `GameState`, `GET {base}/load`
//! brings it back as a [`GameStatePatch`] for `CodeClicker::load`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::state::{GameState, GameStatePatch};

/// API address used by the browser build.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("server returned {0}")]
    Status(u16),

    #[error("unexpected response: {0}")]
    Response(String),

    #[error("server rejected the save")]
    Rejected,
}

/// Which remote operation the player asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoteOp {
    Save,
    Load,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
    game_state: &'a GameState,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub success: bool,
    #[serde(default)]
    pub saved_at: i64,
}

impl SaveResponse {
    /// Server timestamp of an accepted save.
    pub fn into_saved_at(self) -> Result<i64, RemoteError> {
        if self.success {
            Ok(self.saved_at)
        } else {
            Err(RemoteError::Rejected)
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoadResponse {
    pub success: bool,
    #[serde(default)]
    pub game_state: Option<GameStatePatch>,
}

impl LoadResponse {
    /// The stored state, only when the server reports success and sent one.
    pub fn into_patch(self) -> Option<GameStatePatch> {
        if self.success {
            self.game_state
        } else {
            None
        }
    }
}

/// HTTP client for one save slot.
#[derive(Clone)]
pub struct RemoteClient {
    client: reqwest::Client,
    base_url: String,
    user_id: Option<String>,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            user_id: None,
        }
    }

    /// Use a named slot instead of the server's default one.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload `state`. Returns the server's `savedAt`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the request fails, the status is not 2xx,
    /// the body cannot be parsed or the server refuses the state.
    pub async fn save(&self, state: &GameState) -> Result<i64, RemoteError> {
        let body = SaveRequest {
            user_id: self.user_id.as_deref(),
            game_state: state,
        };

        let response = self
            .client
            .post(format!("{}/save", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| RemoteError::Request(format!("{e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let saved_at = response
            .json::<SaveResponse>()
            .await
            .map_err(|e| RemoteError::Response(format!("{e}")))?
            .into_saved_at()?;
        info!(saved_at, "remote save stored");
        Ok(saved_at)
    }

    /// Fetch the stored state, `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the request fails, the status is not 2xx
    /// or the body cannot be parsed.
    pub async fn load(&self) -> Result<Option<GameStatePatch>, RemoteError> {
        let mut request = self.client.get(format!("{}/load", self.base_url));
        if let Some(user_id) = &self.user_id {
            request = request.query(&[("userId", user_id.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Request(format!("{e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let patch = response
            .json::<LoadResponse>()
            .await
            .map_err(|e| RemoteError::Response(format!("{e}")))?
            .into_patch();
        debug!(found = patch.is_some(), "remote load finished");
        Ok(patch)
    }
}
