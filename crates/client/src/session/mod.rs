// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session state: the credentials pair, the single-flight refresh
//! coordinator, and the persisted mirror.

pub mod persist;
mod refresh;

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::{broadcast, Mutex, RwLock};

use crate::api::auth::{TokenResponse, UserProfile};
use crate::error::ApiError;
use crate::session::persist::PersistedSession;

/// Seconds subtracted from `expires_in` so the proactive refresh fires
/// before the server-side expiry.
const EXPIRY_MARGIN_SECS: u64 = 200;

/// The in-memory credentials pair.
///
/// `expires_at` is epoch seconds with the safety margin already applied.
/// Invariant: `expires_at` is only present alongside `access_token`.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<u64>,
}

impl Credentials {
    /// Whether the access token is at or past its (margin-adjusted) expiry.
    /// Tokens without an expiry never expire client-side.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => epoch_secs() >= at,
            None => false,
        }
    }
}

/// Session lifecycle notifications for embedding applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A refresh produced new credentials.
    Refreshed,
    /// The session ended: explicit logout or terminal refresh failure.
    LoggedOut,
}

/// Shared session state for one client instance.
///
/// All mutation of the credentials pair happens here, inside the refresh
/// coordinator or the install/clear entry points.
pub struct Session {
    http: reqwest::Client,
    refresh_url: String,
    creds: RwLock<Option<Credentials>>,
    profile: RwLock<Option<UserProfile>>,
    /// Single-flight gate: holds the broadcast sender for the in-flight
    /// refresh, if any. See [`Session::refresh`].
    gate: Mutex<Option<broadcast::Sender<Result<(), ApiError>>>>,
    events: broadcast::Sender<SessionEvent>,
    state_path: Option<PathBuf>,
}

impl Session {
    pub(crate) fn new(base_url: &str, state_path: Option<PathBuf>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        let (events, _) = broadcast::channel(16);
        Self {
            http,
            refresh_url: format!("{base_url}/auth/refresh"),
            creds: RwLock::new(None),
            profile: RwLock::new(None),
            gate: Mutex::new(None),
            events,
            state_path,
        }
    }

    /// Subscribe to session lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Install a token pair returned by login or refresh.
    ///
    /// The access token is always replaced; the refresh token only when the
    /// server returned a new one.
    pub async fn install(&self, token: &TokenResponse) {
        let mut creds = self.creds.write().await;
        let prev_refresh = creds.as_ref().and_then(|c| c.refresh_token.clone());
        let expires_at = (token.expires_in > 0)
            .then(|| epoch_secs() + token.expires_in.saturating_sub(EXPIRY_MARGIN_SECS));
        *creds = Some(Credentials {
            access_token: token.access_token.clone(),
            refresh_token: token.refresh_token.clone().or(prev_refresh),
            expires_at,
        });
        drop(creds);
        self.persist().await;
    }

    /// Replace the cached user profile (mirrored to the state file).
    pub async fn set_profile(&self, profile: UserProfile) {
        *self.profile.write().await = Some(profile);
        self.persist().await;
    }

    pub async fn profile(&self) -> Option<UserProfile> {
        self.profile.read().await.clone()
    }

    /// Clear the credentials pair, the profile, and the persisted mirror,
    /// and notify subscribers that the session ended.
    pub async fn clear(&self) {
        *self.creds.write().await = None;
        *self.profile.write().await = None;
        self.persist().await;
        let _ = self.events.send(SessionEvent::LoggedOut);
    }

    /// Restore a persisted session into memory. Returns whether credentials
    /// were found. The caller is expected to reconcile with a live profile
    /// fetch afterwards.
    pub async fn restore(&self) -> bool {
        let Some(path) = &self.state_path else { return false };
        let persisted = match persist::load(path) {
            Ok(p) => p,
            Err(_) => return false,
        };
        let Some(access_token) = persisted.access_token else { return false };
        *self.creds.write().await = Some(Credentials {
            access_token,
            refresh_token: persisted.refresh_token,
            expires_at: persisted.expires_at,
        });
        *self.profile.write().await = persisted.profile;
        true
    }

    /// Bearer token for outgoing requests.
    pub async fn bearer(&self) -> Option<String> {
        self.creds.read().await.as_ref().map(|c| c.access_token.clone())
    }

    /// Snapshot of the current credentials.
    pub async fn credentials(&self) -> Option<Credentials> {
        self.creds.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.creds.read().await.is_some()
    }

    /// Whether a reactive or proactive refresh is currently possible.
    pub async fn can_refresh(&self) -> bool {
        self.creds.read().await.as_ref().is_some_and(|c| c.refresh_token.is_some())
    }

    /// Proactive freshness check: refresh when the stored token is past its
    /// expiry and a refresh token is available.
    pub async fn ensure_fresh(&self) -> Result<(), ApiError> {
        let needs_refresh = {
            let creds = self.creds.read().await;
            creds.as_ref().is_some_and(|c| c.is_expired() && c.refresh_token.is_some())
        };
        if needs_refresh {
            self.refresh().await?;
        }
        Ok(())
    }

    /// Mirror current state to the session file, when persistence is enabled.
    async fn persist(&self) {
        let Some(path) = &self.state_path else { return };
        let creds = self.creds.read().await.clone();
        let profile = self.profile.read().await.clone();
        let snapshot = PersistedSession::from_state(creds.as_ref(), profile);
        if let Err(e) = persist::save(path, &snapshot) {
            tracing::warn!(err = %e, "failed to persist session state");
        }
    }
}

fn epoch_secs() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs()
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
