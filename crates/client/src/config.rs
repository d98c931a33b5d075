// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration and state-dir resolution.

use std::path::PathBuf;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`crate::Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address of the API, e.g. `http://localhost:8000/v1`.
    pub base_url: String,
    /// Default per-request timeout. Individual calls may override it.
    pub timeout: Duration,
    /// Directory for the persisted session mirror. `None` keeps the session
    /// in memory only.
    pub state_dir: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, timeout: DEFAULT_TIMEOUT, state_dir: None }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(dir.into());
        self
    }
}

/// Resolve the state directory for zyro data.
///
/// Checks `ZYRO_STATE_DIR`, then `$XDG_STATE_HOME/zyro`,
/// then `$HOME/.local/state/zyro`.
pub fn state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ZYRO_STATE_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("zyro");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local/state/zyro");
    }
    PathBuf::from(".zyro")
}
