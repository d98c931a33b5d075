// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-flight token refresh.
//!
//! Concurrent callers that need a refresh collapse into one network
//! round-trip: the first becomes the leader and performs the call, the rest
//! subscribe to a broadcast of the settled outcome.

use tokio::sync::broadcast;

use crate::api::auth::{RefreshRequest, TokenResponse};
use crate::error::ApiError;
use crate::session::{Session, SessionEvent};

impl Session {
    /// Run (or join) a token refresh.
    ///
    /// At most one `/auth/refresh` call is in flight per session; every
    /// caller observes the same outcome. Failure is terminal: the
    /// credentials pair is cleared and the session transitions to logged
    /// out. The coordinator never retries the refresh itself.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        // Join an in-flight refresh if one exists; otherwise become the
        // leader. The gate lock is held only for this check.
        let waiter = {
            let mut gate = self.gate.lock().await;
            match gate.as_ref() {
                Some(tx) => Some(tx.subscribe()),
                None => {
                    let (tx, _) = broadcast::channel(1);
                    *gate = Some(tx);
                    None
                }
            }
        };

        if let Some(mut rx) = waiter {
            return match rx.recv().await {
                Ok(outcome) => outcome,
                // Leader dropped without settling; report as a failed refresh.
                Err(_) => Err(ApiError::Request {
                    status: 0,
                    message: "token refresh aborted".to_owned(),
                    body: None,
                }),
            };
        }

        let outcome = self.perform_refresh().await;

        // Settle: empty the gate before broadcasting so a caller arriving
        // after this point starts a fresh refresh instead of waiting on a
        // finished one.
        let tx = self.gate.lock().await.take();
        if let Some(tx) = tx {
            let _ = tx.send(outcome.clone());
        }
        outcome
    }

    /// The actual refresh round-trip. Never attaches the expiring access
    /// token and is never subject to the 401-retry policy.
    async fn perform_refresh(&self) -> Result<(), ApiError> {
        let refresh_token = {
            let creds = self.creds.read().await;
            creds.as_ref().and_then(|c| c.refresh_token.clone())
        };
        let Some(refresh_token) = refresh_token else {
            return Err(ApiError::Request {
                status: 401,
                message: "no refresh token available".to_owned(),
                body: None,
            });
        };

        tracing::debug!("refreshing access token");
        let result = self
            .http
            .post(&self.refresh_url)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await;

        let token: TokenResponse = match result {
            Ok(resp) if resp.status().is_success() => match resp.json().await {
                Ok(token) => token,
                Err(e) => return self.refresh_failed(ApiError::network(&e)).await,
            },
            Ok(resp) => {
                let status = resp.status().as_u16();
                let body = resp.json::<serde_json::Value>().await.ok();
                return self
                    .refresh_failed(ApiError::Request {
                        status,
                        message: "failed to refresh token".to_owned(),
                        body,
                    })
                    .await;
            }
            Err(e) => return self.refresh_failed(ApiError::network(&e)).await,
        };

        self.install(&token).await;
        let _ = self.events.send(SessionEvent::Refreshed);
        tracing::debug!("access token refreshed");
        Ok(())
    }

    /// Terminal refresh failure: clear everything and report.
    async fn refresh_failed(&self, err: ApiError) -> Result<(), ApiError> {
        tracing::warn!(err = %err, "token refresh failed, clearing session");
        self.clear().await;
        Err(err)
    }
}
