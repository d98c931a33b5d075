// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP request core: builds, sends, and decodes one API call, with the
//! proactive expiry check and single 401 retry layered on top.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
pub use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::api::auth::UserProfile;
use crate::config::ClientConfig;
use crate::error::{ApiError, ValidationErrors};
use crate::session::Session;

/// Per-call overrides.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Extra headers merged over the defaults.
    pub headers: Vec<(String, String)>,
    /// Overrides the client-wide timeout.
    pub timeout: Option<Duration>,
    /// External cancellation signal. Cancelling aborts the in-flight call.
    pub cancel: Option<CancellationToken>,
}

/// Asynchronous client for the Zyro REST API.
///
/// Cheap to clone; clones share the same session and therefore the same
/// single-flight refresh coordinator.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    session: Arc<Session>,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        let http = reqwest::Client::builder().build().unwrap_or_default();
        let state_path = config.state_dir.as_ref().map(|d| d.join("session.json"));
        let session = Arc::new(Session::new(&config.base_url, state_path));
        Self { http, base_url: config.base_url, timeout: config.timeout, session }
    }

    /// Shared session state (credentials, events, persistence).
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Restore a persisted session and reconcile it against a live profile
    /// fetch. Returns the fresh profile when the session is still valid.
    pub async fn restore_session(&self) -> Result<Option<UserProfile>, ApiError> {
        if !self.session.restore().await {
            return Ok(None);
        }
        match self.auth().me().await {
            Ok(profile) => Ok(Some(profile)),
            Err(err) if err.status() == 401 || err.status() == 403 => {
                tracing::debug!("persisted session no longer valid, clearing");
                self.session.clear().await;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None::<&()>, false, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body), false, None).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::POST, path, None::<&()>, false, None).await
    }

    /// Form-encoded POST, used by the login endpoint.
    pub async fn post_form<T, B>(&self, path: &str, form: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(form), true, None).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body), false, None).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, Some(body), false, None).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None::<&()>, false, None).await
    }

    /// Send a request with full control over method, body encoding, and
    /// per-call overrides.
    ///
    /// The pipeline for one logical call: proactive expiry check → dispatch
    /// → on 401 (first time only, refresh token held) refresh and re-issue
    /// the identical request once → decode. A second 401 surfaces as an
    /// error.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        form: bool,
        cfg: Option<&RequestConfig>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let default_cfg = RequestConfig::default();
        let cfg = cfg.unwrap_or(&default_cfg);

        // Proactive expiry check. The reactive 401 path below remains the
        // correctness backstop for tokens rejected mid-flight.
        self.session.ensure_fresh().await?;

        let mut retried = false;
        loop {
            let resp = self.dispatch(&method, path, body, form, cfg).await?;
            let status = resp.status().as_u16();

            if status == 401 && !retried && self.session.can_refresh().await {
                retried = true;
                tracing::debug!(%method, path, "401 response, refreshing and retrying once");
                match self.session.refresh().await {
                    Ok(()) => continue,
                    Err(err) => {
                        tracing::debug!(err = %err, "refresh after 401 failed");
                        return Err(ApiError::Request {
                            status: 401,
                            message: "authentication failed".to_owned(),
                            body: None,
                        });
                    }
                }
            }

            return decode(resp).await;
        }
    }

    /// One network call: build, authorize, send. No retry, no caching, no
    /// side effects beyond the call itself.
    async fn dispatch<B>(
        &self,
        method: &Method,
        path: &str,
        body: Option<&B>,
        form: bool,
        cfg: &RequestConfig,
    ) -> Result<reqwest::Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method.clone(), &url);
        if let Some(token) = self.session.bearer().await {
            req = req.bearer_auth(token);
        }
        for (name, value) in &cfg.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            req = if form { req.form(body) } else { req.json(body) };
        }

        let timeout = cfg.timeout.unwrap_or(self.timeout);
        let cancel = cfg.cancel.clone().unwrap_or_default();

        tokio::select! {
            () = cancel.cancelled() => Err(ApiError::cancelled()),
            sent = tokio::time::timeout(timeout, req.send()) => match sent {
                Err(_) => Err(ApiError::timeout()),
                Ok(Ok(resp)) => Ok(resp),
                Ok(Err(e)) => Err(ApiError::network(&e)),
            },
        }
    }
}

/// Normalize a response: 2xx decodes (empty or non-JSON bodies decode from
/// `null`, so `()` targets work), 422 becomes a validation error, anything
/// else a request error carrying the raw payload.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let is_json = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    let bytes = resp.bytes().await.map_err(|e| ApiError::network(&e))?;

    if status.is_success() {
        if !is_json || bytes.is_empty() {
            return serde_json::from_slice(b"null").map_err(|e| decode_error(&e));
        }
        return serde_json::from_slice(&bytes).map_err(|e| decode_error(&e));
    }

    let payload: Option<serde_json::Value> =
        if bytes.is_empty() { None } else { serde_json::from_slice(&bytes).ok() };

    if status.as_u16() == 422 {
        if let Some(errors) = payload
            .as_ref()
            .and_then(|v| serde_json::from_value::<ValidationErrors>(v.clone()).ok())
        {
            return Err(ApiError::Validation { errors });
        }
    }

    let message = payload
        .as_ref()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .or_else(|| v.get("detail").and_then(|d| d.as_str()))
        })
        .map(str::to_owned)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_owned());

    Err(ApiError::Request { status: status.as_u16(), message, body: payload })
}

fn decode_error(err: &serde_json::Error) -> ApiError {
    ApiError::Request { status: 0, message: format!("invalid response body: {err}"), body: None }
}
