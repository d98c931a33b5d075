// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test harness: an in-process stub of the Zyro REST API.
//!
//! Spins an axum server on a random port with atomic counters and failure
//! toggles so client behavior (single-flight refresh, retry bounds,
//! timeouts) can be observed from the outside.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::sync::Once;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

static CRYPTO_INIT: Once = Once::new();

/// Install the ring crypto provider for reqwest/rustls.
/// Safe to call multiple times — only the first call has effect.
pub fn ensure_crypto() {
    CRYPTO_INIT.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Shared, observable state of the stub API.
///
/// Tokens are generational: generation `n` means `access-<n>` is the only
/// access token the API accepts and `refresh-<n>` the current refresh token.
pub struct ApiState {
    pub generation: AtomicU64,
    pub login_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub asset_list_calls: AtomicUsize,
    pub always_401_calls: AtomicUsize,
    /// Authorization header seen on the most recent refresh call.
    pub refresh_auth_header: Mutex<Option<String>>,
    /// Content type and raw body of the most recent login call.
    pub login_content_type: Mutex<Option<String>>,
    pub login_body: Mutex<String>,
    /// Bearer tokens presented on `/assets/` calls, in arrival order.
    pub asset_tokens_seen: Mutex<Vec<String>>,
    /// Query string of the most recent `/assets/` call.
    pub last_asset_query: Mutex<String>,
    /// When set, `/auth/refresh` responds 401.
    pub fail_refresh: AtomicBool,
    /// Artificial delay before `/auth/refresh` settles.
    pub refresh_delay_ms: AtomicU64,
    /// `expires_in` reported by login responses.
    pub login_expires_in: AtomicU64,
}

impl ApiState {
    fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            login_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            asset_list_calls: AtomicUsize::new(0),
            always_401_calls: AtomicUsize::new(0),
            refresh_auth_header: Mutex::new(None),
            login_content_type: Mutex::new(None),
            login_body: Mutex::new(String::new()),
            asset_tokens_seen: Mutex::new(Vec::new()),
            last_asset_query: Mutex::new(String::new()),
            fail_refresh: AtomicBool::new(false),
            refresh_delay_ms: AtomicU64::new(0),
            login_expires_in: AtomicU64::new(3600),
        }
    }
}

/// A running stub API bound to a random local port.
pub struct StubApi {
    pub state: Arc<ApiState>,
    addr: SocketAddr,
    shutdown: CancellationToken,
}

impl StubApi {
    pub async fn start() -> anyhow::Result<Self> {
        ensure_crypto();
        let state = Arc::new(ApiState::new());
        let router = build_router(Arc::clone(&state));
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router)
                .with_graceful_shutdown(token.cancelled_owned())
                .await;
        });
        Ok(Self { state, addr, shutdown })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Invalidate the current access token server-side, as an out-of-band
    /// revocation would. The refresh token stays valid.
    pub fn rotate_access_token(&self) {
        self.state.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn set_login_expires_in(&self, secs: u64) {
        self.state.login_expires_in.store(secs, Ordering::SeqCst);
    }

    pub fn set_fail_refresh(&self, fail: bool) {
        self.state.fail_refresh.store(fail, Ordering::SeqCst);
    }

    pub fn set_refresh_delay(&self, ms: u64) {
        self.state.refresh_delay_ms.store(ms, Ordering::SeqCst);
    }

    pub fn refresh_calls(&self) -> usize {
        self.state.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn asset_list_calls(&self) -> usize {
        self.state.asset_list_calls.load(Ordering::SeqCst)
    }

    pub fn always_401_calls(&self) -> usize {
        self.state.always_401_calls.load(Ordering::SeqCst)
    }

    pub async fn refresh_auth_header(&self) -> Option<String> {
        self.state.refresh_auth_header.lock().await.clone()
    }

    pub async fn login_content_type(&self) -> Option<String> {
        self.state.login_content_type.lock().await.clone()
    }

    pub async fn login_body(&self) -> String {
        self.state.login_body.lock().await.clone()
    }

    pub async fn asset_tokens_seen(&self) -> Vec<String> {
        self.state.asset_tokens_seen.lock().await.clone()
    }

    pub async fn last_asset_query(&self) -> String {
        self.state.last_asset_query.lock().await.clone()
    }
}

impl Drop for StubApi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
        .route("/users/me", get(me))
        .route("/users/", get(list_empty))
        .route("/assets/", get(list_assets))
        .route("/assets/{id}", put(update_asset).delete(delete_asset))
        .route("/failures/", get(list_empty))
        .route("/workorders/", post(hang))
        .route("/kpi/summary", get(kpi_summary))
        .route("/planner/week", get(planner_week))
        .route("/always-401", get(always_401))
        .with_state(state)
}

fn current_access(state: &ApiState) -> String {
    format!("access-{}", state.generation.load(Ordering::SeqCst))
}

fn authorized(state: &ApiState, headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", current_access(state));
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected)
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(serde_json::json!({ "detail": "invalid token" })))
        .into_response()
}

async fn login(State(s): State<Arc<ApiState>>, headers: HeaderMap, body: String) -> Response {
    s.login_calls.fetch_add(1, Ordering::SeqCst);
    *s.login_content_type.lock().await =
        headers.get("content-type").and_then(|v| v.to_str().ok()).map(str::to_owned);
    *s.login_body.lock().await = body;

    let gen = s.generation.fetch_add(1, Ordering::SeqCst) + 1;
    Json(serde_json::json!({
        "access_token": format!("access-{gen}"),
        "refresh_token": format!("refresh-{gen}"),
        "token_type": "bearer",
        "expires_in": s.login_expires_in.load(Ordering::SeqCst),
    }))
    .into_response()
}

async fn refresh(
    State(s): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(_body): Json<serde_json::Value>,
) -> Response {
    s.refresh_calls.fetch_add(1, Ordering::SeqCst);
    *s.refresh_auth_header.lock().await =
        headers.get("authorization").and_then(|v| v.to_str().ok()).map(str::to_owned);

    let delay = s.refresh_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    if s.fail_refresh.load(Ordering::SeqCst) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "detail": "invalid refresh token" })),
        )
            .into_response();
    }

    let gen = s.generation.fetch_add(1, Ordering::SeqCst) + 1;
    Json(serde_json::json!({
        "access_token": format!("access-{gen}"),
        "refresh_token": format!("refresh-{gen}"),
        "token_type": "bearer",
        "expires_in": 3600,
    }))
    .into_response()
}

async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn me(State(s): State<Arc<ApiState>>, headers: HeaderMap) -> Response {
    if !authorized(&s, &headers) {
        return unauthorized();
    }
    Json(serde_json::json!({
        "id": 1,
        "username": "admin",
        "email": "admin@example.com",
        "first_name": "Ada",
        "last_name": "Admin",
        "role": "Admin",
        "is_active": true,
        "organization_id": 1,
    }))
    .into_response()
}

async fn list_empty(State(s): State<Arc<ApiState>>, headers: HeaderMap) -> Response {
    if !authorized(&s, &headers) {
        return unauthorized();
    }
    Json(serde_json::json!([])).into_response()
}

async fn list_assets(State(s): State<Arc<ApiState>>, headers: HeaderMap, uri: Uri) -> Response {
    s.asset_list_calls.fetch_add(1, Ordering::SeqCst);
    *s.last_asset_query.lock().await = uri.query().unwrap_or("").to_owned();
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("")
        .to_owned();
    s.asset_tokens_seen.lock().await.push(bearer);

    if !authorized(&s, &headers) {
        return unauthorized();
    }
    Json(serde_json::json!([{
        "id": 42,
        "name": "Hydraulic press",
        "asset_type": "MACHINE",
        "status": "ACTIVE",
        "location": "plant-2",
        "organization_id": 1,
        "created_at": "2026-01-05T08:30:00Z",
    }]))
    .into_response()
}

async fn update_asset(
    State(s): State<Arc<ApiState>>,
    Path(_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&s, &headers) {
        return unauthorized();
    }
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({
            "detail": [
                { "loc": ["body", "name"], "msg": "field required", "type": "value_error" }
            ]
        })),
    )
        .into_response()
}

async fn delete_asset(
    State(s): State<Arc<ApiState>>,
    Path(_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&s, &headers) {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

/// Never responds within any sane client timeout.
async fn hang() -> StatusCode {
    tokio::time::sleep(Duration::from_secs(600)).await;
    StatusCode::OK
}

async fn kpi_summary(State(s): State<Arc<ApiState>>, headers: HeaderMap) -> Response {
    if !authorized(&s, &headers) {
        return unauthorized();
    }
    Json(serde_json::json!({
        "total_workorders": 37,
        "open_workorders": 9,
        "in_progress_workorders": 4,
        "completed_workorders_30d": 21,
        "overdue_workorders": 3,
        "planned_pct": 62.5,
        "avg_completion_time_hours": 18.4,
        "mttr_hours": 6.2,
        "mtbf_hours": 410.0,
    }))
    .into_response()
}

async fn planner_week(State(s): State<Arc<ApiState>>, headers: HeaderMap) -> Response {
    if !authorized(&s, &headers) {
        return unauthorized();
    }
    Json(serde_json::json!({
        "start": "2026-08-03",
        "days": 5,
        "users": [{
            "user": { "id": 7, "first_name": "Ines", "last_name": "Vega", "role": "Tecnico" },
            "days": [{
                "date": "2026-08-03",
                "capacity_hours": 8.0,
                "planned_hours": 5.5,
                "free_hours": 2.5,
                "tasks": [{
                    "id": 301,
                    "title": "Lubricate conveyor",
                    "estimated_hours": 1.5,
                    "status": "PENDING",
                    "priority": "MEDIUM",
                }],
            }],
        }],
    }))
    .into_response()
}

async fn always_401(State(s): State<Arc<ApiState>>) -> Response {
    s.always_401_calls.fetch_add(1, Ordering::SeqCst);
    (StatusCode::UNAUTHORIZED, Json(serde_json::json!({ "detail": "token rejected" })))
        .into_response()
}
