// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end specs for the token-refresh pipeline against the stub API.

use std::time::Duration;

use futures_util::future::join_all;
use tokio_util::sync::CancellationToken;
use zyro_client::http::Method;
use zyro_client::{ApiError, Client, ClientConfig, RequestConfig, SessionEvent};
use zyro_specs::StubApi;

fn client_for(api: &StubApi) -> Client {
    Client::new(ClientConfig::new(api.base_url()))
}

// -- Single-flight refresh ----------------------------------------------------

#[tokio::test]
async fn concurrent_expired_requests_share_one_refresh() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    // Lifetime below the client's safety margin: expired as soon as installed.
    api.set_login_expires_in(60);
    let client = client_for(&api);
    client.auth().login("admin", "secret").await?;

    let page = Default::default();
    let asset_filter = Default::default();
    let user_filter = Default::default();
    let failure_filter = Default::default();
    let assets_api = client.assets();
    let users_api = client.users();
    let failures_api = client.failures();
    let (assets, users, failures) = tokio::join!(
        assets_api.list(&page, &asset_filter),
        users_api.list(&page, &user_filter),
        failures_api.list(&page, &failure_filter),
    );
    assets?;
    users?;
    failures?;

    assert_eq!(api.refresh_calls(), 1, "all three callers must share one refresh");
    let tokens = api.asset_tokens_seen().await;
    assert!(tokens.iter().all(|t| t == "access-2"), "tokens: {tokens:?}");
    Ok(())
}

#[tokio::test]
async fn refresh_emits_refreshed_event() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    api.set_login_expires_in(60);
    let client = client_for(&api);
    client.auth().login("admin", "secret").await?;
    let mut events = client.session().subscribe();

    client.assets().list(&Default::default(), &Default::default()).await?;

    assert_eq!(events.recv().await?, SessionEvent::Refreshed);
    Ok(())
}

// -- Reactive 401 path --------------------------------------------------------

#[tokio::test]
async fn stale_token_is_refreshed_after_401_and_retried_once() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    let client = client_for(&api);
    client.auth().login("admin", "secret").await?;

    // Revoke the access token server-side; the client has no way to know.
    api.rotate_access_token();

    let assets = client.assets().list(&Default::default(), &Default::default()).await?;
    assert_eq!(assets.len(), 1);
    assert_eq!(api.refresh_calls(), 1);
    assert_eq!(api.asset_list_calls(), 2, "original request plus one retry");
    Ok(())
}

#[tokio::test]
async fn second_401_surfaces_after_exactly_one_retry() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    let client = client_for(&api);
    client.auth().login("admin", "secret").await?;

    let Err(err) = client.get::<serde_json::Value>("/always-401").await else {
        anyhow::bail!("expected the request to fail");
    };
    assert_eq!(err.status(), 401);
    assert_eq!(api.refresh_calls(), 1, "a second refresh must not be attempted");
    assert_eq!(api.always_401_calls(), 2, "exactly one retry");
    Ok(())
}

// -- Refresh-call exemption ---------------------------------------------------

#[tokio::test]
async fn refresh_call_never_carries_the_access_token() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    api.set_login_expires_in(60);
    let client = client_for(&api);
    client.auth().login("admin", "secret").await?;

    client.assets().list(&Default::default(), &Default::default()).await?;

    assert_eq!(api.refresh_calls(), 1);
    assert!(api.refresh_auth_header().await.is_none(), "refresh must be unauthenticated");
    Ok(())
}

// -- Terminal refresh failure -------------------------------------------------

#[tokio::test]
async fn failed_refresh_clears_the_session_and_rejects_all_waiters() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    api.set_login_expires_in(60);
    let client = client_for(&api);
    client.auth().login("admin", "secret").await?;
    api.set_fail_refresh(true);
    api.set_refresh_delay(100);

    let mut events = client.session().subscribe();

    let results = join_all([
        client.assets().list(&Default::default(), &Default::default()),
        client.assets().list(&Default::default(), &Default::default()),
        client.assets().list(&Default::default(), &Default::default()),
    ])
    .await;

    assert!(results.iter().all(Result::is_err), "every waiter fails with the refresh");
    assert_eq!(api.refresh_calls(), 1);
    assert!(!client.session().is_authenticated().await);
    assert!(client.session().credentials().await.is_none());
    assert_eq!(events.recv().await?, SessionEvent::LoggedOut);
    Ok(())
}

// -- Credential replacement atomicity -----------------------------------------

#[tokio::test]
async fn requests_across_a_refresh_observe_the_same_new_token() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    api.set_login_expires_in(60);
    api.set_refresh_delay(200);
    let client = client_for(&api);
    client.auth().login("admin", "secret").await?;

    // First request triggers the refresh; second starts while it is in
    // flight.
    let first = {
        let client = client.clone();
        tokio::spawn(async move {
            client.assets().list(&Default::default(), &Default::default()).await
        })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    let second = {
        let client = client.clone();
        tokio::spawn(async move {
            client.assets().list(&Default::default(), &Default::default()).await
        })
    };

    first.await??;
    second.await??;

    assert_eq!(api.refresh_calls(), 1);
    let tokens = api.asset_tokens_seen().await;
    assert_eq!(tokens.len(), 2);
    assert!(tokens.iter().all(|t| t == "access-2"), "tokens: {tokens:?}");
    Ok(())
}

// -- Validation errors --------------------------------------------------------

#[tokio::test]
async fn validation_errors_expose_field_level_detail() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    let client = client_for(&api);
    client.auth().login("admin", "secret").await?;

    let update = zyro_client::api::assets::AssetUpdate::default();
    let Err(err) = client.assets().update(42, &update).await else {
        anyhow::bail!("expected a validation failure");
    };
    let ApiError::Validation { errors } = err else {
        anyhow::bail!("expected a validation error, got: {err}");
    };
    assert_eq!(errors.detail.len(), 1);
    assert_eq!(errors.detail[0].msg, "field required");
    assert_eq!(errors.detail[0].kind, "value_error");
    assert_eq!(errors.detail[0].loc, vec![serde_json::json!("body"), serde_json::json!("name")]);
    Ok(())
}

// -- Timeout and cancellation -------------------------------------------------

#[tokio::test]
async fn timeout_surfaces_status_zero_without_refresh() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    let client = client_for(&api);
    client.auth().login("admin", "secret").await?;

    let cfg = RequestConfig { timeout: Some(Duration::from_millis(200)), ..Default::default() };
    let body = serde_json::json!({ "title": "Replace bearing", "asset_id": 42 });
    let Err(err) = client
        .request::<serde_json::Value, _>(Method::POST, "/workorders/", Some(&body), false, Some(&cfg))
        .await
    else {
        anyhow::bail!("expected a timeout");
    };

    assert!(matches!(err, ApiError::Request { .. }));
    assert_eq!(err.status(), 0);
    assert_eq!(api.refresh_calls(), 0, "a timeout must not trigger a refresh");
    Ok(())
}

#[tokio::test]
async fn cancellation_aborts_the_call_with_status_zero() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    let client = client_for(&api);
    client.auth().login("admin", "secret").await?;

    let cancel = CancellationToken::new();
    let cfg = RequestConfig { cancel: Some(cancel.clone()), ..Default::default() };
    let handle = tokio::spawn({
        let client = client.clone();
        async move {
            let body = serde_json::json!({ "title": "Replace bearing", "asset_id": 42 });
            client
                .request::<serde_json::Value, _>(
                    Method::POST,
                    "/workorders/",
                    Some(&body),
                    false,
                    Some(&cfg),
                )
                .await
        }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    cancel.cancel();

    let Err(err) = handle.await? else {
        anyhow::bail!("expected cancellation");
    };
    assert_eq!(err.status(), 0);
    Ok(())
}
