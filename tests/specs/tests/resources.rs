// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service-layer specs: login wire format, session persistence, query
//! propagation, and typed decoding.

use chrono::NaiveDate;
use zyro_client::api::assets::AssetFilter;
use zyro_client::query::Page;
use zyro_client::{Client, ClientConfig};
use zyro_specs::StubApi;

#[tokio::test]
async fn login_sends_form_encoded_password_grant() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    let client = Client::new(ClientConfig::new(api.base_url()));

    client.auth().login("admin", "s3cret").await?;

    let content_type =
        api.login_content_type().await.ok_or_else(|| anyhow::anyhow!("no content type seen"))?;
    assert!(content_type.starts_with("application/x-www-form-urlencoded"), "{content_type}");
    let body = api.login_body().await;
    assert!(body.contains("grant_type=password"), "{body}");
    assert!(body.contains("username=admin"), "{body}");
    assert!(body.contains("password=s3cret"), "{body}");
    Ok(())
}

#[tokio::test]
async fn login_persists_and_restores_across_clients() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    let dir = tempfile::tempdir()?;

    let client = Client::new(ClientConfig::new(api.base_url()).with_state_dir(dir.path()));
    client.auth().login("admin", "secret").await?;
    client.auth().me().await?;
    drop(client);

    let restored = Client::new(ClientConfig::new(api.base_url()).with_state_dir(dir.path()));
    let profile = restored
        .restore_session()
        .await?
        .ok_or_else(|| anyhow::anyhow!("session was not restored"))?;
    assert_eq!(profile.username, "admin");
    assert!(restored.session().is_authenticated().await);
    Ok(())
}

#[tokio::test]
async fn stale_persisted_session_is_cleared_on_restore() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    let dir = tempfile::tempdir()?;

    let client = Client::new(ClientConfig::new(api.base_url()).with_state_dir(dir.path()));
    client.auth().login("admin", "secret").await?;
    drop(client);

    // Revoke everything server-side: the persisted tokens are now dead, and
    // so is the refresh token.
    api.rotate_access_token();
    api.set_fail_refresh(true);

    let restored = Client::new(ClientConfig::new(api.base_url()).with_state_dir(dir.path()));
    assert!(restored.restore_session().await?.is_none());
    assert!(!restored.session().is_authenticated().await);
    Ok(())
}

#[tokio::test]
async fn logout_clears_the_persisted_session() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    let dir = tempfile::tempdir()?;

    let client = Client::new(ClientConfig::new(api.base_url()).with_state_dir(dir.path()));
    client.auth().login("admin", "secret").await?;
    client.auth().logout().await?;

    let restored = Client::new(ClientConfig::new(api.base_url()).with_state_dir(dir.path()));
    assert!(restored.restore_session().await?.is_none());
    Ok(())
}

#[tokio::test]
async fn list_filters_reach_the_wire_as_query_params() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    let client = Client::new(ClientConfig::new(api.base_url()));
    client.auth().login("admin", "secret").await?;

    let page = Page { page: Some(2), page_size: Some(50), search: Some("pump".to_owned()) };
    let filter = AssetFilter { status: Some("ACTIVE".to_owned()), ..Default::default() };
    client.assets().list(&page, &filter).await?;

    assert_eq!(api.last_asset_query().await, "page=2&page_size=50&search=pump&status=ACTIVE");
    Ok(())
}

#[tokio::test]
async fn empty_delete_response_decodes_to_unit() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    let client = Client::new(ClientConfig::new(api.base_url()));
    client.auth().login("admin", "secret").await?;

    client.assets().delete(42).await?;
    Ok(())
}

#[tokio::test]
async fn kpi_summary_decodes_typed() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    let client = Client::new(ClientConfig::new(api.base_url()));
    client.auth().login("admin", "secret").await?;

    let summary = client.kpi().summary().await?;
    assert_eq!(summary.total_workorders, 37);
    assert_eq!(summary.overdue_workorders, 3);
    assert_eq!(summary.mttr_hours, Some(6.2));
    assert!(summary.mttf_hours.is_none());
    Ok(())
}

#[tokio::test]
async fn planner_week_decodes_capacity_grid() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    let client = Client::new(ClientConfig::new(api.base_url()));
    client.auth().login("admin", "secret").await?;

    let week = client.planner().week(None, None).await?;
    assert_eq!(week.start, NaiveDate::from_ymd_opt(2026, 8, 3).ok_or_else(|| anyhow::anyhow!("bad date"))?);
    assert_eq!(week.days, 5);
    assert_eq!(week.users.len(), 1);
    let day = &week.users[0].days[0];
    assert_eq!(day.capacity_hours, 8.0);
    assert_eq!(day.free_hours, 2.5);
    assert_eq!(day.tasks[0].status, "PENDING");
    Ok(())
}

#[tokio::test]
async fn asset_listing_decodes_typed() -> anyhow::Result<()> {
    let api = StubApi::start().await?;
    let client = Client::new(ClientConfig::new(api.base_url()));
    client.auth().login("admin", "secret").await?;

    let assets = client.assets().list(&Page::default(), &AssetFilter::default()).await?;
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].id, 42);
    assert_eq!(assets[0].name, "Hydraulic press");
    assert_eq!(assets[0].status, "ACTIVE");
    assert_eq!(assets[0].location.as_deref(), Some("plant-2"));
    Ok(())
}
