// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Organizations (tenants).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::Client;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub is_active: bool,
    pub max_users: i64,
    pub max_assets: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_users: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_assets: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_users: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_assets: Option<i64>,
}

/// Aggregate usage counters for one organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationStats {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub user_count: i64,
    pub asset_count: i64,
    pub machine_count: i64,
    pub active_tasks: i64,
    pub pending_failures: i64,
    pub max_users: i64,
    pub max_assets: i64,
}

/// Organization operations. `current` endpoints act on the caller's tenant.
pub struct OrganizationsApi<'a> {
    client: &'a Client,
}

impl Client {
    pub fn organizations(&self) -> OrganizationsApi<'_> {
        OrganizationsApi { client: self }
    }
}

impl OrganizationsApi<'_> {
    pub async fn create(&self, organization: &NewOrganization) -> Result<Organization, ApiError> {
        self.client.post("/organization/", organization).await
    }

    pub async fn current(&self) -> Result<Organization, ApiError> {
        self.client.get("/organization/current").await
    }

    pub async fn update_current(&self, update: &OrganizationUpdate) -> Result<Organization, ApiError> {
        self.client.put("/organization/current", update).await
    }

    pub async fn current_stats(&self) -> Result<OrganizationStats, ApiError> {
        self.client.get("/organization/current/stats").await
    }

    pub async fn by_slug(&self, slug: &str) -> Result<Organization, ApiError> {
        self.client.get(&format!("/organization/slug/{slug}")).await
    }

    pub async fn get(&self, id: i64) -> Result<Organization, ApiError> {
        self.client.get(&format!("/organization/{id}")).await
    }

    pub async fn update(&self, id: i64, update: &OrganizationUpdate) -> Result<Organization, ApiError> {
        self.client.put(&format!("/organization/{id}"), update).await
    }

    pub async fn stats(&self, id: i64) -> Result<OrganizationStats, ApiError> {
        self.client.get(&format!("/organization/{id}/stats")).await
    }
}
