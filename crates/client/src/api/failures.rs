// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::Client;
use crate::query::{Page, Query};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Failure {
    pub id: i64,
    pub description: String,
    pub status: String,
    pub severity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<i64>,
    pub reported_by: i64,
    pub organization_id: i64,
    pub reported_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Failure joined with the work order opened for it, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureWithWorkOrder {
    #[serde(flatten)]
    pub failure: Failure,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workorder_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFailure {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FailureUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FailureFilter {
    pub status: Option<String>,
    pub severity: Option<String>,
    pub reported_by: Option<i64>,
    /// ISO dates bounding `reported_date`.
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// Failure operations.
pub struct FailuresApi<'a> {
    client: &'a Client,
}

impl Client {
    pub fn failures(&self) -> FailuresApi<'_> {
        FailuresApi { client: self }
    }
}

impl FailuresApi<'_> {
    pub async fn create(&self, failure: &NewFailure) -> Result<Failure, ApiError> {
        self.client.post("/failures/", failure).await
    }

    pub async fn list(&self, page: &Page, filter: &FailureFilter) -> Result<Vec<Failure>, ApiError> {
        let mut query = Query::new();
        page.apply(&mut query);
        query.push_opt("status", filter.status.as_deref());
        query.push_opt("severity", filter.severity.as_deref());
        query.push_opt("reported_by", filter.reported_by);
        query.push_opt("date_from", filter.date_from.as_deref());
        query.push_opt("date_to", filter.date_to.as_deref());
        self.client.get(&query.apply("/failures/")).await
    }

    /// Failures with their linked work orders, for the triage screen.
    pub async fn list_with_workorders(&self) -> Result<Vec<FailureWithWorkOrder>, ApiError> {
        self.client.get("/failures/with-workorders").await
    }

    pub async fn get(&self, id: i64) -> Result<Failure, ApiError> {
        self.client.get(&format!("/failures/{id}")).await
    }

    pub async fn update(&self, id: i64, update: &FailureUpdate) -> Result<Failure, ApiError> {
        self.client.put(&format!("/failures/{id}"), update).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/failures/{id}")).await
    }

    pub async fn by_asset(&self, asset_id: i64) -> Result<Vec<Failure>, ApiError> {
        self.client.get(&format!("/failures/asset/{asset_id}")).await
    }
}
