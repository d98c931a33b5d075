// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maintenance records (executed or scheduled interventions).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::Client;
use crate::query::{Page, Query};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: i64,
    pub description: String,
    pub status: String,
    pub maintenance_type: String,
    pub asset_id: i64,
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workorder_id: Option<i64>,
    pub organization_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMaintenanceRecord {
    pub description: String,
    pub asset_id: i64,
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workorder_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaintenanceRecordUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workorder_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct MaintenanceFilter {
    pub status: Option<String>,
    pub maintenance_type: Option<String>,
    pub user_id: Option<i64>,
    pub workorder_id: Option<i64>,
}

/// Maintenance-record operations.
pub struct MaintenanceApi<'a> {
    client: &'a Client,
}

impl Client {
    pub fn maintenance(&self) -> MaintenanceApi<'_> {
        MaintenanceApi { client: self }
    }
}

impl MaintenanceApi<'_> {
    pub async fn create(&self, record: &NewMaintenanceRecord) -> Result<MaintenanceRecord, ApiError> {
        self.client.post("/maintenance/", record).await
    }

    pub async fn list(
        &self,
        page: &Page,
        filter: &MaintenanceFilter,
    ) -> Result<Vec<MaintenanceRecord>, ApiError> {
        let mut query = Query::new();
        page.apply(&mut query);
        query.push_opt("status", filter.status.as_deref());
        query.push_opt("maintenance_type", filter.maintenance_type.as_deref());
        query.push_opt("user_id", filter.user_id);
        query.push_opt("workorder_id", filter.workorder_id);
        self.client.get(&query.apply("/maintenance/")).await
    }

    pub async fn get(&self, id: i64) -> Result<MaintenanceRecord, ApiError> {
        self.client.get(&format!("/maintenance/{id}")).await
    }

    pub async fn update(
        &self,
        id: i64,
        update: &MaintenanceRecordUpdate,
    ) -> Result<MaintenanceRecord, ApiError> {
        self.client.put(&format!("/maintenance/{id}"), update).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/maintenance/{id}")).await
    }

    pub async fn by_asset(&self, asset_id: i64) -> Result<Vec<MaintenanceRecord>, ApiError> {
        self.client.get(&format!("/maintenance/asset/{asset_id}")).await
    }
}
