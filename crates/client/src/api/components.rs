// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Component management. Components belong to an asset and back the
//! inventory and sensor screens.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::Client;
use crate::query::{Page, Query};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub component_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_interval_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_id: Option<i64>,
    pub asset_id: i64,
    pub organization_id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_expiry: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_maintenance_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComponent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub component_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_interval_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_id: Option<i64>,
    pub asset_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_expiry: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_interval_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_expiry: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_maintenance_date: Option<NaiveDate>,
}

/// Component with the aggregate counters shown on the detail screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDetail {
    #[serde(flatten)]
    pub component: Component,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sensors: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_failures: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_maintenance_records: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tasks: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_maintenance: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_since_last_maintenance: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct ComponentFilter {
    pub status: Option<String>,
    pub component_type: Option<String>,
}

/// Component operations.
pub struct ComponentsApi<'a> {
    client: &'a Client,
}

impl Client {
    pub fn components(&self) -> ComponentsApi<'_> {
        ComponentsApi { client: self }
    }
}

impl ComponentsApi<'_> {
    pub async fn create(&self, component: &NewComponent) -> Result<Component, ApiError> {
        self.client.post("/components/", component).await
    }

    pub async fn list(
        &self,
        page: &Page,
        filter: &ComponentFilter,
    ) -> Result<Vec<Component>, ApiError> {
        let mut query = Query::new();
        page.apply(&mut query);
        query.push_opt("status", filter.status.as_deref());
        query.push_opt("component_type", filter.component_type.as_deref());
        self.client.get(&query.apply("/components/")).await
    }

    pub async fn get(&self, id: i64) -> Result<ComponentDetail, ApiError> {
        self.client.get(&format!("/components/{id}")).await
    }

    pub async fn update(&self, id: i64, update: &ComponentUpdate) -> Result<Component, ApiError> {
        self.client.put(&format!("/components/{id}"), update).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/components/{id}")).await
    }

    /// Components installed on one asset.
    pub async fn by_asset(&self, asset_id: i64) -> Result<Vec<Component>, ApiError> {
        self.client.get(&format!("/components/asset/{asset_id}")).await
    }
}
