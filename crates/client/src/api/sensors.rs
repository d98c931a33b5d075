// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sensor configurations attached to assets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::Client;
use crate::query::{Page, Query};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    pub id: i64,
    pub asset_id: i64,
    pub name: String,
    pub sensor_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSensorConfig {
    pub asset_id: i64,
    pub name: String,
    pub sensor_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorConfigUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct SensorFilter {
    pub sensor_type: Option<String>,
    pub is_active: Option<bool>,
}

/// Sensor-configuration operations.
pub struct SensorsApi<'a> {
    client: &'a Client,
}

impl Client {
    pub fn sensors(&self) -> SensorsApi<'_> {
        SensorsApi { client: self }
    }
}

impl SensorsApi<'_> {
    pub async fn create(&self, sensor: &NewSensorConfig) -> Result<SensorConfig, ApiError> {
        self.client.post("/sensors/", sensor).await
    }

    pub async fn list(&self, page: &Page, filter: &SensorFilter) -> Result<Vec<SensorConfig>, ApiError> {
        let mut query = Query::new();
        page.apply(&mut query);
        query.push_opt("sensor_type", filter.sensor_type.as_deref());
        query.push_opt("is_active", filter.is_active);
        self.client.get(&query.apply("/sensors/")).await
    }

    pub async fn get(&self, id: i64) -> Result<SensorConfig, ApiError> {
        self.client.get(&format!("/sensors/{id}")).await
    }

    pub async fn update(&self, id: i64, update: &SensorConfigUpdate) -> Result<SensorConfig, ApiError> {
        self.client.put(&format!("/sensors/{id}"), update).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/sensors/{id}")).await
    }

    pub async fn by_asset(&self, asset_id: i64) -> Result<Vec<SensorConfig>, ApiError> {
        self.client.get(&format!("/sensors/asset/{asset_id}")).await
    }
}
