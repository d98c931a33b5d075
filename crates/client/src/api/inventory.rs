// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spare-part inventory. Stock levels are per component; the ledger itself
//! lives server-side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::components::Component;
use crate::error::ApiError;
use crate::http::Client;
use crate::query::Query;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub component_id: i64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Inventory item with its component embedded (list/detail responses).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemWithComponent {
    pub id: i64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub component: Component,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub component_id: i64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
}

/// Signed stock adjustment applied server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub delta: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Component consumption recorded against a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    pub id: i64,
    pub task_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<i64>,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost_snapshot: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Inventory operations.
pub struct InventoryApi<'a> {
    client: &'a Client,
}

impl Client {
    pub fn inventory(&self) -> InventoryApi<'_> {
        InventoryApi { client: self }
    }
}

impl InventoryApi<'_> {
    pub async fn create(&self, item: &NewInventoryItem) -> Result<InventoryItem, ApiError> {
        self.client.post("/inventory/", item).await
    }

    pub async fn list(
        &self,
        component_type: Option<&str>,
    ) -> Result<Vec<InventoryItemWithComponent>, ApiError> {
        let mut query = Query::new();
        query.push_opt("component_type", component_type);
        self.client.get(&query.apply("/inventory/")).await
    }

    pub async fn get(&self, id: i64) -> Result<InventoryItemWithComponent, ApiError> {
        self.client.get(&format!("/inventory/{id}")).await
    }

    pub async fn by_component(
        &self,
        component_id: i64,
    ) -> Result<InventoryItemWithComponent, ApiError> {
        self.client.get(&format!("/inventory/by-component/{component_id}")).await
    }

    pub async fn update(
        &self,
        id: i64,
        update: &InventoryItemUpdate,
    ) -> Result<InventoryItem, ApiError> {
        self.client.put(&format!("/inventory/{id}"), update).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/inventory/{id}")).await
    }

    /// Apply a signed stock delta (e.g. receiving or writing off parts).
    pub async fn adjust(
        &self,
        id: i64,
        adjustment: &StockAdjustment,
    ) -> Result<InventoryItem, ApiError> {
        self.client.post(&format!("/inventory/{id}/adjust"), adjustment).await
    }

    /// Consumption history, optionally narrowed to one component.
    pub async fn usage(&self, component_id: Option<i64>) -> Result<Vec<UsageRecord>, ApiError> {
        let mut query = Query::new();
        query.push_opt("component_id", component_id);
        self.client.get(&query.apply("/inventory/usage/")).await
    }
}
