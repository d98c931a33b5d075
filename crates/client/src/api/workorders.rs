// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::Client;
use crate::query::{Page, Query};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderStatus {
    Open,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderType {
    Repair,
    Inspection,
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub work_type: WorkOrderType,
    pub status: WorkOrderStatus,
    pub priority: WorkOrderPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    pub asset_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,
    pub created_by: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_id: Option<i64>,
    /// Link to the maintenance plan that generated this order, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<i64>,
    pub organization_id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkOrder {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_type: Option<WorkOrderType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkOrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<WorkOrderPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
    pub asset_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkOrderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_type: Option<WorkOrderType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkOrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<WorkOrderPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct WorkOrderFilter {
    pub status: Option<WorkOrderStatus>,
    pub priority: Option<WorkOrderPriority>,
    pub asset_id: Option<i64>,
    pub assigned_to: Option<i64>,
}

/// Work-order operations.
pub struct WorkOrdersApi<'a> {
    client: &'a Client,
}

impl Client {
    pub fn workorders(&self) -> WorkOrdersApi<'_> {
        WorkOrdersApi { client: self }
    }
}

impl WorkOrdersApi<'_> {
    pub async fn create(&self, order: &NewWorkOrder) -> Result<WorkOrder, ApiError> {
        self.client.post("/workorders/", order).await
    }

    pub async fn list(
        &self,
        page: &Page,
        filter: &WorkOrderFilter,
    ) -> Result<Vec<WorkOrder>, ApiError> {
        let mut query = Query::new();
        page.apply(&mut query);
        query.push_opt("status", filter.status.map(wire_status));
        query.push_opt("priority", filter.priority.map(wire_priority));
        query.push_opt("asset_id", filter.asset_id);
        query.push_opt("assigned_to", filter.assigned_to);
        self.client.get(&query.apply("/workorders/")).await
    }

    pub async fn get(&self, id: i64) -> Result<WorkOrder, ApiError> {
        self.client.get(&format!("/workorders/{id}")).await
    }

    pub async fn update(&self, id: i64, update: &WorkOrderUpdate) -> Result<WorkOrder, ApiError> {
        self.client.put(&format!("/workorders/{id}"), update).await
    }

    /// Partial update (status transitions from the board view).
    pub async fn patch(&self, id: i64, update: &WorkOrderUpdate) -> Result<WorkOrder, ApiError> {
        self.client.patch(&format!("/workorders/{id}"), update).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/workorders/{id}")).await
    }

    /// Close the order, recording actuals. Inventory deduction for used
    /// components happens server-side.
    pub async fn complete(&self, id: i64, update: &WorkOrderUpdate) -> Result<WorkOrder, ApiError> {
        self.client.post(&format!("/workorders/{id}/complete"), update).await
    }
}

fn wire_status(status: WorkOrderStatus) -> &'static str {
    match status {
        WorkOrderStatus::Open => "OPEN",
        WorkOrderStatus::Assigned => "ASSIGNED",
        WorkOrderStatus::InProgress => "IN_PROGRESS",
        WorkOrderStatus::Completed => "COMPLETED",
        WorkOrderStatus::Cancelled => "CANCELLED",
    }
}

fn wire_priority(priority: WorkOrderPriority) -> &'static str {
    match priority {
        WorkOrderPriority::Low => "LOW",
        WorkOrderPriority::Medium => "MEDIUM",
        WorkOrderPriority::High => "HIGH",
    }
}
