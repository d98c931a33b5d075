// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maintenance plans: recurring schedules that generate work orders
//! server-side. The client only manages the plan definitions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::Client;
use crate::query::Query;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanType {
    Preventive,
    Corrective,
    Inspection,
    Predictive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenancePlan {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<PlanType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_weeks: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_months: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_execution_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMaintenancePlan {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<PlanType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_weeks: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_months: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<i64>,
}

/// Partial update; every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaintenancePlanUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<PlanType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_weeks: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_months: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<i64>,
}

/// Parameters for the upcoming-plans window.
#[derive(Debug, Clone, Default)]
pub struct UpcomingFilter {
    pub window_days: Option<u32>,
    pub asset_id: Option<i64>,
    pub show_blocked: bool,
}

/// Maintenance-plan operations, under `/maintenance/plans`.
pub struct PlansApi<'a> {
    client: &'a Client,
}

impl Client {
    pub fn plans(&self) -> PlansApi<'_> {
        PlansApi { client: self }
    }
}

impl PlansApi<'_> {
    pub async fn create(&self, plan: &NewMaintenancePlan) -> Result<MaintenancePlan, ApiError> {
        self.client.post("/maintenance/plans/", plan).await
    }

    pub async fn by_asset(&self, asset_id: i64) -> Result<Vec<MaintenancePlan>, ApiError> {
        let mut query = Query::new();
        query.push("asset_id", asset_id);
        self.client.get(&query.apply("/maintenance/plans")).await
    }

    /// Plans due within the window (default server-side window when unset).
    pub async fn upcoming(&self, filter: &UpcomingFilter) -> Result<Vec<MaintenancePlan>, ApiError> {
        let mut query = Query::new();
        query.push_opt("window_days", filter.window_days);
        query.push_opt("asset_id", filter.asset_id);
        if filter.show_blocked {
            query.push("show_blocked", "true");
        }
        self.client.get(&query.apply("/maintenance/plans/upcoming")).await
    }

    pub async fn update(
        &self,
        id: i64,
        update: &MaintenancePlanUpdate,
    ) -> Result<MaintenancePlan, ApiError> {
        self.client.put(&format!("/maintenance/plans/{id}"), update).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/maintenance/plans/{id}")).await
    }
}
