// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dashboard KPIs. All aggregation happens server-side; these are read-only
//! views.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::Client;
use crate::query::Query;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_workorders: i64,
    pub open_workorders: i64,
    pub in_progress_workorders: i64,
    pub completed_workorders_30d: i64,
    pub overdue_workorders: i64,
    /// Share of completed work that was planned (0-100).
    pub planned_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_completion_time_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mttr_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtbf_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mttf_hours: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiTrendPoint {
    pub label: String,
    pub created: i64,
    pub completed: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiTrends {
    pub period: String,
    pub window: i64,
    pub points: Vec<KpiTrendPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetKpi {
    pub total: i64,
    pub active: i64,
    pub maintenance: i64,
    pub inactive: i64,
    pub retired: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrderKpi {
    pub total: i64,
    pub draft: i64,
    pub scheduled: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub overdue: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureKpi {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub critical: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyResponsePoint {
    pub month: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_response_hours: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyResponse {
    pub points: Vec<MonthlyResponsePoint>,
}

/// KPI read operations.
pub struct KpiApi<'a> {
    client: &'a Client,
}

impl Client {
    pub fn kpi(&self) -> KpiApi<'_> {
        KpiApi { client: self }
    }
}

impl KpiApi<'_> {
    pub async fn summary(&self) -> Result<KpiSummary, ApiError> {
        self.client.get("/kpi/summary").await
    }

    /// Created/completed counts per period over the trailing window.
    pub async fn trends(&self, weeks: u32) -> Result<KpiTrends, ApiError> {
        let mut query = Query::new();
        query.push("weeks", weeks);
        self.client.get(&query.apply("/kpi/trends")).await
    }

    pub async fn assets(&self) -> Result<AssetKpi, ApiError> {
        self.client.get("/kpi/assets").await
    }

    pub async fn workorders(&self) -> Result<WorkOrderKpi, ApiError> {
        self.client.get("/kpi/workorders").await
    }

    pub async fn failures(&self) -> Result<FailureKpi, ApiError> {
        self.client.get("/kpi/failures").await
    }

    pub async fn monthly_response(&self, months: u32) -> Result<MonthlyResponse, ApiError> {
        let mut query = Query::new();
        query.push("months", months);
        self.client.get(&query.apply("/kpi/response/monthly")).await
    }
}
