// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Weekly capacity planner. The server computes capacity, planned, and free
//! hours per user per day; the client renders and submits task changes via
//! the tasks service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::Client;
use crate::query::Query;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerTask {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerDay {
    pub date: NaiveDate,
    pub capacity_hours: f64,
    pub planned_hours: f64,
    pub free_hours: f64,
    pub tasks: Vec<PlannerTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_non_working: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerUserRow {
    pub user: PlannerUser,
    pub days: Vec<PlannerDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerWeek {
    /// First day of the window (a Monday by default).
    pub start: NaiveDate,
    pub days: i64,
    pub users: Vec<PlannerUserRow>,
}

/// Planner read operations.
pub struct PlannerApi<'a> {
    client: &'a Client,
}

impl Client {
    pub fn planner(&self) -> PlannerApi<'_> {
        PlannerApi { client: self }
    }
}

impl PlannerApi<'_> {
    /// Fetch the capacity grid starting at `start` (server default: current
    /// week's Monday) spanning `days` days.
    pub async fn week(
        &self,
        start: Option<NaiveDate>,
        days: Option<u32>,
    ) -> Result<PlannerWeek, ApiError> {
        let mut query = Query::new();
        query.push_opt("start", start);
        query.push_opt("days", days);
        self.client.get(&query.apply("/planner/week")).await
    }
}
