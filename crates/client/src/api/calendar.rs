// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-user working calendars: weekly patterns, special days, vacations.
//! These feed the planner's capacity computation server-side.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::Client;
use crate::query::Query;

/// Recurring weekly capacity for one weekday (0 = Monday).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingDayPattern {
    pub weekday: u8,
    pub hours: f64,
    pub is_active: bool,
}

/// A one-off override of the weekly pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialDay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub is_working: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamVacationDay {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Calendar operations.
pub struct CalendarApi<'a> {
    client: &'a Client,
}

impl Client {
    pub fn calendar(&self) -> CalendarApi<'_> {
        CalendarApi { client: self }
    }
}

impl CalendarApi<'_> {
    pub async fn pattern(&self, user_id: i64) -> Result<Vec<WorkingDayPattern>, ApiError> {
        self.client.get(&format!("/calendar/{user_id}/pattern")).await
    }

    pub async fn update_pattern(
        &self,
        user_id: i64,
        pattern: &[WorkingDayPattern],
    ) -> Result<Vec<WorkingDayPattern>, ApiError> {
        self.client.put(&format!("/calendar/{user_id}/pattern"), pattern).await
    }

    pub async fn special_days(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SpecialDay>, ApiError> {
        let mut query = Query::new();
        query.push("start", start);
        query.push("end", end);
        self.client.get(&query.apply(&format!("/calendar/{user_id}/special"))).await
    }

    pub async fn add_special_day(
        &self,
        user_id: i64,
        day: &SpecialDay,
    ) -> Result<SpecialDay, ApiError> {
        self.client.post(&format!("/calendar/{user_id}/special"), day).await
    }

    pub async fn delete_special_day(&self, user_id: i64, special_id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/calendar/{user_id}/special/{special_id}")).await
    }

    /// Expand a vacation range into special days.
    pub async fn add_vacation_range(
        &self,
        user_id: i64,
        range: &VacationRange,
    ) -> Result<Vec<SpecialDay>, ApiError> {
        self.client.post(&format!("/calendar/{user_id}/vacations"), range).await
    }

    pub async fn team_vacations(
        &self,
        manager_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TeamVacationDay>, ApiError> {
        let mut query = Query::new();
        query.push("start", start);
        query.push("end", end);
        self.client.get(&query.apply(&format!("/calendar/team/{manager_id}/vacations"))).await
    }
}
