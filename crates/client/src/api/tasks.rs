// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tasks: the unit of work the weekly planner schedules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::Client;
use crate::query::{Page, Query};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workorder_id: Option<i64>,
    pub created_by_id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workorder_id: Option<i64>,
}

/// Stock consumption reported when completing a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsedComponent {
    pub component_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workorder_id: Option<i64>,
    /// Components consumed, sent when completing. Drives server-side
    /// inventory deduction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_components: Option<Vec<UsedComponent>>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<i64>,
    pub asset_id: Option<i64>,
    pub workorder_id: Option<i64>,
}

/// Task operations.
pub struct TasksApi<'a> {
    client: &'a Client,
}

impl Client {
    pub fn tasks(&self) -> TasksApi<'_> {
        TasksApi { client: self }
    }
}

impl TasksApi<'_> {
    pub async fn create(&self, task: &NewTask) -> Result<Task, ApiError> {
        self.client.post("/tasks/", task).await
    }

    pub async fn list(&self, page: &Page, filter: &TaskFilter) -> Result<Vec<Task>, ApiError> {
        let mut query = Query::new();
        page.apply(&mut query);
        query.push_opt("status", filter.status.map(wire_status));
        query.push_opt("priority", filter.priority.map(wire_priority));
        query.push_opt("assigned_to", filter.assigned_to);
        query.push_opt("asset_id", filter.asset_id);
        query.push_opt("workorder_id", filter.workorder_id);
        self.client.get(&query.apply("/tasks/")).await
    }

    pub async fn get(&self, id: i64) -> Result<Task, ApiError> {
        self.client.get(&format!("/tasks/{id}")).await
    }

    /// Partial update; the planner drags and status changes go through here.
    pub async fn patch(&self, id: i64, update: &TaskUpdate) -> Result<Task, ApiError> {
        self.client.patch(&format!("/tasks/{id}"), update).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/tasks/{id}")).await
    }

    /// Complete a task, optionally reporting used components.
    pub async fn complete(&self, id: i64, update: &TaskUpdate) -> Result<Task, ApiError> {
        self.client.post(&format!("/tasks/{id}/complete"), update).await
    }
}

fn wire_status(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "PENDING",
        TaskStatus::InProgress => "IN_PROGRESS",
        TaskStatus::Completed => "COMPLETED",
        TaskStatus::Cancelled => "CANCELLED",
    }
}

fn wire_priority(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Low => "LOW",
        TaskPriority::Medium => "MEDIUM",
        TaskPriority::High => "HIGH",
        TaskPriority::Critical => "CRITICAL",
    }
}
