// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Departments. `parent_id` links form the tree rendered as the
//! organisation chart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::users::User;
use crate::error::ApiError;
use crate::http::Client;
use crate::query::{Page, Query};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
    pub organization_id: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDepartment {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
    pub organization_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Department operations.
pub struct DepartmentsApi<'a> {
    client: &'a Client,
}

impl Client {
    pub fn departments(&self) -> DepartmentsApi<'_> {
        DepartmentsApi { client: self }
    }
}

impl DepartmentsApi<'_> {
    pub async fn create(&self, department: &NewDepartment) -> Result<Department, ApiError> {
        self.client.post("/department/", department).await
    }

    pub async fn list(&self, page: &Page) -> Result<Vec<Department>, ApiError> {
        let mut query = Query::new();
        page.apply(&mut query);
        self.client.get(&query.apply("/department/")).await
    }

    pub async fn get(&self, id: i64) -> Result<Department, ApiError> {
        self.client.get(&format!("/department/{id}")).await
    }

    pub async fn update(&self, id: i64, update: &DepartmentUpdate) -> Result<Department, ApiError> {
        self.client.put(&format!("/department/{id}"), update).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/department/{id}")).await
    }

    /// Technicians assignable to work in this department.
    pub async fn technicians(&self, id: i64) -> Result<Vec<User>, ApiError> {
        self.client.get(&format!("/department/{id}/technicians")).await
    }

    pub async fn users(&self, id: i64) -> Result<Vec<User>, ApiError> {
        self.client.get(&format!("/department/{id}/users")).await
    }
}
