// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Authentication and account operations.

use serde::{Deserialize, Serialize};

use crate::api::users::{NewUser, User};
use crate::error::ApiError;
use crate::http::Client;

/// Standard token response from login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Access-token lifetime in seconds. 0 means no expiry was reported.
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Body of the refresh call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Profile of the authenticated user (`GET /users/me`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub role: String,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// First-run check: whether the backing database has any users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseStatus {
    pub has_users: bool,
}

/// Authentication operations.
pub struct AuthApi<'a> {
    client: &'a Client,
}

impl Client {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }
}

impl AuthApi<'_> {
    /// Password-grant login. Installs the returned token pair into the
    /// session (and its persisted mirror).
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let form = [
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
            ("scope", ""),
            ("client_id", ""),
            ("client_secret", ""),
        ];
        let token: TokenResponse = self.client.post_form("/auth/login", &form).await?;
        self.client.session().install(&token).await;
        tracing::info!(username, "logged in");
        Ok(token)
    }

    /// End the session. Local credentials are cleared even when the server
    /// call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.client.post_empty::<()>("/auth/logout").await;
        self.client.session().clear().await;
        result
    }

    /// Fetch the authenticated profile and cache it in the session.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let profile: UserProfile = self.client.get("/users/me").await?;
        self.client.session().set_profile(profile.clone()).await;
        Ok(profile)
    }

    pub async fn register(&self, user: &NewUser) -> Result<User, ApiError> {
        self.client.post("/auth/register", user).await
    }

    pub async fn change_password(&self, req: &ChangePasswordRequest) -> Result<(), ApiError> {
        self.client.put("/auth/change-password", req).await
    }

    pub async fn forgot_password(&self, req: &ForgotPasswordRequest) -> Result<(), ApiError> {
        self.client.post("/auth/forgot-password", req).await
    }

    pub async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<(), ApiError> {
        self.client.post("/auth/reset-password", req).await
    }

    pub async fn database_status(&self) -> Result<DatabaseStatus, ApiError> {
        self.client.get("/auth/check-db").await
    }
}
