//! Request and response bodies for the REST surface.
//!
//! Wire field names are camelCase, matching the frontend contract. Nodes
//! themselves travel as [`sketch_types::FileItem`]; the types here cover
//! everything around them.

use serde::{Deserialize, Serialize};
use sketch_types::UserInfo;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Body of `POST /files`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileReq {
    pub name: String,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub is_folder: bool,
    #[serde(default)]
    pub content: String,
}

/// Body of `PATCH /files/{id}/name`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RenameFileReq {
    pub name: String,
}

/// Generic confirmation response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// Body of `POST /users/first`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateFirstUserReq {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Response of `GET /users/exists`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HasUsersRes {
    pub has_users: bool,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

/// Response of `POST /auth/login`: the bearer token and the account it
/// belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRes {
    pub token: String,
    pub user: UserInfo,
}

/// Response of `GET /users`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListUsersRes {
    pub users: Vec<UserInfo>,
}
