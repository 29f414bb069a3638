//! File-tree endpoints.

use crate::{error_response, AppState, AuthUser};
use api_shared::{
    CreateFileReq, ErrorRes, HealthRes, MessageRes, RenameFileReq,
};
use api_shared::HealthService;
use axum::extract::{Path as AxumPath, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use sketch_core::{FileItem, NewFileParams};

/// Envelope keys every stored drawing document carries. Missing keys are
/// filled in before the payload is persisted.
fn apply_document_envelope(value: &mut serde_json::Value) {
    let Some(map) = value.as_object_mut() else {
        return;
    };
    map.entry("type")
        .or_insert_with(|| serde_json::json!("sketchdeck"));
    map.entry("version").or_insert_with(|| serde_json::json!(2));
    map.entry("source")
        .or_insert_with(|| serde_json::json!("https://sketchdeck.app"));
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API.
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
pub(crate) async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/files",
    responses(
        (status = 200, description = "Flat listing of all files and folders", body = [FileItem]),
        (status = 401, description = "Not authenticated", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Flat listing of every node in the drawing hierarchy.
#[axum::debug_handler]
pub(crate) async fn get_files(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> Result<Json<Vec<FileItem>>, (StatusCode, Json<ErrorRes>)> {
    state
        .files
        .get_files()
        .map(Json)
        .map_err(|e| error_response("Get files", e))
}

#[utoipa::path(
    get,
    path = "/api/files/tree",
    responses(
        (status = 200, description = "Nested listing of all files and folders", body = [FileItem]),
        (status = 401, description = "Not authenticated", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Nested listing of the drawing hierarchy, roots first.
#[axum::debug_handler]
pub(crate) async fn get_file_tree(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> Result<Json<Vec<FileItem>>, (StatusCode, Json<ErrorRes>)> {
    state
        .files
        .get_file_tree()
        .map(Json)
        .map_err(|e| error_response("Get file tree", e))
}

#[utoipa::path(
    post,
    path = "/api/files",
    request_body = CreateFileReq,
    responses(
        (status = 201, description = "File created", body = FileItem),
        (status = 400, description = "Bad request", body = ErrorRes),
        (status = 401, description = "Not authenticated", body = ErrorRes),
        (status = 409, description = "Duplicate id", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Creates a file or folder.
///
/// Documents get the canonical extension and, when created without content,
/// a default empty scene.
#[axum::debug_handler]
pub(crate) async fn create_file(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Json(req): Json<CreateFileReq>,
) -> Result<(StatusCode, Json<FileItem>), (StatusCode, Json<ErrorRes>)> {
    let params = NewFileParams {
        name: req.name,
        parent_id: req.parent_id,
        is_folder: req.is_folder,
        content: if req.content.is_empty() {
            None
        } else {
            Some(req.content)
        },
    };

    state
        .files
        .create_file(params)
        .map(|item| (StatusCode::CREATED, Json(item)))
        .map_err(|e| error_response("Create file", e))
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadQuery {
    #[serde(rename = "parentId", default)]
    parent_id: String,
}

#[utoipa::path(
    post,
    path = "/api/files/upload",
    request_body = String,
    params(
        ("parentId" = Option<String>, Query, description = "Folder to upload into"),
        ("X-File-Name" = Option<String>, Header, description = "Client-side filename")
    ),
    responses(
        (status = 201, description = "Document uploaded", body = FileItem),
        (status = 400, description = "Body is empty or not JSON", body = ErrorRes),
        (status = 401, description = "Not authenticated", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Uploads a document payload as a new file.
///
/// The filename comes from the `X-File-Name` header; without one, a
/// timestamped name is generated. The payload must be a JSON object and is
/// normalized with the document envelope before storage.
#[axum::debug_handler]
pub(crate) async fn upload_file(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: String,
) -> Result<(StatusCode, Json<FileItem>), (StatusCode, Json<ErrorRes>)> {
    if body.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorRes {
                error: "empty file content".into(),
            }),
        ));
    }

    let mut value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorRes {
                error: format!("content must be valid JSON: {e}"),
            }),
        )
    })?;
    apply_document_envelope(&mut value);

    let name = headers
        .get("X-File-Name")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| {
            format!("Untitled-{}", chrono::Utc::now().format("%Y-%m-%d-%H%M"))
        });

    let params = NewFileParams {
        name,
        parent_id: query.parent_id,
        is_folder: false,
        content: Some(value.to_string()),
    };

    state
        .files
        .create_file(params)
        .map(|item| (StatusCode::CREATED, Json(item)))
        .map_err(|e| error_response("Upload file", e))
}

#[utoipa::path(
    get,
    path = "/api/files/{id}",
    params(("id" = String, Path, description = "Node id")),
    responses(
        (status = 200, description = "File with children or parsed content", body = FileItem),
        (status = 401, description = "Not authenticated", body = ErrorRes),
        (status = 404, description = "Unknown id", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// One node's projection: folders carry their direct children, documents
/// their parsed content.
#[axum::debug_handler]
pub(crate) async fn get_file_by_id(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<FileItem>, (StatusCode, Json<ErrorRes>)> {
    state
        .files
        .get_file_by_id(&id)
        .map(Json)
        .map_err(|e| error_response("Get file", e))
}

#[utoipa::path(
    put,
    path = "/api/files/{id}",
    params(("id" = String, Path, description = "Node id")),
    request_body = String,
    responses(
        (status = 200, description = "Updated file", body = FileItem),
        (status = 400, description = "Body is empty or not JSON", body = ErrorRes),
        (status = 401, description = "Not authenticated", body = ErrorRes),
        (status = 404, description = "Unknown id", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Replaces a document's content.
///
/// The body must be a JSON object; missing envelope keys are filled in
/// before persistence. Returns the updated projection.
#[axum::debug_handler]
pub(crate) async fn save_file(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    AxumPath(id): AxumPath<String>,
    body: String,
) -> Result<Json<FileItem>, (StatusCode, Json<ErrorRes>)> {
    if body.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorRes {
                error: "empty file content".into(),
            }),
        ));
    }

    let mut value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorRes {
                error: format!("content must be valid JSON: {e}"),
            }),
        )
    })?;
    apply_document_envelope(&mut value);

    state
        .files
        .save_file(&id, &value.to_string())
        .map_err(|e| error_response("Save file", e))?;

    state
        .files
        .get_file_by_id(&id)
        .map(Json)
        .map_err(|e| error_response("Get file after save", e))
}

#[utoipa::path(
    put,
    path = "/api/files/{id}/rename",
    params(("id" = String, Path, description = "Node id")),
    request_body = RenameFileReq,
    responses(
        (status = 200, description = "Renamed file", body = FileItem),
        (status = 400, description = "Invalid name", body = ErrorRes),
        (status = 401, description = "Not authenticated", body = ErrorRes),
        (status = 404, description = "Unknown id", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Renames a node; folder renames cascade path recomputation to every
/// descendant.
#[axum::debug_handler]
pub(crate) async fn rename_file(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<RenameFileReq>,
) -> Result<Json<FileItem>, (StatusCode, Json<ErrorRes>)> {
    state
        .files
        .rename_file(&id, &req.name)
        .map_err(|e| error_response("Rename file", e))?;

    state
        .files
        .get_file_by_id(&id)
        .map(Json)
        .map_err(|e| error_response("Get file after rename", e))
}

#[utoipa::path(
    delete,
    path = "/api/files/{id}",
    params(("id" = String, Path, description = "Node id")),
    responses(
        (status = 200, description = "File deleted", body = MessageRes),
        (status = 401, description = "Not authenticated", body = ErrorRes),
        (status = 404, description = "Unknown id", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Deletes a node; folders cascade through every descendant first.
#[axum::debug_handler]
pub(crate) async fn delete_file(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<MessageRes>, (StatusCode, Json<ErrorRes>)> {
    state
        .files
        .delete_file(&id)
        .map(|()| {
            Json(MessageRes {
                message: "file deleted successfully".into(),
            })
        })
        .map_err(|e| error_response("Delete file", e))
}

#[utoipa::path(
    get,
    path = "/api/files/{id}/content",
    params(("id" = String, Path, description = "Node id")),
    responses(
        (status = 200, description = "Raw document content", body = String),
        (status = 401, description = "Not authenticated", body = ErrorRes),
        (status = 404, description = "No content stored for this id", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// A document's raw stored payload.
#[axum::debug_handler]
pub(crate) async fn get_file_content(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    AxumPath(id): AxumPath<String>,
) -> Result<Response, (StatusCode, Json<ErrorRes>)> {
    let content = state
        .files
        .get_file_content(&id)
        .map_err(|e| error_response("Get file content", e))?;

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        content,
    )
        .into_response())
}
