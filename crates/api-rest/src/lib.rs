//! # API REST
//!
//! REST API implementation for Sketchdeck.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status mapping)
//!
//! Uses `api-shared` for common types and `sketch-core` for all behaviour.
//! Handlers stay thin: parse the request, call the use-case facade, map the
//! typed error onto a status code.

#![warn(rust_2018_idioms)]

mod files;
mod users;

use api_shared::{
    CreateFileReq, CreateFirstUserReq, ErrorRes, HasUsersRes, HealthRes, ListUsersRes, LoginReq,
    LoginRes, MessageRes, RenameFileReq,
};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::Json;
use axum::routing::{delete, get, post, put};
use axum::Router;
use sketch_core::{CoreError, FileService, UserService};
use sketch_types::{FileItem, User, UserInfo};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub files: FileService,
    pub users: UserService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        files::health,
        files::get_files,
        files::get_file_tree,
        files::create_file,
        files::upload_file,
        files::get_file_by_id,
        files::save_file,
        files::rename_file,
        files::delete_file,
        files::get_file_content,
        users::create_first_user,
        users::has_users,
        users::login,
        users::logout,
        users::current_user,
        users::list_users,
    ),
    components(schemas(
        HealthRes,
        FileItem,
        CreateFileReq,
        RenameFileReq,
        MessageRes,
        ErrorRes,
        CreateFirstUserReq,
        HasUsersRes,
        LoginReq,
        LoginRes,
        ListUsersRes,
        UserInfo,
    ))
)]
struct ApiDoc;

/// Builds the full application router, Swagger UI and CORS included.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(files::health))
        .route("/api/files", get(files::get_files))
        .route("/api/files", post(files::create_file))
        .route("/api/files/tree", get(files::get_file_tree))
        .route("/api/files/upload", post(files::upload_file))
        .route("/api/files/:id", get(files::get_file_by_id))
        .route("/api/files/:id", put(files::save_file))
        .route("/api/files/:id", delete(files::delete_file))
        .route("/api/files/:id/rename", put(files::rename_file))
        .route("/api/files/:id/content", get(files::get_file_content))
        .route("/api/auth/create-first-user", post(users::create_first_user))
        .route("/api/auth/has-users", get(users::has_users))
        .route("/api/auth/login", post(users::login))
        .route("/api/auth/logout", post(users::logout))
        .route("/api/auth/me", get(users::current_user))
        .route("/api/auth/users", get(users::list_users))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Maps a core error onto its HTTP status and an error envelope.
///
/// Unexpected failures are logged with their context and surfaced as an
/// opaque 500; typed failures carry their own message.
pub(crate) fn error_response(context: &str, err: CoreError) -> (StatusCode, Json<ErrorRes>) {
    let status = match &err {
        CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        CoreError::Conflict(_) => StatusCode::CONFLICT,
        CoreError::Invalid(_) => StatusCode::BAD_REQUEST,
        CoreError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("{context} error: {err:?}");
        (
            status,
            Json(ErrorRes {
                error: "Internal error".into(),
            }),
        )
    } else {
        (
            status,
            Json(ErrorRes {
                error: err.to_string(),
            }),
        )
    }
}

/// Extractor for the authenticated user behind a `Bearer` token.
///
/// Rejects with `401` when the header is missing, malformed, or names an
/// unknown/expired session.
pub struct AuthUser(pub User);

fn unauthorized(message: &str) -> (StatusCode, Json<ErrorRes>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorRes {
            error: message.into(),
        }),
    )
}

/// Pulls the bearer token out of an `Authorization` header.
pub(crate) fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, Json<ErrorRes>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| unauthorized("Authentication required"))?;
        match state.users.authenticate(token) {
            Ok(user) => Ok(AuthUser(user)),
            Err(CoreError::Unauthorized(_)) => Err(unauthorized("Invalid or expired token")),
            Err(e) => {
                tracing::error!("authenticate error: {e:?}");
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorRes {
                        error: "Internal error".into(),
                    }),
                ))
            }
        }
    }
}
