//! Authentication and user-management endpoints.

use crate::{bearer_token, error_response, AppState, AuthUser};
use api_shared::{
    CreateFirstUserReq, ErrorRes, HasUsersRes, ListUsersRes, LoginReq, LoginRes, MessageRes,
};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use sketch_types::UserInfo;

#[utoipa::path(
    post,
    path = "/api/auth/create-first-user",
    request_body = CreateFirstUserReq,
    responses(
        (status = 201, description = "Owner account created", body = UserInfo),
        (status = 400, description = "Invalid input", body = ErrorRes),
        (status = 409, description = "System already has users", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Bootstraps the owner account. Only available while no accounts exist.
#[axum::debug_handler]
pub(crate) async fn create_first_user(
    State(state): State<AppState>,
    Json(req): Json<CreateFirstUserReq>,
) -> Result<(StatusCode, Json<UserInfo>), (StatusCode, Json<ErrorRes>)> {
    state
        .users
        .create_first_user(&req.name, &req.email, &req.password)
        .map(|info| (StatusCode::CREATED, Json(info)))
        .map_err(|e| error_response("Create first user", e))
}

#[utoipa::path(
    get,
    path = "/api/auth/has-users",
    responses(
        (status = 200, description = "Whether any account exists", body = HasUsersRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Tells a fresh frontend whether the first-user flow is still needed.
#[axum::debug_handler]
pub(crate) async fn has_users(
    State(state): State<AppState>,
) -> Result<Json<HasUsersRes>, (StatusCode, Json<ErrorRes>)> {
    state
        .users
        .has_users()
        .map(|has_users| Json(HasUsersRes { has_users }))
        .map_err(|e| error_response("Has users", e))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Session issued", body = LoginRes),
        (status = 400, description = "Missing email or password", body = ErrorRes),
        (status = 401, description = "Invalid credentials", body = ErrorRes),
        (status = 428, description = "No accounts exist yet", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Exchanges credentials for a bearer token.
#[axum::debug_handler]
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginReq>,
) -> Result<Json<LoginRes>, (StatusCode, Json<ErrorRes>)> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorRes {
                error: "Email and password are required".into(),
            }),
        ));
    }

    // a system without accounts needs setup, not a login attempt
    let has_users = state
        .users
        .has_users()
        .map_err(|e| error_response("Login", e))?;
    if !has_users {
        return Err((
            StatusCode::PRECONDITION_REQUIRED,
            Json(ErrorRes {
                error: "System setup required: create the first user".into(),
            }),
        ));
    }

    state
        .users
        .login(&req.email, &req.password)
        .map(|(session, user)| {
            Json(LoginRes {
                token: session.token,
                user,
            })
        })
        .map_err(|e| error_response("Login", e))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session revoked", body = MessageRes),
        (status = 401, description = "Not authenticated", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Revokes the presented session token.
#[axum::debug_handler]
pub(crate) async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageRes>, (StatusCode, Json<ErrorRes>)> {
    let Some(token) = bearer_token(&headers) else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorRes {
                error: "Authentication required".into(),
            }),
        ));
    };

    state
        .users
        .logout(&token)
        .map(|()| {
            Json(MessageRes {
                message: "logged out".into(),
            })
        })
        .map_err(|e| error_response("Logout", e))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The authenticated account", body = UserInfo),
        (status = 401, description = "Not authenticated", body = ErrorRes)
    )
)]
/// The account behind the presented session token.
#[axum::debug_handler]
pub(crate) async fn current_user(
    State(_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Json<UserInfo> {
    Json(user.to_info())
}

#[utoipa::path(
    get,
    path = "/api/auth/users",
    responses(
        (status = 200, description = "Every account", body = ListUsersRes),
        (status = 401, description = "Not authenticated", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Lists every account, credentials excluded.
#[axum::debug_handler]
pub(crate) async fn list_users(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> Result<Json<ListUsersRes>, (StatusCode, Json<ErrorRes>)> {
    state
        .users
        .list_users()
        .map(|users| Json(ListUsersRes { users }))
        .map_err(|e| error_response("List users", e))
}
