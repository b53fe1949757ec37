use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::debug;

use super::types::*;
use super::AppState;
use crate::account::types::{AccountInput, AccountView};
use crate::error::ApiError;
use crate::group::types::{GroupInput, GroupView};

// --- Users ---

pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<AccountInput>,
) -> Result<Json<AccountView>, ApiError> {
    debug!("register request for {}", input.email);
    Ok(Json(state.identity.register(input)?))
}

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountView>>, ApiError> {
    Ok(Json(state.identity.list()?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<AccountView>, ApiError> {
    Ok(Json(state.identity.get(&user_id)?))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(input): Json<AccountInput>,
) -> Result<Json<AccountView>, ApiError> {
    Ok(Json(state.identity.update_profile(&user_id, input)?))
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.reset.request_reset(&req.email).await?;
    Ok(Json(serde_json::json!({
        "status": format!("Password reset link sent to {}", req.email)
    })))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Query(query): Query<ResetTokenQuery>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.reset.reset_password(&query.token, &req.new_password).await?;
    Ok(Json(serde_json::json!({
        "status": "Password has been successfully reset"
    })))
}

pub async fn add_to_group(
    State(state): State<AppState>,
    Query(query): Query<AddToGroupQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.membership.add_membership(&query.user_id, &query.group_id)?;
    Ok(Json(serde_json::json!({
        "status": format!("User {} added to group {}", query.user_id, query.group_id)
    })))
}

// --- Groups ---

pub async fn create_group(
    State(state): State<AppState>,
    Json(input): Json<GroupInput>,
) -> Result<Json<GroupView>, ApiError> {
    Ok(Json(state.groups.create(input)?))
}

pub async fn update_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Json(input): Json<GroupInput>,
) -> Result<Json<GroupView>, ApiError> {
    Ok(Json(state.groups.update(&group_id, input)?))
}

pub async fn list_groups(
    State(state): State<AppState>,
) -> Result<Json<Vec<GroupView>>, ApiError> {
    Ok(Json(state.groups.list()?))
}

pub async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<Json<GroupView>, ApiError> {
    Ok(Json(state.groups.get(&group_id)?))
}
