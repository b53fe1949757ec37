pub mod handlers;
pub mod types;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::account::reset::PasswordResetService;
use crate::account::service::IdentityService;
use crate::error::ApiError;
use crate::group::service::GroupService;
use crate::membership::MembershipManager;

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub reset: Arc<PasswordResetService>,
    pub groups: Arc<GroupService>,
    pub membership: Arc<MembershipManager>,
}

pub struct ApiServer {
    state: AppState,
    bind_addr: String,
}

impl ApiServer {
    pub fn new(state: AppState, host: &str, port: u16) -> Self {
        Self {
            state,
            bind_addr: format!("{}:{}", host, port),
        }
    }

    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/users/register", post(handlers::register))
            .route("/users", get(handlers::list_users))
            .route("/users/:user_id", get(handlers::get_user))
            .route("/users/:user_id/profile", put(handlers::update_profile))
            .route("/users/forgot-password", post(handlers::forgot_password))
            .route("/users/reset-password", post(handlers::reset_password))
            .route("/users/add-to-group", post(handlers::add_to_group))
            .route("/groups/create", post(handlers::create_group))
            .route("/groups/update/:group_id", put(handlers::update_group))
            .route("/groups/all", get(handlers::list_groups))
            .route("/groups/:group_id", get(handlers::get_group))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    pub async fn start(self) {
        let app = Self::router(self.state);

        let listener = tokio::net::TcpListener::bind(&self.bind_addr)
            .await
            .expect("Failed to bind API server");

        info!("🌐 API server listening on {}", self.bind_addr);
        axum::serve(listener, app).await.expect("API server failed");
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::TokenExpired => StatusCode::GONE,
            ApiError::PolicyViolation(_) | ApiError::InvalidToken => StatusCode::BAD_REQUEST,
            ApiError::HashingError | ApiError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Internal error: {}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
