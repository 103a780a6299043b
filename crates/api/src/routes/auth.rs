use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::ADMIN_ROLE;
use crate::auth::password::verify_admin_password;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

/// Exchange the shared admin password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if body.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }

    // bcrypt blocks the calling thread
    let config = state.auth_config().clone();
    let valid = tokio::task::spawn_blocking(move || verify_admin_password(&config, &body.password))
        .await
        .map_err(|e| AppError::Internal(format!("Password check failed: {e}")))??;

    if !valid {
        tracing::warn!("Rejected admin login attempt");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let jwt = state.jwt_service();
    let access_token = jwt.create_token("admin", ADMIN_ROLE)?;
    tracing::info!("Admin logged in");

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: jwt.expiration_minutes() * 60,
    }))
}
