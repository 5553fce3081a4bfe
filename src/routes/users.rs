use crate::error::AppError;
use crate::models::{InitUserRequest, InitUserResponse, User};
use crate::state::AppState;
use crate::validation;
use axum::extract::State;
use axum::Json;

/// POST /init_user — idempotent registration keyed by email
pub async fn init_user(
    State(state): State<AppState>,
    Json(req): Json<InitUserRequest>,
) -> Result<Json<InitUserResponse>, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    if !validation::is_valid_email(&req.email) {
        return Err(AppError::BadRequest("invalid email address".into()));
    }

    if state.users.find_by_email(&req.email).await?.is_some() {
        return Ok(Json(InitUserResponse {
            message: "User already exists".into(),
            email: req.email,
        }));
    }

    let user = User {
        id: None,
        name: name.to_string(),
        email: req.email.clone(),
        created_at: chrono::Utc::now(),
    };
    state.users.insert(&user).await?;

    tracing::info!(email = %req.email, "registered new user");

    Ok(Json(InitUserResponse {
        message: "New user created".into(),
        email: req.email,
    }))
}
