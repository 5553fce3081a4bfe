use crate::error::AppError;
use crate::models::{AskRequest, AskResponse, LogEntry, TokenUsage};
use crate::pricing;
use crate::services::gemini::UsageMetadata;
use crate::state::AppState;
use crate::validation;
use axum::extract::State;
use axum::Json;
use std::time::Instant;

/// POST /ask — forward a prompt to the model, account for it, return the answer
pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let price = pricing::price_for(&req.model_name)
        .ok_or_else(|| AppError::BadRequest("invalid model name".into()))?;

    if !validation::is_valid_email(&req.email) {
        return Err(AppError::BadRequest("invalid email address".into()));
    }
    if req.prompt.trim().is_empty() {
        return Err(AppError::BadRequest("prompt must not be empty".into()));
    }

    // Registration is a required prior step; nobody is auto-created here.
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".into()))?;
    let user_id = user
        .id
        .ok_or_else(|| AppError::Internal("user record has no _id".into()))?;

    let start = Instant::now();

    let generation = state
        .gemini
        .generate(&req.prompt, &req.model_name)
        .await
        .map_err(|e| AppError::Provider(e.to_string()))?;

    let (prompt_tokens, completion_tokens) = token_counts(generation.usage);
    if generation.usage.is_none() {
        tracing::warn!(model = %req.model_name, "provider returned no usage metadata, billing zero tokens");
    }
    let total_tokens = prompt_tokens + completion_tokens;
    let estimated_cost = pricing::estimate_cost(price, prompt_tokens, completion_tokens);
    let latency = round_millis(start.elapsed().as_secs_f64());

    let entry = LogEntry {
        id: None,
        user_id,
        email: user.email.clone(),
        model_name: req.model_name.clone(),
        prompt: req.prompt.clone(),
        response: generation.text.clone(),
        usage: TokenUsage {
            prompt: prompt_tokens,
            completion: completion_tokens,
            total: total_tokens,
        },
        cost: estimated_cost,
        latency,
        created_at: chrono::Utc::now(),
    };
    state.logs.insert(&entry).await?;

    tracing::info!(
        email = %user.email,
        model = %req.model_name,
        total_tokens,
        cost = estimated_cost,
        latency,
        "prompt served"
    );

    Ok(Json(AskResponse {
        response: generation.text,
        prompt_tokens,
        response_tokens: completion_tokens,
        total_tokens,
        estimated_cost,
    }))
}

/// Absent usage metadata degrades to zero counts; the response itself is
/// still returned.
fn token_counts(usage: Option<UsageMetadata>) -> (i64, i64) {
    match usage {
        Some(u) => (u.prompt_token_count, u.candidates_token_count),
        None => (0, 0),
    }
}

fn round_millis(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}
