use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user. Inserted once on first registration, never mutated.
/// Email is the identity key; uniqueness is enforced by the handler's
/// check-then-insert, not by the collection.
#[derive(Debug, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt: i64,
    pub completion: i64,
    pub total: i64,
}

/// Audit record of one prompt/response exchange. Append-only.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub email: String,
    pub model_name: String,
    pub prompt: String,
    pub response: String,
    pub usage: TokenUsage,
    pub cost: f64,
    /// Wall-clock seconds for the provider call, rounded to 3 decimals.
    pub latency: f64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

// --- API request/response types ---

#[derive(Debug, Serialize, Deserialize)]
pub struct InitUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InitUserResponse {
    pub message: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskRequest {
    pub email: String,
    pub prompt: String,
    pub model_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub response: String,
    pub prompt_tokens: i64,
    pub response_tokens: i64,
    pub total_tokens: i64,
    pub estimated_cost: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub total_cost_usd: f64,
}
