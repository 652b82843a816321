use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RegisterRequest {
    pub nickname: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginRequest {
    pub nickname: String,
    pub password: String,
}

/// Body of a successful `/login`. The server also sends `ok: true`, which the
/// client never reads; a missing `is_admin` counts as not-admin.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginResponse {
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VoteRequest {
    pub player_id: i64,
    pub score: f64,
    pub voter: String,
}

/// Body of `DELETE /players/{id}`. The server decides whether the requester
/// may remove that account.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DeletePlayerRequest {
    pub requester: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SetAdminRequest {
    pub requester: String,
    pub target: String,
    pub is_admin: bool,
}

/// Failure bodies are `{"error": "..."}` when the server bothers to explain.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}
