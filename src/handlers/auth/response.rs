//! Authentication response DTOs

use serde::Serialize;

use crate::handlers::users::UserResponse;

/// Successful login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserResponse,
    /// Same value as the session cookie, for `Authorization: Bearer` clients
    pub token: String,
    pub expires_in: i64,
}

/// Email availability
#[derive(Debug, Serialize)]
pub struct CheckEmailResponse {
    pub exists: bool,
}

/// Plain message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
