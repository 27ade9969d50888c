//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH};

/// User login request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1, max = MAX_PASSWORD_LENGTH))]
    pub password: String,

    /// Keep the cookie after the browser closes
    #[serde(default)]
    pub remember_me: bool,
}

/// Email availability query
#[derive(Debug, Deserialize, Validate)]
pub struct CheckEmailQuery {
    #[validate(length(min = 1))]
    pub email: String,
}

/// Change own password
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,

    #[validate(length(min = 1, max = MAX_PASSWORD_LENGTH))]
    pub new_password: String,
}

/// Update own profile
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(email)]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remember_me_defaults_to_false() {
        let req: LoginRequest = serde_json::from_value(serde_json::json!({
            "email": "admin@localhost",
            "password": "Admin123!"
        }))
        .unwrap();
        assert!(!req.remember_me);

        let req: LoginRequest = serde_json::from_value(serde_json::json!({
            "email": "admin@localhost",
            "password": "Admin123!",
            "rememberMe": true
        }))
        .unwrap();
        assert!(req.remember_me);
    }
}
