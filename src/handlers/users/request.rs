//! User management request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH},
    services::UserAccount,
};

/// Create user request (admin)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,

    /// Strength rules are checked by the service
    #[validate(length(min = 1, max = MAX_PASSWORD_LENGTH))]
    pub password: String,

    #[serde(default)]
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub last_name: String,

    pub role: String,
}

impl CreateUserRequest {
    pub fn account(&self) -> UserAccount<'_> {
        UserAccount {
            email: &self.email,
            first_name: self.first_name.trim(),
            last_name: self.last_name.trim(),
            role: &self.role,
        }
    }
}

/// Update user request (admin). A present `password` resets it.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email)]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub last_name: String,

    pub role: String,

    #[validate(length(min = 1, max = MAX_PASSWORD_LENGTH))]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn account(&self) -> UserAccount<'_> {
        UserAccount {
            email: &self.email,
            first_name: self.first_name.trim(),
            last_name: self.last_name.trim(),
            role: &self.role,
        }
    }
}
