//! Student request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_CLASS_YEAR, MAX_NAME_LENGTH, MAX_SEARCH_LIMIT, MIN_CLASS_YEAR};

/// Create or rename a student
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub first_name: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub last_name: String,
}

/// Student search query parameters
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentSearchQuery {
    #[serde(default)]
    pub query: String,

    #[validate(range(min = 1, max = MAX_SEARCH_LIMIT))]
    pub limit: Option<u32>,

    pub school_year: Option<i32>,

    #[validate(range(min = MIN_CLASS_YEAR, max = MAX_CLASS_YEAR))]
    pub class_year: Option<i16>,

    /// Single letter, checked by the service
    pub class_letter: Option<String>,
}

/// Similar student lookup query parameters
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SimilarStudentsQuery {
    #[validate(length(max = MAX_NAME_LENGTH))]
    #[serde(default)]
    pub first_name: String,

    #[validate(length(max = MAX_NAME_LENGTH))]
    #[serde(default)]
    pub last_name: String,

    #[validate(range(min = 0.0, max = 1.0))]
    pub threshold: Option<f64>,

    #[validate(range(min = 1, max = MAX_SEARCH_LIMIT))]
    pub limit: Option<u32>,
}
