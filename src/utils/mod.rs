//! Utility functions

pub mod similarity;
pub mod time;
pub mod validation;

pub use similarity::{distance, is_similar, similarity};
pub use time::{now_utc, school_year_for};
pub use validation::{normalize_list, normalize_name, validate_password, validate_role};
