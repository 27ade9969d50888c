//! Competition participant model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Participant row joined with the student's name
#[derive(Debug, Clone, FromRow)]
pub struct ParticipantDetail {
    pub competition_id: i32,
    pub student_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub class_year: i16,
    pub class_letter: String,
    pub school_year: i32,
    pub created_at: DateTime<Utc>,
}

/// Participant row joined with its competition, seen from the student side
#[derive(Debug, Clone, FromRow)]
pub struct StudentParticipation {
    pub student_id: i32,
    pub competition_id: i32,
    pub competition_name: String,
    pub competition_date: NaiveDate,
    pub class_year: i16,
    pub class_letter: String,
    pub school_year: i32,
    pub created_at: DateTime<Utc>,
}

/// A resolved participant ready to be written to the join table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParticipant {
    pub student_id: i32,
    pub class_year: i16,
    pub class_letter: String,
    pub school_year: i32,
}
