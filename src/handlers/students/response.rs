//! Student response DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::{Student, StudentParticipation};

/// Student without participation history
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            full_name: s.full_name(),
            id: s.id,
            first_name: s.first_name,
            last_name: s.last_name,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Student with class and participation history
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetailResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub current_class_year: Option<i16>,
    pub current_class_letter: Option<String>,
    pub participations: Vec<ParticipationResponse>,
}

/// One competition a student took part in
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationResponse {
    pub competition_id: i32,
    pub competition_name: String,
    pub competition_date: NaiveDate,
    pub class_year: i16,
    pub class_letter: String,
    pub school_year: i32,
    pub created_at: DateTime<Utc>,
}

impl From<StudentParticipation> for ParticipationResponse {
    fn from(p: StudentParticipation) -> Self {
        Self {
            competition_id: p.competition_id,
            competition_name: p.competition_name,
            competition_date: p.competition_date,
            class_year: p.class_year,
            class_letter: p.class_letter,
            school_year: p.school_year,
            created_at: p.created_at,
        }
    }
}

/// One page of search results
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSearchResponse {
    pub results: Vec<StudentDetailResponse>,
    pub total_count: i64,
}

/// A "did you mean" suggestion
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarStudentResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub score: f64,
    pub recent_participations: Vec<ParticipationResponse>,
}
