//! Competition response DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Competition, CompetitionResult, ParticipantDetail};

/// Competition with its participants
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionResponse {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub subjects: Vec<String>,
    pub teachers: Vec<String>,
    pub date: NaiveDate,
    pub school_year: i32,
    pub level: String,
    pub round: String,
    pub forms: Vec<String>,
    pub result: CompetitionResult,
    pub other: Option<String>,
    pub creator_id: Option<Uuid>,
    pub participants: Vec<ParticipantResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CompetitionResponse {
    pub fn new(competition: Competition, participants: Vec<ParticipantResponse>) -> Self {
        Self {
            school_year: competition.school_year(),
            id: competition.id,
            name: competition.name,
            location: competition.location,
            subjects: competition.subjects,
            teachers: competition.teachers,
            date: competition.date,
            level: competition.level,
            round: competition.round,
            forms: competition.forms,
            result: competition.result,
            other: competition.other,
            creator_id: competition.creator_id,
            participants,
            created_at: competition.created_at,
            updated_at: competition.updated_at,
        }
    }
}

/// A student taking part in a competition
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub student_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub class_year: i16,
    pub class_letter: String,
    pub school_year: i32,
}

impl From<ParticipantDetail> for ParticipantResponse {
    fn from(p: ParticipantDetail) -> Self {
        Self {
            student_id: p.student_id,
            first_name: p.first_name,
            last_name: p.last_name,
            class_year: p.class_year,
            class_letter: p.class_letter,
            school_year: p.school_year,
        }
    }
}
