//! Competition model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::roles;
use crate::utils::school_year_for;

/// Competition database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Competition {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub subjects: Vec<String>,
    pub teachers: Vec<String>,
    pub date: NaiveDate,
    pub level: String,
    pub round: String,
    pub forms: Vec<String>,
    #[sqlx(flatten)]
    pub result: CompetitionResult,
    pub other: Option<String>,
    pub creator_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Outcome of a competition, stored inline on the competition row
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionResult {
    #[sqlx(rename = "result_position")]
    pub position: Option<i32>,
    #[sqlx(rename = "result_special_prize")]
    #[serde(default)]
    pub special_prize: bool,
    #[sqlx(rename = "result_compliment")]
    #[serde(default)]
    pub compliment: bool,
    #[sqlx(rename = "result_next_round")]
    #[serde(default)]
    pub next_round: bool,
}

impl Competition {
    /// School year the competition took place in
    pub fn school_year(&self) -> i32 {
        school_year_for(self.date)
    }

    /// Whether a user may update or delete this competition.
    ///
    /// Admins may modify anything; contributors only what they created.
    pub fn can_be_modified_by(&self, user_id: &Uuid, role: &str) -> bool {
        match role {
            roles::ADMIN => true,
            roles::CONTRIBUTOR => self.creator_id.as_ref() == Some(user_id),
            _ => false,
        }
    }
}
