//! Competition repository

use chrono::NaiveDate;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Competition, CompetitionResult},
};

/// Column values written on create and update
#[derive(Debug, Clone)]
pub struct CompetitionFields {
    pub name: String,
    pub location: String,
    pub subjects: Vec<String>,
    pub teachers: Vec<String>,
    pub date: NaiveDate,
    pub level: String,
    pub round: String,
    pub forms: Vec<String>,
    pub result: CompetitionResult,
    pub other: Option<String>,
}

/// Repository for competition database operations
pub struct CompetitionRepository;

impl CompetitionRepository {
    /// Insert a competition owned by `creator_id`
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        fields: &CompetitionFields,
        creator_id: &Uuid,
    ) -> AppResult<Competition> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            INSERT INTO competitions (
                name, location, subjects, teachers, date, level, round, forms,
                result_position, result_special_prize, result_compliment, result_next_round,
                other, creator_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.location)
        .bind(&fields.subjects)
        .bind(&fields.teachers)
        .bind(fields.date)
        .bind(&fields.level)
        .bind(&fields.round)
        .bind(&fields.forms)
        .bind(fields.result.position)
        .bind(fields.result.special_prize)
        .bind(fields.result.compliment)
        .bind(fields.result.next_round)
        .bind(&fields.other)
        .bind(creator_id)
        .fetch_one(executor)
        .await?;

        Ok(competition)
    }

    /// Find competition by ID
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i32,
    ) -> AppResult<Option<Competition>> {
        let competition =
            sqlx::query_as::<_, Competition>(r#"SELECT * FROM competitions WHERE id = $1"#)
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(competition)
    }

    /// Lock a competition row for the rest of the transaction
    pub async fn find_by_id_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i32,
    ) -> AppResult<Option<Competition>> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"SELECT * FROM competitions WHERE id = $1 FOR UPDATE"#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(competition)
    }

    /// List all competitions, newest first
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(
            r#"SELECT * FROM competitions ORDER BY date DESC, id DESC"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(competitions)
    }

    /// Replace every editable column of a competition
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i32,
        fields: &CompetitionFields,
    ) -> AppResult<Competition> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            UPDATE competitions
            SET
                name = $2,
                location = $3,
                subjects = $4,
                teachers = $5,
                date = $6,
                level = $7,
                round = $8,
                forms = $9,
                result_position = $10,
                result_special_prize = $11,
                result_compliment = $12,
                result_next_round = $13,
                other = $14,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.location)
        .bind(&fields.subjects)
        .bind(&fields.teachers)
        .bind(fields.date)
        .bind(&fields.level)
        .bind(&fields.round)
        .bind(&fields.forms)
        .bind(fields.result.position)
        .bind(fields.result.special_prize)
        .bind(fields.result.compliment)
        .bind(fields.result.next_round)
        .bind(&fields.other)
        .fetch_one(executor)
        .await?;

        Ok(competition)
    }

    /// Delete competition; participant rows go with it
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: i32) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM competitions WHERE id = $1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
