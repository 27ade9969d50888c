//! Competition participant repository

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgExecutor};

use crate::{
    error::AppResult,
    models::{NewParticipant, ParticipantDetail, StudentParticipation},
};

/// Repository for the competition/student join table
pub struct ParticipantRepository;

impl ParticipantRepository {
    /// Participants of the given competitions, ordered by name
    pub async fn list_for_competitions<'e, E: PgExecutor<'e>>(
        executor: E,
        competition_ids: &[i32],
    ) -> AppResult<Vec<ParticipantDetail>> {
        let participants = sqlx::query_as::<_, ParticipantDetail>(
            r#"
            SELECT cp.competition_id, cp.student_id, s.first_name, s.last_name,
                   cp.class_year, cp.class_letter, cp.school_year, cp.created_at
            FROM competition_participants cp
            JOIN students s ON s.id = cp.student_id
            WHERE cp.competition_id = ANY($1)
            ORDER BY s.last_name, s.first_name, s.id
            "#,
        )
        .bind(competition_ids)
        .fetch_all(executor)
        .await?;

        Ok(participants)
    }

    /// Participation history of the given students, latest school year first
    pub async fn list_for_students<'e, E: PgExecutor<'e>>(
        executor: E,
        student_ids: &[i32],
    ) -> AppResult<Vec<StudentParticipation>> {
        let participations = sqlx::query_as::<_, StudentParticipation>(
            r#"
            SELECT cp.student_id, cp.competition_id,
                   c.name AS competition_name, c.date AS competition_date,
                   cp.class_year, cp.class_letter, cp.school_year, cp.created_at
            FROM competition_participants cp
            JOIN competitions c ON c.id = cp.competition_id
            WHERE cp.student_id = ANY($1)
            ORDER BY cp.school_year DESC, c.date DESC, cp.created_at DESC
            "#,
        )
        .bind(student_ids)
        .fetch_all(executor)
        .await?;

        Ok(participations)
    }

    /// Remove every participant of a competition.
    ///
    /// Returns the creation time of each removed row keyed by student, so
    /// students who stay in the competition keep their original timestamp.
    pub async fn delete_for_competition(
        conn: &mut PgConnection,
        competition_id: i32,
    ) -> AppResult<HashMap<i32, DateTime<Utc>>> {
        let removed: Vec<(i32, DateTime<Utc>)> = sqlx::query_as(
            r#"
            DELETE FROM competition_participants
            WHERE competition_id = $1
            RETURNING student_id, created_at
            "#,
        )
        .bind(competition_id)
        .fetch_all(conn)
        .await?;

        Ok(removed.into_iter().collect())
    }

    /// Insert a new participant set for a competition
    pub async fn insert_many(
        conn: &mut PgConnection,
        competition_id: i32,
        participants: &[NewParticipant],
        previous: &HashMap<i32, DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        for participant in participants {
            sqlx::query(
                r#"
                INSERT INTO competition_participants (
                    competition_id, student_id, class_year, class_letter, school_year,
                    created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()), $7)
                "#,
            )
            .bind(competition_id)
            .bind(participant.student_id)
            .bind(participant.class_year)
            .bind(&participant.class_letter)
            .bind(participant.school_year)
            .bind(previous.get(&participant.student_id).copied())
            .bind(updated_at)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }
}
