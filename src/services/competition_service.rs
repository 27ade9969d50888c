//! Competition service

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use tracing::info;

use crate::{
    db::repositories::{CompetitionRepository, ParticipantRepository},
    error::{AppError, AppResult},
    handlers::competitions::{CompetitionRequest, CompetitionResponse, ParticipantResponse},
    middleware::AuthenticatedUser,
    models::{Competition, ParticipantDetail},
    services::participant_service::{resolve_participants, PgStudentDirectory},
    utils::{now_utc, school_year_for},
};

/// Competition service for business logic
pub struct CompetitionService;

impl CompetitionService {
    /// List every competition with its participants, newest first
    pub async fn list_competitions(pool: &PgPool) -> AppResult<Vec<CompetitionResponse>> {
        let competitions = CompetitionRepository::list(pool).await?;
        let ids: Vec<i32> = competitions.iter().map(|c| c.id).collect();
        let participants = ParticipantRepository::list_for_competitions(pool, &ids).await?;

        Ok(attach_participants(competitions, participants))
    }

    /// Get competition by ID
    pub async fn get_competition(pool: &PgPool, id: i32) -> AppResult<CompetitionResponse> {
        let competition = CompetitionRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))?;
        let participants = ParticipantRepository::list_for_competitions(pool, &[id]).await?;

        Ok(CompetitionResponse::new(
            competition,
            participants.into_iter().map(Into::into).collect(),
        ))
    }

    /// Create a competition and its participants in one transaction
    pub async fn create_competition(
        pool: &PgPool,
        user: &AuthenticatedUser,
        payload: CompetitionRequest,
    ) -> AppResult<CompetitionResponse> {
        user.require_editor()?;

        let fields = payload.fields();
        let school_year = school_year_for(fields.date);

        let mut tx = pool.begin().await?;

        let competition = CompetitionRepository::create(&mut *tx, &fields, &user.id).await?;
        Self::write_participants(&mut tx, competition.id, &payload, school_year, false).await?;
        let response = Self::load_response(&mut tx, competition).await?;

        tx.commit().await?;

        info!(
            competition_id = response.id,
            user_id = %user.id,
            participants = response.participants.len(),
            "Competition created"
        );
        Ok(response)
    }

    /// Replace a competition and its participant set in one transaction
    pub async fn update_competition(
        pool: &PgPool,
        user: &AuthenticatedUser,
        id: i32,
        payload: CompetitionRequest,
    ) -> AppResult<CompetitionResponse> {
        user.require_editor()?;

        let mut tx = pool.begin().await?;

        let existing = CompetitionRepository::find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))?;
        ensure_can_modify(&existing, user)?;

        let fields = payload.fields();
        let school_year = school_year_for(fields.date);

        let competition = CompetitionRepository::update(&mut *tx, id, &fields).await?;
        Self::write_participants(&mut tx, id, &payload, school_year, true).await?;
        let response = Self::load_response(&mut tx, competition).await?;

        tx.commit().await?;

        info!(
            competition_id = id,
            user_id = %user.id,
            participants = response.participants.len(),
            "Competition updated"
        );
        Ok(response)
    }

    /// Delete a competition; participant rows cascade
    pub async fn delete_competition(
        pool: &PgPool,
        user: &AuthenticatedUser,
        id: i32,
    ) -> AppResult<()> {
        user.require_editor()?;

        let mut tx = pool.begin().await?;

        let existing = CompetitionRepository::find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))?;
        ensure_can_modify(&existing, user)?;

        CompetitionRepository::delete(&mut *tx, id).await?;
        tx.commit().await?;

        info!(competition_id = id, user_id = %user.id, "Competition deleted");
        Ok(())
    }

    /// Swap the participant rows of a competition for the requested set
    async fn write_participants(
        conn: &mut PgConnection,
        competition_id: i32,
        payload: &CompetitionRequest,
        school_year: i32,
        replacing: bool,
    ) -> AppResult<()> {
        let previous = if replacing {
            ParticipantRepository::delete_for_competition(conn, competition_id).await?
        } else {
            HashMap::new()
        };

        let participants = {
            let mut directory = PgStudentDirectory::new(conn);
            resolve_participants(&mut directory, &payload.participants, school_year).await?
        };

        let updated_at = replacing.then(now_utc);
        ParticipantRepository::insert_many(conn, competition_id, &participants, &previous, updated_at)
            .await
    }

    async fn load_response(
        conn: &mut PgConnection,
        competition: Competition,
    ) -> AppResult<CompetitionResponse> {
        let participants =
            ParticipantRepository::list_for_competitions(&mut *conn, &[competition.id]).await?;

        Ok(CompetitionResponse::new(
            competition,
            participants.into_iter().map(Into::into).collect(),
        ))
    }
}

fn ensure_can_modify(competition: &Competition, user: &AuthenticatedUser) -> AppResult<()> {
    if competition.can_be_modified_by(&user.id, &user.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You can only modify competitions you created".to_string(),
        ))
    }
}

/// Group participant rows under their competitions, keeping competition order
fn attach_participants(
    competitions: Vec<Competition>,
    participants: Vec<ParticipantDetail>,
) -> Vec<CompetitionResponse> {
    let mut by_competition: HashMap<i32, Vec<ParticipantResponse>> = HashMap::new();
    for participant in participants {
        by_competition
            .entry(participant.competition_id)
            .or_default()
            .push(participant.into());
    }

    competitions
        .into_iter()
        .map(|competition| {
            let participants = by_competition.remove(&competition.id).unwrap_or_default();
            CompetitionResponse::new(competition, participants)
        })
        .collect()
}
