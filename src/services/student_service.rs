//! Student service

use std::cmp::Ordering;
use std::collections::HashMap;

use futures::TryStreamExt;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::{
    constants::{DEFAULT_SEARCH_LIMIT, DEFAULT_SIMILARITY_THRESHOLD},
    db::repositories::{ParticipantRepository, StudentRepository, StudentSearchFilter},
    error::{AppError, AppResult},
    handlers::students::{
        ParticipationResponse, SimilarStudentResponse, SimilarStudentsQuery, StudentDetailResponse,
        StudentResponse, StudentSearchQuery, StudentSearchResponse,
    },
    models::{Student, StudentParticipation},
    utils::{is_similar, normalize_name, similarity, validation::validate_class_letter},
};

/// Participations shown with each similar student
const RECENT_PARTICIPATIONS: usize = 3;

/// Student service for business logic
pub struct StudentService;

impl StudentService {
    /// List every student
    pub async fn list_students(pool: &PgPool) -> AppResult<Vec<StudentResponse>> {
        let students = StudentRepository::list(pool).await?;
        Ok(students.into_iter().map(Into::into).collect())
    }

    /// Get a student with participation history
    pub async fn get_student(pool: &PgPool, id: i32) -> AppResult<StudentDetailResponse> {
        let student = StudentRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
        let participations = ParticipantRepository::list_for_students(pool, &[id]).await?;

        Ok(detail(student, participations))
    }

    /// Create a student; names must not collide with an existing student
    pub async fn create_student(
        pool: &PgPool,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<StudentResponse> {
        let (first_name, last_name) = clean_names(first_name, last_name)?;

        if StudentRepository::name_taken(pool, &first_name, &last_name, None).await? {
            return Err(AppError::AlreadyExists(format!(
                "Student {first_name} {last_name} already exists"
            )));
        }

        let student = StudentRepository::create(pool, &first_name, &last_name).await?;
        info!(student_id = student.id, "Student created");
        Ok(student.into())
    }

    /// Rename a student
    pub async fn update_student(
        pool: &PgPool,
        id: i32,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<StudentResponse> {
        let (first_name, last_name) = clean_names(first_name, last_name)?;

        if StudentRepository::find_by_id(pool, id).await?.is_none() {
            return Err(AppError::NotFound("Student not found".to_string()));
        }
        if StudentRepository::name_taken(pool, &first_name, &last_name, Some(id)).await? {
            return Err(AppError::AlreadyExists(format!(
                "Student {first_name} {last_name} already exists"
            )));
        }

        let student = StudentRepository::update(pool, id, &first_name, &last_name).await?;
        info!(student_id = id, "Student updated");
        Ok(student.into())
    }

    /// Delete a student and their participant rows
    pub async fn delete_student(pool: &PgPool, id: i32) -> AppResult<()> {
        if !StudentRepository::delete(pool, id).await? {
            return Err(AppError::NotFound("Student not found".to_string()));
        }
        info!(student_id = id, "Student deleted");
        Ok(())
    }

    /// Search students by name fragments with optional class filters
    pub async fn search_students(
        pool: &PgPool,
        query: &StudentSearchQuery,
    ) -> AppResult<StudentSearchResponse> {
        let class_letter = match query.class_letter.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(letter) => {
                validate_class_letter(letter).map_err(|e| AppError::Validation(e.to_string()))?;
                Some(letter.to_uppercase())
            }
        };

        let filter = StudentSearchFilter {
            terms: query.query.split_whitespace().map(String::from).collect(),
            school_year: query.school_year,
            class_year: query.class_year,
            class_letter,
        };
        let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

        let mut conn = pool.acquire().await?;
        let (students, total_count) =
            StudentRepository::search(&mut conn, &filter, i64::from(limit)).await?;

        let ids: Vec<i32> = students.iter().map(|s| s.id).collect();
        let mut participations =
            group_by_student(ParticipantRepository::list_for_students(&mut *conn, &ids).await?);

        let results = students
            .into_iter()
            .map(|student| {
                let history = participations.remove(&student.id).unwrap_or_default();
                detail(student, history)
            })
            .collect();

        debug!(terms = filter.terms.len(), total_count, "Student search");
        Ok(StudentSearchResponse {
            results,
            total_count,
        })
    }

    /// Students whose full name is similar to the given one, best match first
    pub async fn similar_students(
        pool: &PgPool,
        query: &SimilarStudentsQuery,
    ) -> AppResult<Vec<SimilarStudentResponse>> {
        let threshold = query.threshold.unwrap_or(DEFAULT_SIMILARITY_THRESHOLD);
        let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT) as usize;
        let target = format!(
            "{} {}",
            normalize_name(&query.first_name),
            normalize_name(&query.last_name)
        );
        let target = target.trim();
        if target.is_empty() {
            return Err(AppError::Validation("A first or last name is required".to_string()));
        }

        let mut matches: Vec<(f64, Student)> = StudentRepository::stream_all(pool)
            .try_filter_map(|student| {
                let full_name = student.full_name();
                let found = is_similar(target, &full_name, threshold)
                    .then(|| (similarity(target, &full_name), student));
                futures::future::ready(Ok(found))
            })
            .try_collect()
            .await?;

        rank_matches(&mut matches);
        matches.truncate(limit);

        let ids: Vec<i32> = matches.iter().map(|(_, s)| s.id).collect();
        let mut participations =
            group_by_student(ParticipantRepository::list_for_students(pool, &ids).await?);

        Ok(matches
            .into_iter()
            .map(|(score, student)| {
                let recent = participations
                    .remove(&student.id)
                    .unwrap_or_default()
                    .into_iter()
                    .take(RECENT_PARTICIPATIONS)
                    .map(Into::into)
                    .collect();
                SimilarStudentResponse {
                    full_name: student.full_name(),
                    id: student.id,
                    first_name: student.first_name,
                    last_name: student.last_name,
                    score,
                    recent_participations: recent,
                }
            })
            .collect())
    }
}

fn clean_names(first_name: &str, last_name: &str) -> AppResult<(String, String)> {
    let first_name = normalize_name(first_name);
    let last_name = normalize_name(last_name);
    if first_name.is_empty() || last_name.is_empty() {
        return Err(AppError::Validation(
            "First and last name are required".to_string(),
        ));
    }
    Ok((first_name, last_name))
}

/// Order by score descending, ties by last then first name
fn rank_matches(matches: &mut [(f64, Student)]) {
    matches.sort_by(|(a_score, a), (b_score, b)| {
        b_score
            .partial_cmp(a_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.last_name.cmp(&b.last_name))
            .then_with(|| a.first_name.cmp(&b.first_name))
    });
}

fn group_by_student(
    participations: Vec<StudentParticipation>,
) -> HashMap<i32, Vec<StudentParticipation>> {
    let mut grouped: HashMap<i32, Vec<StudentParticipation>> = HashMap::new();
    for participation in participations {
        grouped
            .entry(participation.student_id)
            .or_default()
            .push(participation);
    }
    grouped
}

/// Build a detail response. The current class comes from the latest school
/// year, ties broken by the most recently created row.
fn detail(student: Student, participations: Vec<StudentParticipation>) -> StudentDetailResponse {
    let current = participations
        .iter()
        .max_by_key(|p| (p.school_year, p.created_at));

    StudentDetailResponse {
        current_class_year: current.map(|p| p.class_year),
        current_class_letter: current.map(|p| p.class_letter.clone()),
        full_name: student.full_name(),
        id: student.id,
        first_name: student.first_name,
        last_name: student.last_name,
        participations: participations
            .into_iter()
            .map(ParticipationResponse::from)
            .collect(),
    }
}
