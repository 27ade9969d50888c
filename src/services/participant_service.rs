//! Participant resolution
//!
//! Turns the participant entries of a competition request into concrete
//! join rows: existing students are referenced by id or found by exact
//! (case-insensitive) name, unknown names become new students.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::debug;

use crate::{
    db::repositories::StudentRepository,
    error::{AppError, AppResult},
    handlers::competitions::ParticipantRequest,
    models::{NewParticipant, Student},
    utils::normalize_name,
};

/// Student lookups needed while resolving participants
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentDirectory: Send {
    async fn find_by_id(&mut self, id: i32) -> AppResult<Option<Student>>;

    async fn find_by_name(&mut self, first_name: &str, last_name: &str)
        -> AppResult<Option<Student>>;

    async fn create(&mut self, first_name: &str, last_name: &str) -> AppResult<Student>;
}

/// Student directory backed by an open transaction
pub struct PgStudentDirectory<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgStudentDirectory<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl StudentDirectory for PgStudentDirectory<'_> {
    async fn find_by_id(&mut self, id: i32) -> AppResult<Option<Student>> {
        StudentRepository::find_by_id(&mut *self.conn, id).await
    }

    async fn find_by_name(
        &mut self,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<Option<Student>> {
        StudentRepository::find_by_name(&mut *self.conn, first_name, last_name).await
    }

    async fn create(&mut self, first_name: &str, last_name: &str) -> AppResult<Student> {
        StudentRepository::create(&mut *self.conn, first_name, last_name).await
    }
}

/// Resolve every participant entry to a student and a join row.
///
/// Fails with 400 when a referenced student does not exist or when the same
/// student appears twice.
pub async fn resolve_participants<D>(
    directory: &mut D,
    requests: &[ParticipantRequest],
    school_year: i32,
) -> AppResult<Vec<NewParticipant>>
where
    D: StudentDirectory + ?Sized,
{
    let mut seen = HashSet::with_capacity(requests.len());
    let mut resolved = Vec::with_capacity(requests.len());

    for request in requests {
        let student = resolve_student(directory, request).await?;

        if !seen.insert(student.id) {
            return Err(AppError::Validation(format!(
                "{} is listed more than once",
                student.full_name()
            )));
        }

        resolved.push(NewParticipant {
            student_id: student.id,
            class_year: request.class_year,
            class_letter: request.class_letter.trim().to_uppercase(),
            school_year,
        });
    }

    Ok(resolved)
}

async fn resolve_student<D>(directory: &mut D, request: &ParticipantRequest) -> AppResult<Student>
where
    D: StudentDirectory + ?Sized,
{
    if let Some(id) = request.student_id {
        return directory
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::InvalidInput(format!("Student {id} does not exist")));
    }

    let first_name = normalize_name(request.first_name.as_deref().unwrap_or_default());
    let last_name = normalize_name(request.last_name.as_deref().unwrap_or_default());
    if first_name.is_empty() || last_name.is_empty() {
        return Err(AppError::Validation(
            "Participant needs a studentId or both first and last name".to_string(),
        ));
    }

    if let Some(student) = directory.find_by_name(&first_name, &last_name).await? {
        return Ok(student);
    }

    let student = directory.create(&first_name, &last_name).await?;
    debug!(student_id = student.id, "Created student for participant");
    Ok(student)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    use super::*;

    fn student(id: i32, first: &str, last: &str) -> Student {
        Student {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn by_id(id: i32) -> ParticipantRequest {
        ParticipantRequest {
            student_id: Some(id),
            first_name: None,
            last_name: None,
            class_year: 10,
            class_letter: "a".to_string(),
        }
    }

    fn by_name(first: &str, last: &str) -> ParticipantRequest {
        ParticipantRequest {
            student_id: None,
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            class_year: 9,
            class_letter: "C".to_string(),
        }
    }

    #[tokio::test]
    async fn test_existing_student_by_id() {
        let mut directory = MockStudentDirectory::new();
        directory
            .expect_find_by_id()
            .with(eq(4))
            .times(1)
            .returning(|id| Ok(Some(student(id, "Anna", "Kiss"))));
        directory.expect_create().never();

        let rows = assert_ok!(resolve_participants(&mut directory, &[by_id(4)], 2024).await);

        assert_eq!(
            rows,
            vec![NewParticipant {
                student_id: 4,
                class_year: 10,
                class_letter: "A".to_string(),
                school_year: 2024,
            }]
        );
    }

    #[tokio::test]
    async fn test_unknown_student_id_is_rejected() {
        let mut directory = MockStudentDirectory::new();
        directory.expect_find_by_id().returning(|_| Ok(None));

        let err = assert_err!(resolve_participants(&mut directory, &[by_id(99)], 2024).await);
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_name_match_reuses_student() {
        let mut directory = MockStudentDirectory::new();
        directory
            .expect_find_by_name()
            .withf(|first, last| first == "Anna" && last == "Kiss")
            .times(1)
            .returning(|_, _| Ok(Some(student(12, "anna", "KISS"))));
        directory.expect_create().never();

        let rows = resolve_participants(&mut directory, &[by_name("  Anna ", "Kiss")], 2023)
            .await
            .unwrap();
        assert_eq!(rows[0].student_id, 12);
        assert_eq!(rows[0].school_year, 2023);
    }

    #[tokio::test]
    async fn test_unknown_name_creates_student() {
        let mut directory = MockStudentDirectory::new();
        directory.expect_find_by_name().returning(|_, _| Ok(None));
        directory
            .expect_create()
            .withf(|first, last| first == "Béla" && last == "Nagy")
            .times(1)
            .returning(|first, last| Ok(student(30, first, last)));

        let rows = resolve_participants(&mut directory, &[by_name("Béla", "Nagy")], 2024)
            .await
            .unwrap();
        assert_eq!(rows[0].student_id, 30);
        assert_eq!(rows[0].class_letter, "C");
    }

    #[tokio::test]
    async fn test_duplicate_student_is_rejected() {
        let mut directory = MockStudentDirectory::new();
        directory
            .expect_find_by_id()
            .returning(|id| Ok(Some(student(id, "Anna", "Kiss"))));
        directory
            .expect_find_by_name()
            .returning(|_, _| Ok(Some(student(4, "Anna", "Kiss"))));

        let err = resolve_participants(&mut directory, &[by_id(4), by_name("Anna", "Kiss")], 2024)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_missing_names_are_rejected() {
        let mut directory = MockStudentDirectory::new();
        directory.expect_find_by_name().never();

        let err = resolve_participants(&mut directory, &[by_name("Anna", " ")], 2024)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_empty_request_resolves_to_nothing() {
        let mut directory = MockStudentDirectory::new();
        let rows = resolve_participants(&mut directory, &[], 2024).await.unwrap();
        assert!(rows.is_empty());
    }
}
