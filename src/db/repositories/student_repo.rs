//! Student repository

use futures::stream::BoxStream;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::{error::AppResult, models::Student};

/// Optional filters for a student search
#[derive(Debug, Clone, Default)]
pub struct StudentSearchFilter {
    /// Name fragments, each must match first or last name
    pub terms: Vec<String>,
    pub school_year: Option<i32>,
    pub class_year: Option<i16>,
    /// Compared uppercased
    pub class_letter: Option<String>,
}

impl StudentSearchFilter {
    /// ILIKE patterns for the name terms, with LIKE wildcards escaped
    fn patterns(&self) -> Vec<String> {
        self.terms
            .iter()
            .map(|term| {
                let escaped = term
                    .replace('\\', "\\\\")
                    .replace('%', "\\%")
                    .replace('_', "\\_");
                format!("%{escaped}%")
            })
            .collect()
    }
}

const SEARCH_WHERE: &str = r#"
    NOT EXISTS (
        SELECT 1 FROM unnest($1::text[]) AS p(pattern)
        WHERE NOT (s.first_name ILIKE p.pattern OR s.last_name ILIKE p.pattern)
    )
    AND ($2::int IS NULL OR EXISTS (
        SELECT 1 FROM competition_participants cp
        WHERE cp.student_id = s.id AND cp.school_year = $2
    ))
    AND ($3::smallint IS NULL OR EXISTS (
        SELECT 1 FROM competition_participants cp
        WHERE cp.student_id = s.id AND cp.class_year = $3
    ))
    AND ($4::text IS NULL OR EXISTS (
        SELECT 1 FROM competition_participants cp
        WHERE cp.student_id = s.id AND UPPER(cp.class_letter) = $4
    ))
"#;

/// Repository for student database operations
pub struct StudentRepository;

impl StudentRepository {
    /// Create a new student
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<Student> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (first_name, last_name)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .fetch_one(executor)
        .await?;

        Ok(student)
    }

    /// Find student by ID
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i32,
    ) -> AppResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(r#"SELECT * FROM students WHERE id = $1"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(student)
    }

    /// Find the oldest student whose names match exactly, ignoring case
    pub async fn find_by_name<'e, E: PgExecutor<'e>>(
        executor: E,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            SELECT * FROM students
            WHERE LOWER(first_name) = LOWER($1) AND LOWER(last_name) = LOWER($2)
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(executor)
        .await?;

        Ok(student)
    }

    /// Whether another student already carries this name
    pub async fn name_taken(
        pool: &PgPool,
        first_name: &str,
        last_name: &str,
        except: Option<i32>,
    ) -> AppResult<bool> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM students
                WHERE LOWER(first_name) = LOWER($1) AND LOWER(last_name) = LOWER($2)
                  AND ($3::int IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(except)
        .fetch_one(pool)
        .await?;

        Ok(taken)
    }

    /// List all students ordered by name
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(
            r#"SELECT * FROM students ORDER BY last_name, first_name, id"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(students)
    }

    /// Stream every student, used for fuzzy matching
    pub fn stream_all(pool: &PgPool) -> BoxStream<'_, Result<Student, sqlx::Error>> {
        sqlx::query_as::<_, Student>(r#"SELECT * FROM students"#).fetch(pool)
    }

    /// Rename a student
    pub async fn update(
        pool: &PgPool,
        id: i32,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<Student> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET first_name = $2, last_name = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .fetch_one(pool)
        .await?;

        Ok(student)
    }

    /// Delete student, returns whether a row was removed
    pub async fn delete(pool: &PgPool, id: i32) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM students WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Search students by name fragments and participation filters.
    ///
    /// Returns one page ordered by last then first name, plus the total
    /// number of matches.
    pub async fn search(
        conn: &mut PgConnection,
        filter: &StudentSearchFilter,
        limit: i64,
    ) -> AppResult<(Vec<Student>, i64)> {
        let patterns = filter.patterns();

        let students = sqlx::query_as::<_, Student>(&format!(
            r#"
            SELECT s.* FROM students s
            WHERE {SEARCH_WHERE}
            ORDER BY s.last_name, s.first_name, s.id
            LIMIT $5
            "#
        ))
        .bind(&patterns)
        .bind(filter.school_year)
        .bind(filter.class_year)
        .bind(filter.class_letter.as_deref())
        .bind(limit)
        .fetch_all(&mut *conn)
        .await?;

        let total: i64 = sqlx::query_scalar(&format!(
            r#"SELECT COUNT(*) FROM students s WHERE {SEARCH_WHERE}"#
        ))
        .bind(&patterns)
        .bind(filter.school_year)
        .bind(filter.class_year)
        .bind(filter.class_letter.as_deref())
        .fetch_one(&mut *conn)
        .await?;

        Ok((students, total))
    }
}
