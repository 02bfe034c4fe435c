//! CourseService — course, transaction, and progress operations backed by
//! SQLite. The API layer never touches SQL directly; all reads and writes go
//! through this facade so the routes stay thin relays.

use crate::models::{
    course::Course,
    progress::{ProgressUpdate, UserCourseProgress},
    transaction::{NewTransaction, Transaction},
};
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::types::Json;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CourseServiceError {
    #[error("course `{0}` not found")]
    CourseNotFound(String),
    #[error("no progress recorded for user `{user_id}` on course `{course_id}`")]
    ProgressNotFound { user_id: String, course_id: String },
    #[error("overall progress `{0}` must be between 0 and 1")]
    InvalidProgress(f64),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type CourseResult<T> = Result<T, CourseServiceError>;

/// Embedded schema, applied statement-by-statement (SQLite takes one
/// statement per execute call).
const SCHEMA_SQL: &str = include_str!("../../migrations/0001_init.sql");

/// The listing surface treats `category=all` the same as no filter.
const CATEGORY_ALL: &str = "all";

#[derive(Clone)]
pub struct CourseService {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,
}

impl CourseService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Open a pool for `database_url`, creating the database file on first
    /// run. Parent directories must already exist.
    pub async fn connect(database_url: &str) -> CourseResult<Arc<SqlitePool>> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let db = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Ok(Arc::new(db))
    }

    /// Apply the embedded schema. Statements are `IF NOT EXISTS`, so this is
    /// safe to run on every startup and on fresh in-memory databases.
    pub async fn migrate(&self) -> CourseResult<()> {
        let statements = SCHEMA_SQL
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        debug!("applying {} schema statements", statements.len());
        for stmt in statements {
            sqlx::query(stmt).execute(&*self.db).await?;
        }
        Ok(())
    }

    /// List published courses, optionally filtered by category.
    pub async fn list_courses(&self, category: Option<&str>) -> CourseResult<Vec<Course>> {
        let category = category.filter(|c| !c.eq_ignore_ascii_case(CATEGORY_ALL));

        let courses = match category {
            Some(cat) => {
                sqlx::query_as::<_, Course>(
                    "SELECT * FROM courses
                     WHERE status = 'Published' AND category = ?1
                     ORDER BY created_at DESC",
                )
                .bind(cat)
                .fetch_all(&*self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Course>(
                    "SELECT * FROM courses WHERE status = 'Published' ORDER BY created_at DESC",
                )
                .fetch_all(&*self.db)
                .await?
            }
        };

        debug!(count = courses.len(), "listed courses");
        Ok(courses)
    }

    pub async fn get_course(&self, course_id: &str) -> CourseResult<Course> {
        sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE course_id = ?1")
            .bind(course_id)
            .fetch_optional(&*self.db)
            .await?
            .ok_or_else(|| CourseServiceError::CourseNotFound(course_id.to_string()))
    }

    /// Record a purchase. Also bumps the course's enrollment counter and
    /// creates a zeroed progress row so the player has something to resume.
    pub async fn create_transaction(&self, new: NewTransaction) -> CourseResult<Transaction> {
        // Reject unknown courses up front; the insert below has no FK.
        let _course = self.get_course(&new.course_id).await?;

        let tx = Transaction {
            transaction_id: Uuid::new_v4().to_string(),
            user_id: new.user_id,
            course_id: new.course_id,
            payment_provider: new.payment_provider,
            amount_cents: new.amount_cents,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO transactions
             (transaction_id, user_id, course_id, payment_provider, amount_cents, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&tx.transaction_id)
        .bind(&tx.user_id)
        .bind(&tx.course_id)
        .bind(&tx.payment_provider)
        .bind(tx.amount_cents)
        .bind(tx.created_at)
        .execute(&*self.db)
        .await?;

        sqlx::query(
            "INSERT OR IGNORE INTO user_course_progress
             (user_id, course_id, overall_progress, sections, last_accessed)
             VALUES (?1, ?2, 0, '[]', ?3)",
        )
        .bind(&tx.user_id)
        .bind(&tx.course_id)
        .bind(tx.created_at)
        .execute(&*self.db)
        .await?;

        sqlx::query("UPDATE courses SET enrollments = enrollments + 1 WHERE course_id = ?1")
            .bind(&tx.course_id)
            .execute(&*self.db)
            .await?;

        debug!(transaction_id = %tx.transaction_id, "recorded transaction");
        Ok(tx)
    }

    /// List transactions, optionally restricted to one user.
    pub async fn list_transactions(&self, user_id: Option<&str>) -> CourseResult<Vec<Transaction>> {
        let rows = match user_id {
            Some(uid) => {
                sqlx::query_as::<_, Transaction>(
                    "SELECT * FROM transactions WHERE user_id = ?1 ORDER BY created_at DESC",
                )
                .bind(uid)
                .fetch_all(&*self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Transaction>(
                    "SELECT * FROM transactions ORDER BY created_at DESC",
                )
                .fetch_all(&*self.db)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn get_progress(
        &self,
        user_id: &str,
        course_id: &str,
    ) -> CourseResult<UserCourseProgress> {
        sqlx::query_as::<_, UserCourseProgress>(
            "SELECT * FROM user_course_progress WHERE user_id = ?1 AND course_id = ?2",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or_else(|| CourseServiceError::ProgressNotFound {
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
        })
    }

    /// Create or update a progress row. Fields absent from the update keep
    /// their stored value; `last_accessed` always moves to now.
    pub async fn upsert_progress(
        &self,
        user_id: &str,
        course_id: &str,
        update: ProgressUpdate,
    ) -> CourseResult<UserCourseProgress> {
        if let Some(p) = update.overall_progress {
            if !(0.0..=1.0).contains(&p) {
                return Err(CourseServiceError::InvalidProgress(p));
            }
        }

        let existing = self.get_progress(user_id, course_id).await.ok();
        let overall = update
            .overall_progress
            .or(existing.as_ref().map(|e| e.overall_progress))
            .unwrap_or(0.0);
        let sections = update
            .sections
            .or(existing.map(|e| e.sections.0))
            .unwrap_or_else(|| serde_json::Value::Array(Vec::new()));

        let row = UserCourseProgress {
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
            overall_progress: overall,
            sections: Json(sections),
            last_accessed: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO user_course_progress
             (user_id, course_id, overall_progress, sections, last_accessed)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (user_id, course_id) DO UPDATE SET
               overall_progress = excluded.overall_progress,
               sections = excluded.sections,
               last_accessed = excluded.last_accessed",
        )
        .bind(&row.user_id)
        .bind(&row.course_id)
        .bind(row.overall_progress)
        .bind(&row.sections)
        .bind(row.last_accessed)
        .execute(&*self.db)
        .await?;

        Ok(row)
    }

    /// Insert a course row verbatim. Used by seeding and tests.
    pub async fn insert_course(&self, course: &Course) -> CourseResult<()> {
        sqlx::query(
            "INSERT INTO courses
             (course_id, teacher_id, teacher_name, title, description, category, image,
              price_cents, level, status, enrollments, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )
        .bind(&course.course_id)
        .bind(&course.teacher_id)
        .bind(&course.teacher_name)
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.category)
        .bind(&course.image)
        .bind(course.price_cents)
        .bind(course.level)
        .bind(course.status)
        .bind(course.enrollments)
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&*self.db)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_creates_missing_database_file() {
        let path = std::env::temp_dir().join(format!("course-market-{}.db", Uuid::new_v4()));
        let url = format!("sqlite://{}", path.display());

        let db = CourseService::connect(&url).await.unwrap();
        let service = CourseService::new(db);
        service.migrate().await.unwrap();

        assert!(path.exists());
        assert!(service.list_courses(None).await.unwrap().is_empty());

        service.db.close().await;
        let _ = std::fs::remove_file(&path);
    }
}
