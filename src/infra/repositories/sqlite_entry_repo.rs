use crate::domain::{
    models::entry::{Entry, EntryWithStudent},
    ports::EntryRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteEntryRepo {
    pool: SqlitePool,
}

impl SqliteEntryRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryRepository for SqliteEntryRepo {
    async fn create(&self, entry: &Entry) -> Result<Entry, AppError> {
        sqlx::query_as::<_, Entry>(
            "INSERT INTO entries (id, student_id, date, wake_time, prayer, sport, food_notes, study_notes, community_notes, sleep_time, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&entry.id)
        .bind(&entry.student_id)
        .bind(&entry.date)
        .bind(&entry.wake_time)
        .bind(&entry.prayer)
        .bind(&entry.sport)
        .bind(&entry.food_notes)
        .bind(&entry.study_notes)
        .bind(&entry.community_notes)
        .bind(&entry.sleep_time)
        .bind(entry.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_by_student(&self, student_id: &str) -> Result<Vec<Entry>, AppError> {
        sqlx::query_as::<_, Entry>(
            "SELECT * FROM entries WHERE student_id = ? ORDER BY date DESC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_for_teacher(&self, teacher_id: &str) -> Result<Vec<EntryWithStudent>, AppError> {
        sqlx::query_as::<_, EntryWithStudent>(
            "SELECT u.full_name AS student_name, e.*
             FROM entries e
             JOIN users u ON e.student_id = u.id
             WHERE u.teacher_id = ?
             ORDER BY e.date DESC",
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_for_export(&self, teacher_id: &str) -> Result<Vec<EntryWithStudent>, AppError> {
        sqlx::query_as::<_, EntryWithStudent>(
            "SELECT u.full_name AS student_name, e.*
             FROM entries e
             JOIN users u ON e.student_id = u.id
             WHERE u.teacher_id = ?
             ORDER BY e.date ASC",
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
