use crate::domain::models::{
    auth::SessionRecord,
    entry::{Entry, EntryWithStudent},
    user::{Role, User},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn list_all(&self) -> Result<Vec<User>, AppError>;
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, AppError>;
    async fn list_students_of(&self, teacher_id: &str) -> Result<Vec<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
    /// Removes the user together with every journal entry they submitted.
    async fn delete_with_entries(&self, id: &str) -> Result<(), AppError>;
    async fn count(&self) -> Result<i64, AppError>;
}

#[async_trait]
pub trait EntryRepository: Send + Sync {
    async fn create(&self, entry: &Entry) -> Result<Entry, AppError>;
    async fn list_by_student(&self, student_id: &str) -> Result<Vec<Entry>, AppError>;
    /// All entries of the students supervised by `teacher_id`, newest date first.
    async fn list_for_teacher(&self, teacher_id: &str) -> Result<Vec<EntryWithStudent>, AppError>;
    /// Same rows as `list_for_teacher` but ordered oldest date first for the rekap sheet.
    async fn list_for_export(&self, teacher_id: &str) -> Result<Vec<EntryWithStudent>, AppError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, record: &SessionRecord) -> Result<(), AppError>;
    async fn find(&self, token_hash: &str) -> Result<Option<SessionRecord>, AppError>;
    async fn delete(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_for_user(&self, user_id: &str) -> Result<(), AppError>;
}
