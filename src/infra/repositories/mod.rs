pub mod sqlite_entry_repo;
pub mod sqlite_session_repo;
pub mod sqlite_user_repo;
