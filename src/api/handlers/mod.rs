pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod entry;
pub mod export;
pub mod health;
pub mod student;
