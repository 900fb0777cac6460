pub mod auth;
pub mod entry;
pub mod user;
