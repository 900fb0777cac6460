use crate::config::Config;
use crate::domain::ports::{EntryRepository, UserRepository};
use crate::domain::services::auth_service::AuthService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub entry_repo: Arc<dyn EntryRepository>,
    pub auth_service: Arc<AuthService>,
}
