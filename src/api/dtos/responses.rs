use crate::domain::models::auth::UserProfile;
use crate::domain::models::entry::{Entry, EntryWithStudent};
use crate::domain::models::user::User;
use serde::Serialize;

/// Landing page payload: who is logged in, if anyone.
#[derive(Serialize)]
pub struct LandingResponse {
    pub user: Option<UserProfile>,
}

#[derive(Serialize)]
pub struct SiswaDashboard {
    pub user: UserProfile,
    pub entries: Vec<Entry>,
}

#[derive(Serialize)]
pub struct GuruDashboard {
    pub user: UserProfile,
    pub students: Vec<User>,
    pub entries: Vec<EntryWithStudent>,
}

#[derive(Serialize)]
pub struct AdminDashboard {
    pub user: UserProfile,
    pub gurus: Vec<User>,
    pub siswa: Vec<User>,
}

/// Context for the entry form: the date it would default to.
#[derive(Serialize)]
pub struct EntryFormContext {
    pub today: String,
}
