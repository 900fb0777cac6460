use serde::Deserialize;

/// Journal entry form. Everything is optional; missing text fields are stored
/// as empty strings and a missing date becomes the server's current day.
#[derive(Deserialize)]
pub struct NewEntryRequest {
    pub date: Option<String>,
    pub wake_time: Option<String>,
    #[serde(default)]
    pub prayer: Vec<String>,
    pub sport: Option<String>,
    pub food_notes: Option<String>,
    pub study_notes: Option<String>,
    pub community_notes: Option<String>,
    pub sleep_time: Option<String>,
}

#[derive(Deserialize)]
pub struct AddStudentRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Deserialize)]
pub struct UpdateStudentRequest {
    pub full_name: String,
    /// Blank or missing keeps the current password.
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct AddUserRequest {
    pub username: String,
    pub password: String,
    /// Checked against the known role names, not deserialized blindly.
    pub role: String,
    pub full_name: Option<String>,
    pub teacher_id: Option<String>,
}

/// Admin edit form. Absent fields keep their stored value, except teacher_id
/// which is rewritten on every edit and cleared when the field is blank.
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
    pub teacher_id: Option<String>,
}
