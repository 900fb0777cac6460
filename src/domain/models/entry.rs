use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// The set of prayer sessions ticked on a journal entry, stored as a
/// comma-joined string ("subuh,maghrib"). Duplicate labels collapse, insertion
/// order is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct PrayerSet(String);

impl PrayerSet {
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut kept: Vec<String> = Vec::new();
        for label in labels {
            if label.is_empty() || kept.iter().any(|seen| seen == &label) {
                continue;
            }
            kept.push(label);
        }
        PrayerSet(kept.join(","))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.split(',').filter(|label| !label.is_empty())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels().any(|kept| kept == label)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One submitted journal entry. Everything except the prayer set is free text
/// straight from the form; `date` stays a `YYYY-MM-DD` string because entries
/// are only ever sorted and displayed, never computed with.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct Entry {
    pub id: String,
    pub student_id: String,
    pub date: String,
    pub wake_time: String,
    pub prayer: PrayerSet,
    pub sport: String,
    pub food_notes: String,
    pub study_notes: String,
    pub community_notes: String,
    pub sleep_time: String,
    pub created_at: DateTime<Utc>,
}

/// An entry joined with the student's display name, as shown on the guru
/// dashboard and in the rekap export.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct EntryWithStudent {
    pub student_name: String,
    pub id: String,
    pub student_id: String,
    pub date: String,
    pub wake_time: String,
    pub prayer: PrayerSet,
    pub sport: String,
    pub food_notes: String,
    pub study_notes: String,
    pub community_notes: String,
    pub sleep_time: String,
    pub created_at: DateTime<Utc>,
}
