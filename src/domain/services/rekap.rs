use crate::domain::models::entry::EntryWithStudent;
use crate::error::AppError;
use rust_xlsxwriter::{Workbook, XlsxError};

/// Column order of the rekap sheet: the student's display name first, then
/// every entry field in table order.
const COLUMNS: [&str; 12] = [
    "student_name",
    "id",
    "student_id",
    "date",
    "wake_time",
    "prayer",
    "sport",
    "food_notes",
    "study_notes",
    "community_notes",
    "sleep_time",
    "created_at",
];

/// Renders one teacher's collected entries into xlsx bytes, one row per entry
/// below a single header row.
pub fn build_workbook(rows: &[EntryWithStudent]) -> Result<Vec<u8>, AppError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write(0, col as u16, *name).map_err(xlsx_err)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i as u32) + 1;
        sheet.write(r, 0, &row.student_name).map_err(xlsx_err)?;
        sheet.write(r, 1, &row.id).map_err(xlsx_err)?;
        sheet.write(r, 2, &row.student_id).map_err(xlsx_err)?;
        sheet.write(r, 3, &row.date).map_err(xlsx_err)?;
        sheet.write(r, 4, &row.wake_time).map_err(xlsx_err)?;
        sheet.write(r, 5, row.prayer.as_str()).map_err(xlsx_err)?;
        sheet.write(r, 6, &row.sport).map_err(xlsx_err)?;
        sheet.write(r, 7, &row.food_notes).map_err(xlsx_err)?;
        sheet.write(r, 8, &row.study_notes).map_err(xlsx_err)?;
        sheet.write(r, 9, &row.community_notes).map_err(xlsx_err)?;
        sheet.write(r, 10, &row.sleep_time).map_err(xlsx_err)?;
        sheet.write(r, 11, row.created_at.to_rfc3339()).map_err(xlsx_err)?;
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

fn xlsx_err(e: XlsxError) -> AppError {
    AppError::InternalWithMsg(format!("Workbook serialization failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::entry::PrayerSet;
    use chrono::Utc;

    fn row(name: &str, date: &str) -> EntryWithStudent {
        EntryWithStudent {
            student_name: name.to_string(),
            id: "e1".to_string(),
            student_id: "s1".to_string(),
            date: date.to_string(),
            wake_time: "04:30".to_string(),
            prayer: PrayerSet::from_labels(vec!["subuh".to_string(), "maghrib".to_string()]),
            sport: "lari pagi".to_string(),
            food_notes: "sarapan nasi".to_string(),
            study_notes: "matematika bab 3".to_string(),
            community_notes: "piket kelas".to_string(),
            sleep_time: "21:30".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn produces_a_zip_container() {
        let bytes = build_workbook(&[row("Siswa Contoh", "2024-01-01")]).unwrap();
        // xlsx is a zip archive, so the buffer starts with PK.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn header_only_sheet_still_serializes() {
        let bytes = build_workbook(&[]).unwrap();
        assert!(!bytes.is_empty());
    }
}
