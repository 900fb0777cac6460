use crate::api::extractors::auth::AuthUser;
use crate::domain::services::policy::{self, Action};
use crate::domain::services::rekap;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::info;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Downloads one teacher's roster as an xlsx sheet. Admins may fetch any
/// teacher's rekap, a guru only their own.
pub async fn export_teacher(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(teacher_id): Path<String>,
) -> Result<Response, AppError> {
    policy::authorize(&user, Action::ExportRekap { teacher_id: &teacher_id })?;

    let rows = state.entry_repo.list_for_export(&teacher_id).await?;
    if rows.is_empty() {
        return Err(AppError::NoData);
    }

    let workbook = rekap::build_workbook(&rows)?;

    info!("Exporting {} entries for teacher {}", rows.len(), teacher_id);

    let filename = format!("rekap_teacher_{teacher_id}.xlsx");
    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];

    Ok((headers, workbook).into_response())
}
