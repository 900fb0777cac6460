use crate::domain::models::user::{Role, User};
use crate::error::AppError;

/// Everything a handler may ask to do, with whatever context the decision
/// needs. Handlers call [`authorize`] before touching data; no role check
/// lives anywhere else.
pub enum Action<'a> {
    ViewDashboard,
    SubmitEntry,
    AddStudent,
    /// Edit or delete a specific student account.
    ManageStudent(&'a User),
    AdministerUsers,
    DeleteUser(&'a User),
    ExportRekap { teacher_id: &'a str },
}

pub fn authorize(actor: &User, action: Action<'_>) -> Result<(), AppError> {
    match action {
        Action::ViewDashboard => Ok(()),
        Action::SubmitEntry => require_role(actor, Role::Siswa),
        Action::AddStudent => require_role(actor, Role::Guru),
        Action::ManageStudent(student) => {
            require_role(actor, Role::Guru)?;
            if student.teacher_id.as_deref() == Some(actor.id.as_str()) {
                Ok(())
            } else {
                Err(AppError::Forbidden(
                    "Student is not supervised by you".to_string(),
                ))
            }
        }
        Action::AdministerUsers => require_role(actor, Role::Admin),
        Action::DeleteUser(target) => {
            require_role(actor, Role::Admin)?;
            if target.id == actor.id {
                Err(AppError::Forbidden(
                    "Cannot delete your own account".to_string(),
                ))
            } else {
                Ok(())
            }
        }
        Action::ExportRekap { teacher_id } => match actor.role {
            Role::Admin => Ok(()),
            Role::Guru if actor.id == teacher_id => Ok(()),
            Role::Guru => Err(AppError::Forbidden(
                "You may only export your own students".to_string(),
            )),
            Role::Siswa => Err(AppError::Forbidden(
                "Exports are limited to teachers and admins".to_string(),
            )),
        },
    }
}

fn require_role(actor: &User, required: Role) -> Result<(), AppError> {
    if actor.role == required {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!("Requires {required} role")))
    }
}
