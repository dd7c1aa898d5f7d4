pub mod answers;
pub mod auth;
pub mod drills;
pub mod questions;
pub mod trainee_drills;
pub mod users;

pub use answers::AnswerService;
pub use auth::AuthService;
pub use drills::DrillService;
pub use questions::QuestionService;
pub use trainee_drills::TraineeDrillService;
pub use users::UserService;

use actix_web::HttpResponse;
use tracing::error;

use crate::errors::GraderDrillsError;
use crate::models::{ApiResponse, ErrorCode};

/// 存储层错误转换为响应：校验错误 400，唯一约束冲突 409，其余 500
pub(crate) fn storage_error_response(
    err: &GraderDrillsError,
    code: ErrorCode,
    context: &str,
) -> HttpResponse {
    match err {
        GraderDrillsError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg.clone()))
        }
        GraderDrillsError::Conflict(_) => HttpResponse::Conflict()
            .json(ApiResponse::error_empty(code, format!("{context}: already exists"))),
        _ => {
            error!("{context}: {err}");
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: {}", err.message()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_storage_error_status() {
        let resp = storage_error_response(
            &GraderDrillsError::validation("User must have a role"),
            ErrorCode::UserRoleRequired,
            "Register failed",
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = storage_error_response(
            &GraderDrillsError::conflict("UNIQUE constraint failed"),
            ErrorCode::TraineeDrillAlreadyAssigned,
            "Assign failed",
        );
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = storage_error_response(
            &GraderDrillsError::database_operation("disk I/O error"),
            ErrorCode::DrillCreationFailed,
            "Create failed",
        );
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
