use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{QuestionService, redact_for_viewer};
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_question(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: i64,
    version: Option<i32>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match version {
        Some(version) => storage.get_question_version(question_id, version).await,
        None => storage.get_latest_question(question_id).await,
    };

    match result {
        Ok(Some(question)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            redact_for_viewer(request, question),
            "Question retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Question not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get question: {e}"),
            )),
        ),
    }
}
