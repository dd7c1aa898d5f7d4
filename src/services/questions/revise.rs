use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuestionService;
use crate::models::questions::requests::UpdateQuestionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn revise_question(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: i64,
    update_data: UpdateQuestionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 以最新版本为基础合并修改内容
    let latest = match storage.get_latest_question(question_id).await {
        Ok(Some(question)) => question,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                "Question not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get question: {e}"),
                )),
            );
        }
    };

    let content = update_data.apply_to(latest.content());

    match storage.revise_question(question_id, content).await {
        Ok(Some(question)) => {
            info!(
                "Question {} revised to version {}",
                question.id, question.version
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                question,
                "Question revised successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Question not found",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::QuestionInvalid,
            "Question revision failed",
        )),
    }
}
