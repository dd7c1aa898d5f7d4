use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuestionService;
use crate::models::questions::requests::CreateQuestionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn create_question(
    service: &QuestionService,
    request: &HttpRequest,
    drill_id: i64,
    question_data: CreateQuestionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_drill_by_id(drill_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::DrillNotFound,
                "Drill not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get drill: {e}"),
                )),
            );
        }
    }

    match storage
        .create_question(drill_id, question_data.into())
        .await
    {
        Ok(question) => {
            info!("Question {} created in drill {}", question.id, drill_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(question, "Question created successfully")))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::QuestionInvalid,
            "Question creation failed",
        )),
    }
}
