use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{QuestionService, redact_for_viewer};
use crate::models::questions::responses::QuestionListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_drill_questions(
    service: &QuestionService,
    request: &HttpRequest,
    drill_id: i64,
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

    match storage.list_drill_questions(drill_id).await {
        Ok(questions) => {
            let items = questions
                .into_iter()
                .map(|q| redact_for_viewer(request, q))
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                QuestionListResponse { items },
                "Questions retrieved successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list questions: {e}"),
            )),
        ),
    }
}
