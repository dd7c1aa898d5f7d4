use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AnswerService;
use crate::middlewares::RequireJWT;
use crate::models::answered::requests::GradeAnswerRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn grade_answer(
    service: &AnswerService,
    request: &HttpRequest,
    answer_id: i64,
    grade_data: GradeAnswerRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(assessor_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user id",
        )));
    };

    match storage
        .grade_answer(answer_id, assessor_id, grade_data.score, grade_data.highlights)
        .await
    {
        Ok(Some(answered)) => {
            info!(
                "Answer {} graded {:?}/{} by assessor {}",
                answered.id, answered.score, answered.max_points, assessor_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                answered,
                "Answer graded successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AnswerNotFound,
            "Answer not found",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::GradeInvalid,
            "Grading failed",
        )),
    }
}
