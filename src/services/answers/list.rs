use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnswerService;
use crate::models::answered::responses::AnsweredListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::trainee_drills::load_accessible;

pub async fn list_answers(
    service: &AnswerService,
    request: &HttpRequest,
    trainee_drill_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = load_accessible(storage.as_ref(), request, trainee_drill_id).await {
        return Ok(response);
    }

    match storage.list_answers(trainee_drill_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AnsweredListResponse { items },
            "Answers retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list answers: {e}"),
            )),
        ),
    }
}

pub async fn score_summary(
    service: &AnswerService,
    request: &HttpRequest,
    trainee_drill_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = load_accessible(storage.as_ref(), request, trainee_drill_id).await {
        return Ok(response);
    }

    match storage.score_summary(trainee_drill_id).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Score summary retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to summarize scores: {e}"),
            )),
        ),
    }
}

pub async fn list_ungraded(
    service: &AnswerService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_ungraded_answers().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AnsweredListResponse { items },
            "Ungraded answers retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list ungraded answers: {e}"),
            )),
        ),
    }
}

pub async fn get_answer(
    service: &AnswerService,
    request: &HttpRequest,
    answer_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_answer_by_id(answer_id).await {
        Ok(Some(answered)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            answered,
            "Answer retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AnswerNotFound,
            "Answer not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get answer: {e}"),
            )),
        ),
    }
}
