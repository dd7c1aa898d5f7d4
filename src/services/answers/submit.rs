use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AnswerService;
use crate::models::answered::requests::SubmitAnswerRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::services::trainee_drills::{Access, load_accessible};

pub async fn submit_answer(
    service: &AnswerService,
    request: &HttpRequest,
    trainee_drill_id: i64,
    answer_data: SubmitAnswerRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 只有学员本人可以作答
    match load_accessible(storage.as_ref(), request, trainee_drill_id).await {
        Ok((_, Access::Owner)) => {}
        Ok((_, Access::Assessor)) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "Only the assigned trainee can submit answers",
            )));
        }
        Err(response) => return Ok(response),
    }

    if answer_data.answer.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AnswerInvalid,
            "Answer cannot be empty",
        )));
    }

    match storage
        .submit_answer(trainee_drill_id, answer_data.question_id, &answer_data.answer)
        .await
    {
        Ok(Some(answered)) => {
            info!(
                "Answer {} submitted for trainee drill {} (autograded: {})",
                answered.id, trainee_drill_id, answered.autograded
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(answered, "Answer submitted successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Question not found in this drill",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::AnswerAlreadySubmitted,
            "Answer submission failed",
        )),
    }
}
