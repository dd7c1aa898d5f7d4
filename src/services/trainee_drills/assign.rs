use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TraineeDrillService;
use crate::models::trainee_drills::requests::AssignDrillRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn assign_drill(
    service: &TraineeDrillService,
    request: &HttpRequest,
    assign_data: AssignDrillRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 训练必须存在
    match storage.get_drill_by_id(assign_data.drill_id).await {
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

    // 被分配的用户必须是学员
    match storage.get_user_by_id(assign_data.trainee_id).await {
        Ok(Some(user)) if user.is_trainee => {}
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TraineeNotFound,
                "Trainee not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get trainee: {e}"),
                )),
            );
        }
    }

    match storage
        .assign_drill(assign_data.drill_id, assign_data.trainee_id)
        .await
    {
        Ok(trainee_drill) => {
            info!(
                "Drill {} assigned to trainee {}",
                trainee_drill.drill_id, trainee_drill.trainee_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                trainee_drill,
                "Drill assigned successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::TraineeDrillAlreadyAssigned,
            "Drill assignment failed",
        )),
    }
}
