use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TraineeDrillService, load_accessible};
use crate::models::{ApiResponse, ErrorCode};

pub async fn complete_trainee_drill(
    service: &TraineeDrillService,
    request: &HttpRequest,
    trainee_drill_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = load_accessible(storage.as_ref(), request, trainee_drill_id).await {
        return Ok(response);
    }

    match storage.complete_trainee_drill(trainee_drill_id).await {
        Ok(Some(trainee_drill)) => {
            info!(
                "Trainee drill {} completed on {}",
                trainee_drill.id, trainee_drill.completed_date
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                trainee_drill,
                "Trainee drill completed",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TraineeDrillNotFound,
            "Trainee drill not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to complete trainee drill: {e}"),
            )),
        ),
    }
}
