use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TraineeDrillService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_trainee_drill(
    service: &TraineeDrillService,
    request: &HttpRequest,
    trainee_drill_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_trainee_drill(trainee_drill_id).await {
        Ok(Some(trainee_drill)) => {
            info!("Trainee drill {} deleted", trainee_drill.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                trainee_drill,
                "Trainee drill deleted successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TraineeDrillNotFound,
            "Trainee drill not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete trainee drill: {e}"),
            )),
        ),
    }
}
