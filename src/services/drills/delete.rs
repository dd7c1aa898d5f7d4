use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::DrillService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_drill(
    service: &DrillService,
    request: &HttpRequest,
    drill_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_drill(drill_id).await {
        Ok(true) => {
            info!("Drill {} deleted", drill_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Drill deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DrillNotFound,
            "Drill not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete drill: {e}"),
            )),
        ),
    }
}
