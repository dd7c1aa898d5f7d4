use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DrillService;
use super::create::validate_drill_fields;
use crate::models::drills::requests::UpdateDrillRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn update_drill(
    service: &DrillService,
    request: &HttpRequest,
    drill_id: i64,
    update_data: UpdateDrillRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_drill_fields(update_data.name.as_deref(), update_data.num_questions)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::DrillInvalid,
            msg,
        )));
    }

    match storage.update_drill(drill_id, update_data).await {
        Ok(Some(drill)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            drill,
            "Drill updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DrillNotFound,
            "Drill not found",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::DrillInvalid,
            "Drill update failed",
        )),
    }
}
