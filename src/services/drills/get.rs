use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DrillService;
use crate::models::{ApiResponse, ErrorCode};

fn drill_response(
    result: crate::errors::Result<Option<crate::models::drills::entities::Drill>>,
) -> HttpResponse {
    match result {
        Ok(Some(drill)) => {
            HttpResponse::Ok().json(ApiResponse::success(drill, "Drill retrieved successfully"))
        }
        Ok(None) => HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DrillNotFound,
            "Drill not found",
        )),
        Err(e) => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("Failed to get drill: {e}"),
        )),
    }
}

pub async fn get_drill(
    service: &DrillService,
    request: &HttpRequest,
    drill_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    Ok(drill_response(storage.get_drill_by_id(drill_id).await))
}

/// 按训练代码查找（代码不区分大小写）
pub async fn get_drill_by_code(
    service: &DrillService,
    request: &HttpRequest,
    code: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let code = code.trim().to_ascii_uppercase();
    Ok(drill_response(storage.get_drill_by_code(&code).await))
}
