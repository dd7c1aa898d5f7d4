use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DrillService;
use crate::models::drills::requests::{DrillListParams, DrillListQuery};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_drills(
    service: &DrillService,
    request: &HttpRequest,
    query: DrillListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = DrillListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
        tag: query.tag,
    };

    match storage.list_drills_with_pagination(list_query).await {
        Ok(drills) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            drills,
            "Drills retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list drills: {e}"),
            )),
        ),
    }
}
