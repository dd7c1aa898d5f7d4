use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TraineeDrillService;
use crate::middlewares::RequireJWT;
use crate::models::trainee_drills::requests::TraineeDrillListParams;
use crate::models::users::entities::Role;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_trainee_drills(
    service: &TraineeDrillService,
    request: &HttpRequest,
    mut query: TraineeDrillListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    // 学员只能看到自己的训练
    if !user.has_role(Role::Assessor) {
        query.trainee_id = Some(user.id);
    }

    match storage.list_trainee_drills(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Trainee drills retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list trainee drills: {e}"),
            )),
        ),
    }
}
