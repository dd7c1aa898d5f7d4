use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::requests::{UserListParams, UserListQuery};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_trainees(
    service: &UserService,
    request: &HttpRequest,
    query: UserListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = UserListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        trainees_only: true,
        search: query.search,
    };

    match storage.list_users_with_pagination(list_query).await {
        Ok(users) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            users,
            "Trainees retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list trainees: {e}"),
            )),
        ),
    }
}
