use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TraineeDrillService, load_accessible};
use crate::models::ApiResponse;

pub async fn get_trainee_drill(
    service: &TraineeDrillService,
    request: &HttpRequest,
    trainee_drill_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_accessible(storage.as_ref(), request, trainee_drill_id).await {
        Ok((trainee_drill, _)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            trainee_drill,
            "Trainee drill retrieved successfully",
        ))),
        Err(response) => Ok(response),
    }
}
