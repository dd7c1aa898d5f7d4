use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::DrillService;
use crate::middlewares::RequireJWT;
use crate::models::drills::requests::CreateDrillRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

/// 校验训练字段
pub(crate) fn validate_drill_fields(
    name: Option<&str>,
    num_questions: Option<i32>,
) -> Result<(), &'static str> {
    if let Some(name) = name
        && name.trim().is_empty()
    {
        return Err("Drill name cannot be empty");
    }
    if let Some(num_questions) = num_questions
        && num_questions < 1
    {
        return Err("Drill must have at least one question");
    }
    Ok(())
}

pub async fn create_drill(
    service: &DrillService,
    request: &HttpRequest,
    mut drill_data: CreateDrillRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_drill_fields(Some(&drill_data.name), Some(drill_data.num_questions))
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::DrillInvalid,
            msg,
        )));
    }
    drill_data.name = drill_data.name.trim().to_string();

    match storage.create_drill(drill_data).await {
        Ok(drill) => {
            info!(
                "Drill {} ({}) created by {:?}",
                drill.name,
                drill.code,
                RequireJWT::extract_user_id(request)
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(drill, "Drill created successfully")))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::DrillCreationFailed,
            "Drill creation failed",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_drill_fields() {
        assert!(validate_drill_fields(Some("Orientation"), Some(1)).is_ok());
        assert!(validate_drill_fields(None, None).is_ok());
        assert!(validate_drill_fields(Some("  "), Some(1)).is_err());
        assert!(validate_drill_fields(Some("Orientation"), Some(0)).is_err());
    }
}
