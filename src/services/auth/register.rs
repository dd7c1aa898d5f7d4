use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::validate_role_flags, requests::CreateUserRequest, responses::UserResponse},
};
use crate::middlewares::require_jwt::authenticate;
use crate::services::storage_error_response;
use crate::utils::password::hash_password;
use crate::utils::validate::{normalize_email, validate_email, validate_password};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    mut create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    create_request.email = normalize_email(&create_request.email);

    // 1. 至少一个角色
    if let Err(e) = validate_role_flags(create_request.is_trainee, create_request.is_assessor) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserRoleRequired,
            e.message(),
        )));
    }

    // 公开注册只能创建学员，评估员账号须由已登录的评估员创建
    if create_request.is_assessor {
        match authenticate(request).await {
            Ok(caller) if caller.is_assessor => {
                tracing::info!("Assessor {} is creating an assessor account", caller.id);
            }
            _ => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Only an assessor can create assessor accounts",
                )));
            }
        }
    }

    // 2. 验证邮箱
    if let Err(msg) = validate_email(&create_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    // 3. 验证密码策略
    if let Err(msg) = validate_password(&create_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    // 4. 检查邮箱是否已存在
    match storage.get_user_by_email(&create_request.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                "Email already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Register failed: {e}"),
                )),
            );
        }
    }

    // 5. 哈希密码并创建用户
    match hash_password(&create_request.password) {
        Ok(password_hash) => {
            create_request.password = password_hash;

            match storage.create_user(create_request).await {
                Ok(user) => {
                    tracing::info!("User {} registered with roles {:?}", user.email, user.roles());
                    Ok(HttpResponse::Created()
                        .json(ApiResponse::success(UserResponse::from(user), "注册成功")))
                }
                Err(e) => Ok(storage_error_response(
                    &e,
                    ErrorCode::RegisterFailed,
                    "注册失败",
                )),
            }
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("密码哈希失败: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test, web};
    use serde_json::json;
    use std::sync::Arc;

    use crate::routes::configure_auth_routes;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::users::tests::new_user;

    #[actix_web::test]
    async fn test_anonymous_cannot_register_assessor() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "email": "evil@example.com",
                "password": "Sup3rSecretPw",
                "is_assessor": true
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(storage.count_users().await.unwrap(), 0);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "email": "learner@example.com",
                "password": "Sup3rSecretPw",
                "is_trainee": true
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn test_trainee_token_cannot_register_assessor_but_assessor_can() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await);
        let trainee = storage
            .create_user(new_user("t@example.com", true, false))
            .await
            .unwrap();
        let assessor = storage
            .create_user(new_user("a@example.com", false, true))
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .configure(configure_auth_routes),
        )
        .await;

        let body = json!({
            "email": "second.assessor@example.com",
            "password": "Sup3rSecretPw",
            "is_assessor": true
        });

        let token = trainee.generate_access_token().unwrap();
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let token = assessor.generate_access_token().unwrap();
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(storage.count_users().await.unwrap(), 3);
    }
}
