use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::entities::User;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{normalize_email, validate_email, validate_password};

use super::AuthService;

/// 资料更新失败原因，附带错误码和提示
pub struct ProfileError {
    pub code: ErrorCode,
    pub message: String,
    pub status: actix_web::http::StatusCode,
}

impl ProfileError {
    fn bad_request(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: actix_web::http::StatusCode::BAD_REQUEST,
        }
    }
}

/// 更新当前用户的姓名、邮箱或密码，角色不可修改
///
/// 页面表单与 API 共用。
pub async fn apply_profile_update(
    storage: &dyn Storage,
    current_user: &User,
    update_data: UpdateProfileRequest,
) -> Result<User, ProfileError> {
    let email = update_data
        .email
        .map(|e| normalize_email(&e))
        .filter(|e| !e.is_empty());

    if let Some(ref email) = email {
        validate_email(email)
            .map_err(|msg| ProfileError::bad_request(ErrorCode::UserEmailInvalid, msg))?;

        // 检查邮箱是否已被其他用户使用
        if let Ok(Some(existing_user)) = storage.get_user_by_email(email).await
            && existing_user.id != current_user.id
        {
            return Err(ProfileError {
                code: ErrorCode::UserEmailAlreadyExists,
                message: "该邮箱已被使用".to_string(),
                status: actix_web::http::StatusCode::CONFLICT,
            });
        }
    }

    // 处理密码（如果提供了新密码）
    let hashed_password = match update_data.password.filter(|p| !p.is_empty()) {
        Some(password) => {
            validate_password(&password)
                .map_err(|msg| ProfileError::bad_request(ErrorCode::UserPasswordInvalid, msg))?;
            Some(hash_password(&password).map_err(|e| ProfileError {
                code: ErrorCode::InternalServerError,
                message: format!("密码哈希失败: {e}"),
                status: actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            })?)
        }
        None => None,
    };

    let storage_update = UpdateUserRequest {
        email,
        password: hashed_password,
        name: update_data.name.map(|n| n.trim().to_string()),
    };

    match storage.update_user(current_user.id, storage_update).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(ProfileError {
            code: ErrorCode::UserNotFound,
            message: "用户不存在".to_string(),
            status: actix_web::http::StatusCode::NOT_FOUND,
        }),
        Err(e) => Err(ProfileError::bad_request(
            ErrorCode::UserUpdateFailed,
            format!("更新用户信息失败: {e}"),
        )),
    }
}

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 获取当前用户信息
    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    match apply_profile_update(storage.as_ref(), &current_user, update_data).await {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse::from(user),
            "用户信息更新成功",
        ))),
        Err(e) => Ok(HttpResponse::build(e.status)
            .json(ApiResponse::error_empty(e.code, e.message))),
    }
}
