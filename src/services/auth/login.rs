use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
    users::entities::User,
};
use crate::storage::Storage;
use crate::utils::jwt::{self, TokenPair};
use crate::utils::password::verify_password;
use crate::utils::validate::normalize_email;

use super::AuthService;

/// 登录失败原因
#[derive(Debug)]
pub enum LoginError {
    InvalidCredentials,
    Token(String),
    Storage(String),
}

/// 校验邮箱和密码并签发令牌对，页面登录表单与 API 共用
pub async fn authenticate_credentials(
    storage: &dyn Storage,
    email: &str,
    password: &str,
    refresh_token_expiry: Option<chrono::Duration>,
) -> Result<(User, TokenPair), LoginError> {
    let user = storage
        .get_user_by_email(&normalize_email(email))
        .await
        .map_err(|e| LoginError::Storage(e.to_string()))?
        .ok_or(LoginError::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash) {
        return Err(LoginError::InvalidCredentials);
    }

    // 更新最后登录时间
    let _ = storage.update_last_login(user.id).await;

    let token_pair = user
        .generate_token_pair(refresh_token_expiry)
        .map_err(|e| LoginError::Token(e.to_string()))?;

    Ok((user, token_pair))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = crate::config::AppConfig::get();

    let remember_me = login_request
        .remember_me
        .then(|| chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry));

    match authenticate_credentials(
        storage.as_ref(),
        &login_request.email,
        &login_request.password,
        remember_me,
    )
    .await
    {
        Ok((user, token_pair)) => {
            tracing::info!("User {} logged in successfully", user.email);

            let response = LoginResponse {
                access_token: token_pair.access_token.clone(),
                expires_in: config.access_token_ttl_secs(),
                roles: user.roles(),
                user,
                created_at: chrono::Utc::now(),
            };

            let refresh_cookie =
                jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
            let access_cookie = jwt::JwtUtils::create_access_token_cookie(&token_pair.access_token);

            Ok(HttpResponse::Ok()
                .cookie(refresh_cookie)
                .cookie(access_cookie)
                .json(ApiResponse::success(response, "Login successful")))
        }
        Err(LoginError::InvalidCredentials) => {
            Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "Email or password is incorrect",
            )))
        }
        Err(LoginError::Token(e)) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
        Err(LoginError::Storage(e)) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Login failed: {e}"),
            )),
        ),
    }
}
