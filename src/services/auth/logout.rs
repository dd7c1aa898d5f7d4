use actix_web::{HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

/// 处理用户登出
/// 清除 refresh_token 与 access_token cookie
pub async fn handle_logout() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .cookie(JwtUtils::create_empty_access_token_cookie())
        .json(ApiResponse::<()>::success_empty("登出成功")))
}
