//! JWT 认证中间件
//!
//! 令牌来自 `Authorization: Bearer <token>` 请求头，或页面登录时写入的 `access_token` Cookie。
//! 验证通过后从存储加载 [`User`] 放入请求扩展，处理函数用 [`RequireJWT::extract_user_claims`] 取出。
//! 用户的角色以存储中的标志为准，令牌里的角色声明只作参考。

use std::{fmt, rc::Rc, sync::Arc};

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, info};

use super::create_error_response;
use crate::models::ErrorCode;
use crate::models::users::entities::{Role, User};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

/// 认证失败原因
#[derive(Debug)]
pub enum AuthFailure {
    MissingToken,
    InvalidToken,
    UnknownUser,
    Storage(String),
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::MissingToken => write!(f, "Missing access token"),
            AuthFailure::InvalidToken => write!(f, "Invalid or expired access token"),
            AuthFailure::UnknownUser => write!(f, "User not found"),
            AuthFailure::Storage(msg) => write!(f, "Failed to load user: {msg}"),
        }
    }
}

impl AuthFailure {
    fn status(&self) -> StatusCode {
        match self {
            AuthFailure::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

/// 从请求中解析并验证 access token，加载对应用户（API 中间件与页面路由共用）
pub async fn authenticate(req: &HttpRequest) -> Result<User, AuthFailure> {
    let token = JwtUtils::extract_access_token(req).ok_or(AuthFailure::MissingToken)?;

    let claims = JwtUtils::verify_access_token(&token).map_err(|err| {
        debug!("JWT token validation failed: {}", err);
        AuthFailure::InvalidToken
    })?;
    let user_id = claims.user_id().ok_or(AuthFailure::InvalidToken)?;

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| AuthFailure::Storage("storage not configured".to_string()))?;

    storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| AuthFailure::Storage(e.to_string()))?
        .ok_or(AuthFailure::UnknownUser)
}

#[derive(Clone)]
pub struct RequireJWT;

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // CORS 预检直接放行
            if req.method() == Method::OPTIONS {
                return Ok(
                    req.into_response(HttpResponse::NoContent().finish().map_into_right_body())
                );
            }

            match authenticate(req.request()).await {
                Ok(user) => {
                    debug!("Authenticated user {} for {}", user.id, req.path());
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(failure) => {
                    info!("Rejected request to {}: {}", req.path(), failure);
                    let code = match failure {
                        AuthFailure::Storage(_) => ErrorCode::InternalServerError,
                        _ => ErrorCode::Unauthorized,
                    };
                    Ok(req.into_response(
                        create_error_response(
                            failure.status(),
                            code,
                            &format!("Unauthorized: {failure}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 取出中间件放入请求扩展的用户
    pub fn extract_user_claims(req: &HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn has_role(req: &HttpRequest, role: Role) -> bool {
        req.extensions()
            .get::<User>()
            .is_some_and(|user| user.has_role(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::header, test};

    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::users::tests::new_user;

    async fn whoami(req: HttpRequest) -> HttpResponse {
        match RequireJWT::extract_user_id(&req) {
            Some(id) => HttpResponse::Ok().body(id.to_string()),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    #[actix_web::test]
    async fn test_token_loads_user_into_extensions() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await);
        let user = storage
            .create_user(new_user("jwt@example.com", true, false))
            .await
            .unwrap();
        let token = user.generate_access_token().unwrap();

        let app = test::init_service(
            App::new().app_data(web::Data::new(storage)).service(
                web::scope("/api")
                    .wrap(RequireJWT)
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/whoami")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, user.id.to_string());
    }

    #[actix_web::test]
    async fn test_missing_or_bad_token_is_unauthorized() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await);
        let app = test::init_service(
            App::new().app_data(web::Data::new(storage)).service(
                web::scope("/api")
                    .wrap(RequireJWT)
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/whoami").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/whoami")
            .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
