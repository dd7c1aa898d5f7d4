//! 基于角色的访问控制中间件
//!
//! 放在 `RequireJWT` 内层（先 `.wrap(RequireRole::new(..))` 再 `.wrap(RequireJWT)`），
//! 从请求扩展读取用户。角色由 isTrainee / isAssessor 标志决定，
//! 同时拥有两个角色的用户可以访问任一角色的接口。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{self, Role},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    required: Role,
}

impl RequireRole {
    /// 创建需要特定角色的中间件
    pub fn new(role: &Role) -> Self {
        Self { required: *role }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            required: self.required,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    required: Role,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let required = self.required;

        Box::pin(async move {
            // 用户由 RequireJWT 写入请求扩展
            let user = req.extensions().get::<entities::User>().cloned();

            let Some(user) = user else {
                info!(
                    "Role check failed: No user found in request. Make sure RequireJWT middleware is applied first."
                );
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            if user.has_role(required) {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            info!(
                "Access denied for user {} (roles: {:?}). Required role: {}",
                user.id,
                user.roles(),
                required
            );
            let message = format!("Access denied. Required role: {}", required.label());
            Ok(req.into_response(
                create_error_response(StatusCode::FORBIDDEN, ErrorCode::Forbidden, &message)
                    .map_into_right_body(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::sample_user;
    use actix_web::{App, HttpResponse, test, web};

    // 模拟 RequireJWT：直接把用户放进请求扩展
    async fn call_as(user: Option<entities::User>) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new().service(
                web::scope("")
                    .wrap(RequireRole::new(&Role::Assessor))
                    .route("/grade", web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;
        let req = test::TestRequest::get().uri("/grade").to_request();
        if let Some(user) = user {
            req.extensions_mut().insert(user);
        }
        test::call_service(&app, req).await
    }

    #[actix_web::test]
    async fn test_assessor_passes() {
        let resp = call_as(Some(sample_user(true, true))).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_trainee_is_forbidden_with_role_name() {
        let resp = call_as(Some(sample_user(true, false))).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Access denied. Required role: Assessor");
    }

    #[actix_web::test]
    async fn test_missing_user_is_unauthorized() {
        let resp = call_as(None).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
