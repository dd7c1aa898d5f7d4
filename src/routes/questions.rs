use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::questions::requests::UpdateQuestionRequest;
use crate::models::users::entities::Role;
use crate::services::QuestionService;
use crate::utils::{SafeIDI64, SafeVersionI32};

// 懒加载的全局 QUESTION_SERVICE 实例
static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);

pub async fn get_question(req: HttpRequest, question_id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.get_question(&req, question_id.0).await
}

pub async fn get_question_version(
    req: HttpRequest,
    question_id: SafeIDI64,
    version: SafeVersionI32,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .get_question_version(&req, question_id.0, version.0)
        .await
}

pub async fn revise_question(
    req: HttpRequest,
    question_id: SafeIDI64,
    update_data: web::Json<UpdateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .revise_question(&req, question_id.0, update_data.into_inner())
        .await
}

// 配置路由
pub fn configure_questions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/questions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_question))
                    .route(
                        web::put()
                            .to(revise_question)
                            // 修改题目会生成新版本
                            .wrap(middlewares::RequireRole::new(&Role::Assessor)),
                    ),
            )
            .route("/{id}/versions/{version}", web::get().to(get_question_version)),
    );
}
