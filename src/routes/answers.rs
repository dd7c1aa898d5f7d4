use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::answered::requests::GradeAnswerRequest;
use crate::models::users::entities::Role;
use crate::services::AnswerService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ANSWER_SERVICE 实例
static ANSWER_SERVICE: Lazy<AnswerService> = Lazy::new(AnswerService::new_lazy);

pub async fn list_ungraded(req: HttpRequest) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE.list_ungraded(&req).await
}

pub async fn get_answer(req: HttpRequest, answer_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE.get_answer(&req, answer_id.0).await
}

pub async fn grade_answer(
    req: HttpRequest,
    answer_id: SafeIDI64,
    grade_data: web::Json<GradeAnswerRequest>,
) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE
        .grade_answer(&req, answer_id.0, grade_data.into_inner())
        .await
}

// 配置路由：评分仅限评估员
pub fn configure_answers_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/answers")
            .wrap(middlewares::RequireRole::new(&Role::Assessor))
            .wrap(middlewares::RequireJWT)
            .route("/ungraded", web::get().to(list_ungraded))
            .route("/{id}", web::get().to(get_answer))
            .route("/{id}/grade", web::put().to(grade_answer)),
    );
}
