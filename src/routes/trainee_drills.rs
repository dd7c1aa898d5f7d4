use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::answered::requests::SubmitAnswerRequest;
use crate::models::trainee_drills::requests::{AssignDrillRequest, TraineeDrillListParams};
use crate::models::users::entities::Role;
use crate::services::{AnswerService, TraineeDrillService};
use crate::utils::SafeIDI64;

// 懒加载的全局服务实例
static TRAINEE_DRILL_SERVICE: Lazy<TraineeDrillService> =
    Lazy::new(TraineeDrillService::new_lazy);
static ANSWER_SERVICE: Lazy<AnswerService> = Lazy::new(AnswerService::new_lazy);

pub async fn list_trainee_drills(
    req: HttpRequest,
    query: web::Query<TraineeDrillListParams>,
) -> ActixResult<HttpResponse> {
    TRAINEE_DRILL_SERVICE
        .list_trainee_drills(&req, query.into_inner())
        .await
}

pub async fn assign_drill(
    req: HttpRequest,
    assign_data: web::Json<AssignDrillRequest>,
) -> ActixResult<HttpResponse> {
    TRAINEE_DRILL_SERVICE
        .assign_drill(&req, assign_data.into_inner())
        .await
}

pub async fn get_trainee_drill(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TRAINEE_DRILL_SERVICE.get_trainee_drill(&req, id.0).await
}

pub async fn delete_trainee_drill(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TRAINEE_DRILL_SERVICE.delete_trainee_drill(&req, id.0).await
}

pub async fn complete_trainee_drill(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    TRAINEE_DRILL_SERVICE
        .complete_trainee_drill(&req, id.0)
        .await
}

pub async fn list_answers(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE.list_answers(&req, id.0).await
}

pub async fn submit_answer(
    req: HttpRequest,
    id: SafeIDI64,
    answer_data: web::Json<SubmitAnswerRequest>,
) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE
        .submit_answer(&req, id.0, answer_data.into_inner())
        .await
}

pub async fn score_summary(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE.score_summary(&req, id.0).await
}

// 配置路由
pub fn configure_trainee_drills_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/trainee-drills")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 学员只看到自己的训练，评估员可按训练或学员筛选
                    .route(web::get().to(list_trainee_drills))
                    .route(
                        web::post()
                            .to(assign_drill)
                            .wrap(middlewares::RequireRole::new(&Role::Assessor)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_trainee_drill))
                    .route(
                        web::delete()
                            .to(delete_trainee_drill)
                            .wrap(middlewares::RequireRole::new(&Role::Assessor)),
                    ),
            )
            .route("/{id}/complete", web::post().to(complete_trainee_drill))
            .service(
                web::resource("/{id}/answers")
                    .route(web::get().to(list_answers))
                    .route(
                        web::post()
                            .to(submit_answer)
                            .wrap(middlewares::RequireRole::new(&Role::Trainee)),
                    ),
            )
            .route("/{id}/score", web::get().to(score_summary)),
    );
}
