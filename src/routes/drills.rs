use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::drills::requests::{CreateDrillRequest, DrillListParams, UpdateDrillRequest};
use crate::models::questions::requests::CreateQuestionRequest;
use crate::models::users::entities::Role;
use crate::services::{DrillService, QuestionService};
use crate::utils::SafeIDI64;

// 懒加载的全局 DRILL_SERVICE 实例
static DRILL_SERVICE: Lazy<DrillService> = Lazy::new(DrillService::new_lazy);
static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);

// HTTP处理程序
pub async fn list_drills(
    req: HttpRequest,
    query: web::Query<DrillListParams>,
) -> ActixResult<HttpResponse> {
    DRILL_SERVICE.list_drills(&req, query.into_inner()).await
}

pub async fn create_drill(
    req: HttpRequest,
    drill_data: web::Json<CreateDrillRequest>,
) -> ActixResult<HttpResponse> {
    DRILL_SERVICE
        .create_drill(&req, drill_data.into_inner())
        .await
}

pub async fn get_drill(req: HttpRequest, drill_id: SafeIDI64) -> ActixResult<HttpResponse> {
    DRILL_SERVICE.get_drill(&req, drill_id.0).await
}

pub async fn get_drill_by_code(
    req: HttpRequest,
    code: web::Path<String>,
) -> ActixResult<HttpResponse> {
    DRILL_SERVICE.get_drill_by_code(&req, &code).await
}

pub async fn update_drill(
    req: HttpRequest,
    drill_id: SafeIDI64,
    update_data: web::Json<UpdateDrillRequest>,
) -> ActixResult<HttpResponse> {
    DRILL_SERVICE
        .update_drill(&req, drill_id.0, update_data.into_inner())
        .await
}

pub async fn delete_drill(req: HttpRequest, drill_id: SafeIDI64) -> ActixResult<HttpResponse> {
    DRILL_SERVICE.delete_drill(&req, drill_id.0).await
}

pub async fn list_drill_questions(
    req: HttpRequest,
    drill_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.list_drill_questions(&req, drill_id.0).await
}

pub async fn create_question(
    req: HttpRequest,
    drill_id: SafeIDI64,
    question_data: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .create_question(&req, drill_id.0, question_data.into_inner())
        .await
}

// 配置路由
pub fn configure_drills_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/drills")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(web::get().to(list_drills)).route(
                    web::post()
                        .to(create_drill)
                        .wrap(middlewares::RequireRole::new(&Role::Assessor)),
                ),
            )
            .route("/code/{code}", web::get().to(get_drill_by_code))
            .service(
                web::resource("/{id}/questions")
                    .route(web::get().to(list_drill_questions))
                    .route(
                        web::post()
                            .to(create_question)
                            .wrap(middlewares::RequireRole::new(&Role::Assessor)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_drill))
                    .route(
                        web::put()
                            .to(update_drill)
                            .wrap(middlewares::RequireRole::new(&Role::Assessor)),
                    )
                    .route(
                        web::delete()
                            .to(delete_drill)
                            .wrap(middlewares::RequireRole::new(&Role::Assessor)),
                    ),
            ),
    );
}
