//! 服务端渲染页面路由
//!
//! 页面通过 `access_token` Cookie 识别用户，当前角色保存在会话 Cookie
//! `active_role` 中（不写入数据库）。需要特定角色的页面在角色不符时
//! 渲染 Access Denied 页面。

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::errors::GraderDrillsError;
use crate::middlewares::require_jwt::authenticate;
use crate::models::auth::requests::{LoginRequest, UpdateProfileRequest};
use crate::models::drills::requests::DrillListQuery;
use crate::models::trainee_drills::entities::TraineeDrill;
use crate::models::trainee_drills::requests::TraineeDrillListParams;
use crate::models::trainee_drills::responses::TraineeDrillItem;
use crate::models::users::entities::{Role, User};
use crate::services::auth::login::{LoginError, authenticate_credentials};
use crate::services::auth::profile::apply_profile_update;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::views::{self, DashboardProps, DrillPageProps, Rendered, Viewer};

pub const ACTIVE_ROLE_COOKIE: &str = "active_role";

#[derive(Debug, Deserialize)]
pub struct ChooseRoleForm {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    pub question_id: i64,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct GradeForm {
    pub answer_id: i64,
    pub score: String,
    #[serde(default)]
    pub highlights: Option<String>,
}

fn get_storage(req: &HttpRequest) -> Arc<dyn Storage> {
    req.app_data::<web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(body)
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn active_role_cookie(role: Role) -> Cookie<'static> {
    // 会话 Cookie，不设置过期时间
    Cookie::build(ACTIVE_ROLE_COOKIE, role.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

fn empty_active_role_cookie() -> Cookie<'static> {
    Cookie::build(ACTIVE_ROLE_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(0))
        .finish()
}

fn active_role(req: &HttpRequest, user: &User) -> Option<Role> {
    let chosen = req.cookie(ACTIVE_ROLE_COOKIE);
    views::resolve_active_role(user, chosen.as_ref().map(|c| c.value()))
}

fn path_id(req: &HttpRequest) -> Option<i64> {
    req.match_info().get("id")?.parse().ok()
}

async fn current_user(req: &HttpRequest) -> Option<User> {
    match authenticate(req).await {
        Ok(user) => Some(user),
        Err(reason) => {
            tracing::debug!("Page request without valid session: {}", reason);
            None
        }
    }
}

fn server_error(viewer: Option<Viewer<'_>>, context: &str, err: GraderDrillsError) -> HttpResponse {
    error!("{}: {}", context, err);
    let body = views::layout::page(
        "Error",
        viewer,
        r#"<section class="card"><h1>Something went wrong</h1><p><a href="/dashboard">Back to dashboard</a></p></section>"#,
    );
    html(StatusCode::INTERNAL_SERVER_ERROR, body)
}

/// 要求用户已登录且当前角色为 `required`
///
/// 未登录跳转首页；未选择角色跳转选择角色页；角色不符渲染 Access Denied。
async fn require_page_role(req: &HttpRequest, required: Role) -> Result<User, HttpResponse> {
    let Some(user) = current_user(req).await else {
        return Err(redirect("/"));
    };
    match active_role(req, &user) {
        None => Err(redirect("/choose-role")),
        Some(role) if role == required => Ok(user),
        Some(role) => {
            info!(
                "User {} denied page access: active role {}, required {}",
                user.id, role, required
            );
            let viewer = Viewer {
                user: &user,
                active_role: Some(role),
            };
            Err(html(
                StatusCode::FORBIDDEN,
                views::access_denied(Some(viewer), required),
            ))
        }
    }
}

pub async fn home(req: HttpRequest) -> ActixResult<HttpResponse> {
    let user = current_user(&req).await;
    let viewer = user.as_ref().map(|user| Viewer {
        user,
        active_role: active_role(&req, user),
    });
    Ok(html(StatusCode::OK, views::home(viewer, None)))
}

pub async fn login(req: HttpRequest, form: web::Form<LoginRequest>) -> ActixResult<HttpResponse> {
    let storage = get_storage(&req);
    let config = AppConfig::get();
    let form = form.into_inner();

    let remember_me = form
        .remember_me
        .then(|| chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry));

    match authenticate_credentials(storage.as_ref(), &form.email, &form.password, remember_me).await
    {
        Ok((user, token_pair)) => {
            info!("User {} signed in through the login form", user.email);
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/choose-role"))
                .cookie(JwtUtils::create_refresh_token_cookie(
                    &token_pair.refresh_token,
                ))
                .cookie(JwtUtils::create_access_token_cookie(&token_pair.access_token))
                .cookie(empty_active_role_cookie())
                .finish())
        }
        Err(LoginError::InvalidCredentials) => Ok(html(
            StatusCode::UNAUTHORIZED,
            views::home(None, Some("Email or password is incorrect")),
        )),
        Err(LoginError::Token(e)) | Err(LoginError::Storage(e)) => {
            error!("Form login failed: {}", e);
            Ok(html(
                StatusCode::INTERNAL_SERVER_ERROR,
                views::home(None, Some("Sign in failed, please try again")),
            ))
        }
    }
}

pub async fn logout() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .cookie(JwtUtils::create_empty_access_token_cookie())
        .cookie(empty_active_role_cookie())
        .finish())
}

/// 清除当前角色后回到角色选择页
pub async fn switch_role() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/choose-role"))
        .cookie(empty_active_role_cookie())
        .finish())
}

pub async fn choose_role_page(req: HttpRequest) -> ActixResult<HttpResponse> {
    let Some(user) = current_user(&req).await else {
        return Ok(redirect("/"));
    };
    let viewer = Viewer {
        user: &user,
        active_role: active_role(&req, &user),
    };
    Ok(match views::choose_role(viewer) {
        Rendered::Redirect(location) => redirect(location),
        Rendered::Page(body) => html(StatusCode::OK, body),
    })
}

pub async fn choose_role(
    req: HttpRequest,
    form: web::Form<ChooseRoleForm>,
) -> ActixResult<HttpResponse> {
    let Some(user) = current_user(&req).await else {
        return Ok(redirect("/"));
    };
    let Ok(role) = form.role.parse::<Role>() else {
        return Ok(redirect("/choose-role"));
    };

    if !user.has_role(role) {
        let viewer = Viewer {
            user: &user,
            active_role: active_role(&req, &user),
        };
        return Ok(html(
            StatusCode::FORBIDDEN,
            views::access_denied(Some(viewer), role),
        ));
    }

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/dashboard"))
        .cookie(active_role_cookie(role))
        .finish())
}

pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    let Some(user) = current_user(&req).await else {
        return Ok(redirect("/"));
    };
    let Some(role) = active_role(&req, &user) else {
        return Ok(redirect("/choose-role"));
    };
    let viewer = Viewer {
        user: &user,
        active_role: Some(role),
    };
    let storage = get_storage(&req);

    match role {
        Role::Trainee => {
            let params = TraineeDrillListParams {
                drill_id: None,
                trainee_id: Some(user.id),
            };
            match storage.list_trainee_drills(params).await {
                Ok(list) => Ok(html(
                    StatusCode::OK,
                    views::dashboard(viewer, DashboardProps::Trainee { items: &list.items }),
                )),
                Err(e) => Ok(server_error(Some(viewer), "Failed to load trainee drills", e)),
            }
        }
        Role::Assessor => {
            let query = DrillListQuery {
                size: Some(100),
                ..Default::default()
            };
            let drills = match storage.list_drills_with_pagination(query).await {
                Ok(list) => list.items,
                Err(e) => return Ok(server_error(Some(viewer), "Failed to load drills", e)),
            };
            let ungraded = match storage.list_ungraded_answers().await {
                Ok(answers) => answers.len(),
                Err(e) => {
                    return Ok(server_error(Some(viewer), "Failed to load ungraded answers", e));
                }
            };
            Ok(html(
                StatusCode::OK,
                views::dashboard(
                    viewer,
                    DashboardProps::Assessor {
                        drills: &drills,
                        ungraded,
                    },
                ),
            ))
        }
    }
}

pub async fn profile_page(req: HttpRequest) -> ActixResult<HttpResponse> {
    let Some(user) = current_user(&req).await else {
        return Ok(redirect("/"));
    };
    let viewer = Viewer {
        user: &user,
        active_role: active_role(&req, &user),
    };
    Ok(html(StatusCode::OK, views::profile(viewer, None, None)))
}

pub async fn update_profile(
    req: HttpRequest,
    form: web::Form<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    let Some(user) = current_user(&req).await else {
        return Ok(redirect("/"));
    };
    let storage = get_storage(&req);
    let form = form.into_inner();

    // 表单中留空的字段视为不修改
    let update = UpdateProfileRequest {
        email: form.email.filter(|e| !e.trim().is_empty()),
        password: form.password.filter(|p| !p.is_empty()),
        name: form.name,
    };

    match apply_profile_update(storage.as_ref(), &user, update).await {
        Ok(updated) => {
            let viewer = Viewer {
                user: &updated,
                active_role: active_role(&req, &updated),
            };
            Ok(html(
                StatusCode::OK,
                views::profile(viewer, Some("Profile updated"), None),
            ))
        }
        Err(e) => {
            let viewer = Viewer {
                user: &user,
                active_role: active_role(&req, &user),
            };
            Ok(html(e.status, views::profile(viewer, None, Some(&e.message))))
        }
    }
}

/// 加载学员本人未删除的训练，附带训练信息
async fn load_own_drill(
    storage: &dyn Storage,
    user: &User,
    id: i64,
) -> Result<Option<TraineeDrillItem>, GraderDrillsError> {
    let trainee_drill: Option<TraineeDrill> = storage
        .get_trainee_drill_by_id(id)
        .await?
        .filter(|td| td.trainee_id == user.id && td.deleted_at.is_none());
    let Some(trainee_drill) = trainee_drill else {
        return Ok(None);
    };
    let Some(drill) = storage.get_drill_by_id(trainee_drill.drill_id).await? else {
        return Ok(None);
    };

    Ok(Some(TraineeDrillItem {
        trainee_drill,
        drill_name: drill.name,
        drill_code: drill.code,
        num_questions: drill.num_questions,
        due_date: drill.due_date,
    }))
}

async fn render_drill_page(
    req: &HttpRequest,
    user: &User,
    error: Option<&str>,
) -> HttpResponse {
    let viewer = Viewer {
        user,
        active_role: Some(Role::Trainee),
    };
    let Some(id) = path_id(req) else {
        return html(StatusCode::NOT_FOUND, views::not_found(Some(viewer)));
    };
    let storage = get_storage(req);

    let item = match load_own_drill(storage.as_ref(), user, id).await {
        Ok(Some(item)) => item,
        Ok(None) => return html(StatusCode::NOT_FOUND, views::not_found(Some(viewer))),
        Err(e) => return server_error(Some(viewer), "Failed to load trainee drill", e),
    };
    let questions = match storage.list_drill_questions(item.trainee_drill.drill_id).await {
        Ok(questions) => questions,
        Err(e) => return server_error(Some(viewer), "Failed to load questions", e),
    };
    let answers = match storage.list_answers(item.trainee_drill.id).await {
        Ok(answers) => answers,
        Err(e) => return server_error(Some(viewer), "Failed to load answers", e),
    };

    let status = if error.is_some() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    html(
        status,
        views::drill_page(
            viewer,
            DrillPageProps {
                item: &item,
                questions: &questions,
                answers: &answers,
                error,
            },
        ),
    )
}

pub async fn drill_page(req: HttpRequest) -> ActixResult<HttpResponse> {
    let user = match require_page_role(&req, Role::Trainee).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    Ok(render_drill_page(&req, &user, None).await)
}

pub async fn submit_answer(
    req: HttpRequest,
    form: web::Form<AnswerForm>,
) -> ActixResult<HttpResponse> {
    let user = match require_page_role(&req, Role::Trainee).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let viewer = Viewer {
        user: &user,
        active_role: Some(Role::Trainee),
    };
    let Some(id) = path_id(&req) else {
        return Ok(html(StatusCode::NOT_FOUND, views::not_found(Some(viewer))));
    };
    let storage = get_storage(&req);

    match load_own_drill(storage.as_ref(), &user, id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(html(StatusCode::NOT_FOUND, views::not_found(Some(viewer)))),
        Err(e) => return Ok(server_error(Some(viewer), "Failed to load trainee drill", e)),
    }

    let form = form.into_inner();
    if form.answer.trim().is_empty() {
        return Ok(render_drill_page(&req, &user, Some("Answer cannot be empty")).await);
    }

    match storage
        .submit_answer(id, form.question_id, &form.answer)
        .await
    {
        Ok(Some(_)) => Ok(redirect(&format!("/drills/{id}"))),
        Ok(None) => Ok(render_drill_page(&req, &user, Some("Question not found in this drill")).await),
        Err(GraderDrillsError::Conflict(_)) => {
            Ok(render_drill_page(&req, &user, Some("This question has already been answered")).await)
        }
        Err(GraderDrillsError::Validation(msg)) => {
            Ok(render_drill_page(&req, &user, Some(&msg)).await)
        }
        Err(e) => Ok(server_error(Some(viewer), "Failed to submit answer", e)),
    }
}

async fn render_assess_page(req: &HttpRequest, user: &User, error: Option<&str>) -> HttpResponse {
    let viewer = Viewer {
        user,
        active_role: Some(Role::Assessor),
    };
    let storage = get_storage(req);

    let answers = match storage.list_ungraded_answers().await {
        Ok(answers) => answers,
        Err(e) => return server_error(Some(viewer), "Failed to load ungraded answers", e),
    };

    let mut pending = Vec::with_capacity(answers.len());
    for answered in answers {
        let question = match storage
            .get_question_version(answered.question_id, answered.question_version)
            .await
        {
            Ok(question) => question,
            Err(e) => return server_error(Some(viewer), "Failed to load question", e),
        };
        pending.push((answered, question));
    }

    let status = if error.is_some() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    html(status, views::assess(viewer, &pending, error))
}

pub async fn assess_page(req: HttpRequest) -> ActixResult<HttpResponse> {
    let user = match require_page_role(&req, Role::Assessor).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    Ok(render_assess_page(&req, &user, None).await)
}

pub async fn grade_answer(req: HttpRequest, form: web::Form<GradeForm>) -> ActixResult<HttpResponse> {
    let user = match require_page_role(&req, Role::Assessor).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let form = form.into_inner();

    let Ok(score) = form.score.trim().parse::<f64>() else {
        return Ok(render_assess_page(&req, &user, Some("Score must be a number")).await);
    };
    let highlights = form.highlights.filter(|h| !h.trim().is_empty());

    let storage = get_storage(&req);
    match storage
        .grade_answer(form.answer_id, user.id, score, highlights)
        .await
    {
        Ok(Some(_)) => Ok(redirect("/assess")),
        Ok(None) => Ok(render_assess_page(&req, &user, Some("Answer not found")).await),
        Err(GraderDrillsError::Validation(msg)) => {
            Ok(render_assess_page(&req, &user, Some(&msg)).await)
        }
        Err(e) => {
            let viewer = Viewer {
                user: &user,
                active_role: Some(Role::Assessor),
            };
            Ok(server_error(Some(viewer), "Failed to grade answer", e))
        }
    }
}

pub async fn not_found(req: HttpRequest) -> ActixResult<HttpResponse> {
    let user = current_user(&req).await;
    let viewer = user.as_ref().map(|user| Viewer {
        user,
        active_role: active_role(&req, user),
    });
    Ok(html(StatusCode::NOT_FOUND, views::not_found(viewer)))
}

// 配置页面路由（放在最后，未匹配的请求由 not_found 处理）
pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout))
        .service(
            web::resource("/choose-role")
                .route(web::get().to(choose_role_page))
                .route(web::post().to(choose_role)),
        )
        .route("/switch-role", web::post().to(switch_role))
        .route("/dashboard", web::get().to(dashboard))
        .service(
            web::resource("/profile")
                .route(web::get().to(profile_page))
                .route(web::post().to(update_profile)),
        )
        .service(
            web::resource("/drills/{id}")
                .route(web::get().to(drill_page))
                .route(web::post().to(submit_answer)),
        )
        .service(
            web::resource("/assess")
                .route(web::get().to(assess_page))
                .route(web::post().to(grade_answer)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::users::tests::new_user;

    async fn test_storage() -> Arc<dyn Storage> {
        Arc::new(SeaOrmStorage::in_memory().await)
    }

    fn bearer(user: &User) -> (header::HeaderName, String) {
        let token = user.generate_access_token().unwrap();
        (header::AUTHORIZATION, format!("Bearer {token}"))
    }

    #[actix_web::test]
    async fn test_anonymous_dashboard_redirects_home() {
        let storage = test_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_page_routes)
                .default_service(web::to(not_found)),
        )
        .await;

        let req = test::TestRequest::get().uri("/dashboard").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

        let req = test::TestRequest::get().uri("/no/such/page").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_trainee_is_denied_assess_page() {
        let storage = test_storage().await;
        let trainee = storage
            .create_user(new_user("t@example.com", true, false))
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_page_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/assess")
            .insert_header(bearer(&trainee))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body = test::read_body(resp).await;
        let body = String::from_utf8_lossy(&body);
        assert!(body.contains("Access Denied"));
        assert!(body.contains("signed in as Assessor"));
    }

    #[actix_web::test]
    async fn test_dual_role_user_must_choose_role() {
        let storage = test_storage().await;
        let user = storage
            .create_user(new_user("both@example.com", true, true))
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_page_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/dashboard")
            .insert_header(bearer(&user))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/choose-role");

        let req = test::TestRequest::post()
            .uri("/choose-role")
            .insert_header(bearer(&user))
            .set_form([("role", "assessor")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == ACTIVE_ROLE_COOKIE)
            .unwrap();
        assert_eq!(cookie.value(), "assessor");

        let req = test::TestRequest::get()
            .uri("/dashboard")
            .insert_header(bearer(&user))
            .cookie(Cookie::new(ACTIVE_ROLE_COOKIE, "assessor"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("awaiting grading"));
    }

    #[actix_web::test]
    async fn test_switch_role_clears_choice_and_shows_chooser() {
        let storage = test_storage().await;
        let user = storage
            .create_user(new_user("switch@example.com", true, true))
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_page_routes),
        )
        .await;

        // 已选择评估员时访问选择页会直接跳回面板
        let req = test::TestRequest::get()
            .uri("/choose-role")
            .insert_header(bearer(&user))
            .cookie(Cookie::new(ACTIVE_ROLE_COOKIE, "assessor"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/dashboard");

        let req = test::TestRequest::post()
            .uri("/switch-role")
            .insert_header(bearer(&user))
            .cookie(Cookie::new(ACTIVE_ROLE_COOKIE, "assessor"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/choose-role");
        let cleared = resp
            .response()
            .cookies()
            .find(|c| c.name() == ACTIVE_ROLE_COOKIE)
            .unwrap();
        assert_eq!(cleared.value(), "");

        let req = test::TestRequest::get()
            .uri("/choose-role")
            .insert_header(bearer(&user))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        let body = String::from_utf8_lossy(&body);
        assert!(body.contains(r#"value="trainee""#));
        assert!(body.contains(r#"value="assessor""#));
    }
}
