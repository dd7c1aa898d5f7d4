pub mod answers;

pub mod assets;

pub mod auth;

pub mod drills;

pub mod pages;

pub mod questions;

pub mod trainee_drills;

pub mod users;

pub use answers::configure_answers_routes;
pub use assets::configure_static_routes;
pub use auth::configure_auth_routes;
pub use drills::configure_drills_routes;
pub use pages::configure_page_routes;
pub use questions::configure_questions_routes;
pub use trainee_drills::configure_trainee_drills_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部路由：API 在前，页面路由放在最后
pub fn configure_all(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_drills_routes)
        .configure(configure_questions_routes)
        .configure(configure_trainee_drills_routes)
        .configure(configure_answers_routes)
        .configure(configure_static_routes)
        .configure(configure_page_routes);
}
