//! 服务端渲染的页面视图
//!
//! 每个视图都是从用户/角色等属性到 HTML 字符串的纯函数，
//! 由 `routes::pages` 负责加载数据并返回响应。

pub mod access_denied;
pub mod assess;
pub mod choose_role;
pub mod dashboard;
pub mod drill;
pub mod home;
pub mod layout;
pub mod not_found;
pub mod profile;
pub mod question_field;

pub use access_denied::access_denied;
pub use assess::assess;
pub use choose_role::{choose_role, resolve_active_role};
pub use dashboard::{DashboardProps, dashboard};
pub use drill::{DrillPageProps, drill_page};
pub use home::home;
pub use not_found::not_found;
pub use profile::profile;
pub use question_field::{question_field, render_markdown};

use crate::models::users::entities::{Role, User};

/// 渲染结果：页面或重定向
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Page(String),
    Redirect(&'static str),
}

/// 当前访问者，布局和各视图共用
#[derive(Debug, Clone, Copy)]
pub struct Viewer<'a> {
    pub user: &'a User,
    pub active_role: Option<Role>,
}

/// 转义用户提供的纯文本（空白和斜杠也会被转义为实体）
pub fn escape(text: &str) -> String {
    ammonia::clean_text(text)
}
