use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

// 创建用户请求（注册 / 种子数据）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    #[serde(default)]
    pub is_trainee: bool,
    #[serde(default)]
    pub is_assessor: bool,
}

// 更新用户请求（角色标志不可修改）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

// 用户列表查询参数（来自HTTP请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub trainees_only: bool,
    pub search: Option<String>,
}
