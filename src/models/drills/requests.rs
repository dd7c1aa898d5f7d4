use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

// 创建训练请求（训练码由系统生成）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "drill.ts")]
pub struct CreateDrillRequest {
    pub name: String,
    pub num_questions: i32,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub tags: Option<Vec<String>>,
}

// 更新训练请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "drill.ts")]
pub struct UpdateDrillRequest {
    pub name: Option<String>,
    pub num_questions: Option<i32>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub tags: Option<Vec<String>>,
}

// 训练列表查询参数（来自HTTP请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "drill.ts")]
pub struct DrillListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub tag: Option<String>,
}

// 训练列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct DrillListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub tag: Option<String>,
}
