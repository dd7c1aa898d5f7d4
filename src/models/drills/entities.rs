use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 训练实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "drill.ts")]
pub struct Drill {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub num_questions: i32,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub tags: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Drill {
    /// 截止日期（YYYY-MM-DD），未设置时返回 None
    pub fn due_date_label(&self) -> Option<String> {
        self.due_date.map(|d| d.format("%Y-%m-%d").to_string())
    }
}
