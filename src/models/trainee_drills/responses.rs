use super::entities::TraineeDrill;
use serde::Serialize;
use ts_rs::TS;

// 学员训练列表项（附带训练信息）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "trainee_drill.ts")]
pub struct TraineeDrillItem {
    pub trainee_drill: TraineeDrill,
    pub drill_name: String,
    pub drill_code: String,
    pub num_questions: i32,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
}

// 学员训练列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "trainee_drill.ts")]
pub struct TraineeDrillListResponse {
    pub items: Vec<TraineeDrillItem>,
}

// 学员训练得分汇总
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "trainee_drill.ts")]
pub struct ScoreSummary {
    pub trainee_drill_id: i64,
    pub answered: i64,
    pub graded: i64,
    pub score: f64,
    pub max_points: i64,
}
