use serde::Deserialize;
use ts_rs::TS;

// 提交作答请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "answered.ts")]
pub struct SubmitAnswerRequest {
    pub question_id: i64,
    pub answer: String,
}

// 人工评分请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "answered.ts")]
pub struct GradeAnswerRequest {
    pub score: f64,
    pub highlights: Option<String>,
}
