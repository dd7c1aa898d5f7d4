use super::entities::Question;
use serde::Serialize;
use ts_rs::TS;

// 题目列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct QuestionListResponse {
    pub items: Vec<Question>,
}
