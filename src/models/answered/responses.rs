use super::entities::Answered;
use serde::Serialize;
use ts_rs::TS;

// 作答列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "answered.ts")]
pub struct AnsweredListResponse {
    pub items: Vec<Answered>,
}
