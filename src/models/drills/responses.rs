use super::entities::Drill;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 训练列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "drill.ts")]
pub struct DrillListResponse {
    pub items: Vec<Drill>,
    pub pagination: PaginationInfo,
}
