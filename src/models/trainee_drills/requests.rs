use serde::Deserialize;
use ts_rs::TS;

// 分配训练请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "trainee_drill.ts")]
pub struct AssignDrillRequest {
    pub drill_id: i64,
    pub trainee_id: i64,
}

// 学员训练列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "trainee_drill.ts")]
pub struct TraineeDrillListParams {
    pub drill_id: Option<i64>,
    pub trainee_id: Option<i64>,
}
