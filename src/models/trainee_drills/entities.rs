use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 未完成时 completedDate 的显示值
pub const NOT_COMPLETED: &str = "N/A";

/// 完成日期：completedAt 的 ISO 日期（UTC），未完成时为 "N/A"
pub fn format_completed_date(completed_at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    match completed_at {
        Some(at) => at.format("%Y-%m-%d").to_string(),
        None => NOT_COMPLETED.to_string(),
    }
}

// 学员训练状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "trainee_drill.ts")]
pub enum TraineeDrillStatus {
    Assigned,  // 已分配
    Completed, // 已完成
}

// 学员训练实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "trainee_drill.ts")]
pub struct TraineeDrill {
    pub id: i64,
    pub drill_id: i64,
    pub trainee_id: i64,
    pub progress: i32,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// 读取时计算，不落库
    pub completed_date: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl TraineeDrill {
    pub fn status(&self) -> TraineeDrillStatus {
        if self.completed_at.is_some() {
            TraineeDrillStatus::Completed
        } else {
            TraineeDrillStatus::Assigned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_completed_date_not_completed() {
        assert_eq!(format_completed_date(None), "N/A");
    }

    #[test]
    fn test_completed_date_formats_iso_date() {
        let at = chrono::Utc.with_ymd_and_hms(2021, 8, 19, 0, 0, 0).unwrap();
        assert_eq!(format_completed_date(Some(at)), "2021-08-19");

        let late = chrono::Utc.with_ymd_and_hms(2021, 8, 19, 23, 59, 59).unwrap();
        assert_eq!(format_completed_date(Some(late)), "2021-08-19");
    }
}
