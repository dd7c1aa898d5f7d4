use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{GraderDrillsError, Result};

// 作答实体：学员在某次训练中对某一版本题目的回答
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "answered.ts")]
pub struct Answered {
    pub id: i64,
    pub trainee_drill_id: i64,
    pub question_id: i64,
    pub question_version: i32,
    pub autograded: bool,
    pub graded: bool,
    pub score: Option<f64>,
    pub max_points: i32,
    pub highlights: Option<String>,
    pub rubric: Option<String>,
    pub answer: String,
    pub graded_by: Option<i64>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 校验人工评分分值
pub fn validate_score(score: f64, max_points: i32) -> Result<()> {
    if !score.is_finite() || score < 0.0 || score > max_points as f64 {
        return Err(GraderDrillsError::validation(format!(
            "Score must be between 0 and {max_points}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_score() {
        assert!(validate_score(0.0, 5).is_ok());
        assert!(validate_score(5.0, 5).is_ok());
        assert!(validate_score(2.5, 5).is_ok());
        assert!(validate_score(-1.0, 5).is_err());
        assert!(validate_score(5.5, 5).is_err());
        assert!(validate_score(f64::NAN, 5).is_err());
    }
}
