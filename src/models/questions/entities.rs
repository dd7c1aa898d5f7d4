use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{GraderDrillsError, Result};

// 题目类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "question.ts")]
pub enum QuestionType {
    MultipleChoice, // 选择题（自动评分）
    ShortAnswer,    // 简答题
    Code,           // 代码题
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<QuestionType>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的题目类型: '{s}'. 支持的类型: multiple_choice, short_answer, code"
            ))
        })
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple_choice"),
            QuestionType::ShortAnswer => write!(f, "short_answer"),
            QuestionType::Code => write!(f, "code"),
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "short_answer" => Ok(QuestionType::ShortAnswer),
            "code" => Ok(QuestionType::Code),
            _ => Err(format!("Invalid question type: {s}")),
        }
    }
}

// 题目实体，(id, version) 唯一确定一道题
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct Question {
    pub id: i64,
    pub version: i32,
    pub drill_id: i64,
    pub question_type: QuestionType,
    pub body: String,
    pub code: Option<String>,
    pub highlights: Option<String>,
    pub rubric: Option<String>,
    pub answer_choices: Option<Vec<String>>,
    pub correct: Option<i32>,
    pub max_points: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 题目内容（创建或生成新版本时写入）
#[derive(Debug, Clone)]
pub struct QuestionContent {
    pub question_type: QuestionType,
    pub body: String,
    pub code: Option<String>,
    pub highlights: Option<String>,
    pub rubric: Option<String>,
    pub answer_choices: Option<Vec<String>>,
    pub correct: Option<i32>,
    pub max_points: i32,
}

impl QuestionContent {
    /// 校验题目内容
    pub fn validate(&self) -> Result<()> {
        if self.body.trim().is_empty() {
            return Err(GraderDrillsError::validation("Question body cannot be empty"));
        }
        if self.max_points < 0 {
            return Err(GraderDrillsError::validation(
                "Question max points cannot be negative",
            ));
        }
        if self.question_type == QuestionType::MultipleChoice {
            let choices = self.answer_choices.as_deref().unwrap_or_default();
            if choices.is_empty() {
                return Err(GraderDrillsError::validation(
                    "Multiple choice question requires answer choices",
                ));
            }
            match self.correct {
                Some(idx) if idx >= 0 && (idx as usize) < choices.len() => {}
                _ => {
                    return Err(GraderDrillsError::validation(
                        "Correct answer index is out of range",
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Question {
    /// 自动评分：仅选择题可自动评分，返回得分
    pub fn autograde(&self, answer: &str) -> Option<f64> {
        if self.question_type != QuestionType::MultipleChoice {
            return None;
        }
        let correct = self.correct?;
        let chosen = answer.trim().parse::<i32>().ok();
        if chosen == Some(correct) {
            Some(self.max_points as f64)
        } else {
            Some(0.0)
        }
    }

    pub fn content(&self) -> QuestionContent {
        QuestionContent {
            question_type: self.question_type,
            body: self.body.clone(),
            code: self.code.clone(),
            highlights: self.highlights.clone(),
            rubric: self.rubric.clone(),
            answer_choices: self.answer_choices.clone(),
            correct: self.correct,
            max_points: self.max_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multiple_choice() -> QuestionContent {
        QuestionContent {
            question_type: QuestionType::MultipleChoice,
            body: "Which traversal visits the root first?".to_string(),
            code: None,
            highlights: None,
            rubric: None,
            answer_choices: Some(vec![
                "in-order".to_string(),
                "pre-order".to_string(),
                "post-order".to_string(),
            ]),
            correct: Some(1),
            max_points: 2,
        }
    }

    fn question(content: QuestionContent) -> Question {
        Question {
            id: 1,
            version: 1,
            drill_id: 1,
            question_type: content.question_type,
            body: content.body,
            code: content.code,
            highlights: content.highlights,
            rubric: content.rubric,
            answer_choices: content.answer_choices,
            correct: content.correct,
            max_points: content.max_points,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_multiple_choice_validation() {
        assert!(multiple_choice().validate().is_ok());

        let mut no_choices = multiple_choice();
        no_choices.answer_choices = None;
        assert!(no_choices.validate().is_err());

        let mut out_of_range = multiple_choice();
        out_of_range.correct = Some(3);
        assert_eq!(
            out_of_range.validate().unwrap_err().message(),
            "Correct answer index is out of range"
        );
    }

    #[test]
    fn test_short_answer_needs_no_choices() {
        let mut content = multiple_choice();
        content.question_type = QuestionType::ShortAnswer;
        content.answer_choices = None;
        content.correct = None;
        assert!(content.validate().is_ok());

        content.body = "   ".to_string();
        assert!(content.validate().is_err());
    }

    #[test]
    fn test_autograde() {
        let q = question(multiple_choice());
        assert_eq!(q.autograde("1"), Some(2.0));
        assert_eq!(q.autograde(" 1 "), Some(2.0));
        assert_eq!(q.autograde("0"), Some(0.0));
        assert_eq!(q.autograde("pre-order"), Some(0.0));

        let mut content = multiple_choice();
        content.question_type = QuestionType::Code;
        assert_eq!(question(content).autograde("1"), None);
    }
}
