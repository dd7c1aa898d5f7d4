use serde::Deserialize;
use ts_rs::TS;

use super::entities::{QuestionContent, QuestionType};

// 创建题目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct CreateQuestionRequest {
    pub question_type: QuestionType,
    pub body: String,
    pub code: Option<String>,
    pub highlights: Option<String>,
    pub rubric: Option<String>,
    pub answer_choices: Option<Vec<String>>,
    pub correct: Option<i32>,
    #[serde(default = "default_max_points")]
    pub max_points: i32,
}

fn default_max_points() -> i32 {
    1
}

impl From<CreateQuestionRequest> for QuestionContent {
    fn from(req: CreateQuestionRequest) -> Self {
        QuestionContent {
            question_type: req.question_type,
            body: req.body,
            code: req.code,
            highlights: req.highlights,
            rubric: req.rubric,
            answer_choices: req.answer_choices,
            correct: req.correct,
            max_points: req.max_points,
        }
    }
}

// 修改题目请求：未提供的字段沿用最新版本
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct UpdateQuestionRequest {
    pub question_type: Option<QuestionType>,
    pub body: Option<String>,
    pub code: Option<String>,
    pub highlights: Option<String>,
    pub rubric: Option<String>,
    pub answer_choices: Option<Vec<String>>,
    pub correct: Option<i32>,
    pub max_points: Option<i32>,
}

impl UpdateQuestionRequest {
    /// 合并到已有内容上，得到新版本内容
    pub fn apply_to(self, mut content: QuestionContent) -> QuestionContent {
        if let Some(question_type) = self.question_type {
            content.question_type = question_type;
        }
        if let Some(body) = self.body {
            content.body = body;
        }
        if let Some(code) = self.code {
            content.code = Some(code);
        }
        if let Some(highlights) = self.highlights {
            content.highlights = Some(highlights);
        }
        if let Some(rubric) = self.rubric {
            content.rubric = Some(rubric);
        }
        if let Some(answer_choices) = self.answer_choices {
            content.answer_choices = Some(answer_choices);
        }
        if let Some(correct) = self.correct {
            content.correct = Some(correct);
        }
        if let Some(max_points) = self.max_points {
            content.max_points = max_points;
        }
        content
    }
}
