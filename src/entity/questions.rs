//! 题目实体，(id, version) 复合主键

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "Questions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub version: i32,
    #[sea_orm(column_name = "drillId")]
    pub drill_id: i64,
    #[sea_orm(column_name = "questionType")]
    pub question_type: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub code: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub highlights: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub rubric: Option<String>,
    #[sea_orm(column_name = "answerChoices", column_type = "Text", nullable)]
    pub answer_choices: Option<String>,
    pub correct: Option<i32>,
    #[sea_orm(column_name = "maxPoints")]
    pub max_points: i32,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::drills::Entity",
        from = "Column::DrillId",
        to = "super::drills::Column::Id"
    )]
    Drill,
}

impl Related<super::drills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Drill.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_question(self) -> crate::models::questions::entities::Question {
        use crate::models::questions::entities::{Question, QuestionType};
        use chrono::{DateTime, Utc};

        Question {
            id: self.id,
            version: self.version,
            drill_id: self.drill_id,
            question_type: self
                .question_type
                .parse::<QuestionType>()
                .unwrap_or(QuestionType::ShortAnswer),
            body: self.body,
            code: self.code,
            highlights: self.highlights,
            rubric: self.rubric,
            answer_choices: self
                .answer_choices
                .and_then(|json| serde_json::from_str(&json).ok()),
            correct: self.correct,
            max_points: self.max_points,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
