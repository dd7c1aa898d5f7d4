//! 作答实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "Answered")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "traineeDrillId")]
    pub trainee_drill_id: i64,
    #[sea_orm(column_name = "questionId")]
    pub question_id: i64,
    #[sea_orm(column_name = "questionVersion")]
    pub question_version: i32,
    pub autograded: bool,
    pub graded: bool,
    #[sea_orm(column_type = "Double", nullable)]
    pub score: Option<f64>,
    #[sea_orm(column_name = "maxPoints")]
    pub max_points: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub highlights: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub rubric: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub answer: String,
    #[sea_orm(column_name = "gradedBy")]
    pub graded_by: Option<i64>,
    #[sea_orm(column_name = "gradedAt")]
    pub graded_at: Option<i64>,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: i64,
    #[sea_orm(column_name = "updatedAt")]
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trainee_drills::Entity",
        from = "Column::TraineeDrillId",
        to = "super::trainee_drills::Column::Id"
    )]
    TraineeDrill,
    #[sea_orm(
        belongs_to = "super::assessors::Entity",
        from = "Column::GradedBy",
        to = "super::assessors::Column::Id"
    )]
    Assessor,
}

impl Related<super::trainee_drills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TraineeDrill.def()
    }
}

impl Related<super::assessors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_answered(self) -> crate::models::answered::entities::Answered {
        use crate::models::answered::entities::Answered;
        use chrono::{DateTime, Utc};

        Answered {
            id: self.id,
            trainee_drill_id: self.trainee_drill_id,
            question_id: self.question_id,
            question_version: self.question_version,
            autograded: self.autograded,
            graded: self.graded,
            score: self.score,
            max_points: self.max_points,
            highlights: self.highlights,
            rubric: self.rubric,
            answer: self.answer,
            graded_by: self.graded_by,
            graded_at: self
                .graded_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
