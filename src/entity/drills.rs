//! 训练实体（软删除）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "Drills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    #[sea_orm(column_name = "numQuestions")]
    pub num_questions: i32,
    #[sea_orm(column_name = "dueDate")]
    pub due_date: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub tags: Option<String>,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: i64,
    #[sea_orm(column_name = "updatedAt")]
    pub updated_at: i64,
    #[sea_orm(column_name = "deletedAt")]
    pub deleted_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::trainee_drills::Entity")]
    TraineeDrills,
    #[sea_orm(has_many = "super::questions::Entity")]
    Questions,
}

impl Related<super::trainee_drills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TraineeDrills.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_drill(self) -> crate::models::drills::entities::Drill {
        use crate::models::drills::entities::Drill;
        use chrono::{DateTime, Utc};

        Drill {
            id: self.id,
            code: self.code,
            name: self.name,
            num_questions: self.num_questions,
            due_date: self
                .due_date
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            tags: self
                .tags
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_default(),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
            deleted_at: self
                .deleted_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        }
    }
}
