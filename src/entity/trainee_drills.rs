//! 学员训练关联实体（软删除）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "TraineeDrills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "drillId")]
    pub drill_id: i64,
    #[sea_orm(column_name = "traineeId")]
    pub trainee_id: i64,
    pub progress: i32,
    #[sea_orm(column_name = "completedAt")]
    pub completed_at: Option<i64>,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: i64,
    #[sea_orm(column_name = "updatedAt")]
    pub updated_at: i64,
    #[sea_orm(column_name = "deletedAt")]
    pub deleted_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::drills::Entity",
        from = "Column::DrillId",
        to = "super::drills::Column::Id"
    )]
    Drill,
    #[sea_orm(
        belongs_to = "super::trainees::Entity",
        from = "Column::TraineeId",
        to = "super::trainees::Column::Id"
    )]
    Trainee,
    #[sea_orm(has_many = "super::answered::Entity")]
    Answered,
}

impl Related<super::drills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Drill.def()
    }
}

impl Related<super::trainees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trainee.def()
    }
}

impl Related<super::answered::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answered.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_trainee_drill(self) -> crate::models::trainee_drills::entities::TraineeDrill {
        use crate::models::trainee_drills::entities::{TraineeDrill, format_completed_date};
        use chrono::{DateTime, Utc};

        let completed_at = self
            .completed_at
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0));

        TraineeDrill {
            id: self.id,
            drill_id: self.drill_id,
            trainee_id: self.trainee_id,
            progress: self.progress,
            completed_at,
            completed_date: format_completed_date(completed_at),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
            deleted_at: self
                .deleted_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        }
    }
}
