use sea_orm_migration::prelude::*;

use crate::m20210805_000001_create_drills::TraineeDrills;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEX_NAME: &str = "uq_trainee_drills_drill_id_trainee_id";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 同一学员同一训练只能有一条记录（包括已软删除的记录）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name(INDEX_NAME)
                    .table(TraineeDrills::Table)
                    .col(TraineeDrills::DrillId)
                    .col(TraineeDrills::TraineeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(INDEX_NAME)
                    .table(TraineeDrills::Table)
                    .to_owned(),
            )
            .await
    }
}
