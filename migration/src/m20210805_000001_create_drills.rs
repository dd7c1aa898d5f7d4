use sea_orm_migration::prelude::*;

use crate::m20210801_000001_create_users::Trainees;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建训练表（软删除）
        manager
            .create_table(
                Table::create()
                    .table(Drills::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Drills::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Drills::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Drills::Name).string().not_null())
                    .col(
                        ColumnDef::new(Drills::NumQuestions)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Drills::DueDate).big_integer().null())
                    .col(ColumnDef::new(Drills::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Drills::UpdatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Drills::DeletedAt).big_integer().null())
                    .to_owned(),
            )
            .await?;

        // 创建学员训练关联表（软删除）
        manager
            .create_table(
                Table::create()
                    .table(TraineeDrills::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TraineeDrills::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TraineeDrills::DrillId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TraineeDrills::TraineeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TraineeDrills::Progress)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TraineeDrills::CompletedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TraineeDrills::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TraineeDrills::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TraineeDrills::DeletedAt)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TraineeDrills::Table, TraineeDrills::DrillId)
                            .to(Drills::Table, Drills::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TraineeDrills::Table, TraineeDrills::TraineeId)
                            .to(Trainees::Table, Trainees::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_trainee_drills_trainee_id")
                    .table(TraineeDrills::Table)
                    .col(TraineeDrills::TraineeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TraineeDrills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Drills::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Drills {
    #[sea_orm(iden = "Drills")]
    Table,
    #[sea_orm(iden = "id")]
    Id,
    #[sea_orm(iden = "code")]
    Code,
    #[sea_orm(iden = "name")]
    Name,
    #[sea_orm(iden = "numQuestions")]
    NumQuestions,
    #[sea_orm(iden = "dueDate")]
    DueDate,
    #[sea_orm(iden = "tags")]
    Tags,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
    #[sea_orm(iden = "deletedAt")]
    DeletedAt,
}

#[derive(DeriveIden)]
pub(crate) enum TraineeDrills {
    #[sea_orm(iden = "TraineeDrills")]
    Table,
    #[sea_orm(iden = "id")]
    Id,
    #[sea_orm(iden = "drillId")]
    DrillId,
    #[sea_orm(iden = "traineeId")]
    TraineeId,
    #[sea_orm(iden = "progress")]
    Progress,
    #[sea_orm(iden = "completedAt")]
    CompletedAt,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
    #[sea_orm(iden = "deletedAt")]
    DeletedAt,
}
