use sea_orm_migration::prelude::*;

use crate::m20210801_000001_create_users::Assessors;
use crate::m20210805_000001_create_drills::{Drills, TraineeDrills};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建题目表，(id, version) 复合主键，修改题目只追加新版本
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Questions::Id).big_integer().not_null())
                    .col(ColumnDef::new(Questions::Version).integer().not_null())
                    .col(ColumnDef::new(Questions::DrillId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Questions::QuestionType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Questions::Body).text().not_null())
                    .col(ColumnDef::new(Questions::Code).text().null())
                    .col(ColumnDef::new(Questions::Highlights).text().null())
                    .col(ColumnDef::new(Questions::Rubric).text().null())
                    .col(ColumnDef::new(Questions::AnswerChoices).text().null())
                    .col(ColumnDef::new(Questions::Correct).integer().null())
                    .col(
                        ColumnDef::new(Questions::MaxPoints)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Questions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(Questions::Id)
                            .col(Questions::Version),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Questions::Table, Questions::DrillId)
                            .to(Drills::Table, Drills::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作答表
        manager
            .create_table(
                Table::create()
                    .table(Answered::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Answered::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Answered::TraineeDrillId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Answered::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Answered::QuestionVersion)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Answered::Autograded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Answered::Graded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Answered::Score).double().null())
                    .col(ColumnDef::new(Answered::MaxPoints).integer().not_null())
                    .col(ColumnDef::new(Answered::Highlights).text().null())
                    .col(ColumnDef::new(Answered::Rubric).text().null())
                    .col(ColumnDef::new(Answered::Answer).text().not_null())
                    .col(ColumnDef::new(Answered::GradedBy).big_integer().null())
                    .col(ColumnDef::new(Answered::GradedAt).big_integer().null())
                    .col(ColumnDef::new(Answered::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Answered::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Answered::Table, Answered::TraineeDrillId)
                            .to(TraineeDrills::Table, TraineeDrills::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from_tbl(Answered::Table)
                            .from_col(Answered::QuestionId)
                            .from_col(Answered::QuestionVersion)
                            .to_tbl(Questions::Table)
                            .to_col(Questions::Id)
                            .to_col(Questions::Version)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Answered::Table, Answered::GradedBy)
                            .to(Assessors::Table, Assessors::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_questions_drill_id")
                    .table(Questions::Table)
                    .col(Questions::DrillId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("idx_answered_trainee_drill_question")
                    .table(Answered::Table)
                    .col(Answered::TraineeDrillId)
                    .col(Answered::QuestionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_answered_graded")
                    .table(Answered::Table)
                    .col(Answered::Graded)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Answered::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Questions {
    #[sea_orm(iden = "Questions")]
    Table,
    #[sea_orm(iden = "id")]
    Id,
    #[sea_orm(iden = "version")]
    Version,
    #[sea_orm(iden = "drillId")]
    DrillId,
    #[sea_orm(iden = "questionType")]
    QuestionType,
    #[sea_orm(iden = "body")]
    Body,
    #[sea_orm(iden = "code")]
    Code,
    #[sea_orm(iden = "highlights")]
    Highlights,
    #[sea_orm(iden = "rubric")]
    Rubric,
    #[sea_orm(iden = "answerChoices")]
    AnswerChoices,
    #[sea_orm(iden = "correct")]
    Correct,
    #[sea_orm(iden = "maxPoints")]
    MaxPoints,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
}

#[derive(DeriveIden)]
enum Answered {
    #[sea_orm(iden = "Answered")]
    Table,
    #[sea_orm(iden = "id")]
    Id,
    #[sea_orm(iden = "traineeDrillId")]
    TraineeDrillId,
    #[sea_orm(iden = "questionId")]
    QuestionId,
    #[sea_orm(iden = "questionVersion")]
    QuestionVersion,
    #[sea_orm(iden = "autograded")]
    Autograded,
    #[sea_orm(iden = "graded")]
    Graded,
    #[sea_orm(iden = "score")]
    Score,
    #[sea_orm(iden = "maxPoints")]
    MaxPoints,
    #[sea_orm(iden = "highlights")]
    Highlights,
    #[sea_orm(iden = "rubric")]
    Rubric,
    #[sea_orm(iden = "answer")]
    Answer,
    #[sea_orm(iden = "gradedBy")]
    GradedBy,
    #[sea_orm(iden = "gradedAt")]
    GradedAt,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
}
