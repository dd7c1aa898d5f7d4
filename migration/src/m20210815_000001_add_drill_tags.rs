use sea_orm_migration::prelude::*;

use crate::m20210805_000001_create_drills::Drills;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 训练标签，JSON 字符串数组
        manager
            .alter_table(
                Table::alter()
                    .table(Drills::Table)
                    .add_column(ColumnDef::new(Drills::Tags).text().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Drills::Table)
                    .drop_column(Drills::Tags)
                    .to_owned(),
            )
            .await
    }
}
