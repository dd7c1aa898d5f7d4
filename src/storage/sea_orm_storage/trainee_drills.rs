//! 学员训练存储操作

use super::{SeaOrmStorage, db_error};
use crate::entity::drills::{self, Entity as Drills};
use crate::entity::trainee_drills::{ActiveModel, Column, Entity as TraineeDrills};
use crate::errors::{GraderDrillsError, Result};
use crate::models::trainee_drills::{
    entities::TraineeDrill,
    requests::TraineeDrillListParams,
    responses::{TraineeDrillItem, TraineeDrillListResponse},
};
use sea_orm::sea_query::Query;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 分配训练，同一学员同一训练重复分配会触发唯一约束
    pub async fn assign_drill_impl(&self, drill_id: i64, trainee_id: i64) -> Result<TraineeDrill> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            drill_id: Set(drill_id),
            trainee_id: Set(trainee_id),
            progress: Set(0),
            completed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("分配训练失败", e))?;

        Ok(result.into_trainee_drill())
    }

    /// 通过 ID 获取学员训练（不含已删除）
    pub async fn get_trainee_drill_by_id_impl(&self, id: i64) -> Result<Option<TraineeDrill>> {
        let result = TraineeDrills::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询学员训练失败: {e}")))?;

        Ok(result.map(|m| m.into_trainee_drill()))
    }

    /// 标记完成：没有匹配的行（或所属训练已软删除）时返回 None
    pub async fn complete_trainee_drill_impl(&self, id: i64) -> Result<Option<TraineeDrill>> {
        let now = chrono::Utc::now().timestamp();

        let result = TraineeDrills::update_many()
            .col_expr(Column::CompletedAt, sea_orm::sea_query::Expr::value(now))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .filter(
                Column::DrillId.in_subquery(
                    Query::select()
                        .column(drills::Column::Id)
                        .from(drills::Entity)
                        .and_where(drills::Column::DeletedAt.is_null())
                        .to_owned(),
                ),
            )
            .exec(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("完成学员训练失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_trainee_drill_by_id_impl(id).await
    }

    /// 软删除：返回被删除的行（包含已删除记录的查询），未删除任何行时返回 None
    pub async fn delete_trainee_drill_impl(&self, id: i64) -> Result<Option<TraineeDrill>> {
        let now = chrono::Utc::now().timestamp();

        let result = TraineeDrills::update_many()
            .col_expr(Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("删除学员训练失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let deleted = TraineeDrills::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询学员训练失败: {e}")))?;

        Ok(deleted.map(|m| m.into_trainee_drill()))
    }

    /// 列出学员训练，附带训练信息
    pub async fn list_trainee_drills_impl(
        &self,
        params: TraineeDrillListParams,
    ) -> Result<TraineeDrillListResponse> {
        let mut select = TraineeDrills::find().filter(Column::DeletedAt.is_null());

        if let Some(drill_id) = params.drill_id {
            select = select.filter(Column::DrillId.eq(drill_id));
        }

        if let Some(trainee_id) = params.trainee_id {
            select = select.filter(Column::TraineeId.eq(trainee_id));
        }

        let rows = select
            .order_by_asc(Column::Id)
            .find_also_related(Drills)
            .all(&self.db)
            .await
            .map_err(|e| {
                GraderDrillsError::database_operation(format!("查询学员训练列表失败: {e}"))
            })?;

        let items = rows
            .into_iter()
            .filter_map(|(trainee_drill, drill)| {
                // 训练已删除时不再展示
                let drill = drill.filter(|d| d.deleted_at.is_none())?.into_drill();
                Some(TraineeDrillItem {
                    trainee_drill: trainee_drill.into_trainee_drill(),
                    drill_name: drill.name,
                    drill_code: drill.code,
                    num_questions: drill.num_questions,
                    due_date: drill.due_date,
                })
            })
            .collect();

        Ok(TraineeDrillListResponse { items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::drills::tests::new_drill;
    use crate::storage::sea_orm_storage::users::tests::new_user;
    use crate::models::trainee_drills::entities::NOT_COMPLETED;

    async fn setup() -> (SeaOrmStorage, i64, i64) {
        let storage = SeaOrmStorage::in_memory().await;
        let trainee = storage
            .create_user_impl(new_user("trainee@example.com", true, false))
            .await
            .unwrap();
        let drill = storage
            .create_drill_impl(new_drill("Orientation Drill", 2))
            .await
            .unwrap();
        (storage, drill.id, trainee.id)
    }

    #[tokio::test]
    async fn test_assign_starts_unfinished() {
        let (storage, drill_id, trainee_id) = setup().await;
        let td = storage.assign_drill_impl(drill_id, trainee_id).await.unwrap();
        assert_eq!(td.progress, 0);
        assert!(td.completed_at.is_none());
        assert_eq!(td.completed_date, NOT_COMPLETED);
    }

    #[tokio::test]
    async fn test_duplicate_assignment_fails() {
        let (storage, drill_id, trainee_id) = setup().await;
        storage.assign_drill_impl(drill_id, trainee_id).await.unwrap();
        let err = storage
            .assign_drill_impl(drill_id, trainee_id)
            .await
            .unwrap_err();
        assert!(matches!(err, GraderDrillsError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_complete_semantics() {
        let (storage, drill_id, trainee_id) = setup().await;
        assert!(
            storage
                .complete_trainee_drill_impl(9999)
                .await
                .unwrap()
                .is_none()
        );

        let td = storage.assign_drill_impl(drill_id, trainee_id).await.unwrap();
        let completed = storage
            .complete_trainee_drill_impl(td.id)
            .await
            .unwrap()
            .unwrap();
        assert!(completed.completed_at.is_some());
        assert_ne!(completed.completed_date, NOT_COMPLETED);
    }

    #[tokio::test]
    async fn test_delete_semantics() {
        let (storage, drill_id, trainee_id) = setup().await;
        let td = storage.assign_drill_impl(drill_id, trainee_id).await.unwrap();

        let deleted = storage
            .delete_trainee_drill_impl(td.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(deleted.id, td.id);
        assert!(deleted.deleted_at.is_some());

        assert!(storage.delete_trainee_drill_impl(td.id).await.unwrap().is_none());
        assert!(storage.delete_trainee_drill_impl(9999).await.unwrap().is_none());
        assert!(
            storage
                .get_trainee_drill_by_id_impl(td.id)
                .await
                .unwrap()
                .is_none()
        );
        // 已删除的行不能再被标记完成
        assert!(
            storage
                .complete_trainee_drill_impl(td.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_list_for_trainee() {
        let (storage, drill_id, trainee_id) = setup().await;
        storage.assign_drill_impl(drill_id, trainee_id).await.unwrap();

        let list = storage
            .list_trainee_drills_impl(TraineeDrillListParams {
                trainee_id: Some(trainee_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].drill_name, "Orientation Drill");
        assert_eq!(list.items[0].num_questions, 2);

        let other = storage
            .list_trainee_drills_impl(TraineeDrillListParams {
                trainee_id: Some(trainee_id + 100),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(other.items.is_empty());
    }
}
