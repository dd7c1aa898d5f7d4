//! 训练存储操作

use super::{SeaOrmStorage, db_error};
use crate::entity::drills::{ActiveModel, Column, Entity as Drills};
use crate::entity::trainee_drills;
use crate::errors::{GraderDrillsError, Result};
use crate::models::{
    PaginationInfo, common::normalize_page,
    drills::{
        entities::Drill,
        requests::{CreateDrillRequest, DrillListQuery, UpdateDrillRequest},
        responses::DrillListResponse,
    },
};
use crate::utils::{escape_like_pattern, random_code::generate_random_code};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::warn;

const DRILL_CODE_LENGTH: usize = 8;
const DRILL_CODE_ATTEMPTS: usize = 5;

fn encode_tags(tags: Option<Vec<String>>) -> Result<Option<String>> {
    match tags {
        Some(tags) => Ok(Some(serde_json::to_string(&tags)?)),
        None => Ok(None),
    }
}

impl SeaOrmStorage {
    /// 创建训练，代码冲突时重新生成
    pub async fn create_drill_impl(&self, req: CreateDrillRequest) -> Result<Drill> {
        let now = chrono::Utc::now().timestamp();
        let tags = encode_tags(req.tags)?;

        let mut last_error = None;
        for _ in 0..DRILL_CODE_ATTEMPTS {
            let model = ActiveModel {
                code: Set(generate_random_code(DRILL_CODE_LENGTH)),
                name: Set(req.name.clone()),
                num_questions: Set(req.num_questions),
                due_date: Set(req.due_date.map(|d| d.timestamp())),
                tags: Set(tags.clone()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            match model.insert(&self.db).await {
                Ok(result) => return Ok(result.into_drill()),
                Err(e) if crate::errors::is_unique_violation(&e) => {
                    warn!("训练代码冲突，重新生成: {e}");
                    last_error = Some(e);
                }
                Err(e) => return Err(db_error("创建训练失败", e)),
            }
        }

        Err(GraderDrillsError::conflict(format!(
            "无法生成唯一的训练代码: {}",
            last_error.map(|e| e.to_string()).unwrap_or_default()
        )))
    }

    /// 通过 ID 获取训练
    pub async fn get_drill_by_id_impl(&self, id: i64) -> Result<Option<Drill>> {
        let result = Drills::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询训练失败: {e}")))?;

        Ok(result.map(|m| m.into_drill()))
    }

    /// 通过代码获取训练
    pub async fn get_drill_by_code_impl(&self, code: &str) -> Result<Option<Drill>> {
        let result = Drills::find()
            .filter(Column::Code.eq(code))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询训练失败: {e}")))?;

        Ok(result.map(|m| m.into_drill()))
    }

    /// 分页列出训练
    pub async fn list_drills_with_pagination_impl(
        &self,
        query: DrillListQuery,
    ) -> Result<DrillListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Drills::find().filter(Column::DeletedAt.is_null());

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Name.contains(escape_like_pattern(search.trim())));
        }

        // 标签以 JSON 数组存储，按带引号的元素匹配
        if let Some(ref tag) = query.tag
            && !tag.trim().is_empty()
        {
            let needle = format!("\"{}\"", escape_like_pattern(tag.trim()));
            select = select.filter(Column::Tags.contains(needle));
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询训练总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询训练页数失败: {e}")))?;

        let drills = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询训练列表失败: {e}")))?;

        Ok(DrillListResponse {
            items: drills.into_iter().map(|m| m.into_drill()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新训练
    pub async fn update_drill_impl(
        &self,
        id: i64,
        update: UpdateDrillRequest,
    ) -> Result<Option<Drill>> {
        if self.get_drill_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        let new_num_questions = update.num_questions;
        if let Some(num_questions) = new_num_questions {
            model.num_questions = Set(num_questions);
        }

        if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(due_date.timestamp()));
        }

        if update.tags.is_some() {
            model.tags = Set(encode_tags(update.tags)?);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("开启事务失败: {e}")))?;

        model
            .update(&txn)
            .await
            .map_err(|e| db_error("更新训练失败", e))?;

        // 题目数减少时，进度截断到新题目数，达到上限的学员训练标记完成
        if let Some(num_questions) = new_num_questions {
            trainee_drills::Entity::update_many()
                .col_expr(
                    trainee_drills::Column::Progress,
                    sea_orm::sea_query::Expr::value(num_questions),
                )
                .col_expr(
                    trainee_drills::Column::UpdatedAt,
                    sea_orm::sea_query::Expr::value(now),
                )
                .filter(trainee_drills::Column::DrillId.eq(id))
                .filter(trainee_drills::Column::Progress.gt(num_questions))
                .exec(&txn)
                .await
                .map_err(|e| {
                    GraderDrillsError::database_operation(format!("截断训练进度失败: {e}"))
                })?;

            trainee_drills::Entity::update_many()
                .col_expr(
                    trainee_drills::Column::CompletedAt,
                    sea_orm::sea_query::Expr::value(now),
                )
                .col_expr(
                    trainee_drills::Column::UpdatedAt,
                    sea_orm::sea_query::Expr::value(now),
                )
                .filter(trainee_drills::Column::DrillId.eq(id))
                .filter(trainee_drills::Column::Progress.gte(num_questions))
                .filter(trainee_drills::Column::CompletedAt.is_null())
                .filter(trainee_drills::Column::DeletedAt.is_null())
                .exec(&txn)
                .await
                .map_err(|e| {
                    GraderDrillsError::database_operation(format!("更新训练完成状态失败: {e}"))
                })?;
        }

        txn.commit()
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_drill_by_id_impl(id).await
    }

    /// 软删除训练
    pub async fn delete_drill_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Drills::update_many()
            .col_expr(Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("删除训练失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn new_drill(name: &str, num_questions: i32) -> CreateDrillRequest {
        CreateDrillRequest {
            name: name.to_string(),
            num_questions,
            due_date: None,
            tags: None,
        }
    }

    #[tokio::test]
    async fn test_create_drill_generates_code() {
        let storage = SeaOrmStorage::in_memory().await;
        let drill = storage
            .create_drill_impl(new_drill("Orientation Drill", 1))
            .await
            .unwrap();
        assert_eq!(drill.code.len(), 8);
        assert!(drill.tags.is_empty());

        let found = storage
            .get_drill_by_code_impl(&drill.code)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, drill.id);
    }

    #[tokio::test]
    async fn test_soft_deleted_drill_is_hidden() {
        let storage = SeaOrmStorage::in_memory().await;
        let drill = storage
            .create_drill_impl(new_drill("Temporary", 2))
            .await
            .unwrap();

        assert!(storage.delete_drill_impl(drill.id).await.unwrap());
        assert!(!storage.delete_drill_impl(drill.id).await.unwrap());
        assert!(storage.get_drill_by_id_impl(drill.id).await.unwrap().is_none());

        let list = storage
            .list_drills_with_pagination_impl(DrillListQuery::default())
            .await
            .unwrap();
        assert!(list.items.is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_by_tag_and_search() {
        let storage = SeaOrmStorage::in_memory().await;
        storage
            .create_drill_impl(CreateDrillRequest {
                tags: Some(vec!["rust".to_string(), "basics".to_string()]),
                ..new_drill("Ownership", 3)
            })
            .await
            .unwrap();
        storage
            .create_drill_impl(CreateDrillRequest {
                tags: Some(vec!["sql".to_string()]),
                ..new_drill("Joins", 2)
            })
            .await
            .unwrap();

        let by_tag = storage
            .list_drills_with_pagination_impl(DrillListQuery {
                tag: Some("rust".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_tag.items.len(), 1);
        assert_eq!(by_tag.items[0].tags, vec!["rust", "basics"]);

        let by_name = storage
            .list_drills_with_pagination_impl(DrillListQuery {
                search: Some("join".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_name.items.len(), 1);
        assert_eq!(by_name.items[0].name, "Joins");
    }

    #[tokio::test]
    async fn test_update_drill() {
        let storage = SeaOrmStorage::in_memory().await;
        let drill = storage
            .create_drill_impl(new_drill("Draft", 1))
            .await
            .unwrap();

        let updated = storage
            .update_drill_impl(
                drill.id,
                UpdateDrillRequest {
                    name: Some("Final".to_string()),
                    num_questions: Some(4),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Final");
        assert_eq!(updated.num_questions, 4);
        assert_eq!(updated.code, drill.code);

        assert!(
            storage
                .update_drill_impl(12345, UpdateDrillRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_shrinking_drill_caps_progress_and_completes() {
        use crate::storage::sea_orm_storage::questions::tests::{multiple_choice, short_answer};
        use crate::storage::sea_orm_storage::users::tests::new_user;

        let storage = SeaOrmStorage::in_memory().await;
        let trainee = storage
            .create_user_impl(new_user("shrink@example.com", true, false))
            .await
            .unwrap();
        let drill = storage
            .create_drill_impl(new_drill("Lifetimes", 3))
            .await
            .unwrap();
        let first = storage
            .create_question_impl(drill.id, multiple_choice(0, 1))
            .await
            .unwrap();
        let second = storage
            .create_question_impl(drill.id, short_answer("What is 'static?"))
            .await
            .unwrap();
        let td = storage.assign_drill_impl(drill.id, trainee.id).await.unwrap();
        storage
            .submit_answer_impl(td.id, first.id, "0")
            .await
            .unwrap()
            .unwrap();
        storage
            .submit_answer_impl(td.id, second.id, "Lives for the whole program")
            .await
            .unwrap()
            .unwrap();

        let before = storage.get_trainee_drill_by_id_impl(td.id).await.unwrap().unwrap();
        assert_eq!(before.progress, 2);
        assert!(before.completed_at.is_none());

        storage
            .update_drill_impl(
                drill.id,
                UpdateDrillRequest {
                    num_questions: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        let after = storage.get_trainee_drill_by_id_impl(td.id).await.unwrap().unwrap();
        assert_eq!(after.progress, 1);
        assert!(after.completed_at.is_some());
    }
}
