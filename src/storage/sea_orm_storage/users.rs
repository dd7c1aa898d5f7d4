use super::{SeaOrmStorage, db_error};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::entity::{assessors, trainees};
use crate::errors::{GraderDrillsError, Result};
use crate::models::{
    PaginationInfo, common::normalize_page,
    users::{
        entities::{User, validate_role_flags},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建用户（password 字段为已哈希的密码）
    ///
    /// Users 行与 Trainees / Assessors 行在同一事务中写入，任一失败整体回滚。
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        validate_role_flags(req.is_trainee, req.is_assessor)?;

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            email: Set(req.email),
            password: Set(req.password),
            name: Set(req.name),
            is_trainee: Set(req.is_trainee),
            is_assessor: Set(req.is_assessor),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let user = model
            .insert(&txn)
            .await
            .map_err(|e| db_error("创建用户失败", e))?;

        if user.is_trainee {
            trainees::ActiveModel {
                id: Set(user.id),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(|e| db_error("创建学员失败", e))?;
        }

        if user.is_assessor {
            assessors::ActiveModel {
                id: Set(user.id),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(|e| db_error("创建评估员失败", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(user.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Users::find();

        if query.trainees_only {
            select = select.filter(Column::IsTrainee.eq(true));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Email.contains(&escaped))
                    .add(Column::Name.contains(&escaped)),
            );
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询用户总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询用户页数失败: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                GraderDrillsError::database_operation(format!("更新最后登录时间失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 更新用户资料，角色标志不可修改
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(password) = update.password {
            model.password = Set(password);
        }

        if let Some(name) = update.name {
            model.name = Set(Some(name));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新用户失败", e))?;

        self.get_user_by_id_impl(id).await
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn new_user(email: &str, is_trainee: bool, is_assessor: bool) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            password: "hashed".to_string(),
            name: None,
            is_trainee,
            is_assessor,
        }
    }

    #[tokio::test]
    async fn test_user_without_role_is_rejected() {
        let storage = SeaOrmStorage::in_memory().await;
        let err = storage
            .create_user_impl(new_user("nobody@example.com", false, false))
            .await
            .unwrap_err();
        assert!(matches!(err, GraderDrillsError::Validation(_)));
        assert_eq!(err.message(), "User must have a role");
        assert_eq!(storage.count_users_impl().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_trainee_row_created_with_user() {
        let storage = SeaOrmStorage::in_memory().await;
        let user = storage
            .create_user_impl(new_user("t@example.com", true, false))
            .await
            .unwrap();

        let trainee_rows = trainees::Entity::find().all(&storage.db).await.unwrap();
        assert_eq!(trainee_rows.len(), 1);
        assert_eq!(trainee_rows[0].id, user.id);
        assert_eq!(assessors::Entity::find().count(&storage.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_dual_role_user_gets_both_rows() {
        let storage = SeaOrmStorage::in_memory().await;
        let user = storage
            .create_user_impl(new_user("both@example.com", true, true))
            .await
            .unwrap();

        assert!(
            trainees::Entity::find_by_id(user.id)
                .one(&storage.db)
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            assessors::Entity::find_by_id(user.id)
                .one(&storage.db)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_failed_role_insert_rolls_back_user() {
        use sea_orm::ConnectionTrait;

        let storage = SeaOrmStorage::in_memory().await;
        // Assessors 表不存在时，Users 和 Trainees 行已写入后第三条插入失败
        storage
            .db
            .execute_unprepared("DROP TABLE Assessors")
            .await
            .unwrap();

        let result = storage
            .create_user_impl(new_user("rollback@example.com", true, true))
            .await;
        assert!(result.is_err());

        assert_eq!(storage.count_users_impl().await.unwrap(), 0);
        assert!(
            storage
                .get_user_by_email_impl("rollback@example.com")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            trainees::Entity::find()
                .all(&storage.db)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await;
        storage
            .create_user_impl(new_user("dup@example.com", true, false))
            .await
            .unwrap();
        let err = storage
            .create_user_impl(new_user("dup@example.com", false, true))
            .await
            .unwrap_err();
        assert!(matches!(err, GraderDrillsError::Conflict(_)));
        // 事务回滚，没有残留的评估员行
        assert_eq!(assessors::Entity::find().count(&storage.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_profile_keeps_roles() {
        let storage = SeaOrmStorage::in_memory().await;
        let user = storage
            .create_user_impl(new_user("me@example.com", true, false))
            .await
            .unwrap();

        let updated = storage
            .update_user_impl(
                user.id,
                UpdateUserRequest {
                    name: Some("Morgan".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Morgan"));
        assert!(updated.is_trainee);
        assert!(!updated.is_assessor);

        assert!(
            storage
                .update_user_impl(999, UpdateUserRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_list_trainees_only() {
        let storage = SeaOrmStorage::in_memory().await;
        storage
            .create_user_impl(new_user("a@example.com", true, false))
            .await
            .unwrap();
        storage
            .create_user_impl(new_user("b@example.com", false, true))
            .await
            .unwrap();

        let list = storage
            .list_users_with_pagination_impl(UserListQuery {
                trainees_only: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].email, "a@example.com");
        assert_eq!(list.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_update_last_login() {
        let storage = SeaOrmStorage::in_memory().await;
        let user = storage
            .create_user_impl(new_user("login@example.com", true, false))
            .await
            .unwrap();
        assert!(user.last_login.is_none());
        assert!(storage.update_last_login_impl(user.id).await.unwrap());
        let user = storage.get_user_by_id_impl(user.id).await.unwrap().unwrap();
        assert!(user.last_login.is_some());
        assert!(!storage.update_last_login_impl(404).await.unwrap());
    }
}
