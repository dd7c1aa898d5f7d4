use std::sync::Arc;

use crate::models::{
    answered::entities::Answered,
    drills::{
        entities::Drill,
        requests::{CreateDrillRequest, DrillListQuery, UpdateDrillRequest},
        responses::DrillListResponse,
    },
    questions::entities::{Question, QuestionContent},
    trainee_drills::{
        entities::TraineeDrill,
        requests::TraineeDrillListParams,
        responses::{ScoreSummary, TraineeDrillListResponse},
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，同时写入 Trainees / Assessors 角色行（同一事务）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户资料（不修改角色）
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 训练管理方法
    // 创建训练，自动生成代码
    async fn create_drill(&self, drill: CreateDrillRequest) -> Result<Drill>;
    // 通过ID获取训练（不含已删除）
    async fn get_drill_by_id(&self, id: i64) -> Result<Option<Drill>>;
    // 通过代码获取训练（不含已删除）
    async fn get_drill_by_code(&self, code: &str) -> Result<Option<Drill>>;
    // 列出训练
    async fn list_drills_with_pagination(&self, query: DrillListQuery)
    -> Result<DrillListResponse>;
    // 更新训练
    async fn update_drill(&self, id: i64, update: UpdateDrillRequest) -> Result<Option<Drill>>;
    // 软删除训练
    async fn delete_drill(&self, id: i64) -> Result<bool>;

    /// 学员训练方法
    // 给学员分配训练
    async fn assign_drill(&self, drill_id: i64, trainee_id: i64) -> Result<TraineeDrill>;
    // 通过ID获取学员训练（不含已删除）
    async fn get_trainee_drill_by_id(&self, id: i64) -> Result<Option<TraineeDrill>>;
    // 标记完成
    async fn complete_trainee_drill(&self, id: i64) -> Result<Option<TraineeDrill>>;
    // 软删除，返回被删除的行
    async fn delete_trainee_drill(&self, id: i64) -> Result<Option<TraineeDrill>>;
    // 列出学员训练
    async fn list_trainee_drills(
        &self,
        params: TraineeDrillListParams,
    ) -> Result<TraineeDrillListResponse>;

    /// 题目管理方法
    // 创建题目（version = 1）
    async fn create_question(&self, drill_id: i64, content: QuestionContent) -> Result<Question>;
    // 修改题目，追加新版本
    async fn revise_question(&self, id: i64, content: QuestionContent)
    -> Result<Option<Question>>;
    // 获取题目最新版本
    async fn get_latest_question(&self, id: i64) -> Result<Option<Question>>;
    // 获取题目指定版本
    async fn get_question_version(&self, id: i64, version: i32) -> Result<Option<Question>>;
    // 列出训练下的题目（每题最新版本）
    async fn list_drill_questions(&self, drill_id: i64) -> Result<Vec<Question>>;

    /// 作答与评分方法
    // 提交作答，更新进度
    async fn submit_answer(
        &self,
        trainee_drill_id: i64,
        question_id: i64,
        answer: &str,
    ) -> Result<Option<Answered>>;
    // 人工评分
    async fn grade_answer(
        &self,
        id: i64,
        assessor_id: i64,
        score: f64,
        highlights: Option<String>,
    ) -> Result<Option<Answered>>;
    // 通过ID获取作答
    async fn get_answer_by_id(&self, id: i64) -> Result<Option<Answered>>;
    // 列出某次训练的作答
    async fn list_answers(&self, trainee_drill_id: i64) -> Result<Vec<Answered>>;
    // 列出待评分作答
    async fn list_ungraded_answers(&self) -> Result<Vec<Answered>>;
    // 得分汇总
    async fn score_summary(&self, trainee_drill_id: i64) -> Result<ScoreSummary>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
