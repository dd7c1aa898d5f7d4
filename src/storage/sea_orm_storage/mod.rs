//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod answered;
mod drills;
mod questions;
mod trainee_drills;
pub(crate) mod users;

use crate::config::AppConfig;
use crate::errors::{GraderDrillsError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// 数据库错误转换：唯一约束冲突单独映射为 Conflict
pub(super) fn db_error(action: &str, e: sea_orm::DbErr) -> GraderDrillsError {
    if crate::errors::is_unique_violation(&e) {
        GraderDrillsError::conflict(format!("{action}: {e}"))
    } else {
        GraderDrillsError::database_operation(format!("{action}: {e}"))
    }
}

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| GraderDrillsError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| GraderDrillsError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| GraderDrillsError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(GraderDrillsError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 测试用内存数据库（单连接，保证所有查询看到同一个库）
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Self {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("invalid sqlite url")
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .expect("failed to open in-memory sqlite");
        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
        Migrator::up(&db, None).await.expect("migration failed");
        Self { db }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 训练模块
    async fn create_drill(&self, drill: CreateDrillRequest) -> Result<Drill> {
        self.create_drill_impl(drill).await
    }

    async fn get_drill_by_id(&self, id: i64) -> Result<Option<Drill>> {
        self.get_drill_by_id_impl(id).await
    }

    async fn get_drill_by_code(&self, code: &str) -> Result<Option<Drill>> {
        self.get_drill_by_code_impl(code).await
    }

    async fn list_drills_with_pagination(
        &self,
        query: DrillListQuery,
    ) -> Result<DrillListResponse> {
        self.list_drills_with_pagination_impl(query).await
    }

    async fn update_drill(&self, id: i64, update: UpdateDrillRequest) -> Result<Option<Drill>> {
        self.update_drill_impl(id, update).await
    }

    async fn delete_drill(&self, id: i64) -> Result<bool> {
        self.delete_drill_impl(id).await
    }

    // 学员训练模块
    async fn assign_drill(&self, drill_id: i64, trainee_id: i64) -> Result<TraineeDrill> {
        self.assign_drill_impl(drill_id, trainee_id).await
    }

    async fn get_trainee_drill_by_id(&self, id: i64) -> Result<Option<TraineeDrill>> {
        self.get_trainee_drill_by_id_impl(id).await
    }

    async fn complete_trainee_drill(&self, id: i64) -> Result<Option<TraineeDrill>> {
        self.complete_trainee_drill_impl(id).await
    }

    async fn delete_trainee_drill(&self, id: i64) -> Result<Option<TraineeDrill>> {
        self.delete_trainee_drill_impl(id).await
    }

    async fn list_trainee_drills(
        &self,
        params: TraineeDrillListParams,
    ) -> Result<TraineeDrillListResponse> {
        self.list_trainee_drills_impl(params).await
    }

    // 题目模块
    async fn create_question(&self, drill_id: i64, content: QuestionContent) -> Result<Question> {
        self.create_question_impl(drill_id, content).await
    }

    async fn revise_question(
        &self,
        id: i64,
        content: QuestionContent,
    ) -> Result<Option<Question>> {
        self.revise_question_impl(id, content).await
    }

    async fn get_latest_question(&self, id: i64) -> Result<Option<Question>> {
        self.get_latest_question_impl(id).await
    }

    async fn get_question_version(&self, id: i64, version: i32) -> Result<Option<Question>> {
        self.get_question_version_impl(id, version).await
    }

    async fn list_drill_questions(&self, drill_id: i64) -> Result<Vec<Question>> {
        self.list_drill_questions_impl(drill_id).await
    }

    // 作答模块
    async fn submit_answer(
        &self,
        trainee_drill_id: i64,
        question_id: i64,
        answer: &str,
    ) -> Result<Option<Answered>> {
        self.submit_answer_impl(trainee_drill_id, question_id, answer)
            .await
    }

    async fn grade_answer(
        &self,
        id: i64,
        assessor_id: i64,
        score: f64,
        highlights: Option<String>,
    ) -> Result<Option<Answered>> {
        self.grade_answer_impl(id, assessor_id, score, highlights)
            .await
    }

    async fn get_answer_by_id(&self, id: i64) -> Result<Option<Answered>> {
        self.get_answer_by_id_impl(id).await
    }

    async fn list_answers(&self, trainee_drill_id: i64) -> Result<Vec<Answered>> {
        self.list_answers_impl(trainee_drill_id).await
    }

    async fn list_ungraded_answers(&self) -> Result<Vec<Answered>> {
        self.list_ungraded_answers_impl().await
    }

    async fn score_summary(&self, trainee_drill_id: i64) -> Result<ScoreSummary> {
        self.score_summary_impl(trainee_drill_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("grader-drills.db").unwrap(),
            "sqlite://grader-drills.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/drills").unwrap(),
            "postgres://u:p@localhost/drills"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nowhere").is_err());
    }
}
