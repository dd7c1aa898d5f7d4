//! 题目存储操作
//!
//! 题目以 (id, version) 存储，修改只追加新版本，旧版本保持不变。

use super::{SeaOrmStorage, db_error};
use crate::entity::questions::{ActiveModel, Column, Entity as Questions, Model};
use crate::errors::{GraderDrillsError, Result};
use crate::models::questions::entities::{Question, QuestionContent};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

fn content_model(id: i64, version: i32, drill_id: i64, content: QuestionContent) -> Result<ActiveModel> {
    let answer_choices = match content.answer_choices {
        Some(choices) => Some(serde_json::to_string(&choices)?),
        None => None,
    };

    Ok(ActiveModel {
        id: Set(id),
        version: Set(version),
        drill_id: Set(drill_id),
        question_type: Set(content.question_type.to_string()),
        body: Set(content.body),
        code: Set(content.code),
        highlights: Set(content.highlights),
        rubric: Set(content.rubric),
        answer_choices: Set(answer_choices),
        correct: Set(content.correct),
        max_points: Set(content.max_points),
        created_at: Set(chrono::Utc::now().timestamp()),
    })
}

async fn latest_version<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>> {
    Questions::find()
        .filter(Column::Id.eq(id))
        .order_by_desc(Column::Version)
        .one(db)
        .await
        .map_err(|e| GraderDrillsError::database_operation(format!("查询题目失败: {e}")))
}

impl SeaOrmStorage {
    /// 创建题目：分配新 id（当前最大值 + 1），version = 1
    pub async fn create_question_impl(
        &self,
        drill_id: i64,
        content: QuestionContent,
    ) -> Result<Question> {
        content.validate()?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("开启事务失败: {e}")))?;

        let max_id = Questions::find()
            .select_only()
            .column_as(Column::Id.max(), "max_id")
            .into_tuple::<Option<i64>>()
            .one(&txn)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询题目编号失败: {e}")))?
            .flatten()
            .unwrap_or(0);

        let result = content_model(max_id + 1, 1, drill_id, content)?
            .insert(&txn)
            .await
            .map_err(|e| db_error("创建题目失败", e))?;

        txn.commit()
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_question())
    }

    /// 修改题目：追加 version = 最新版本 + 1 的新行
    pub async fn revise_question_impl(
        &self,
        id: i64,
        content: QuestionContent,
    ) -> Result<Option<Question>> {
        content.validate()?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(latest) = latest_version(&txn, id).await? else {
            return Ok(None);
        };

        let result = content_model(id, latest.version + 1, latest.drill_id, content)?
            .insert(&txn)
            .await
            .map_err(|e| db_error("修改题目失败", e))?;

        txn.commit()
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(result.into_question()))
    }

    /// 获取题目最新版本
    pub async fn get_latest_question_impl(&self, id: i64) -> Result<Option<Question>> {
        Ok(latest_version(&self.db, id)
            .await?
            .map(|m| m.into_question()))
    }

    /// 获取题目指定版本
    pub async fn get_question_version_impl(
        &self,
        id: i64,
        version: i32,
    ) -> Result<Option<Question>> {
        let result = Questions::find_by_id((id, version))
            .one(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.into_question()))
    }

    /// 列出训练下每道题的最新版本
    pub async fn list_drill_questions_impl(&self, drill_id: i64) -> Result<Vec<Question>> {
        let rows = Questions::find()
            .filter(Column::DrillId.eq(drill_id))
            .order_by_asc(Column::Id)
            .order_by_desc(Column::Version)
            .all(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询题目列表失败: {e}")))?;

        let mut questions: Vec<Question> = Vec::new();
        for row in rows {
            if questions.last().is_some_and(|q| q.id == row.id) {
                continue;
            }
            questions.push(row.into_question());
        }
        Ok(questions)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::questions::entities::QuestionType;
    use crate::storage::sea_orm_storage::drills::tests::new_drill;

    pub(crate) fn multiple_choice(correct: i32, max_points: i32) -> QuestionContent {
        QuestionContent {
            question_type: QuestionType::MultipleChoice,
            body: "Which keyword moves ownership into a closure?".to_string(),
            code: None,
            highlights: None,
            rubric: None,
            answer_choices: Some(vec![
                "ref".to_string(),
                "move".to_string(),
                "static".to_string(),
            ]),
            correct: Some(correct),
            max_points,
        }
    }

    pub(crate) fn short_answer(body: &str) -> QuestionContent {
        QuestionContent {
            question_type: QuestionType::ShortAnswer,
            body: body.to_string(),
            code: None,
            highlights: None,
            rubric: Some("Mentions borrowing".to_string()),
            answer_choices: None,
            correct: None,
            max_points: 5,
        }
    }

    #[tokio::test]
    async fn test_question_ids_are_allocated() {
        let storage = SeaOrmStorage::in_memory().await;
        let drill = storage.create_drill_impl(new_drill("Q", 2)).await.unwrap();

        let first = storage
            .create_question_impl(drill.id, short_answer("First"))
            .await
            .unwrap();
        let second = storage
            .create_question_impl(drill.id, multiple_choice(1, 2))
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.version, 1);
        assert_eq!(second.id, 2);
        assert_eq!(
            second.answer_choices.as_deref(),
            Some(&["ref".to_string(), "move".to_string(), "static".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_revision_appends_version() {
        let storage = SeaOrmStorage::in_memory().await;
        let drill = storage.create_drill_impl(new_drill("Q", 1)).await.unwrap();
        let original = storage
            .create_question_impl(drill.id, short_answer("Original"))
            .await
            .unwrap();

        let revised = storage
            .revise_question_impl(original.id, short_answer("Revised"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(revised.id, original.id);
        assert_eq!(revised.version, 2);

        let v1 = storage
            .get_question_version_impl(original.id, 1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(v1.body, "Original");

        let latest = storage
            .get_latest_question_impl(original.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.body, "Revised");

        let listed = storage.list_drill_questions_impl(drill.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].version, 2);

        assert!(
            storage
                .revise_question_impl(404, short_answer("Nope"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_invalid_question_is_rejected() {
        let storage = SeaOrmStorage::in_memory().await;
        let drill = storage.create_drill_impl(new_drill("Q", 1)).await.unwrap();
        let err = storage
            .create_question_impl(drill.id, multiple_choice(7, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, GraderDrillsError::Validation(_)));
    }
}
