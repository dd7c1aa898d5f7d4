//! 作答与评分存储操作

use super::{SeaOrmStorage, db_error};
use crate::entity::answered::{ActiveModel, Column, Entity as AnsweredEntity};
use crate::entity::{drills, questions, trainee_drills};
use crate::errors::{GraderDrillsError, Result};
use crate::models::{
    answered::entities::{Answered, validate_score},
    trainee_drills::responses::ScoreSummary,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 提交作答
    ///
    /// 作答绑定题目的最新版本并快照评分标准和分值；选择题自动评分。
    /// 同一事务内更新进度，进度达到题目数时标记训练完成。
    /// 学员训练、训练（含已软删除）或题目不存在时返回 None。
    pub async fn submit_answer_impl(
        &self,
        trainee_drill_id: i64,
        question_id: i64,
        answer: &str,
    ) -> Result<Option<Answered>> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(trainee_drill) = trainee_drills::Entity::find_by_id(trainee_drill_id)
            .filter(trainee_drills::Column::DeletedAt.is_null())
            .one(&txn)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询学员训练失败: {e}")))?
        else {
            return Ok(None);
        };

        // 训练已软删除时不再接受作答
        let Some(drill) = drills::Entity::find_by_id(trainee_drill.drill_id)
            .filter(drills::Column::DeletedAt.is_null())
            .one(&txn)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询训练失败: {e}")))?
        else {
            return Ok(None);
        };

        let Some(question) = questions::Entity::find()
            .filter(questions::Column::Id.eq(question_id))
            .filter(questions::Column::DrillId.eq(drill.id))
            .order_by_desc(questions::Column::Version)
            .one(&txn)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询题目失败: {e}")))?
        else {
            return Ok(None);
        };

        let question = question.into_question();
        let autograde = question.autograde(answer);

        let model = ActiveModel {
            trainee_drill_id: Set(trainee_drill.id),
            question_id: Set(question.id),
            question_version: Set(question.version),
            autograded: Set(autograde.is_some()),
            graded: Set(autograde.is_some()),
            score: Set(autograde),
            max_points: Set(question.max_points),
            highlights: Set(None),
            rubric: Set(question.rubric.clone()),
            answer: Set(answer.to_string()),
            graded_by: Set(None),
            graded_at: Set(autograde.map(|_| now)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let answered = model
            .insert(&txn)
            .await
            .map_err(|e| db_error("提交作答失败", e))?;

        // 唯一索引保证每题只有一条作答
        let answered_count = AnsweredEntity::find()
            .filter(Column::TraineeDrillId.eq(trainee_drill.id))
            .count(&txn)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("统计作答数量失败: {e}")))?;

        let progress = (answered_count as i64).min(drill.num_questions as i64) as i32;
        let completed_at = match trainee_drill.completed_at {
            Some(ts) => Some(ts),
            None if progress >= drill.num_questions => Some(now),
            None => None,
        };

        trainee_drills::ActiveModel {
            id: Set(trainee_drill.id),
            progress: Set(progress),
            completed_at: Set(completed_at),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| GraderDrillsError::database_operation(format!("更新训练进度失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(answered.into_answered()))
    }

    /// 人工评分，分值需在 [0, maxPoints] 内
    pub async fn grade_answer_impl(
        &self,
        id: i64,
        assessor_id: i64,
        score: f64,
        highlights: Option<String>,
    ) -> Result<Option<Answered>> {
        let Some(existing) = AnsweredEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询作答失败: {e}")))?
        else {
            return Ok(None);
        };

        validate_score(score, existing.max_points)?;

        let now = chrono::Utc::now().timestamp();
        let mut model = ActiveModel {
            id: Set(id),
            graded: Set(true),
            score: Set(Some(score)),
            graded_by: Set(Some(assessor_id)),
            graded_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(highlights) = highlights {
            model.highlights = Set(Some(highlights));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("评分失败: {e}")))?;

        Ok(Some(result.into_answered()))
    }

    /// 通过 ID 获取作答
    pub async fn get_answer_by_id_impl(&self, id: i64) -> Result<Option<Answered>> {
        let result = AnsweredEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询作答失败: {e}")))?;

        Ok(result.map(|m| m.into_answered()))
    }

    /// 列出某次训练的作答
    pub async fn list_answers_impl(&self, trainee_drill_id: i64) -> Result<Vec<Answered>> {
        let rows = AnsweredEntity::find()
            .filter(Column::TraineeDrillId.eq(trainee_drill_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GraderDrillsError::database_operation(format!("查询作答列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_answered()).collect())
    }

    /// 列出待评分作答（不含已删除训练）
    pub async fn list_ungraded_answers_impl(&self) -> Result<Vec<Answered>> {
        let rows = AnsweredEntity::find()
            .inner_join(trainee_drills::Entity)
            .filter(Column::Graded.eq(false))
            .filter(trainee_drills::Column::DeletedAt.is_null())
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                GraderDrillsError::database_operation(format!("查询待评分作答失败: {e}"))
            })?;

        Ok(rows.into_iter().map(|m| m.into_answered()).collect())
    }

    /// 得分汇总：只统计已评分的作答
    pub async fn score_summary_impl(&self, trainee_drill_id: i64) -> Result<ScoreSummary> {
        let answers = self.list_answers_impl(trainee_drill_id).await?;

        let graded: Vec<&Answered> = answers.iter().filter(|a| a.graded).collect();
        Ok(ScoreSummary {
            trainee_drill_id,
            answered: answers.len() as i64,
            graded: graded.len() as i64,
            score: graded.iter().filter_map(|a| a.score).sum(),
            max_points: graded.iter().map(|a| a.max_points as i64).sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::drills::tests::new_drill;
    use crate::storage::sea_orm_storage::questions::tests::{multiple_choice, short_answer};
    use crate::storage::sea_orm_storage::users::tests::new_user;

    struct Fixture {
        storage: SeaOrmStorage,
        drill_id: i64,
        trainee_drill_id: i64,
        assessor_id: i64,
        choice_question: i64,
        open_question: i64,
    }

    async fn fixture() -> Fixture {
        let storage = SeaOrmStorage::in_memory().await;
        let trainee = storage
            .create_user_impl(new_user("trainee@example.com", true, false))
            .await
            .unwrap();
        let assessor = storage
            .create_user_impl(new_user("assessor@example.com", false, true))
            .await
            .unwrap();
        let drill = storage
            .create_drill_impl(new_drill("Closures", 2))
            .await
            .unwrap();
        let choice = storage
            .create_question_impl(drill.id, multiple_choice(1, 2))
            .await
            .unwrap();
        let open = storage
            .create_question_impl(drill.id, short_answer("Explain borrowing"))
            .await
            .unwrap();
        let td = storage.assign_drill_impl(drill.id, trainee.id).await.unwrap();

        Fixture {
            storage,
            drill_id: drill.id,
            trainee_drill_id: td.id,
            assessor_id: assessor.id,
            choice_question: choice.id,
            open_question: open.id,
        }
    }

    #[tokio::test]
    async fn test_deleted_drill_rejects_answers_and_completion() {
        let f = fixture().await;
        assert!(f.storage.delete_drill_impl(f.drill_id).await.unwrap());

        let answered = f
            .storage
            .submit_answer_impl(f.trainee_drill_id, f.choice_question, "1")
            .await
            .unwrap();
        assert!(answered.is_none());
        assert!(
            f.storage
                .list_answers_impl(f.trainee_drill_id)
                .await
                .unwrap()
                .is_empty()
        );

        let completed = f
            .storage
            .complete_trainee_drill_impl(f.trainee_drill_id)
            .await
            .unwrap();
        assert!(completed.is_none());
    }

    #[tokio::test]
    async fn test_multiple_choice_is_autograded() {
        let f = fixture().await;
        let answered = f
            .storage
            .submit_answer_impl(f.trainee_drill_id, f.choice_question, "1")
            .await
            .unwrap()
            .unwrap();
        assert!(answered.autograded);
        assert!(answered.graded);
        assert_eq!(answered.score, Some(2.0));
        assert_eq!(answered.question_version, 1);
    }

    #[tokio::test]
    async fn test_progress_and_completion() {
        let f = fixture().await;
        f.storage
            .submit_answer_impl(f.trainee_drill_id, f.choice_question, "0")
            .await
            .unwrap()
            .unwrap();
        let td = f
            .storage
            .get_trainee_drill_by_id_impl(f.trainee_drill_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(td.progress, 1);
        assert!(td.completed_at.is_none());

        let open = f
            .storage
            .submit_answer_impl(f.trainee_drill_id, f.open_question, "Borrowing lends access")
            .await
            .unwrap()
            .unwrap();
        assert!(!open.graded);
        assert_eq!(open.rubric.as_deref(), Some("Mentions borrowing"));

        let td = f
            .storage
            .get_trainee_drill_by_id_impl(f.trainee_drill_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(td.progress, 2);
        assert!(td.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_answer_twice_is_conflict() {
        let f = fixture().await;
        f.storage
            .submit_answer_impl(f.trainee_drill_id, f.open_question, "first")
            .await
            .unwrap();
        let err = f
            .storage
            .submit_answer_impl(f.trainee_drill_id, f.open_question, "second")
            .await
            .unwrap_err();
        assert!(matches!(err, GraderDrillsError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_unknown_targets_return_none() {
        let f = fixture().await;
        assert!(
            f.storage
                .submit_answer_impl(9999, f.open_question, "x")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            f.storage
                .submit_answer_impl(f.trainee_drill_id, 9999, "x")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            f.storage
                .grade_answer_impl(9999, f.assessor_id, 1.0, None)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_manual_grading_and_summary() {
        let f = fixture().await;
        f.storage
            .submit_answer_impl(f.trainee_drill_id, f.choice_question, "1")
            .await
            .unwrap();
        let open = f
            .storage
            .submit_answer_impl(f.trainee_drill_id, f.open_question, "answer")
            .await
            .unwrap()
            .unwrap();

        let ungraded = f.storage.list_ungraded_answers_impl().await.unwrap();
        assert_eq!(ungraded.len(), 1);
        assert_eq!(ungraded[0].id, open.id);

        let err = f
            .storage
            .grade_answer_impl(open.id, f.assessor_id, 6.0, None)
            .await
            .unwrap_err();
        assert!(matches!(err, GraderDrillsError::Validation(_)));

        let graded = f
            .storage
            .grade_answer_impl(open.id, f.assessor_id, 3.5, Some("good start".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert!(graded.graded);
        assert_eq!(graded.graded_by, Some(f.assessor_id));
        assert_eq!(graded.highlights.as_deref(), Some("good start"));
        assert!(f.storage.list_ungraded_answers_impl().await.unwrap().is_empty());

        let summary = f.storage.score_summary_impl(f.trainee_drill_id).await.unwrap();
        assert_eq!(summary.answered, 2);
        assert_eq!(summary.graded, 2);
        assert_eq!(summary.score, 5.5);
        assert_eq!(summary.max_points, 7);
    }
}
