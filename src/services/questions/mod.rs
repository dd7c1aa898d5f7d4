pub mod create;
pub mod get;
pub mod list;
pub mod revise;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::questions::entities::Question;
use crate::models::questions::requests::{CreateQuestionRequest, UpdateQuestionRequest};
use crate::models::users::entities::Role;
use crate::storage::Storage;

pub struct QuestionService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuestionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 列出训练下的题目
    pub async fn list_drill_questions(
        &self,
        request: &HttpRequest,
        drill_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_drill_questions(self, request, drill_id).await
    }

    // 在训练下创建题目
    pub async fn create_question(
        &self,
        request: &HttpRequest,
        drill_id: i64,
        question_data: CreateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_question(self, request, drill_id, question_data).await
    }

    // 获取题目最新版本
    pub async fn get_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_question(self, request, question_id, None).await
    }

    // 获取题目指定版本
    pub async fn get_question_version(
        &self,
        request: &HttpRequest,
        question_id: i64,
        version: i32,
    ) -> ActixResult<HttpResponse> {
        get::get_question(self, request, question_id, Some(version)).await
    }

    // 修改题目（生成新版本）
    pub async fn revise_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
        update_data: UpdateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        revise::revise_question(self, request, question_id, update_data).await
    }
}

/// 非评估员看不到正确答案和评分标准
pub(crate) fn redact_for_viewer(request: &HttpRequest, mut question: Question) -> Question {
    if !RequireJWT::has_role(request, Role::Assessor) {
        question.correct = None;
        question.rubric = None;
    }
    question
}
