pub mod grade;
pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::answered::requests::{GradeAnswerRequest, SubmitAnswerRequest};
use crate::storage::Storage;

pub struct AnswerService {
    storage: Option<Arc<dyn Storage>>,
}

impl AnswerService {
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

    // 提交作答
    pub async fn submit_answer(
        &self,
        request: &HttpRequest,
        trainee_drill_id: i64,
        answer_data: SubmitAnswerRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_answer(self, request, trainee_drill_id, answer_data).await
    }

    // 列出某次训练的作答
    pub async fn list_answers(
        &self,
        request: &HttpRequest,
        trainee_drill_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_answers(self, request, trainee_drill_id).await
    }

    // 得分汇总
    pub async fn score_summary(
        &self,
        request: &HttpRequest,
        trainee_drill_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::score_summary(self, request, trainee_drill_id).await
    }

    // 列出待评分作答
    pub async fn list_ungraded(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_ungraded(self, request).await
    }

    // 获取单条作答
    pub async fn get_answer(
        &self,
        request: &HttpRequest,
        answer_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::get_answer(self, request, answer_id).await
    }

    // 人工评分
    pub async fn grade_answer(
        &self,
        request: &HttpRequest,
        answer_id: i64,
        grade_data: GradeAnswerRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_answer(self, request, answer_id, grade_data).await
    }
}
