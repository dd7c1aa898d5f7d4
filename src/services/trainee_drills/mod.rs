pub mod assign;
pub mod complete;
pub mod delete;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::trainee_drills::entities::TraineeDrill;
use crate::models::trainee_drills::requests::{AssignDrillRequest, TraineeDrillListParams};
use crate::models::users::entities::Role;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct TraineeDrillService {
    storage: Option<Arc<dyn Storage>>,
}

impl TraineeDrillService {
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

    // 列出学员训练
    pub async fn list_trainee_drills(
        &self,
        request: &HttpRequest,
        query: TraineeDrillListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_trainee_drills(self, request, query).await
    }

    // 分配训练
    pub async fn assign_drill(
        &self,
        request: &HttpRequest,
        assign_data: AssignDrillRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_drill(self, request, assign_data).await
    }

    // 获取学员训练
    pub async fn get_trainee_drill(
        &self,
        request: &HttpRequest,
        trainee_drill_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_trainee_drill(self, request, trainee_drill_id).await
    }

    // 标记完成
    pub async fn complete_trainee_drill(
        &self,
        request: &HttpRequest,
        trainee_drill_id: i64,
    ) -> ActixResult<HttpResponse> {
        complete::complete_trainee_drill(self, request, trainee_drill_id).await
    }

    // 删除学员训练（软删除）
    pub async fn delete_trainee_drill(
        &self,
        request: &HttpRequest,
        trainee_drill_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_trainee_drill(self, request, trainee_drill_id).await
    }
}

/// 访问学员训练的方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    /// 学员本人
    Owner,
    /// 评估员
    Assessor,
}

/// 加载学员训练并校验访问权限：学员本人或评估员
pub(crate) async fn load_accessible(
    storage: &dyn Storage,
    request: &HttpRequest,
    trainee_drill_id: i64,
) -> Result<(TraineeDrill, Access), HttpResponse> {
    let user = RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })?;

    let trainee_drill = match storage.get_trainee_drill_by_id(trainee_drill_id).await {
        Ok(Some(td)) => td,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TraineeDrillNotFound,
                "Trainee drill not found",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get trainee drill: {e}"),
                )),
            );
        }
    };

    if user.has_role(Role::Trainee) && trainee_drill.trainee_id == user.id {
        Ok((trainee_drill, Access::Owner))
    } else if user.has_role(Role::Assessor) {
        Ok((trainee_drill, Access::Assessor))
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You do not have access to this trainee drill",
        )))
    }
}
