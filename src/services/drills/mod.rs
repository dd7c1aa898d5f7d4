pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::drills::requests::{CreateDrillRequest, DrillListParams, UpdateDrillRequest};
use crate::storage::Storage;

pub struct DrillService {
    storage: Option<Arc<dyn Storage>>,
}

impl DrillService {
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

    // 获取训练列表
    pub async fn list_drills(
        &self,
        request: &HttpRequest,
        query: DrillListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_drills(self, request, query).await
    }

    pub async fn create_drill(
        &self,
        request: &HttpRequest,
        drill_data: CreateDrillRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_drill(self, request, drill_data).await
    }

    // 根据 ID 获取训练
    pub async fn get_drill(&self, request: &HttpRequest, drill_id: i64) -> ActixResult<HttpResponse> {
        get::get_drill(self, request, drill_id).await
    }

    // 根据代码获取训练
    pub async fn get_drill_by_code(
        &self,
        request: &HttpRequest,
        code: &str,
    ) -> ActixResult<HttpResponse> {
        get::get_drill_by_code(self, request, code).await
    }

    // 更新训练
    pub async fn update_drill(
        &self,
        request: &HttpRequest,
        drill_id: i64,
        update_data: UpdateDrillRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_drill(self, request, drill_id, update_data).await
    }

    // 删除训练（软删除）
    pub async fn delete_drill(
        &self,
        request: &HttpRequest,
        drill_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_drill(self, request, drill_id).await
    }
}
