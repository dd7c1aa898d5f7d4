//! 路径参数安全提取器
//!
//! 解析失败时返回统一格式的 400 响应，而不是 actix 默认的纯文本错误。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_param(name: &str, raw: &str) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid path parameter '{name}': {raw}"),
    ));
    InternalError::from_response(format!("invalid path parameter {name}"), response).into()
}

fn parse_param<T: std::str::FromStr>(req: &HttpRequest, name: &str) -> Result<T, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    raw.parse::<T>().map_err(|_| bad_param(name, raw))
}

/// 路径中的 `{id}`
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_param::<i64>(req, "id").map(SafeIDI64))
    }
}

/// 路径中的 `{version}`
#[derive(Debug, Clone, Copy)]
pub struct SafeVersionI32(pub i32);

impl FromRequest for SafeVersionI32 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_param::<i32>(req, "version").map(SafeVersionI32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_safe_id_parses_path() {
        let req = TestRequest::default()
            .param("id", "42")
            .to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_safe_id_rejects_garbage() {
        let req = TestRequest::default()
            .param("id", "abc")
            .to_http_request();
        assert!(SafeIDI64::extract(&req).await.is_err());
    }
}
